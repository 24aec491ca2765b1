use super::domain::{ExposureDimension, PerceptionDimension, RiskHorizon};
use serde::Serialize;

/// Question id carrying the risk-horizon answer of the perception questionnaire.
pub const RISK_QUESTION_ID: &str = "risk";

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub token: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaleStep {
    pub value: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    Scale { steps: Vec<ScaleStep> },
    Choice { options: Vec<QuestionOption> },
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Respondent-facing label of a captured answer, if it is one of the offered values.
    pub fn label_for(&self, answer: &str) -> Option<&'static str> {
        let answer = answer.trim();
        match &self.kind {
            QuestionKind::Choice { options } => options
                .iter()
                .find(|option| option.token == answer)
                .map(|option| option.label),
            QuestionKind::Scale { steps } => {
                let value = answer.parse::<u8>().ok()?;
                steps
                    .iter()
                    .find(|step| step.value == value)
                    .and_then(|step| step.label)
            }
        }
    }

    /// Scores a respondent can actually select for this question.
    pub fn allowed_scores(&self) -> Vec<u8> {
        match &self.kind {
            QuestionKind::Scale { steps } => steps.iter().map(|step| step.value).collect(),
            QuestionKind::Choice { options } => {
                options.iter().filter_map(|option| option.score).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn exposure() -> Self {
        Self {
            questions: exposure_questions(),
        }
    }

    pub fn perception() -> Self {
        Self {
            questions: perception_questions(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn option_label(&self, id: &str, answer: &str) -> Option<&'static str> {
        self.question(id)?.label_for(answer)
    }

    /// Checks that every id read by a scorer maps to exactly one question.
    pub fn ensure_covers<'a, I>(&self, ids: I) -> Result<(), QuestionnaireError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in ids {
            match self.questions.iter().filter(|question| question.id == id).count() {
                0 => return Err(QuestionnaireError::MissingQuestion(id.to_string())),
                1 => {}
                _ => return Err(QuestionnaireError::DuplicateQuestion(id.to_string())),
            }
        }
        Ok(())
    }

    pub fn validate_exposure(&self) -> Result<(), QuestionnaireError> {
        self.ensure_covers(ExposureDimension::ordered().map(ExposureDimension::key))
    }

    pub fn validate_perception(&self) -> Result<(), QuestionnaireError> {
        self.ensure_covers(PerceptionDimension::ordered().map(PerceptionDimension::key))?;
        self.ensure_covers([RISK_QUESTION_ID])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("no question configured for '{0}'")]
    MissingQuestion(String),
    #[error("question '{0}' is configured more than once")]
    DuplicateQuestion(String),
}

fn scored(token: &'static str, label: &'static str, score: u8) -> QuestionOption {
    QuestionOption {
        token,
        label,
        score: Some(score),
    }
}

fn labelled(value: u8, label: &'static str) -> ScaleStep {
    ScaleStep {
        value,
        label: Some(label),
    }
}

fn likert(id: &'static str, title: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        title,
        prompt,
        kind: QuestionKind::Scale {
            steps: (0..=PerceptionDimension::MAX_SCORE)
                .map(|value| ScaleStep { value, label: None })
                .collect(),
        },
    }
}

fn exposure_questions() -> Vec<Question> {
    vec![
        Question {
            id: ExposureDimension::Automation.key(),
            title: ExposureDimension::Automation.label(),
            prompt: "Parmi les tâches de votre métier, combien sont touchées par des outils d'IA (automatisation, assistance, recommandation, etc.) ?",
            kind: QuestionKind::Choice {
                options: vec![
                    scored("0", "Aucune tâche automatisée", 0),
                    scored("5", "1 ou 2 tâches marginales", 5),
                    scored("10", "Plusieurs tâches partiellement automatisées", 10),
                    scored("20", "Une majorité des tâches sont ou vont être automatisées", 20),
                ],
            },
        },
        Question {
            id: ExposureDimension::Skills.key(),
            title: ExposureDimension::Skills.label(),
            prompt: "Quelle est l'évolution des compétences nécessaires dans votre métier liée à l'introduction d'outils IA ?",
            kind: QuestionKind::Choice {
                options: vec![
                    scored("0", "Pas d'évolution", 0),
                    scored("5", "Une légère montée en compétences est requise", 5),
                    scored(
                        "10",
                        "De nouvelles compétences numériques ou liées à des modèles IA sont nécessaires",
                        10,
                    ),
                    scored("20", "Les compétences-clés ont complètement changé", 20),
                ],
            },
        },
        Question {
            id: ExposureDimension::Activities.key(),
            title: ExposureDimension::Activities.label(),
            prompt: "Votre activité a-t-elle été modifiée par l'intégration de l'IA ?",
            kind: QuestionKind::Choice {
                options: vec![
                    scored("0", "Aucune modification", 0),
                    scored(
                        "10",
                        "Quelques activités ont été ajoutées ou déléguées à des outils",
                        10,
                    ),
                    scored(
                        "20",
                        "Vos missions ont été réorientées ou votre rôle redéfini",
                        20,
                    ),
                ],
            },
        },
        Question {
            id: ExposureDimension::Conditions.key(),
            title: ExposureDimension::Conditions.label(),
            prompt: "Depuis l'introduction d'outils IA, comment percevez-vous vos conditions de travail ?",
            kind: QuestionKind::Scale {
                steps: vec![
                    labelled(0, "Aucun ressenti de changement"),
                    labelled(5, "Ressenti très légèrement positif"),
                    labelled(10, "Ressenti neutre ou mitigé"),
                    labelled(15, "Augmentation modérée de la pression/charge"),
                    labelled(20, "Forte augmentation de la pression/surveillance"),
                ],
            },
        },
    ]
}

fn perception_questions() -> Vec<Question> {
    vec![
        likert(
            PerceptionDimension::Understanding.key(),
            PerceptionDimension::Understanding.label(),
            "Je comprends les usages actuels de l'Intelligence Artificielle (IA) dans mon métier.",
        ),
        likert(
            PerceptionDimension::Quality.key(),
            PerceptionDimension::Quality.label(),
            "L'IA améliore la qualité ou l'efficacité de mon travail.",
        ),
        likert(
            PerceptionDimension::Conditions.key(),
            PerceptionDimension::Conditions.label(),
            "L'IA améliore mes conditions de travail.",
        ),
        likert(
            PerceptionDimension::Skills.key(),
            PerceptionDimension::Skills.label(),
            "Pensez-vous que l'IA va transformer les compétences requises dans votre poste dans les 2 à 3 prochaines années ?",
        ),
        likert(
            PerceptionDimension::Implementation.key(),
            PerceptionDimension::Implementation.label(),
            "Facilité de mise en œuvre de l'IA au sein de votre métier",
        ),
        likert(
            PerceptionDimension::Tasks.key(),
            PerceptionDimension::Tasks.label(),
            "Proportion de vos tâches quotidiennes possiblement impactées par l'IA",
        ),
        Question {
            id: RISK_QUESTION_ID,
            title: "Risque pour l'emploi",
            prompt: "Percevez-vous un risque pour votre emploi lié à l'IA ?",
            kind: QuestionKind::Choice {
                options: vec![
                    QuestionOption {
                        token: RiskHorizon::NoRisk.token(),
                        label: "Non",
                        score: None,
                    },
                    QuestionOption {
                        token: RiskHorizon::ShortTerm.token(),
                        label: "Oui court terme",
                        score: None,
                    },
                    QuestionOption {
                        token: RiskHorizon::MediumTerm.token(),
                        label: "Oui 3-5 ans",
                        score: None,
                    },
                    QuestionOption {
                        token: RiskHorizon::LongTerm.token(),
                        label: "Oui au delà de 5 ans",
                        score: None,
                    },
                ],
            },
        },
    ]
}
