use super::domain::{AnswerSheet, DimensionScore, PerceptionDimension, RiskHorizon, SubjectMetadata};
use super::parsing::score_answer;
use super::questions::RISK_QUESTION_ID;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Answers at or above this value mark a domain the respondent feels confident about.
pub const CONFIDENT_THRESHOLD: u8 = 4;
/// Answers at or below this value mark a domain the respondent is uncertain about.
pub const UNCERTAIN_THRESHOLD: u8 = 2;

const HIGHLIGHT_LIMIT: usize = 2;

/// Risk horizon together with the literal token the respondent submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnswer {
    pub horizon: RiskHorizon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<String>,
}

impl RiskAnswer {
    /// Unrecognized tokens resolve to the neutral horizon but keep their literal value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let submitted = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let horizon = match submitted.as_deref() {
            Some(token) => RiskHorizon::from_token(token).unwrap_or_else(|| {
                debug!(token, "unrecognized risk horizon, using neutral default");
                RiskHorizon::DEFAULT
            }),
            None => RiskHorizon::DEFAULT,
        };

        Self { horizon, submitted }
    }

    pub fn is_recognized(&self) -> bool {
        self.submitted
            .as_deref()
            .and_then(RiskHorizon::from_token)
            .is_some()
    }
}

/// Scored perception questionnaire. No weighting is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionRecord {
    pub subject: SubjectMetadata,
    pub dimensions: Vec<DimensionScore<PerceptionDimension>>,
    pub risk: RiskAnswer,
}

impl PerceptionRecord {
    pub fn raw(&self, dimension: PerceptionDimension) -> u8 {
        self.dimensions
            .iter()
            .find(|score| score.dimension == dimension)
            .map(|score| score.raw)
            .unwrap_or_default()
    }

    /// Radar values in questionnaire order.
    pub fn radar(&self) -> Vec<(PerceptionDimension, u8)> {
        self.dimensions
            .iter()
            .map(|score| (score.dimension, score.raw))
            .collect()
    }

    /// Up to two highest domains scored at least 4; ties keep questionnaire order.
    pub fn confident_domains(&self) -> Vec<DimensionScore<PerceptionDimension>> {
        let mut confident: Vec<_> = self
            .dimensions
            .iter()
            .filter(|score| score.raw >= CONFIDENT_THRESHOLD)
            .copied()
            .collect();
        confident.sort_by(|left, right| right.raw.cmp(&left.raw));
        confident.truncate(HIGHLIGHT_LIMIT);
        confident
    }

    /// Up to two lowest domains scored at most 2; ties keep questionnaire order.
    pub fn uncertain_domains(&self) -> Vec<DimensionScore<PerceptionDimension>> {
        let mut uncertain: Vec<_> = self
            .dimensions
            .iter()
            .filter(|score| score.raw <= UNCERTAIN_THRESHOLD)
            .copied()
            .collect();
        uncertain.sort_by(|left, right| left.raw.cmp(&right.raw));
        uncertain.truncate(HIGHLIGHT_LIMIT);
        uncertain
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerceptionScorer;

impl PerceptionScorer {
    pub const fn new() -> Self {
        Self
    }

    pub fn score(&self, subject: SubjectMetadata, answers: &AnswerSheet) -> PerceptionRecord {
        let dimensions = PerceptionDimension::ordered()
            .into_iter()
            .map(|dimension| DimensionScore {
                dimension,
                raw: score_answer(answers, dimension.key(), PerceptionDimension::MAX_SCORE),
                max: PerceptionDimension::MAX_SCORE,
                weight: None,
            })
            .collect();

        PerceptionRecord {
            subject,
            dimensions,
            risk: RiskAnswer::from_raw(answers.get(RISK_QUESTION_ID)),
        }
    }
}
