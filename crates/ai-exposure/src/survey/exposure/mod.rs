mod rules;

use super::config::{ExposureWeights, ScoringConfig, ScoringConfigError};
use super::domain::{AnswerSheet, DimensionScore, ExposureDimension, SubjectMetadata};
use super::parsing::score_answer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exposure answers after boundary parsing; every value lies in `0..=20`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureAnswers {
    pub automation: u8,
    pub skills: u8,
    pub activities: u8,
    pub conditions: u8,
}

impl ExposureAnswers {
    /// Missing, unparseable and out-of-range answers are read as 0. In-range
    /// values outside a question's option set (e.g. 7) are kept as submitted.
    pub fn from_sheet(answers: &AnswerSheet) -> Self {
        let read = |dimension: ExposureDimension| {
            score_answer(answers, dimension.key(), ExposureDimension::MAX_SCORE)
        };

        Self {
            automation: read(ExposureDimension::Automation),
            skills: read(ExposureDimension::Skills),
            activities: read(ExposureDimension::Activities),
            conditions: read(ExposureDimension::Conditions),
        }
    }

    pub const fn raw(&self, dimension: ExposureDimension) -> u8 {
        match dimension {
            ExposureDimension::Automation => self.automation,
            ExposureDimension::Skills => self.skills,
            ExposureDimension::Activities => self.activities,
            ExposureDimension::Conditions => self.conditions,
        }
    }
}

/// Scored exposure questionnaire. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRecord {
    pub subject: SubjectMetadata,
    pub dimensions: Vec<DimensionScore<ExposureDimension>>,
    pub global_score: f64,
}

impl ExposureRecord {
    pub fn raw(&self, dimension: ExposureDimension) -> u8 {
        self.dimensions
            .iter()
            .find(|score| score.dimension == dimension)
            .map(|score| score.raw)
            .unwrap_or_default()
    }

    pub fn answers(&self) -> ExposureAnswers {
        ExposureAnswers {
            automation: self.raw(ExposureDimension::Automation),
            skills: self.raw(ExposureDimension::Skills),
            activities: self.raw(ExposureDimension::Activities),
            conditions: self.raw(ExposureDimension::Conditions),
        }
    }

    /// Raw scores keyed by question id, in questionnaire order.
    pub fn scores_by_key(&self) -> BTreeMap<&'static str, u8> {
        self.dimensions
            .iter()
            .map(|score| (score.dimension.key(), score.raw))
            .collect()
    }
}

/// Turns exposure answers into per-dimension scores and the weighted 0-100 index.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureScorer {
    weights: ExposureWeights,
}

impl ExposureScorer {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self {
            weights: config.weights,
        })
    }

    pub const fn standard() -> Self {
        Self {
            weights: ExposureWeights::standard(),
        }
    }

    pub fn weights(&self) -> &ExposureWeights {
        &self.weights
    }

    pub fn score(&self, subject: SubjectMetadata, answers: &AnswerSheet) -> ExposureRecord {
        self.score_answers(subject, &ExposureAnswers::from_sheet(answers))
    }

    pub fn score_answers(
        &self,
        subject: SubjectMetadata,
        answers: &ExposureAnswers,
    ) -> ExposureRecord {
        let (dimensions, global_score) = rules::weigh_answers(answers, &self.weights);
        ExposureRecord {
            subject,
            dimensions,
            global_score,
        }
    }

    /// Global score for already-parsed answers, without building a record.
    pub fn global_score(&self, answers: &ExposureAnswers) -> f64 {
        rules::weigh_answers(answers, &self.weights).1
    }

    pub fn contribution(&self, dimension: ExposureDimension, raw: u8) -> f64 {
        rules::contribution(raw, self.weights.weight(dimension))
    }
}

impl Default for ExposureScorer {
    fn default() -> Self {
        Self::standard()
    }
}
