//! AI-impact survey: questionnaires, scoring, classification, comparison and
//! shareable result links.

pub mod classification;
pub mod comparison;
pub mod config;
pub mod domain;
pub mod exposure;
pub mod insights;
mod parsing;
pub mod perception;
pub mod questions;
pub mod router;
pub mod service;
pub mod share;

#[cfg(test)]
mod tests;

pub use classification::{Classification, Classifier, Level, ScoreScale};
pub use comparison::{
    Comparator, ComparisonReport, CsvReferenceSource, ReferenceError, ReferenceProfile,
    ReferenceSource, StaticReferenceSource,
};
pub use config::{ExposureWeights, LevelThresholds, ScoringConfig, ScoringConfigError};
pub use domain::{
    AnswerSheet, DimensionScore, ExposureDimension, PerceptionDimension, RiskHorizon,
    SubjectMetadata,
};
pub use exposure::{ExposureAnswers, ExposureRecord, ExposureScorer};
pub use insights::{ExposureInsights, PerceptionInsights};
pub use perception::{PerceptionRecord, PerceptionScorer, RiskAnswer};
pub use questions::{Questionnaire, QuestionnaireError};
pub use router::survey_router;
pub use service::{
    ComparisonResult, ExposureResult, ExposureSubmission, PerceptionResult, PerceptionSubmission,
    SharedResult, SurveyService, SurveyServiceError,
};
pub use share::{ShareError, SharedQuery, SharedView};
