use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ShareConfig;

use super::classification::{Classification, Classifier};
use super::comparison::{Comparator, ComparisonReport, ReferenceSource};
use super::config::{ScoringConfig, ScoringConfigError};
use super::domain::{AnswerSheet, SubjectMetadata};
use super::exposure::{ExposureRecord, ExposureScorer};
use super::insights::{
    exposure_insights, perception_insights, ExposureInsights, PerceptionInsights,
};
use super::perception::{PerceptionRecord, PerceptionScorer};
use super::questions::{Questionnaire, QuestionnaireError};
use super::share::{
    encode_exposure, encode_perception, resolve_shared_view, share_url, SharedQuery, SharedView,
    EXPOSURE_PARAM, RESULTS_PARAM,
};

/// Exposure questionnaire as posted by a respondent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExposureSubmission {
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerceptionSubmission {
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExposureResult {
    pub record: ExposureRecord,
    pub classification: Classification,
    pub insights: ExposureInsights,
    pub share_url: String,
}

/// Radar profile and risk horizon; perception answers are never folded into one score.
#[derive(Debug, Clone, Serialize)]
pub struct PerceptionResult {
    pub record: PerceptionRecord,
    pub insights: PerceptionInsights,
    pub share_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub record: ExposureRecord,
    pub report: ComparisonReport,
}

/// Page a shared link opens on, fully rendered.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SharedResult {
    Home,
    Perception(PerceptionResult),
    Exposure(ExposureResult),
}

#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringConfigError),
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

/// Service composing the scorers, classifier and comparator behind one config.
pub struct SurveyService<S> {
    exposure: ExposureScorer,
    perception: PerceptionScorer,
    classifier: Classifier,
    comparator: Comparator<S>,
    exposure_questions: Questionnaire,
    perception_questions: Questionnaire,
    share: ShareConfig,
}

impl<S> SurveyService<S>
where
    S: ReferenceSource + 'static,
{
    pub fn new(
        source: S,
        config: &ScoringConfig,
        share: ShareConfig,
    ) -> Result<Self, SurveyServiceError> {
        let exposure_questions = Questionnaire::exposure();
        exposure_questions.validate_exposure()?;
        let perception_questions = Questionnaire::perception();
        perception_questions.validate_perception()?;

        Ok(Self {
            exposure: ExposureScorer::new(config)?,
            perception: PerceptionScorer::new(),
            classifier: Classifier::new(config.level_thresholds)?,
            comparator: Comparator::new(source, config)?,
            exposure_questions,
            perception_questions,
            share,
        })
    }

    pub fn exposure_questionnaire(&self) -> &Questionnaire {
        &self.exposure_questions
    }

    pub fn perception_questionnaire(&self) -> &Questionnaire {
        &self.perception_questions
    }

    pub fn comparator(&self) -> &Comparator<S> {
        &self.comparator
    }

    pub fn score_exposure(&self, submission: ExposureSubmission) -> ExposureResult {
        self.score_exposure_at(submission, Utc::now())
    }

    pub fn score_exposure_at(
        &self,
        submission: ExposureSubmission,
        submitted_at: DateTime<Utc>,
    ) -> ExposureResult {
        let subject = SubjectMetadata::new(submission.job, submission.department, submitted_at);
        let record = self.exposure.score(subject, &submission.answers);
        self.exposure_result(record)
    }

    pub fn score_perception(&self, submission: PerceptionSubmission) -> PerceptionResult {
        self.score_perception_at(submission, Utc::now())
    }

    pub fn score_perception_at(
        &self,
        submission: PerceptionSubmission,
        submitted_at: DateTime<Utc>,
    ) -> PerceptionResult {
        let subject = SubjectMetadata::new(submission.job, None, submitted_at);
        let record = self.perception.score(subject, &submission.answers);
        self.perception_result(record)
    }

    /// Scores the submission and places it among the reference profiles.
    pub fn compare(&self, submission: ExposureSubmission) -> ComparisonResult {
        let subject = SubjectMetadata::new(submission.job, submission.department, Utc::now());
        let record = self.exposure.score(subject, &submission.answers);
        let report = self.comparator.compare(&record);
        ComparisonResult { record, report }
    }

    pub fn resolve_shared(&self, query: &SharedQuery) -> SharedResult {
        match resolve_shared_view(query, &self.exposure, &self.perception) {
            SharedView::Home => SharedResult::Home,
            SharedView::Perception(record) => {
                SharedResult::Perception(self.perception_result(record))
            }
            SharedView::Exposure(record) => SharedResult::Exposure(self.exposure_result(record)),
        }
    }

    fn exposure_result(&self, record: ExposureRecord) -> ExposureResult {
        let insights = exposure_insights(&record, &self.exposure, &self.classifier);
        let share_url = share_url(
            self.share.base_url(),
            EXPOSURE_PARAM,
            &encode_exposure(&record),
        );

        ExposureResult {
            classification: insights.classification,
            insights,
            share_url,
            record,
        }
    }

    fn perception_result(&self, record: PerceptionRecord) -> PerceptionResult {
        let share_url = share_url(
            self.share.base_url(),
            RESULTS_PARAM,
            &encode_perception(&record),
        );

        PerceptionResult {
            insights: perception_insights(&record),
            share_url,
            record,
        }
    }
}
