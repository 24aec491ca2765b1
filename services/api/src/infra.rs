use ai_exposure::config::ShareConfig;
use ai_exposure::error::AppError;
use ai_exposure::survey::{
    AnswerSheet, CsvReferenceSource, ReferenceProfile, ReferenceSource, ScoringConfig,
    StaticReferenceSource, SurveyService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference profiles backing the comparator: the bundled sample or a CSV import.
#[derive(Debug, Clone)]
pub(crate) enum ReferenceData {
    Sample(StaticReferenceSource),
    Csv(CsvReferenceSource),
}

impl ReferenceSource for ReferenceData {
    fn profiles(&self) -> &[ReferenceProfile] {
        match self {
            ReferenceData::Sample(source) => source.profiles(),
            ReferenceData::Csv(source) => source.profiles(),
        }
    }
}

pub(crate) fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let config = ScoringConfig::from_json(&raw)?;
            info!(path = %path.display(), "loaded scoring configuration override");
            Ok(config)
        }
        None => Ok(ScoringConfig::standard()),
    }
}

pub(crate) fn load_reference_data(path: Option<&Path>) -> Result<ReferenceData, AppError> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            let source = CsvReferenceSource::from_reader(file)?;
            info!(
                path = %path.display(),
                profiles = source.profiles().len(),
                "imported reference profiles"
            );
            Ok(ReferenceData::Csv(source))
        }
        None => Ok(ReferenceData::Sample(StaticReferenceSource::sample())),
    }
}

/// Sources shared by every command that builds a survey service.
#[derive(Debug, Clone, Default)]
pub(crate) struct ServiceSources {
    pub(crate) scoring_config: Option<PathBuf>,
    pub(crate) reference_csv: Option<PathBuf>,
}

pub(crate) fn build_service(
    sources: &ServiceSources,
    share: ShareConfig,
) -> Result<SurveyService<ReferenceData>, AppError> {
    let config = load_scoring_config(sources.scoring_config.as_deref())?;
    let references = load_reference_data(sources.reference_csv.as_deref())?;
    Ok(SurveyService::new(references, &config, share)?)
}

/// Parses a `question=value` CLI answer.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((question, value)) if !question.trim().is_empty() => {
            Ok((question.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected QUESTION=VALUE, got '{raw}'")),
    }
}

pub(crate) fn answer_sheet(answers: Vec<(String, String)>) -> AnswerSheet {
    answers.into_iter().collect()
}
