use super::classification::{Classification, Classifier, ScoreScale};
use super::domain::{DimensionScore, ExposureDimension, PerceptionDimension, RiskHorizon};
use super::exposure::{ExposureRecord, ExposureScorer};
use super::perception::PerceptionRecord;
use serde::Serialize;

const HIGHLIGHT_LIMIT: usize = 2;

pub const NO_CONFIDENT_DOMAIN: &str = "Aucun domaine avec un score élevé (≥4)";
pub const NO_UNCERTAIN_DOMAIN: &str = "Aucun domaine avec un score faible (≤2)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionContribution {
    pub dimension: ExposureDimension,
    pub label: &'static str,
    pub raw: u8,
    pub max: u8,
    pub weight: u8,
    /// Points contributed to the global score, one decimal.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureInsights {
    pub job: String,
    pub department: String,
    pub global_score: f64,
    pub classification: Classification,
    pub interpretation: &'static str,
    pub contributions: Vec<DimensionContribution>,
    pub most_impacted: Vec<DimensionContribution>,
    pub least_impacted: Vec<DimensionContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainHighlight {
    pub dimension: PerceptionDimension,
    pub label: &'static str,
    pub value: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerceptionInsights {
    pub job: String,
    pub radar: Vec<DomainHighlight>,
    pub confident: Vec<DomainHighlight>,
    pub uncertain: Vec<DomainHighlight>,
    /// Sentence shown in place of an empty confident list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confident_fallback: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertain_fallback: Option<&'static str>,
    pub risk: RiskHorizon,
    pub risk_label: &'static str,
}

pub fn exposure_insights(
    record: &ExposureRecord,
    scorer: &ExposureScorer,
    classifier: &Classifier,
) -> ExposureInsights {
    let contributions: Vec<DimensionContribution> = record
        .dimensions
        .iter()
        .map(|score| DimensionContribution {
            dimension: score.dimension,
            label: score.dimension.label(),
            raw: score.raw,
            max: score.max,
            weight: scorer.weights().weight(score.dimension),
            contribution: one_decimal(scorer.contribution(score.dimension, score.raw)),
        })
        .collect();

    let mut most_impacted = contributions.clone();
    most_impacted.sort_by(|left, right| right.raw.cmp(&left.raw));
    most_impacted.truncate(HIGHLIGHT_LIMIT);

    let mut least_impacted = contributions.clone();
    least_impacted.sort_by(|left, right| left.raw.cmp(&right.raw));
    least_impacted.truncate(HIGHLIGHT_LIMIT);

    let classification = classifier.classification(record.global_score, ScoreScale::Percent);

    ExposureInsights {
        job: record.subject.display_job().to_string(),
        department: record.subject.display_department().to_string(),
        global_score: record.global_score,
        interpretation: classification.level.interpretation(),
        classification,
        contributions,
        most_impacted,
        least_impacted,
    }
}

pub fn perception_insights(record: &PerceptionRecord) -> PerceptionInsights {
    let confident: Vec<_> = record.confident_domains().iter().map(highlight).collect();
    let uncertain: Vec<_> = record.uncertain_domains().iter().map(highlight).collect();

    PerceptionInsights {
        job: record.subject.display_job().to_string(),
        radar: record.dimensions.iter().map(highlight).collect(),
        confident_fallback: confident.is_empty().then_some(NO_CONFIDENT_DOMAIN),
        uncertain_fallback: uncertain.is_empty().then_some(NO_UNCERTAIN_DOMAIN),
        confident,
        uncertain,
        risk: record.risk.horizon,
        risk_label: record.risk.horizon.label(),
    }
}

fn highlight(score: &DimensionScore<PerceptionDimension>) -> DomainHighlight {
    DomainHighlight {
        dimension: score.dimension,
        label: score.dimension.label(),
        value: score.raw,
        max: score.max,
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
