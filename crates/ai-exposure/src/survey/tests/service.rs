use super::common::*;
use crate::survey::classification::Level;
use crate::survey::domain::{ExposureDimension, PerceptionDimension, RiskHorizon};
use crate::survey::insights::{NO_CONFIDENT_DOMAIN, NO_UNCERTAIN_DOMAIN};

#[test]
fn exposure_result_carries_insights_and_share_url() {
    let result = service().score_exposure_at(
        exposure_submission("Assistant comptable", ["10", "5", "20", "0"]),
        submitted_at(),
    );

    assert_eq!(result.record.global_score, 46.75);
    assert_eq!(result.classification.level, Level::Moderate);
    assert_eq!(result.classification.label, "Modéré");
    assert_eq!(result.insights.interpretation, Level::Moderate.interpretation());
    assert!(result.share_url.starts_with(&format!("{BASE_URL}?exposure=")));

    let contributions: Vec<f64> = result
        .insights
        .contributions
        .iter()
        .map(|entry| entry.contribution)
        .collect();
    assert_eq!(contributions, vec![17.5, 6.3, 23.0, 0.0]);

    let most: Vec<ExposureDimension> = result
        .insights
        .most_impacted
        .iter()
        .map(|entry| entry.dimension)
        .collect();
    assert_eq!(most, vec![ExposureDimension::Activities, ExposureDimension::Automation]);

    let least: Vec<ExposureDimension> = result
        .insights
        .least_impacted
        .iter()
        .map(|entry| entry.dimension)
        .collect();
    assert_eq!(least, vec![ExposureDimension::Conditions, ExposureDimension::Skills]);
}

#[test]
fn blank_job_and_department_use_placeholders() {
    let mut submission = exposure_submission("  ", ["0", "0", "0", "0"]);
    submission.department = Some(String::new());

    let result = service().score_exposure_at(submission, submitted_at());
    assert_eq!(result.insights.job, "Métier non spécifié");
    assert_eq!(result.insights.department, "Département non spécifié");
    assert_eq!(result.classification.level, Level::Low);
}

#[test]
fn perception_result_highlights_domains_and_risk() {
    let result = service().score_perception_at(
        perception_submission("Responsable RH", ["5", "4", "3", "1", "2", "4"], "short"),
        submitted_at(),
    );

    assert_eq!(result.record.risk.horizon, RiskHorizon::ShortTerm);
    assert_eq!(result.insights.risk_label, "Court terme");

    let confident: Vec<PerceptionDimension> = result
        .insights
        .confident
        .iter()
        .map(|entry| entry.dimension)
        .collect();
    assert_eq!(
        confident,
        vec![PerceptionDimension::Understanding, PerceptionDimension::Quality]
    );
    assert!(result.insights.confident_fallback.is_none());

    let uncertain: Vec<PerceptionDimension> = result
        .insights
        .uncertain
        .iter()
        .map(|entry| entry.dimension)
        .collect();
    assert_eq!(
        uncertain,
        vec![PerceptionDimension::Skills, PerceptionDimension::Implementation]
    );
    assert_eq!(result.insights.radar.len(), 6);
    assert!(result.share_url.starts_with(&format!("{BASE_URL}?results=")));
}

#[test]
fn neutral_perception_uses_fallback_sentences() {
    let result = service().score_perception_at(
        perception_submission("Juriste", ["3", "3", "3", "3", "3", "3"], ""),
        submitted_at(),
    );

    assert!(result.insights.confident.is_empty());
    assert!(result.insights.uncertain.is_empty());
    assert_eq!(result.insights.confident_fallback, Some(NO_CONFIDENT_DOMAIN));
    assert_eq!(result.insights.uncertain_fallback, Some(NO_UNCERTAIN_DOMAIN));
    assert_eq!(result.record.risk.horizon, RiskHorizon::MediumTerm);
    assert!(result.record.risk.submitted.is_none());
}

#[test]
fn perception_results_carry_no_composite_score() {
    let result = service().score_perception_at(
        perception_submission("Juriste", ["5", "5", "5", "5", "5", "5"], "short"),
        submitted_at(),
    );

    let json = serde_json::to_value(&result).expect("result serializes");
    assert!(json.get("classification").is_none());
    assert!(json["record"].get("global_score").is_none());
    assert_eq!(json["insights"]["risk"], "short");
    assert_eq!(result.insights.radar.len(), 6);
}

#[test]
fn compare_scores_and_ranks_in_one_call() {
    let result = service().compare(exposure_submission("Technicien", ["20", "20", "20", "20"]));

    assert_eq!(result.record.global_score, 100.0);
    let user = result.report.ranking.user_entry().expect("respondent ranked");
    assert_eq!(user.job, "Technicien de maintenance");
    assert_eq!(user.rank, Some(1));
    assert_eq!(user.classification.level, Level::VeryHigh);
}
