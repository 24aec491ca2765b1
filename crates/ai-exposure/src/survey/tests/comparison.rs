use super::common::*;
use crate::survey::classification::Level;
use crate::survey::comparison::{
    Comparator, IntensityBand, Quadrant, RecommendationTrack, ReferenceDimension,
    StaticReferenceSource, SUPPORT_ACTIONS,
};

fn comparator() -> Comparator<StaticReferenceSource> {
    Comparator::standard(StaticReferenceSource::sample())
}

#[test]
fn matched_respondent_replaces_reference_score_in_ranking() {
    let record = exposure_record("Développeur backend", ["10", "5", "20", "0"]);
    let ranking = comparator().ranking(&record);

    let jobs: Vec<(&str, f64, bool)> = ranking
        .entries
        .iter()
        .map(|entry| (entry.job.as_str(), entry.score, entry.is_user))
        .collect();
    assert_eq!(
        jobs,
        vec![
            ("Assistant comptable", 72.0, false),
            ("Responsable RH", 50.0, false),
            ("Chargé de clientèle", 50.0, false),
            ("Développeur informatique", 46.75, true),
            ("Technicien de maintenance", 30.0, false),
        ]
    );
    assert!(ranking.unranked_user.is_none());

    let user = ranking.user_entry().expect("respondent present");
    assert_eq!(user.rank, Some(4));
    assert_eq!(user.classification.level, Level::Moderate);
}

#[test]
fn unmatched_respondent_is_reported_without_rank() {
    let record = exposure_record("Infirmier", ["20", "20", "20", "20"]);
    let ranking = comparator().ranking(&record);

    assert_eq!(ranking.entries.len(), 5);
    assert!(ranking.entries.iter().all(|entry| !entry.is_user));
    assert_eq!(ranking.entries[0].job, "Développeur informatique");
    assert_eq!(ranking.entries[0].rank, Some(1));

    let user = ranking.unranked_user.as_ref().expect("respondent listed");
    assert_eq!(user.rank, None);
    assert_eq!(user.score, 100.0);
    assert_eq!(user.classification.level, Level::VeryHigh);
}

#[test]
fn blank_job_never_matches_a_reference() {
    let record = exposure_record("   ", ["5", "5", "10", "5"]);
    let comparator = comparator();
    assert_eq!(comparator.matched_profile(&record), None);

    let ranking = comparator.ranking(&record);
    let user = ranking.unranked_user.expect("respondent listed");
    assert_eq!(user.job, "Métier non spécifié");
}

#[test]
fn heatmap_covers_every_reference_and_support_column() {
    let record = exposure_record("développeur", ["0", "0", "0", "0"]);
    let heatmap = comparator().heatmap(&record);

    assert_eq!(heatmap.len(), 5);
    assert!(heatmap[0].is_user);
    assert!(heatmap[1..].iter().all(|row| !row.is_user));

    let developer = &heatmap[0];
    let labels: Vec<&str> = developer.cells.iter().map(|cell| cell.label).collect();
    assert_eq!(
        labels,
        vec!["Automatisation", "Compétences", "Activités", "Conditions", "Accompagnement"]
    );

    let automation = &developer.cells[0];
    assert_eq!(automation.dimension, ReferenceDimension::Automation);
    assert_eq!(automation.intensity_pct, 80.0);
    assert_eq!(automation.band, IntensityBand::Critical);
    assert_eq!(automation.color, "red");

    let technician = &heatmap[4];
    assert_eq!(technician.cells[0].band, IntensityBand::Low);
    assert_eq!(technician.cells[0].color, "blue");
}

#[test]
fn heatmap_shows_respondent_total_on_matched_row() {
    let record = exposure_record("Responsable paie", ["20", "20", "20", "20"]);
    let heatmap = comparator().heatmap(&record);

    let user_rows: Vec<_> = heatmap.iter().filter(|row| row.is_user).collect();
    assert_eq!(user_rows.len(), 1);
    assert_eq!(user_rows[0].job, "Responsable RH");
    assert_eq!(user_rows[0].total, 100.0);

    let support = user_rows[0].cells.last().expect("support column");
    assert_eq!(support.value, 12);

    let others = heatmap.iter().filter(|row| !row.is_user);
    assert!(others.clone().any(|row| row.job == "Chargé de clientèle" && row.total == 50.0));
    assert_eq!(others.count(), 4);
}

#[test]
fn scatter_places_respondent_at_assumed_support() {
    let record = exposure_record("Infirmier", ["10", "5", "20", "0"]);
    let scatter = comparator().scatter(&record);

    assert_eq!(scatter.len(), 6);
    let user = scatter.last().expect("respondent point");
    assert!(user.is_user);
    assert_eq!(user.support, 60.0);
    assert_eq!(user.impact, 46.75);
    assert_eq!(user.quadrant, Quadrant::WellSupportedLowImpact);

    assert_eq!(scatter[0].caption, "Développeur");
    assert_eq!(scatter[0].quadrant, Quadrant::WellSupportedHighImpact);
    assert_eq!(scatter[3].quadrant, Quadrant::UnderSupportedHighImpact);
    assert_eq!(scatter[4].quadrant, Quadrant::WellSupportedLowImpact);
}

#[test]
fn recommendations_follow_classification() {
    let report = comparator().compare(&exposure_record("Assistant", ["10", "5", "20", "0"]));

    assert_eq!(report.recommendation.track, RecommendationTrack::AwarenessAndAdjustments);
    assert_eq!(report.recommendation.text, "Sensibilisation, ajustements");

    let tracks: Vec<RecommendationTrack> = report
        .reference_recommendations
        .iter()
        .map(|recommendation| recommendation.track)
        .collect();
    assert_eq!(
        tracks,
        vec![
            RecommendationTrack::ReinforcedMonitoring,
            RecommendationTrack::ReinforcedMonitoring,
            RecommendationTrack::ReinforcedMonitoring,
            RecommendationTrack::ReinforcedMonitoring,
            RecommendationTrack::AwarenessAndAdjustments,
        ]
    );
    assert_eq!(report.support_actions, SUPPORT_ACTIONS.to_vec());
}
