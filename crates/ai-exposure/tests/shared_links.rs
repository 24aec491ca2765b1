use ai_exposure::config::ShareConfig;
use ai_exposure::survey::{
    ExposureSubmission, PerceptionSubmission, SharedQuery, SharedResult, StaticReferenceSource,
    ScoringConfig, SurveyService,
};
use ai_exposure::survey::{AnswerSheet, RiskHorizon};

fn service() -> SurveyService<StaticReferenceSource> {
    SurveyService::new(
        StaticReferenceSource::sample(),
        &ScoringConfig::standard(),
        ShareConfig::new("https://impact.example.fr/").expect("valid base url"),
    )
    .expect("service builds")
}

fn token(url: &str) -> String {
    url.split_once('=').map(|(_, token)| token.to_string()).expect("token present")
}

#[test]
fn exposure_share_link_restores_the_same_score() {
    let service = service();
    let scored = service.score_exposure(ExposureSubmission {
        job: "Développeur informatique".to_string(),
        department: Some("Numérique".to_string()),
        answers: AnswerSheet::new()
            .with("automation", "20")
            .with("skills", "10")
            .with("activities", "7")
            .with("conditions", "15"),
    });
    assert!(scored.share_url.starts_with("https://impact.example.fr?exposure="));

    let shared = service.resolve_shared(&SharedQuery {
        results: None,
        exposure: Some(token(&scored.share_url)),
    });
    let SharedResult::Exposure(shared) = shared else {
        panic!("expected exposure view");
    };
    assert_eq!(shared.record.subject.job, "Développeur informatique");
    assert_eq!(shared.record.subject.department.as_deref(), Some("Numérique"));
    assert_eq!(shared.record.answers(), scored.record.answers());
    assert_eq!(shared.record.global_score, scored.record.global_score);
    assert_eq!(shared.classification, scored.classification);
}

#[test]
fn perception_share_link_restores_answers_and_risk() {
    let service = service();
    let scored = service.score_perception(PerceptionSubmission {
        job: "Chargé de clientèle".to_string(),
        answers: AnswerSheet::new()
            .with("understanding", "2")
            .with("quality", "4")
            .with("risk", "short"),
    });

    let shared = service.resolve_shared(&SharedQuery {
        results: Some(token(&scored.share_url)),
        exposure: None,
    });
    let SharedResult::Perception(shared) = shared else {
        panic!("expected perception view");
    };
    assert_eq!(shared.record.dimensions, scored.record.dimensions);
    assert_eq!(shared.record.risk.horizon, RiskHorizon::ShortTerm);
    assert_eq!(shared.insights, scored.insights);
}

#[test]
fn empty_query_opens_home() {
    assert!(matches!(
        service().resolve_shared(&SharedQuery::default()),
        SharedResult::Home
    ));
}
