use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::ShareConfig;
use crate::survey::comparison::StaticReferenceSource;
use crate::survey::config::ScoringConfig;
use crate::survey::domain::{AnswerSheet, SubjectMetadata};
use crate::survey::exposure::{ExposureRecord, ExposureScorer};
use crate::survey::service::{ExposureSubmission, PerceptionSubmission, SurveyService};

pub(super) const BASE_URL: &str = "https://survey.example.org";

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 14, 5, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn exposure_answers(values: [&str; 4]) -> AnswerSheet {
    let [automation, skills, activities, conditions] = values;
    AnswerSheet::new()
        .with("automation", automation)
        .with("skills", skills)
        .with("activities", activities)
        .with("conditions", conditions)
}

pub(super) fn exposure_submission(job: &str, values: [&str; 4]) -> ExposureSubmission {
    ExposureSubmission {
        job: job.to_string(),
        department: Some("Direction des systèmes d'information".to_string()),
        answers: exposure_answers(values),
    }
}

pub(super) fn perception_submission(
    job: &str,
    values: [&str; 6],
    risk: &str,
) -> PerceptionSubmission {
    let keys = [
        "understanding",
        "quality",
        "conditions",
        "skills",
        "implementation",
        "tasks",
    ];
    let answers: AnswerSheet = keys.into_iter().zip(values).collect();
    PerceptionSubmission {
        job: job.to_string(),
        answers: answers.with("risk", risk),
    }
}

pub(super) fn exposure_record(job: &str, values: [&str; 4]) -> ExposureRecord {
    ExposureScorer::standard().score(
        SubjectMetadata::new(job, None, submitted_at()),
        &exposure_answers(values),
    )
}

pub(super) fn service() -> Arc<SurveyService<StaticReferenceSource>> {
    Arc::new(
        SurveyService::new(
            StaticReferenceSource::sample(),
            &ScoringConfig::standard(),
            ShareConfig::new(BASE_URL).expect("valid base url"),
        )
        .expect("standard service builds"),
    )
}

/// Token carried by a share URL, still percent-escaped.
pub(super) fn token_from(url: &str, param: &str) -> String {
    let marker = format!("?{param}=");
    let start = url.find(&marker).expect("url carries the parameter") + marker.len();
    url[start..].to_string()
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
