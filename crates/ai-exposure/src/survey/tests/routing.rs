use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::survey::router::{score_exposure_handler, survey_router};
use crate::survey::comparison::StaticReferenceSource;

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn score_handler_accepts_numeric_answers() {
    let submission = serde_json::from_value(json!({
        "job": "Assistant comptable",
        "answers": {"automation": 10, "skills": "5", "activities": 20, "conditions": "0"}
    }))
    .expect("submission parses");

    let response =
        score_exposure_handler::<StaticReferenceSource>(State(service()), axum::Json(submission))
            .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["record"]["global_score"], 46.75);
    assert_eq!(body["classification"]["level"], "moderate");
    assert_eq!(body["classification"]["color"], "yellow");
}

#[tokio::test]
async fn perception_route_scores_payloads() {
    let response = survey_router(service())
        .oneshot(post_json(
            "/api/v1/perception/score",
            json!({
                "job": "Responsable RH",
                "answers": {"understanding": "4", "quality": "7", "risk": "none"}
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["record"]["risk"]["horizon"], "none");
    assert_eq!(body["insights"]["risk_label"], "Aucun risque");
    assert_eq!(body["insights"]["radar"][1]["value"], 0);
}

#[tokio::test]
async fn compare_route_returns_full_report() {
    let response = survey_router(service())
        .oneshot(post_json(
            "/api/v1/exposure/compare",
            json!({
                "job": "Responsable formation",
                "answers": {
                    "automation": "5",
                    "skills": "10",
                    "activities": "10",
                    "conditions": "10"
                }
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body["report"]["ranking"]["entries"]
        .as_array()
        .expect("ranking entries");
    assert_eq!(entries.len(), 5);
    assert_eq!(body["report"]["heatmap"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["report"]["scatter"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["report"]["support_actions"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn shared_route_falls_back_to_home() {
    let response = survey_router(service())
        .oneshot(
            Request::get("/api/v1/shared?exposure=not%20base64")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"view": "home"}));
}

#[tokio::test]
async fn shared_route_renders_encoded_exposure() {
    let service = service();
    let scored = service.score_exposure_at(
        exposure_submission("Développeur", ["20", "20", "10", "5"]),
        submitted_at(),
    );
    let token = token_from(&scored.share_url, "exposure");

    let response = survey_router(service)
        .oneshot(
            Request::get(format!("/api/v1/shared?exposure={token}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["view"], "exposure");
    assert_eq!(body["record"]["global_score"], scored.record.global_score);
    assert_eq!(body["record"]["subject"]["job"], "Développeur");
}

#[tokio::test]
async fn questionnaire_route_rejects_unknown_names() {
    let router = survey_router(service());

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/questionnaires/exposure")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/v1/questionnaires/salary")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
