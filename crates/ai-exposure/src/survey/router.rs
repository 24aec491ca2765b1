use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::comparison::ReferenceSource;
use super::service::{ExposureSubmission, PerceptionSubmission, SurveyService};
use super::share::SharedQuery;

/// Router exposing scoring, comparison and shared-link endpoints.
pub fn survey_router<S>(service: Arc<SurveyService<S>>) -> Router
where
    S: ReferenceSource + 'static,
{
    Router::new()
        .route("/api/v1/exposure/score", post(score_exposure_handler::<S>))
        .route("/api/v1/exposure/compare", post(compare_handler::<S>))
        .route("/api/v1/perception/score", post(score_perception_handler::<S>))
        .route("/api/v1/shared", get(shared_handler::<S>))
        .route(
            "/api/v1/questionnaires/:questionnaire",
            get(questionnaire_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn score_exposure_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(submission): axum::Json<ExposureSubmission>,
) -> Response
where
    S: ReferenceSource + 'static,
{
    let result = service.score_exposure(submission);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn score_perception_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(submission): axum::Json<PerceptionSubmission>,
) -> Response
where
    S: ReferenceSource + 'static,
{
    let result = service.score_perception(submission);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn compare_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    axum::Json(submission): axum::Json<ExposureSubmission>,
) -> Response
where
    S: ReferenceSource + 'static,
{
    let result = service.compare(submission);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn shared_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Query(query): Query<SharedQuery>,
) -> Response
where
    S: ReferenceSource + 'static,
{
    let result = service.resolve_shared(&query);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn questionnaire_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path(questionnaire): Path<String>,
) -> Response
where
    S: ReferenceSource + 'static,
{
    let questionnaire = match questionnaire.as_str() {
        "exposure" => service.exposure_questionnaire(),
        "perception" => service.perception_questionnaire(),
        other => {
            let payload = json!({
                "error": format!("unknown questionnaire '{other}'"),
            });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
    };

    (StatusCode::OK, axum::Json(questionnaire)).into_response()
}
