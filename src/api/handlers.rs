//! HTTP request handlers for the DROS scoring API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::LeaderboardEntry;
use crate::error::{EngineError, EngineResult};
use crate::export::to_csv_string;
use crate::models::{AuditRecord, PerformanceMetrics, SalesRecord};
use crate::store::{InMemoryRecordStore, leaderboard_from_store, score_employee};

use super::request::{LeaderboardRequest, ScoreRequest, effective_settings};
use super::response::{ApiError, ApiErrorResponse, LeaderboardResponse};
use super::state::AppState;

/// File name suggested for the CSV download.
pub const EXPORT_FILE_NAME: &str = "dros_leaderboard.csv";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .route("/leaderboard", post(leaderboard_handler))
        .route("/leaderboard/export", post(export_handler))
        .with_state(state)
}

/// Maps a body extraction failure to an API error.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message carries the field path
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::missing_content_type(),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs an engine failure and converts it to a response.
fn failure(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Scoring request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Loads the posted records into a store seeded with the configured rules.
fn request_store(
    state: &AppState,
    sales: Vec<SalesRecord>,
    audits: Vec<AuditRecord>,
) -> EngineResult<InMemoryRecordStore> {
    let store = InMemoryRecordStore::with_rules(state.config().point_weight_rules().to_vec());
    store.insert_sales(sales)?;
    store.insert_audits(audits)?;
    Ok(store)
}

/// Scores the leaderboard request against the configured contest.
fn rank_request(
    state: &AppState,
    request: LeaderboardRequest,
) -> EngineResult<Vec<LeaderboardEntry>> {
    let settings = effective_settings(state.config().contest(), request.minimum_transactions);
    let store = request_store(state, request.sales, request.audits)?;
    leaderboard_from_store(&store, &request.employees, request.window, &settings)
}

/// Handler for POST /score endpoint.
///
/// Scores one employee and returns the metrics with their audit trace.
async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing score request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_to_error(rejection, correlation_id).into_response(),
    };

    let start_time = Instant::now();
    let settings = effective_settings(state.config().contest(), request.minimum_transactions);
    let outcome = request_store(&state, request.sales, request.audits).and_then(|store| {
        score_employee(&store, &request.employee, request.window, &settings)
    });

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_code = %result.employee_code,
                total_transactions = result.metrics.total_transactions,
                weighted_error_rate = %result.metrics.weighted_error_rate,
                qualified = result.metrics.qualified,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Score completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => failure(err, correlation_id),
    }
}

/// Handler for POST /leaderboard endpoint.
async fn leaderboard_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaderboardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leaderboard request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_to_error(rejection, correlation_id).into_response(),
    };

    let start_time = Instant::now();
    let window = request.window;
    match rank_request(&state, request) {
        Ok(entries) => {
            info!(
                correlation_id = %correlation_id,
                employees = entries.len(),
                qualified = entries.iter().filter(|e| e.rank.is_some()).count(),
                duration_us = start_time.elapsed().as_micros(),
                "Leaderboard completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(LeaderboardResponse { window, entries }),
            )
                .into_response()
        }
        Err(err) => failure(err, correlation_id),
    }
}

/// Handler for POST /leaderboard/export endpoint.
///
/// Same input as `/leaderboard`; answers with the table as CSV.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaderboardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leaderboard export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_to_error(rejection, correlation_id).into_response(),
    };

    let csv = rank_request(&state, request).and_then(|entries| {
        let metrics: Vec<PerformanceMetrics> = entries.into_iter().map(|e| e.metrics).collect();
        to_csv_string(&metrics)
    });

    match csv {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                bytes = body.len(),
                "Leaderboard export completed successfully"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => failure(err, correlation_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, ContestSettings};
    use crate::models::PointWeightRule;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let loader = ConfigLoader::from_parts(
            ContestSettings::default(),
            vec![
                PointWeightRule::new("Serial Number", 2),
                PointWeightRule::new("Purchaser Info", 4),
            ],
        )
        .unwrap();
        AppState::new(loader)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_score_ignores_other_employees_records() {
        let router = create_router(test_state());
        let body = r#"{
            "employee": { "code": "jdoe" },
            "sales": [
                { "employee_code": "jdoe", "sold_at": "2024-03-05", "description": "Dros Fee" },
                { "employee_code": "asmith", "sold_at": "2024-03-05", "description": "Dros Fee" }
            ],
            "audits": [
                { "employee_code": "asmith", "error_location": "Serial Number", "audited_at": "2024-03-05" }
            ]
        }"#;

        let response = router.oneshot(post_json("/score", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["metrics"]["total_transactions"], 1);
        assert_eq!(json["metrics"]["minor_mistakes"], 0);
    }

    #[tokio::test]
    async fn test_score_minimum_override() {
        let router = create_router(test_state());
        let body = r#"{
            "employee": { "code": "jdoe" },
            "sales": [
                { "employee_code": "jdoe", "sold_at": "2024-03-05", "description": "Dros Fee" }
            ],
            "minimum_transactions": 1
        }"#;

        let response = router.oneshot(post_json("/score", body)).await.unwrap();

        let json = json_body(response).await;
        assert_eq!(json["metrics"]["qualified"], true);
        assert_eq!(json["metrics"]["disqualification_reason"], "Qualified");
    }

    #[tokio::test]
    async fn test_inverted_window_returns_invalid_window() {
        let router = create_router(test_state());
        let body = r#"{
            "employees": [],
            "window": { "start_date": "2024-03-31", "end_date": "2024-03-01" }
        }"#;

        let response = router.oneshot(post_json("/leaderboard", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["code"], "INVALID_WINDOW");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let router = create_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/score")
            .body(Body::from("{}"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_export_sets_csv_headers() {
        let router = create_router(test_state());

        let response = router
            .oneshot(post_json("/leaderboard/export", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(
            response.headers()[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .contains(EXPORT_FILE_NAME)
        );
    }
}
