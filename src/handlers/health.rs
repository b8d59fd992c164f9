//! Health check handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::response::ApiResponse;
use super::AppState;

pub async fn health(State(services): State<AppState>) -> impl IntoResponse {
    let status = services.health_check().await;
    let code = if status.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let message = if status.is_healthy() {
        "Service is healthy.".to_string()
    } else {
        status.get_issues().join("; ")
    };

    let mut body = ApiResponse::success(code, message, status);
    body.is_success = code == StatusCode::OK;
    (code, Json(body))
}
