//! Event type handlers

use axum::extract::State;

use super::response::{created, ok};
use super::{ApiJson, ApiPath, ApiResult, AppState};
use crate::models::EventTypeRequest;

pub async fn list(State(services): State<AppState>) -> ApiResult {
    let event_types = services.event_type_service.list().await?;
    ok("Event types retrieved successfully.", event_types)
}

pub async fn get(State(services): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult {
    let event_type = services.event_type_service.get_by_id(id).await?;
    ok("Event type retrieved successfully.", event_type)
}

pub async fn create(
    State(services): State<AppState>,
    ApiJson(request): ApiJson<EventTypeRequest>,
) -> ApiResult {
    let event_type = services.event_type_service.create(request).await?;
    created("Event type created successfully.", event_type)
}

pub async fn update(
    State(services): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<EventTypeRequest>,
) -> ApiResult {
    let event_type = services.event_type_service.update(id, request).await?;
    ok("Event type updated successfully.", event_type)
}

pub async fn remove(State(services): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult {
    services.event_type_service.delete(id).await?;
    ok("Event type deleted successfully.", ())
}
