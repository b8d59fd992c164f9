//! Participant handlers

use axum::extract::State;

use super::response::{created, ok};
use super::{ApiJson, ApiPath, ApiQuery, ApiResult, AppState, PageQuery};
use crate::middleware::Authenticated;
use crate::models::ParticipantRequest;

pub async fn list(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult {
    let page = services
        .participant_service
        .list(query.page_number, query.page_size)
        .await?;
    ok("Participants retrieved successfully.", page)
}

pub async fn get(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    let participant = services.participant_service.get_by_id(id).await?;
    ok("Participant retrieved successfully.", participant)
}

pub async fn create(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiJson(request): ApiJson<ParticipantRequest>,
) -> ApiResult {
    let participant = services.participant_service.create(request).await?;
    created("Participant created successfully.", participant)
}

pub async fn update(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<ParticipantRequest>,
) -> ApiResult {
    let participant = services.participant_service.update(id, request).await?;
    ok("Participant updated successfully.", participant)
}

pub async fn remove(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    services.participant_service.delete(id).await?;
    ok("Participant deleted successfully.", ())
}
