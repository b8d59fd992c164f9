//! User handlers

use axum::extract::State;

use super::response::{created, ok};
use super::{ApiJson, ApiResult, AppState};
use crate::middleware::Authenticated;
use crate::models::{LoginRequest, RegisterUserRequest};

pub async fn register(
    State(services): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> ApiResult {
    let profile = services.user_service.register(request).await?;
    created("User registered successfully.", profile)
}

pub async fn login(
    State(services): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult {
    let token = services.user_service.login(request).await?;
    ok("Login successful.", token)
}

pub async fn profile(State(services): State<AppState>, auth: Authenticated) -> ApiResult {
    let profile = services.user_service.profile(&auth)?;
    ok("Profile retrieved successfully.", profile)
}
