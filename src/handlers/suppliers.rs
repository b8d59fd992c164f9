//! Supplier handlers

use axum::extract::State;

use super::response::{created, ok};
use super::{ApiJson, ApiPath, ApiResult, AppState};
use crate::models::SupplierRequest;

pub async fn list(State(services): State<AppState>) -> ApiResult {
    let suppliers = services.supplier_service.list().await?;
    ok("Suppliers retrieved successfully.", suppliers)
}

pub async fn get(State(services): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult {
    let supplier = services.supplier_service.get_by_id(id).await?;
    ok("Supplier retrieved successfully.", supplier)
}

pub async fn create(
    State(services): State<AppState>,
    ApiJson(request): ApiJson<SupplierRequest>,
) -> ApiResult {
    let supplier = services.supplier_service.create(request).await?;
    created("Supplier created successfully.", supplier)
}

pub async fn update(
    State(services): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<SupplierRequest>,
) -> ApiResult {
    let supplier = services.supplier_service.update(id, request).await?;
    ok("Supplier updated successfully.", supplier)
}

pub async fn remove(State(services): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult {
    services.supplier_service.delete(id).await?;
    ok("Supplier deleted successfully.", ())
}
