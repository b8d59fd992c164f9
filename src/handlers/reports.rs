//! Report handlers

use axum::extract::State;

use super::response::ok;
use super::{ApiPath, ApiQuery, ApiResult, AppState, PageQuery};
use crate::middleware::Authenticated;

pub async fn participant_agenda(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(cpf): ApiPath<String>,
) -> ApiResult {
    let agenda = services.report_service.participant_agenda(&cpf).await?;
    ok("Participant agenda retrieved successfully.", agenda)
}

pub async fn most_used_suppliers(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult {
    let usage = services
        .report_service
        .most_used_suppliers(query.page_number, query.page_size)
        .await?;
    ok("Supplier usage retrieved successfully.", usage)
}

pub async fn participant_kinds(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult {
    let frequency = services
        .report_service
        .participant_kind_frequency(query.page_number, query.page_size)
        .await?;
    ok("Participant kind frequency retrieved successfully.", frequency)
}

pub async fn event_budget_balances(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult {
    let balances = services
        .report_service
        .event_budget_balances(query.page_number, query.page_size)
        .await?;
    ok("Budget balances retrieved successfully.", balances)
}
