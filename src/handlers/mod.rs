//! HTTP handlers module
//! 
//! Axum handlers grouped by resource, plus the router that wires them
//! together under `/api`.

pub mod event_types;
pub mod events;
pub mod health;
pub mod participants;
pub mod reports;
pub mod response;
pub mod suppliers;
pub mod users;

use std::sync::Arc;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::log_requests;
use crate::services::ServiceFactory;
use crate::utils::errors::EventDeskError;

pub use response::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult};

/// Shared handler state
pub type AppState = Arc<ServiceFactory>;

/// `?page_number=&page_size=` on listing routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Build the application router
pub fn build_router(services: AppState) -> Router {
    let api = Router::new()
        .route("/users", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/profile", get(users::profile))
        .route("/event-types", get(event_types::list).post(event_types::create))
        .route(
            "/event-types/:id",
            get(event_types::get).put(event_types::update).delete(event_types::remove),
        )
        .route("/events", get(events::list).post(events::create))
        .route("/events/:id", get(events::get).put(events::update).delete(events::remove))
        .route("/events/:id/participants", post(events::add_participant))
        .route("/events/:id/participants/:cpf", delete(events::remove_participant))
        .route("/events/:id/suppliers", post(events::add_supplier))
        .route("/events/:id/suppliers/:cnpj", delete(events::remove_supplier))
        .route("/participants", get(participants::list).post(participants::create))
        .route(
            "/participants/:id",
            get(participants::get).put(participants::update).delete(participants::remove),
        )
        .route("/suppliers", get(suppliers::list).post(suppliers::create))
        .route(
            "/suppliers/:id",
            get(suppliers::get).put(suppliers::update).delete(suppliers::remove),
        )
        .route("/reports/participant-agenda/:cpf", get(reports::participant_agenda))
        .route("/reports/most-used-suppliers", get(reports::most_used_suppliers))
        .route("/reports/participant-kinds", get(reports::participant_kinds))
        .route("/reports/event-budget-balances", get(reports::event_budget_balances));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::health))
        .fallback(route_not_found)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(services)
}

async fn route_not_found() -> EventDeskError {
    EventDeskError::not_found("Route not found.")
}
