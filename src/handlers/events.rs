//! Event handlers

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::{created, ok};
use super::{ApiJson, ApiPath, ApiQuery, ApiResult, AppState, PageQuery};
use crate::middleware::Authenticated;
use crate::models::{EventAggregate, EventRequest};

/// Event as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub max_capacity: i32,
    pub max_budget_cents: i64,
    pub event_type_id: i64,
    pub event_type: Option<String>,
    pub contracted_total_cents: i64,
    pub remaining_budget_cents: i64,
    /// `"<name>, CPF:<cpf>"`
    pub participants: Vec<String>,
    /// `"<service>, CNPJ:<cnpj>"`
    pub suppliers: Vec<String>,
}

impl From<&EventAggregate> for EventResponse {
    fn from(aggregate: &EventAggregate) -> Self {
        let event = &aggregate.event;
        Self {
            id: event.id,
            name: event.name.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            venue: event.venue.clone(),
            address: event.address.clone(),
            notes: event.notes.clone(),
            max_capacity: event.max_capacity,
            max_budget_cents: event.max_budget_cents,
            event_type_id: event.event_type_id,
            event_type: aggregate.event_type.as_ref().map(|t| t.description.clone()),
            contracted_total_cents: aggregate.contracted_total_cents(),
            remaining_budget_cents: aggregate.remaining_budget_cents(),
            participants: aggregate
                .participants
                .iter()
                .map(|p| format!("{}, CPF:{}", p.participant.full_name, p.participant.cpf))
                .collect(),
            suppliers: aggregate
                .suppliers
                .iter()
                .map(|s| format!("{}, CNPJ:{}", s.supplier.service_name, s.supplier.cnpj))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    pub cpf: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSupplierRequest {
    pub cnpj: String,
}

pub async fn list(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult {
    let page = services
        .event_service
        .list(query.page_number, query.page_size)
        .await?
        .map(|aggregate| EventResponse::from(&aggregate));
    ok("Events retrieved successfully.", page)
}

pub async fn get(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    let event = services.event_service.get_by_id(id).await?;
    ok("Event retrieved successfully.", EventResponse::from(&event))
}

pub async fn create(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiJson(request): ApiJson<EventRequest>,
) -> ApiResult {
    let event = services.event_service.create(request).await?;
    created("Event created successfully.", EventResponse::from(&event))
}

pub async fn update(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<EventRequest>,
) -> ApiResult {
    let event = services.event_service.update(id, request).await?;
    ok("Event updated successfully.", EventResponse::from(&event))
}

pub async fn remove(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult {
    services.event_service.delete(id).await?;
    ok("Event deleted successfully.", ())
}

pub async fn add_participant(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<AddParticipantRequest>,
) -> ApiResult {
    let participant = services.event_service.add_participant_by_cpf(id, &request.cpf).await?;
    created("Participant added to event successfully.", participant)
}

pub async fn remove_participant(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath((id, cpf)): ApiPath<(i64, String)>,
) -> ApiResult {
    services.event_service.remove_participant_by_cpf(id, &cpf).await?;
    ok("Participant removed from event successfully.", ())
}

pub async fn add_supplier(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<AddSupplierRequest>,
) -> ApiResult {
    let supplier = services.event_service.add_supplier_by_cnpj(id, &request.cnpj).await?;
    created("Supplier added to event successfully.", supplier)
}

pub async fn remove_supplier(
    State(services): State<AppState>,
    _auth: Authenticated,
    ApiPath((id, cnpj)): ApiPath<(i64, String)>,
) -> ApiResult {
    services.event_service.remove_supplier_by_cnpj(id, &cnpj).await?;
    ok("Supplier removed from event successfully.", ())
}
