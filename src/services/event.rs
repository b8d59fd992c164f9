//! Event service implementation
//!
//! Owns the enrollment rules: capacity limits, budget balance, date-overlap
//! conflicts between a participant's events and duplicate links for both
//! participants and suppliers.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use crate::config::PaginationConfig;
use crate::database::DatabaseService;
use crate::models::{EventAggregate, EventRequest, Paged, Participant, Supplier};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::{
    calculate_offset, clamp_paging, format_cents, format_timestamp, is_blank, normalize_cnpj,
    normalize_cpf, normalize_whitespace,
};
use crate::utils::logging::{log_event_action, log_rule_rejection};

pub const MAX_EVENT_NAME_LEN: usize = 200;

/// Open-interval overlap: ranges that only touch at a boundary do not conflict
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Which comparison the start/end check uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateCheck {
    /// Calendar dates only, time of day ignored
    DateOnly,
    FullTimestamp,
}

/// Event service for event lifecycle and enrollment operations
#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
    pagination: PaginationConfig,
}

impl EventService {
    pub fn new(db: DatabaseService, pagination: PaginationConfig) -> Self {
        Self { db, pagination }
    }

    /// Create a new event
    pub async fn create(&self, request: EventRequest) -> Result<EventAggregate> {
        async {
            let request = validate_event(request, DateCheck::DateOnly)?;
            self.ensure_event_type(request.event_type_id).await?;

            let event = self.db.events.create(&request).await?;
            log_event_action(event.id, "created", Some(&event.name));
            self.load(event.id).await
        }
        .await
        .or_operation_failed("failed to create event")
    }

    /// Replace an existing event
    pub async fn update(&self, id: i64, request: EventRequest) -> Result<EventAggregate> {
        async {
            let request = validate_event(request, DateCheck::FullTimestamp)?;
            let existing = self.load(id).await?;
            self.ensure_event_type(request.event_type_id).await?;

            let enrolled = existing.enrolled_count() as i64;
            if i64::from(request.max_capacity) < enrolled {
                return Err(reject(&format!(
                    "Capacity cannot be lower than the {} participants already enrolled.",
                    enrolled
                )));
            }
            let contracted = existing.contracted_total_cents();
            if request.max_budget_cents < contracted {
                return Err(reject(&format!(
                    "Budget cannot be lower than the {} already contracted.",
                    format_cents(contracted)
                )));
            }

            if self.db.events.update(id, &request).await?.is_none() {
                return Err(event_not_found());
            }
            log_event_action(id, "updated", None);
            self.load(id).await
        }
        .await
        .or_operation_failed("failed to update event")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        async {
            if !self.db.events.delete(id).await? {
                return Err(event_not_found());
            }
            log_event_action(id, "deleted", None);
            Ok(())
        }
        .await
        .or_operation_failed("failed to delete event")
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EventAggregate> {
        self.load(id).await.or_operation_failed("failed to load event")
    }

    /// Page of events ordered by start date
    pub async fn list(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Paged<EventAggregate>> {
        async {
            let (page, page_size) = clamp_paging(
                page,
                page_size,
                self.pagination.default_page_size,
                self.pagination.max_page_size,
            );
            let total = self.db.events.count().await?;
            let items = self
                .db
                .events
                .list_aggregates(calculate_offset(page, page_size), page_size)
                .await?;
            Ok::<_, EventDeskError>(Paged::new(items, total, page, page_size))
        }
        .await
        .or_operation_failed("failed to list events")
    }

    /// Enroll the participant holding `cpf` in the event
    pub async fn add_participant_by_cpf(&self, event_id: i64, cpf: &str) -> Result<Participant> {
        async {
            let event = self.load(event_id).await?;
            let cpf = normalize_cpf(cpf).unwrap_or_else(|| cpf.trim().to_string());

            let participant = self
                .db
                .participants
                .find_with_events_by_cpf(&cpf)
                .await?
                .ok_or_else(|| EventDeskError::not_found("Participant not found."))?;

            if event.has_participant(participant.participant.id) {
                return Err(EventDeskError::already_exists(
                    "Participant is already enrolled in this event.",
                ));
            }

            if event.is_full() {
                return Err(reject("The event has reached its maximum capacity."));
            }

            let conflict = participant.events.iter().find(|enrolled| {
                enrolled.event.id != event_id
                    && ranges_overlap(
                        enrolled.event.start_date,
                        enrolled.event.end_date,
                        event.event.start_date,
                        event.event.end_date,
                    )
            });
            if let Some(conflict) = conflict {
                return Err(reject(&format!(
                    "Participant is already enrolled in '{}' ({} to {}), which overlaps this event.",
                    conflict.event.name,
                    format_timestamp(conflict.event.start_date),
                    format_timestamp(conflict.event.end_date)
                )));
            }

            let participant = participant.participant;
            self.db.events.add_participant(event_id, participant.id, Utc::now()).await?;
            info!(event_id = event_id, participant_id = participant.id, "Participant enrolled");
            Ok(participant)
        }
        .await
        .or_operation_failed("failed to add participant to event")
    }

    /// Contract the supplier holding `cnpj` for the event at its base price
    pub async fn add_supplier_by_cnpj(&self, event_id: i64, cnpj: &str) -> Result<Supplier> {
        async {
            let event = self.load(event_id).await?;

            if is_blank(cnpj) {
                return Err(reject("CNPJ is required."));
            }
            let cnpj = normalize_cnpj(cnpj).unwrap_or_else(|| cnpj.trim().to_string());

            let supplier = self
                .db
                .suppliers
                .find_by_cnpj(&cnpj)
                .await?
                .ok_or_else(|| EventDeskError::not_found("Supplier not found."))?;

            if event.has_supplier(supplier.id) {
                return Err(EventDeskError::already_exists(
                    "Supplier is already contracted for this event.",
                ));
            }

            let remaining = event.remaining_budget_cents();
            if supplier.base_price_cents > remaining {
                return Err(reject(&format!(
                    "Supplier price {} exceeds the remaining budget of {}.",
                    format_cents(supplier.base_price_cents),
                    format_cents(remaining)
                )));
            }

            self.db
                .events
                .add_supplier(event_id, supplier.id, supplier.base_price_cents)
                .await?;
            info!(
                event_id = event_id,
                supplier_id = supplier.id,
                price_cents = supplier.base_price_cents,
                "Supplier contracted"
            );
            Ok(supplier)
        }
        .await
        .or_operation_failed("failed to add supplier to event")
    }

    pub async fn remove_participant_by_cpf(&self, event_id: i64, cpf: &str) -> Result<()> {
        async {
            if is_blank(cpf) {
                return Err(reject("CPF is required."));
            }
            self.ensure_event(event_id).await?;

            let cpf = normalize_cpf(cpf).unwrap_or_else(|| cpf.trim().to_string());
            let participant = self
                .db
                .participants
                .find_by_cpf(&cpf)
                .await?
                .ok_or_else(|| EventDeskError::not_found("Participant not found."))?;

            if !self.db.events.remove_participant(event_id, participant.id).await? {
                return Err(EventDeskError::not_found("Participant is not enrolled in this event."));
            }
            info!(event_id = event_id, participant_id = participant.id, "Participant removed from event");
            Ok(())
        }
        .await
        .or_operation_failed("failed to remove participant from event")
    }

    pub async fn remove_supplier_by_cnpj(&self, event_id: i64, cnpj: &str) -> Result<()> {
        async {
            self.ensure_event(event_id).await?;
            if is_blank(cnpj) {
                return Err(reject("CNPJ is required."));
            }

            let cnpj = normalize_cnpj(cnpj).unwrap_or_else(|| cnpj.trim().to_string());
            let supplier = self
                .db
                .suppliers
                .find_by_cnpj(&cnpj)
                .await?
                .ok_or_else(|| EventDeskError::not_found("Supplier not found."))?;

            if !self.db.events.remove_supplier(event_id, supplier.id).await? {
                return Err(EventDeskError::not_found("Supplier is not contracted for this event."));
            }
            info!(event_id = event_id, supplier_id = supplier.id, "Supplier removed from event");
            Ok(())
        }
        .await
        .or_operation_failed("failed to remove supplier from event")
    }

    async fn load(&self, id: i64) -> Result<EventAggregate> {
        debug!(event_id = id, "Loading event aggregate");
        self.db.events.find_aggregate(id).await?.ok_or_else(event_not_found)
    }

    async fn ensure_event(&self, id: i64) -> Result<()> {
        match self.db.events.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(event_not_found()),
        }
    }

    async fn ensure_event_type(&self, event_type_id: i64) -> Result<()> {
        match self.db.event_types.find_by_id(event_type_id).await? {
            Some(_) => Ok(()),
            None => Err(EventDeskError::not_found("Event type not found.")),
        }
    }
}

fn event_not_found() -> EventDeskError {
    EventDeskError::not_found("Event not found.")
}

fn reject(message: &str) -> EventDeskError {
    log_rule_rejection("event", "enrollment", message);
    EventDeskError::validation(message)
}

fn validate_event(mut request: EventRequest, date_check: DateCheck) -> Result<EventRequest> {
    request.name = normalize_whitespace(&request.name);
    if request.name.is_empty() {
        return Err(reject("Event name is required."));
    }
    if request.name.chars().count() > MAX_EVENT_NAME_LEN {
        return Err(reject(&format!(
            "Event name must be at most {} characters.",
            MAX_EVENT_NAME_LEN
        )));
    }

    let starts_too_late = match date_check {
        DateCheck::DateOnly => request.start_date.date_naive() >= request.end_date.date_naive(),
        DateCheck::FullTimestamp => request.start_date >= request.end_date,
    };
    if starts_too_late {
        return Err(reject("Start date must be before the end date."));
    }
    if request.max_capacity <= 0 {
        return Err(reject("Maximum capacity must be greater than zero."));
    }
    if request.max_budget_cents <= 0 {
        return Err(reject("Maximum budget must be greater than zero."));
    }

    request.venue = request.venue.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    request.address = request.address.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    request.notes = request.notes.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    Ok(request)
}
