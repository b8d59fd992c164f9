//! Participant service implementation

use tracing::info;
use crate::config::PaginationConfig;
use crate::database::DatabaseService;
use crate::models::{Paged, Participant, ParticipantRequest};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::{calculate_offset, clamp_paging, is_valid_phone, normalize_cpf, normalize_whitespace};
use crate::utils::logging::log_rule_rejection;

pub const MAX_FULL_NAME_LEN: usize = 200;

/// Participant service for participant CRUD
#[derive(Clone)]
pub struct ParticipantService {
    db: DatabaseService,
    pagination: PaginationConfig,
}

impl ParticipantService {
    pub fn new(db: DatabaseService, pagination: PaginationConfig) -> Self {
        Self { db, pagination }
    }

    pub async fn create(&self, request: ParticipantRequest) -> Result<Participant> {
        async {
            let request = validate_participant(request)?;
            if self.db.participants.find_by_cpf(&request.cpf).await?.is_some() {
                return Err(duplicate_cpf(&request.cpf));
            }

            let participant = self.db.participants.create(&request).await?;
            info!(participant_id = participant.id, kind = %participant.kind, "Participant created");
            Ok(participant)
        }
        .await
        .or_operation_failed("failed to create participant")
    }

    pub async fn update(&self, id: i64, request: ParticipantRequest) -> Result<Participant> {
        async {
            let request = validate_participant(request)?;
            let existing = self
                .db
                .participants
                .find_by_id(id)
                .await?
                .ok_or_else(participant_not_found)?;

            // Only a changed CPF can collide with someone else
            if existing.cpf != request.cpf {
                if let Some(holder) = self.db.participants.find_by_cpf(&request.cpf).await? {
                    if holder.id != id {
                        return Err(duplicate_cpf(&request.cpf));
                    }
                }
            }

            let participant = self
                .db
                .participants
                .update(id, &request)
                .await?
                .ok_or_else(participant_not_found)?;
            info!(participant_id = id, "Participant updated");
            Ok(participant)
        }
        .await
        .or_operation_failed("failed to update participant")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        async {
            if !self.db.participants.delete(id).await? {
                return Err(participant_not_found());
            }
            info!(participant_id = id, "Participant deleted");
            Ok(())
        }
        .await
        .or_operation_failed("failed to delete participant")
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Participant> {
        async { self.db.participants.find_by_id(id).await?.ok_or_else(participant_not_found) }
            .await
            .or_operation_failed("failed to load participant")
    }

    /// Page of participants ordered by full name
    pub async fn list(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Paged<Participant>> {
        async {
            let (page, page_size) = clamp_paging(
                page,
                page_size,
                self.pagination.default_page_size,
                self.pagination.max_page_size,
            );
            let total = self.db.participants.count().await?;
            let items = self
                .db
                .participants
                .list(calculate_offset(page, page_size), page_size)
                .await?;
            Ok::<_, EventDeskError>(Paged::new(items, total, page, page_size))
        }
        .await
        .or_operation_failed("failed to list participants")
    }
}

fn participant_not_found() -> EventDeskError {
    EventDeskError::not_found("Participant not found.")
}

fn duplicate_cpf(cpf: &str) -> EventDeskError {
    EventDeskError::already_exists(format!("A participant with CPF {} already exists.", cpf))
}

fn reject(message: &str) -> EventDeskError {
    log_rule_rejection("participant", "validation", message);
    EventDeskError::validation(message)
}

fn validate_participant(mut request: ParticipantRequest) -> Result<ParticipantRequest> {
    request.full_name = normalize_whitespace(&request.full_name);
    if request.full_name.is_empty() {
        return Err(reject("Full name is required."));
    }
    if request.full_name.chars().count() > MAX_FULL_NAME_LEN {
        return Err(reject(&format!("Full name must be at most {} characters.", MAX_FULL_NAME_LEN)));
    }

    if request.cpf.trim().is_empty() {
        return Err(reject("CPF is required."));
    }
    request.cpf = normalize_cpf(&request.cpf).ok_or_else(|| reject("CPF must have 11 digits."))?;

    request.phone = request.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
    if let Some(phone) = &request.phone {
        if !is_valid_phone(phone) {
            return Err(reject("Phone number is not valid."));
        }
    }

    Ok(request)
}
