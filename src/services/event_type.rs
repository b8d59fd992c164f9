//! Event type service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{EventType, EventTypeRequest};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::normalize_whitespace;

pub const MAX_DESCRIPTION_LEN: usize = 100;

#[derive(Clone)]
pub struct EventTypeService {
    db: DatabaseService,
}

impl EventTypeService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn create(&self, request: EventTypeRequest) -> Result<EventType> {
        async {
            let description = validate_description(&request.description)?;
            if self.db.event_types.find_by_description(&description).await?.is_some() {
                return Err(EventDeskError::already_exists(format!(
                    "Event type '{}' already exists.",
                    description
                )));
            }

            let event_type = self.db.event_types.create(&description).await?;
            info!(event_type_id = event_type.id, "Event type created");
            Ok(event_type)
        }
        .await
        .or_operation_failed("failed to create event type")
    }

    pub async fn update(&self, id: i64, request: EventTypeRequest) -> Result<EventType> {
        async {
            let description = validate_description(&request.description)?;
            if self.db.event_types.find_by_id(id).await?.is_none() {
                return Err(event_type_not_found());
            }
            if let Some(holder) = self.db.event_types.find_by_description(&description).await? {
                if holder.id != id {
                    return Err(EventDeskError::already_exists(format!(
                        "Event type '{}' already exists.",
                        description
                    )));
                }
            }

            let event_type = self
                .db
                .event_types
                .update(id, &description)
                .await?
                .ok_or_else(event_type_not_found)?;
            info!(event_type_id = id, "Event type updated");
            Ok(event_type)
        }
        .await
        .or_operation_failed("failed to update event type")
    }

    /// Deleting a type also deletes its events
    pub async fn delete(&self, id: i64) -> Result<()> {
        async {
            if !self.db.event_types.delete(id).await? {
                return Err(event_type_not_found());
            }
            info!(event_type_id = id, "Event type deleted");
            Ok(())
        }
        .await
        .or_operation_failed("failed to delete event type")
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EventType> {
        async { self.db.event_types.find_by_id(id).await?.ok_or_else(event_type_not_found) }
            .await
            .or_operation_failed("failed to load event type")
    }

    pub async fn list(&self) -> Result<Vec<EventType>> {
        self.db.event_types.list().await.or_operation_failed("failed to list event types")
    }
}

fn event_type_not_found() -> EventDeskError {
    EventDeskError::not_found("Event type not found.")
}

fn validate_description(description: &str) -> Result<String> {
    let description = normalize_whitespace(description);
    if description.is_empty() {
        return Err(EventDeskError::validation("Description is required."));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(EventDeskError::validation(format!(
            "Description must be at most {} characters.",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(description)
}
