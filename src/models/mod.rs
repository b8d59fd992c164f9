//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod event_type;
pub mod participant;
pub mod supplier;
pub mod user;
pub mod report;

use serde::{Deserialize, Serialize};

// Re-export commonly used models
pub use event::{Event, EventRequest, EventAggregate, EnrolledParticipant, ContractedSupplier};
pub use event_type::{EventType, EventTypeRequest};
pub use participant::{Participant, ParticipantKind, ParticipantRequest, ParticipantWithEvents, EnrolledEvent};
pub use supplier::{Supplier, SupplierRequest};
pub use user::{User, NewUser, RegisterUserRequest, LoginRequest};
pub use report::{ParticipantAgenda, AgendaEntry, SupplierUsage, ParticipantKindFrequency, EventBudgetBalance};

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total_count: i64, page_number: i64, page_size: i64) -> Self {
        Self { items, total_count, page_number, page_size }
    }

    /// Convert the items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}
