//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{EventType, Participant, Supplier};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Event {
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
}

/// Payload for both creating and replacing an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub max_capacity: i32,
    pub max_budget_cents: i64,
    pub event_type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrolledParticipant {
    pub participant: Participant,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractedSupplier {
    pub supplier: Supplier,
    pub contracted_price_cents: i64,
}

/// An event together with its type, enrollments and contracts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventAggregate {
    pub event: Event,
    pub event_type: Option<EventType>,
    pub participants: Vec<EnrolledParticipant>,
    pub suppliers: Vec<ContractedSupplier>,
}

impl EventAggregate {
    pub fn contracted_total_cents(&self) -> i64 {
        self.suppliers.iter().map(|s| s.contracted_price_cents).sum()
    }

    pub fn remaining_budget_cents(&self) -> i64 {
        self.event.max_budget_cents - self.contracted_total_cents()
    }

    pub fn enrolled_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_full(&self) -> bool {
        self.enrolled_count() as i64 >= i64::from(self.event.max_capacity)
    }

    pub fn has_participant(&self, participant_id: i64) -> bool {
        self.participants.iter().any(|p| p.participant.id == participant_id)
    }

    pub fn has_supplier(&self, supplier_id: i64) -> bool {
        self.suppliers.iter().any(|s| s.supplier.id == supplier_id)
    }
}
