//! Report payloads

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::ParticipantKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaEntry {
    pub event_id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantAgenda {
    pub participant_name: String,
    pub cpf: String,
    pub events: Vec<AgendaEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplierUsage {
    pub service_name: String,
    pub cnpj: String,
    pub event_count: i64,
    pub total_contracted_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantKindFrequency {
    pub kind: ParticipantKind,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventBudgetBalance {
    pub event_id: i64,
    pub name: String,
    pub max_budget_cents: i64,
    pub contracted_total_cents: i64,
    pub remaining_budget_cents: i64,
}
