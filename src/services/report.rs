//! Report service implementation
//!
//! Reports aggregate in memory over a page of already-loaded events.

use std::collections::HashMap;
use tracing::debug;
use crate::config::PaginationConfig;
use crate::database::DatabaseService;
use crate::models::{
    AgendaEntry, EventAggregate, EventBudgetBalance, ParticipantAgenda, ParticipantKind,
    ParticipantKindFrequency, SupplierUsage,
};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::{calculate_offset, clamp_paging, normalize_cpf};

#[derive(Clone)]
pub struct ReportService {
    db: DatabaseService,
    pagination: PaginationConfig,
}

impl ReportService {
    pub fn new(db: DatabaseService, pagination: PaginationConfig) -> Self {
        Self { db, pagination }
    }

    /// Events a participant is enrolled in, ordered by start date
    pub async fn participant_agenda(&self, cpf: &str) -> Result<ParticipantAgenda> {
        async {
            let cpf = normalize_cpf(cpf).unwrap_or_else(|| cpf.trim().to_string());
            let participant = self
                .db
                .participants
                .find_with_events_by_cpf(&cpf)
                .await?
                .ok_or_else(|| EventDeskError::not_found("Participant not found."))?;

            let mut events: Vec<AgendaEntry> = participant
                .events
                .into_iter()
                .map(|enrolled| AgendaEntry {
                    event_id: enrolled.event.id,
                    name: enrolled.event.name,
                    start_date: enrolled.event.start_date,
                    end_date: enrolled.event.end_date,
                    venue: enrolled.event.venue,
                })
                .collect();
            events.sort_by_key(|entry| entry.start_date);

            Ok(ParticipantAgenda {
                participant_name: participant.participant.full_name,
                cpf: participant.participant.cpf,
                events,
            })
        }
        .await
        .or_operation_failed("failed to build participant agenda")
    }

    pub async fn most_used_suppliers(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Vec<SupplierUsage>> {
        let events = self
            .load_events(page, page_size)
            .await
            .or_operation_failed("failed to build supplier usage report")?;
        Ok(supplier_usage(&events))
    }

    pub async fn participant_kind_frequency(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Vec<ParticipantKindFrequency>> {
        let events = self
            .load_events(page, page_size)
            .await
            .or_operation_failed("failed to build participant kind report")?;
        Ok(kind_frequency(&events))
    }

    pub async fn event_budget_balances(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Vec<EventBudgetBalance>> {
        let events = self
            .load_events(page, page_size)
            .await
            .or_operation_failed("failed to build budget balance report")?;
        Ok(events.iter().map(budget_balance).collect())
    }

    async fn load_events(&self, page: Option<i64>, page_size: Option<i64>) -> Result<Vec<EventAggregate>> {
        let report_size = self.pagination.report_page_size;
        let (page, page_size) = clamp_paging(page, page_size, report_size, report_size);
        debug!(page = page, page_size = page_size, "Loading events for report");
        self.db
            .events
            .list_aggregates(calculate_offset(page, page_size), page_size)
            .await
    }
}

/// Suppliers grouped across events, most contracted first
pub fn supplier_usage(events: &[EventAggregate]) -> Vec<SupplierUsage> {
    let mut usage: HashMap<i64, SupplierUsage> = HashMap::new();
    for contract in events.iter().flat_map(|e| e.suppliers.iter()) {
        let entry = usage.entry(contract.supplier.id).or_insert_with(|| SupplierUsage {
            service_name: contract.supplier.service_name.clone(),
            cnpj: contract.supplier.cnpj.clone(),
            event_count: 0,
            total_contracted_cents: 0,
        });
        entry.event_count += 1;
        entry.total_contracted_cents += contract.contracted_price_cents;
    }

    let mut usage: Vec<SupplierUsage> = usage.into_values().collect();
    usage.sort_by(|a, b| {
        b.event_count
            .cmp(&a.event_count)
            .then(b.total_contracted_cents.cmp(&a.total_contracted_cents))
            .then(a.service_name.cmp(&b.service_name))
    });
    usage
}

/// Enrollments counted per participant kind, most frequent first
pub fn kind_frequency(events: &[EventAggregate]) -> Vec<ParticipantKindFrequency> {
    let mut counts: HashMap<ParticipantKind, i64> = HashMap::new();
    for enrolled in events.iter().flat_map(|e| e.participants.iter()) {
        *counts.entry(enrolled.participant.kind).or_insert(0) += 1;
    }

    let mut frequency: Vec<ParticipantKindFrequency> = counts
        .into_iter()
        .map(|(kind, count)| ParticipantKindFrequency { kind, count })
        .collect();
    frequency.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.code().cmp(&b.kind.code())));
    frequency
}

pub fn budget_balance(event: &EventAggregate) -> EventBudgetBalance {
    EventBudgetBalance {
        event_id: event.event.id,
        name: event.event.name.clone(),
        max_budget_cents: event.event.max_budget_cents,
        contracted_total_cents: event.contracted_total_cents(),
        remaining_budget_cents: event.remaining_budget_cents(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::{ContractedSupplier, EnrolledParticipant, Event, Participant, Supplier};

    fn supplier(id: i64, name: &str) -> Supplier {
        Supplier {
            id,
            service_name: name.to_string(),
            cnpj: format!("{:014}", id),
            base_price_cents: 1_000,
        }
    }

    fn participant(id: i64, kind: ParticipantKind) -> EnrolledParticipant {
        EnrolledParticipant {
            participant: Participant {
                id,
                full_name: format!("Person {}", id),
                cpf: format!("{:011}", id),
                phone: None,
                kind,
            },
            enrolled_at: Utc::now(),
        }
    }

    fn event(id: i64, suppliers: Vec<(Supplier, i64)>, participants: Vec<EnrolledParticipant>) -> EventAggregate {
        EventAggregate {
            event: Event {
                id,
                name: format!("Event {}", id),
                start_date: Utc::now(),
                end_date: Utc::now(),
                venue: None,
                address: None,
                notes: None,
                max_capacity: 100,
                max_budget_cents: 10_000,
                event_type_id: 1,
            },
            event_type: None,
            participants,
            suppliers: suppliers
                .into_iter()
                .map(|(supplier, price)| ContractedSupplier { supplier, contracted_price_cents: price })
                .collect(),
        }
    }

    #[test]
    fn test_supplier_usage_ordering() {
        let events = vec![
            event(1, vec![(supplier(10, "Sound"), 500), (supplier(11, "Catering"), 2_000)], vec![]),
            event(2, vec![(supplier(10, "Sound"), 500), (supplier(12, "Lights"), 700)], vec![]),
            event(3, vec![(supplier(12, "Lights"), 700)], vec![]),
        ];

        let usage = supplier_usage(&events);
        let names: Vec<&str> = usage.iter().map(|u| u.service_name.as_str()).collect();
        // Lights and Sound both appear twice; Lights has the larger total
        assert_eq!(names, vec!["Lights", "Sound", "Catering"]);
        assert_eq!(usage[0].total_contracted_cents, 1_400);
        assert_eq!(usage[1].event_count, 2);
    }

    #[test]
    fn test_kind_frequency_counts_enrollments() {
        let events = vec![
            event(1, vec![], vec![participant(1, ParticipantKind::Vip), participant(2, ParticipantKind::External)]),
            event(2, vec![], vec![participant(1, ParticipantKind::Vip)]),
        ];

        let frequency = kind_frequency(&events);
        assert_eq!(frequency[0], ParticipantKindFrequency { kind: ParticipantKind::Vip, count: 2 });
        assert_eq!(frequency[1], ParticipantKindFrequency { kind: ParticipantKind::External, count: 1 });
        assert_eq!(frequency.len(), 2);
    }

    #[test]
    fn test_budget_balance() {
        let balance = budget_balance(&event(7, vec![(supplier(1, "Venue"), 4_000)], vec![]));
        assert_eq!(balance.contracted_total_cents, 4_000);
        assert_eq!(balance.remaining_budget_cents, 6_000);
    }
}
