//! In-memory store
//!
//! Implements every store trait over plain collections behind a single
//! `RwLock`. It mirrors the Postgres schema's unique keys, composite link
//! keys and cascading deletes, and backs `memory://` database URLs and the
//! test suite.

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::repositories::{EventStore, EventTypeStore, ParticipantStore, SupplierStore, UserStore};
use crate::models::{
    ContractedSupplier, EnrolledEvent, EnrolledParticipant, Event, EventAggregate, EventRequest,
    EventType, NewUser, Participant, ParticipantRequest, ParticipantWithEvents, Supplier,
    SupplierRequest, User,
};
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Clone)]
struct EnrollmentLink {
    participant_id: i64,
    event_id: i64,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ContractLink {
    event_id: i64,
    supplier_id: i64,
    contracted_price_cents: i64,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    event_types: BTreeMap<i64, EventType>,
    events: BTreeMap<i64, Event>,
    participants: BTreeMap<i64, Participant>,
    suppliers: BTreeMap<i64, Supplier>,
    users: BTreeMap<i64, User>,
    enrollments: Vec<EnrollmentLink>,
    contracts: Vec<ContractLink>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn aggregate(&self, event: &Event) -> EventAggregate {
        let mut participants: Vec<EnrolledParticipant> = self
            .enrollments
            .iter()
            .filter(|link| link.event_id == event.id)
            .filter_map(|link| {
                self.participants.get(&link.participant_id).map(|p| EnrolledParticipant {
                    participant: p.clone(),
                    enrolled_at: link.enrolled_at,
                })
            })
            .collect();
        participants.sort_by(|a, b| {
            a.participant.full_name.cmp(&b.participant.full_name)
                .then(a.participant.id.cmp(&b.participant.id))
        });

        let mut suppliers: Vec<ContractedSupplier> = self
            .contracts
            .iter()
            .filter(|link| link.event_id == event.id)
            .filter_map(|link| {
                self.suppliers.get(&link.supplier_id).map(|s| ContractedSupplier {
                    supplier: s.clone(),
                    contracted_price_cents: link.contracted_price_cents,
                })
            })
            .collect();
        suppliers.sort_by(|a, b| {
            a.supplier.service_name.cmp(&b.supplier.service_name)
                .then(a.supplier.id.cmp(&b.supplier.id))
        });

        EventAggregate {
            event: event.clone(),
            event_type: self.event_types.get(&event.event_type_id).cloned(),
            participants,
            suppliers,
        }
    }

    fn remove_event(&mut self, id: i64) -> bool {
        let removed = self.events.remove(&id).is_some();
        if removed {
            self.enrollments.retain(|link| link.event_id != id);
            self.contracts.retain(|link| link.event_id != id);
        }
        removed
    }
}

/// Unique-key and foreign-key failures surface as database errors, as they would from Postgres
fn constraint_violation(message: impl Into<String>) -> EventDeskError {
    EventDeskError::Database(sqlx::Error::Protocol(message.into()))
}

fn page<T: Clone>(items: impl Iterator<Item = T>, offset: i64, limit: i64) -> Vec<T> {
    items
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventTypeStore for MemoryStore {
    async fn create(&self, description: &str) -> Result<EventType> {
        let mut tables = self.tables.write().await;
        if tables.event_types.values().any(|t| t.description == description) {
            return Err(constraint_violation("duplicate key value violates unique constraint on event_types.description"));
        }
        let id = tables.allocate_id();
        let event_type = EventType { id, description: description.to_string() };
        tables.event_types.insert(id, event_type.clone());
        Ok(event_type)
    }

    async fn update(&self, id: i64, description: &str) -> Result<Option<EventType>> {
        let mut tables = self.tables.write().await;
        if tables.event_types.values().any(|t| t.id != id && t.description == description) {
            return Err(constraint_violation("duplicate key value violates unique constraint on event_types.description"));
        }
        Ok(tables.event_types.get_mut(&id).map(|event_type| {
            event_type.description = description.to_string();
            event_type.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.event_types.remove(&id).is_none() {
            return Ok(false);
        }
        let event_ids: Vec<i64> = tables
            .events
            .values()
            .filter(|e| e.event_type_id == id)
            .map(|e| e.id)
            .collect();
        for event_id in event_ids {
            tables.remove_event(event_id);
        }
        Ok(true)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EventType>> {
        Ok(self.tables.read().await.event_types.get(&id).cloned())
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<EventType>> {
        let tables = self.tables.read().await;
        Ok(tables.event_types.values().find(|t| t.description == description).cloned())
    }

    async fn list(&self) -> Result<Vec<EventType>> {
        let tables = self.tables.read().await;
        let mut event_types: Vec<EventType> = tables.event_types.values().cloned().collect();
        event_types.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(event_types)
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn create(&self, request: &ParticipantRequest) -> Result<Participant> {
        let mut tables = self.tables.write().await;
        if tables.participants.values().any(|p| p.cpf == request.cpf) {
            return Err(constraint_violation("duplicate key value violates unique constraint on participants.cpf"));
        }
        let id = tables.allocate_id();
        let participant = Participant {
            id,
            full_name: request.full_name.clone(),
            cpf: request.cpf.clone(),
            phone: request.phone.clone(),
            kind: request.kind,
        };
        tables.participants.insert(id, participant.clone());
        Ok(participant)
    }

    async fn update(&self, id: i64, request: &ParticipantRequest) -> Result<Option<Participant>> {
        let mut tables = self.tables.write().await;
        if tables.participants.values().any(|p| p.id != id && p.cpf == request.cpf) {
            return Err(constraint_violation("duplicate key value violates unique constraint on participants.cpf"));
        }
        Ok(tables.participants.get_mut(&id).map(|participant| {
            participant.full_name = request.full_name.clone();
            participant.cpf = request.cpf.clone();
            participant.phone = request.phone.clone();
            participant.kind = request.kind;
            participant.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.participants.remove(&id).is_some();
        if removed {
            tables.enrollments.retain(|link| link.participant_id != id);
        }
        Ok(removed)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>> {
        Ok(self.tables.read().await.participants.get(&id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Participant>> {
        let tables = self.tables.read().await;
        Ok(tables.participants.values().find(|p| p.cpf == cpf).cloned())
    }

    async fn find_with_events_by_cpf(&self, cpf: &str) -> Result<Option<ParticipantWithEvents>> {
        let tables = self.tables.read().await;
        let Some(participant) = tables.participants.values().find(|p| p.cpf == cpf).cloned() else {
            return Ok(None);
        };

        let mut events: Vec<EnrolledEvent> = tables
            .enrollments
            .iter()
            .filter(|link| link.participant_id == participant.id)
            .filter_map(|link| {
                tables.events.get(&link.event_id).map(|event| EnrolledEvent {
                    event: event.clone(),
                    enrolled_at: link.enrolled_at,
                })
            })
            .collect();
        events.sort_by(|a, b| a.event.start_date.cmp(&b.event.start_date));

        Ok(Some(ParticipantWithEvents { participant, events }))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Participant>> {
        let tables = self.tables.read().await;
        let mut participants: Vec<&Participant> = tables.participants.values().collect();
        participants.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(page(participants.into_iter().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.participants.len() as i64)
    }
}

#[async_trait]
impl SupplierStore for MemoryStore {
    async fn create(&self, request: &SupplierRequest) -> Result<Supplier> {
        let mut tables = self.tables.write().await;
        if tables.suppliers.values().any(|s| s.cnpj == request.cnpj) {
            return Err(constraint_violation("duplicate key value violates unique constraint on suppliers.cnpj"));
        }
        let id = tables.allocate_id();
        let supplier = Supplier {
            id,
            service_name: request.service_name.clone(),
            cnpj: request.cnpj.clone(),
            base_price_cents: request.base_price_cents,
        };
        tables.suppliers.insert(id, supplier.clone());
        Ok(supplier)
    }

    async fn update(&self, id: i64, request: &SupplierRequest) -> Result<Option<Supplier>> {
        let mut tables = self.tables.write().await;
        if tables.suppliers.values().any(|s| s.id != id && s.cnpj == request.cnpj) {
            return Err(constraint_violation("duplicate key value violates unique constraint on suppliers.cnpj"));
        }
        Ok(tables.suppliers.get_mut(&id).map(|supplier| {
            supplier.service_name = request.service_name.clone();
            supplier.cnpj = request.cnpj.clone();
            supplier.base_price_cents = request.base_price_cents;
            supplier.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.suppliers.remove(&id).is_some();
        if removed {
            tables.contracts.retain(|link| link.supplier_id != id);
        }
        Ok(removed)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>> {
        Ok(self.tables.read().await.suppliers.get(&id).cloned())
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Supplier>> {
        let tables = self.tables.read().await;
        Ok(tables.suppliers.values().find(|s| s.cnpj == cnpj).cloned())
    }

    async fn list(&self) -> Result<Vec<Supplier>> {
        let tables = self.tables.read().await;
        let mut suppliers: Vec<Supplier> = tables.suppliers.values().cloned().collect();
        suppliers.sort_by(|a, b| a.service_name.cmp(&b.service_name).then(a.id.cmp(&b.id)));
        Ok(suppliers)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(&self, request: &EventRequest) -> Result<Event> {
        let mut tables = self.tables.write().await;
        if !tables.event_types.contains_key(&request.event_type_id) {
            return Err(constraint_violation("insert on events violates foreign key event_type_id"));
        }
        let id = tables.allocate_id();
        let event = Event {
            id,
            name: request.name.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            venue: request.venue.clone(),
            address: request.address.clone(),
            notes: request.notes.clone(),
            max_capacity: request.max_capacity,
            max_budget_cents: request.max_budget_cents,
            event_type_id: request.event_type_id,
        };
        tables.events.insert(id, event.clone());
        Ok(event)
    }

    async fn update(&self, id: i64, request: &EventRequest) -> Result<Option<Event>> {
        let mut tables = self.tables.write().await;
        if !tables.event_types.contains_key(&request.event_type_id) {
            return Err(constraint_violation("update on events violates foreign key event_type_id"));
        }
        Ok(tables.events.get_mut(&id).map(|event| {
            event.name = request.name.clone();
            event.start_date = request.start_date;
            event.end_date = request.end_date;
            event.venue = request.venue.clone();
            event.address = request.address.clone();
            event.notes = request.notes.clone();
            event.max_capacity = request.max_capacity;
            event.max_budget_cents = request.max_budget_cents;
            event.event_type_id = request.event_type_id;
            event.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.remove_event(id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn find_aggregate(&self, id: i64) -> Result<Option<EventAggregate>> {
        let tables = self.tables.read().await;
        Ok(tables.events.get(&id).map(|event| tables.aggregate(event)))
    }

    async fn list_aggregates(&self, offset: i64, limit: i64) -> Result<Vec<EventAggregate>> {
        let tables = self.tables.read().await;
        let mut events: Vec<&Event> = tables.events.values().collect();
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(page(events.into_iter().map(|event| tables.aggregate(event)), offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.events.len() as i64)
    }

    async fn add_participant(&self, event_id: i64, participant_id: i64, enrolled_at: DateTime<Utc>) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&event_id) || !tables.participants.contains_key(&participant_id) {
            return Err(constraint_violation("insert on event_participants violates foreign key"));
        }
        if tables.enrollments.iter().any(|l| l.event_id == event_id && l.participant_id == participant_id) {
            return Err(constraint_violation("duplicate key value violates primary key of event_participants"));
        }
        tables.enrollments.push(EnrollmentLink { participant_id, event_id, enrolled_at });
        Ok(())
    }

    async fn remove_participant(&self, event_id: i64, participant_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.enrollments.len();
        tables.enrollments.retain(|l| !(l.event_id == event_id && l.participant_id == participant_id));
        Ok(tables.enrollments.len() < before)
    }

    async fn add_supplier(&self, event_id: i64, supplier_id: i64, contracted_price_cents: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&event_id) || !tables.suppliers.contains_key(&supplier_id) {
            return Err(constraint_violation("insert on event_suppliers violates foreign key"));
        }
        if tables.contracts.iter().any(|l| l.event_id == event_id && l.supplier_id == supplier_id) {
            return Err(constraint_violation("duplicate key value violates primary key of event_suppliers"));
        }
        tables.contracts.push(ContractLink { event_id, supplier_id, contracted_price_cents });
        Ok(())
    }

    async fn remove_supplier(&self, event_id: i64, supplier_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.contracts.len();
        tables.contracts.retain(|l| !(l.event_id == event_id && l.supplier_id == supplier_id));
        Ok(tables.contracts.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(constraint_violation("duplicate key value violates unique constraint on users.email"));
        }
        let id = tables.allocate_id();
        let user = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}
