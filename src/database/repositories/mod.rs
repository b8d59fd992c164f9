//! Database repositories module
//! 
//! Each store trait is implemented by a Postgres repository in this module
//! and by [`crate::database::MemoryStore`].

pub mod event;
pub mod event_type;
pub mod participant;
pub mod supplier;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Event, EventAggregate, EventRequest, EventType, NewUser, Participant, ParticipantRequest,
    ParticipantWithEvents, Supplier, SupplierRequest, User,
};
use crate::utils::errors::Result;

// Re-export repositories
pub use event::EventRepository;
pub use event_type::EventTypeRepository;
pub use participant::ParticipantRepository;
pub use supplier::SupplierRepository;
pub use user::UserRepository;

#[async_trait]
pub trait EventTypeStore: Send + Sync {
    async fn create(&self, description: &str) -> Result<EventType>;
    async fn update(&self, id: i64, description: &str) -> Result<Option<EventType>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<EventType>>;
    async fn find_by_description(&self, description: &str) -> Result<Option<EventType>>;
    async fn list(&self) -> Result<Vec<EventType>>;
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn create(&self, request: &ParticipantRequest) -> Result<Participant>;
    async fn update(&self, id: i64, request: &ParticipantRequest) -> Result<Option<Participant>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Participant>>;
    /// Participant plus every event they are enrolled in
    async fn find_with_events_by_cpf(&self, cpf: &str) -> Result<Option<ParticipantWithEvents>>;
    /// Page of participants ordered by full name
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Participant>>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn create(&self, request: &SupplierRequest) -> Result<Supplier>;
    async fn update(&self, id: i64, request: &SupplierRequest) -> Result<Option<Supplier>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>>;
    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Supplier>>;
    async fn list(&self) -> Result<Vec<Supplier>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, request: &EventRequest) -> Result<Event>;
    async fn update(&self, id: i64, request: &EventRequest) -> Result<Option<Event>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn find_aggregate(&self, id: i64) -> Result<Option<EventAggregate>>;
    /// Page of aggregates ordered by start date
    async fn list_aggregates(&self, offset: i64, limit: i64) -> Result<Vec<EventAggregate>>;
    async fn count(&self) -> Result<i64>;
    async fn add_participant(&self, event_id: i64, participant_id: i64, enrolled_at: DateTime<Utc>) -> Result<()>;
    async fn remove_participant(&self, event_id: i64, participant_id: i64) -> Result<bool>;
    async fn add_supplier(&self, event_id: i64, supplier_id: i64, contracted_price_cents: i64) -> Result<()>;
    async fn remove_supplier(&self, event_id: i64, supplier_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}
