//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use memory::MemoryStore;
pub use repositories::{
    EventStore, ParticipantStore, SupplierStore, EventTypeStore, UserStore,
    EventRepository, ParticipantRepository, SupplierRepository, EventTypeRepository, UserRepository,
};
pub use service::DatabaseService;
