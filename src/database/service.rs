//! Database service layer
//! 
//! This module bundles the stores behind trait objects so services do not
//! care whether they talk to Postgres or the in-memory store.

use std::sync::Arc;

use crate::database::{
    health_check, DatabasePool, EventRepository, EventStore, EventTypeRepository, EventTypeStore,
    MemoryStore, ParticipantRepository, ParticipantStore, SupplierRepository, SupplierStore,
    UserRepository, UserStore,
};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventStore>,
    pub participants: Arc<dyn ParticipantStore>,
    pub suppliers: Arc<dyn SupplierStore>,
    pub event_types: Arc<dyn EventTypeStore>,
    pub users: Arc<dyn UserStore>,
    pool: Option<DatabasePool>,
}

impl DatabaseService {
    /// Postgres-backed stores sharing one pool
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: Arc::new(EventRepository::new(pool.clone())),
            participants: Arc::new(ParticipantRepository::new(pool.clone())),
            suppliers: Arc::new(SupplierRepository::new(pool.clone())),
            event_types: Arc::new(EventTypeRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// All stores backed by a single in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            events: store.clone(),
            participants: store.clone(),
            suppliers: store.clone(),
            event_types: store.clone(),
            users: store,
            pool: None,
        }
    }

    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Ping the database; the in-memory store is always healthy
    pub async fn health_check(&self) -> Result<()> {
        match &self.pool {
            Some(pool) => health_check(pool).await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("backend", &self.backend())
            .finish()
    }
}
