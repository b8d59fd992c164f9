//! Event type repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::models::EventType;
use crate::utils::errors::Result;
use super::EventTypeStore;

#[derive(Clone, Debug)]
pub struct EventTypeRepository {
    pool: PgPool,
}

impl EventTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventTypeStore for EventTypeRepository {
    async fn create(&self, description: &str) -> Result<EventType> {
        let event_type = sqlx::query_as::<_, EventType>(
            "INSERT INTO event_types (description) VALUES ($1) RETURNING id, description"
        )
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(event_type)
    }

    async fn update(&self, id: i64, description: &str) -> Result<Option<EventType>> {
        let event_type = sqlx::query_as::<_, EventType>(
            "UPDATE event_types SET description = $2 WHERE id = $1 RETURNING id, description"
        )
        .bind(id)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event_type)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM event_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EventType>> {
        let event_type = sqlx::query_as::<_, EventType>(
            "SELECT id, description FROM event_types WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event_type)
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<EventType>> {
        let event_type = sqlx::query_as::<_, EventType>(
            "SELECT id, description FROM event_types WHERE description = $1"
        )
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event_type)
    }

    async fn list(&self) -> Result<Vec<EventType>> {
        let event_types = sqlx::query_as::<_, EventType>(
            "SELECT id, description FROM event_types ORDER BY description"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(event_types)
    }
}
