//! Event repository implementation

use std::collections::HashMap;
use std::time::Instant;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use crate::models::{
    ContractedSupplier, EnrolledParticipant, Event, EventAggregate, EventRequest, EventType,
    Participant, Supplier,
};
use crate::utils::errors::Result;
use crate::utils::logging::log_database_operation;
use super::EventStore;

const EVENT_COLUMNS: &str =
    "id, name, start_date, end_date, venue, address, notes, max_capacity, max_budget_cents, event_type_id";

#[derive(FromRow)]
struct EnrolledParticipantRow {
    event_id: i64,
    enrolled_at: DateTime<Utc>,
    #[sqlx(flatten)]
    participant: Participant,
}

#[derive(FromRow)]
struct ContractedSupplierRow {
    event_id: i64,
    contracted_price_cents: i64,
    #[sqlx(flatten)]
    supplier: Supplier,
}

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach type, enrollments and contracts to a batch of events, keeping their order
    async fn load_aggregates(&self, events: Vec<Event>) -> Result<Vec<EventAggregate>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let event_ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        let type_ids: Vec<i64> = events.iter().map(|e| e.event_type_id).collect();

        let event_types: HashMap<i64, EventType> = sqlx::query_as::<_, EventType>(
            "SELECT id, description FROM event_types WHERE id = ANY($1)"
        )
        .bind(&type_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

        let participant_rows = sqlx::query_as::<_, EnrolledParticipantRow>(
            r#"
            SELECT ep.event_id, ep.enrolled_at, p.id, p.full_name, p.cpf, p.phone, p.kind
            FROM event_participants ep
            JOIN participants p ON p.id = ep.participant_id
            WHERE ep.event_id = ANY($1)
            ORDER BY p.full_name, p.id
            "#
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let supplier_rows = sqlx::query_as::<_, ContractedSupplierRow>(
            r#"
            SELECT es.event_id, es.contracted_price_cents, s.id, s.service_name, s.cnpj, s.base_price_cents
            FROM event_suppliers es
            JOIN suppliers s ON s.id = es.supplier_id
            WHERE es.event_id = ANY($1)
            ORDER BY s.service_name, s.id
            "#
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut participants: HashMap<i64, Vec<EnrolledParticipant>> = HashMap::new();
        for row in participant_rows {
            participants.entry(row.event_id).or_default().push(EnrolledParticipant {
                participant: row.participant,
                enrolled_at: row.enrolled_at,
            });
        }

        let mut suppliers: HashMap<i64, Vec<ContractedSupplier>> = HashMap::new();
        for row in supplier_rows {
            suppliers.entry(row.event_id).or_default().push(ContractedSupplier {
                supplier: row.supplier,
                contracted_price_cents: row.contracted_price_cents,
            });
        }

        log_database_operation("load_aggregates", "events", started.elapsed().as_millis() as u64, true);

        Ok(events
            .into_iter()
            .map(|event| EventAggregate {
                event_type: event_types.get(&event.event_type_id).cloned(),
                participants: participants.remove(&event.id).unwrap_or_default(),
                suppliers: suppliers.remove(&event.id).unwrap_or_default(),
                event,
            })
            .collect())
    }
}

#[async_trait]
impl EventStore for EventRepository {
    /// Create a new event
    async fn create(&self, request: &EventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (name, start_date, end_date, venue, address, notes, max_capacity, max_budget_cents, event_type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(&request.name)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.venue)
        .bind(&request.address)
        .bind(&request.notes)
        .bind(request.max_capacity)
        .bind(request.max_budget_cents)
        .bind(request.event_type_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Replace every field of an existing event
    async fn update(&self, id: i64, request: &EventRequest) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = $2, start_date = $3, end_date = $4, venue = $5, address = $6, notes = $7,
                max_capacity = $8, max_budget_cents = $9, event_type_id = $10
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(&request.name)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.venue)
        .bind(&request.address)
        .bind(&request.notes)
        .bind(request.max_capacity)
        .bind(request.max_budget_cents)
        .bind(request.event_type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find event by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_aggregate(&self, id: i64) -> Result<Option<EventAggregate>> {
        let Some(event) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.load_aggregates(vec![event]).await?.pop())
    }

    async fn list_aggregates(&self, offset: i64, limit: i64) -> Result<Vec<EventAggregate>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY start_date, id LIMIT $1 OFFSET $2",
            EVENT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.load_aggregates(events).await
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn add_participant(&self, event_id: i64, participant_id: i64, enrolled_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "INSERT INTO event_participants (participant_id, event_id, enrolled_at) VALUES ($1, $2, $3)"
        )
        .bind(participant_id)
        .bind(event_id)
        .bind(enrolled_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_participant(&self, event_id: i64, participant_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM event_participants WHERE participant_id = $1 AND event_id = $2"
        )
        .bind(participant_id)
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_supplier(&self, event_id: i64, supplier_id: i64, contracted_price_cents: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO event_suppliers (event_id, supplier_id, contracted_price_cents) VALUES ($1, $2, $3)"
        )
        .bind(event_id)
        .bind(supplier_id)
        .bind(contracted_price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_supplier(&self, event_id: i64, supplier_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM event_suppliers WHERE event_id = $1 AND supplier_id = $2"
        )
        .bind(event_id)
        .bind(supplier_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
