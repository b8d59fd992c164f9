//! Participant repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use crate::models::{EnrolledEvent, Event, Participant, ParticipantRequest, ParticipantWithEvents};
use crate::utils::errors::Result;
use super::ParticipantStore;

const PARTICIPANT_COLUMNS: &str = "id, full_name, cpf, phone, kind";

#[derive(FromRow)]
struct EnrolledEventRow {
    enrolled_at: DateTime<Utc>,
    #[sqlx(flatten)]
    event: Event,
}

#[derive(Clone, Debug)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn enrolled_events(&self, participant_id: i64) -> Result<Vec<EnrolledEvent>> {
        let rows = sqlx::query_as::<_, EnrolledEventRow>(
            r#"
            SELECT ep.enrolled_at,
                   e.id, e.name, e.start_date, e.end_date, e.venue, e.address, e.notes,
                   e.max_capacity, e.max_budget_cents, e.event_type_id
            FROM event_participants ep
            JOIN events e ON e.id = ep.event_id
            WHERE ep.participant_id = $1
            ORDER BY e.start_date
            "#
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| EnrolledEvent { event: row.event, enrolled_at: row.enrolled_at })
            .collect())
    }
}

#[async_trait]
impl ParticipantStore for ParticipantRepository {
    async fn create(&self, request: &ParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO participants (full_name, cpf, phone, kind) VALUES ($1, $2, $3, $4) RETURNING {}",
            PARTICIPANT_COLUMNS
        ))
        .bind(&request.full_name)
        .bind(&request.cpf)
        .bind(&request.phone)
        .bind(request.kind.code())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn update(&self, id: i64, request: &ParticipantRequest) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET full_name = $2, cpf = $3, phone = $4, kind = $5
            WHERE id = $1
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.cpf)
        .bind(&request.phone)
        .bind(request.kind.code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE id = $1",
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE cpf = $1",
            PARTICIPANT_COLUMNS
        ))
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn find_with_events_by_cpf(&self, cpf: &str) -> Result<Option<ParticipantWithEvents>> {
        let Some(participant) = self.find_by_cpf(cpf).await? else {
            return Ok(None);
        };

        let events = self.enrolled_events(participant.id).await?;
        Ok(Some(ParticipantWithEvents { participant, events }))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants ORDER BY full_name, id LIMIT $1 OFFSET $2",
            PARTICIPANT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
