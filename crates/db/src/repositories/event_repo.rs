//! Repository for the `events` table.

use checkin_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventFilter};

/// Column list shared across queries. `limit` is a reserved word.
const COLUMNS: &str = "id, name, \"limit\", status, address, start_time, created_at, updated_at";

/// Provides create and query operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (name, \"limit\", status, address, start_time)
             VALUES ($1, $2, COALESCE($3, true), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.name)
            .bind(input.limit)
            .bind(input.status)
            .bind(&input.address)
            .bind(input.start_time)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events in id order, optionally narrowed to names containing
    /// `filter.name`.
    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::TEXT IS NULL OR strpos(name, $1) > 0)
             ORDER BY id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.name.as_deref())
            .fetch_all(pool)
            .await
    }
}
