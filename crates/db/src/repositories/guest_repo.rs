//! Repository for the `guests` table.

use checkin_core::types::DbId;
use sqlx::PgPool;

use super::{clamp_limit, clamp_offset};
use crate::models::guest::{CreateGuest, Guest, GuestCounts, GuestFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, guest_name, phone, email, sign, created_at, updated_at";

/// Provides create, query and sign-in operations for guests.
pub struct GuestRepo;

impl GuestRepo {
    /// Insert a new guest, returning the created row.
    ///
    /// Fails with a unique violation on `uq_guests_event_phone` if the phone
    /// is already registered for the event.
    pub async fn create(pool: &PgPool, input: &CreateGuest) -> Result<Guest, sqlx::Error> {
        let query = format!(
            "INSERT INTO guests (event_id, guest_name, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(input.event_id)
            .bind(&input.guest_name)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find the guest registered for `event_id` under an exact `phone`.
    pub async fn find_by_phone_and_event(
        pool: &PgPool,
        event_id: DbId,
        phone: &str,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE event_id = $1 AND phone = $2");
        sqlx::query_as::<_, Guest>(&query)
            .bind(event_id)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// List guests in id order with optional phone substring and event filters.
    pub async fn list(pool: &PgPool, filter: &GuestFilter) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests
             WHERE ($1::TEXT IS NULL OR strpos(phone, $1) > 0)
               AND ($2::BIGINT IS NULL OR event_id = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(filter.phone.as_deref())
            .bind(filter.event_id)
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Count registered and signed-in guests for an event.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<GuestCounts, sqlx::Error> {
        sqlx::query_as::<_, GuestCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE sign) AS signed
             FROM guests
             WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await
    }

    /// Flip `sign` from false to true.
    ///
    /// Returns `false` if the guest does not exist or was already signed in,
    /// so two concurrent requests can never both succeed.
    pub async fn mark_signed(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE guests SET sign = true WHERE id = $1 AND sign = false")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
