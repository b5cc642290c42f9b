//! Event entity model and DTOs.

use checkin_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An event row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    /// Guest capacity.
    pub limit: i32,
    /// Whether the event accepts registrations.
    pub status: bool,
    pub address: String,
    pub start_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub limit: i32,
    /// Defaults to `true` if omitted.
    pub status: Option<bool>,
    #[validate(length(min = 1, max = 200))]
    pub address: String,
    pub start_time: Timestamp,
}

/// Filter for event listing. `name` is a case-sensitive substring match.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub name: Option<String>,
}
