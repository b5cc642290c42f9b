//! Guest entity model and DTOs.

use checkin_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A guest row from the `guests` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Guest {
    pub id: DbId,
    pub event_id: DbId,
    pub guest_name: String,
    pub phone: String,
    pub email: String,
    /// Set once the guest has signed in. Never reset.
    pub sign: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a guest. New guests always start unsigned.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGuest {
    pub event_id: DbId,
    #[validate(length(min = 1, max = 64))]
    pub guest_name: String,
    #[validate(length(min = 1, max = 16))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
}

/// Filter for guest listing.
#[derive(Debug, Clone, Default)]
pub struct GuestFilter {
    /// Substring match on the phone number.
    pub phone: Option<String>,
    pub event_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Registered and signed-in head counts for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct GuestCounts {
    pub total: i64,
    pub signed: i64,
}
