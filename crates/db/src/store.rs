//! The data-access seam used by the HTTP layer.
//!
//! Handlers never touch a pool directly; they go through [`CheckinStore`],
//! which [`PgStore`] implements on top of the repositories and
//! [`crate::MemoryStore`] implements in process.

use async_trait::async_trait;
use checkin_core::registration::MSG_PHONE_REPEAT;
use checkin_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventFilter};
use crate::models::guest::{CreateGuest, Guest, GuestCounts, GuestFilter};
use crate::models::user::{CreateUser, User};
use crate::repositories::{EventRepo, GuestRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL error code for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Constraint guarding one phone per event.
const GUEST_PHONE_CONSTRAINT: &str = "uq_guests_event_phone";

/// Constraint guarding unique usernames.
const USERNAME_CONSTRAINT: &str = "uq_users_username";

/// Errors produced by a [`CheckinStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An underlying sqlx error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced parent row does not exist.
    #[error("{entity} with id {id} not found")]
    MissingReference { entity: &'static str, id: DbId },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for events, guests and admin users.
#[async_trait]
pub trait CheckinStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    async fn create_event(&self, input: &CreateEvent) -> StoreResult<Event>;

    async fn find_event_by_id(&self, id: DbId) -> StoreResult<Option<Event>>;

    /// Events in id order, narrowed by [`EventFilter`].
    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>>;

    /// Register a guest. Fails with [`StoreError::Conflict`] on a duplicate
    /// phone for the same event and [`StoreError::MissingReference`] for an
    /// unknown event.
    async fn create_guest(&self, input: &CreateGuest) -> StoreResult<Guest>;

    async fn find_guest_by_phone_and_event(
        &self,
        event_id: DbId,
        phone: &str,
    ) -> StoreResult<Option<Guest>>;

    /// Guests in id order, narrowed and paged by [`GuestFilter`].
    async fn list_guests(&self, filter: &GuestFilter) -> StoreResult<Vec<Guest>>;

    async fn count_guests(&self, event_id: DbId) -> StoreResult<GuestCounts>;

    /// Flip the guest's `sign` flag from false to true. Returns `false` when
    /// nothing changed.
    async fn mark_signed(&self, guest_id: DbId) -> StoreResult<bool>;

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Stamp the user's `last_login_at`.
    async fn record_login(&self, user_id: DbId) -> StoreResult<()>;
}

/// [`CheckinStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckinStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_event(&self, input: &CreateEvent) -> StoreResult<Event> {
        Ok(EventRepo::create(&self.pool, input).await?)
    }

    async fn find_event_by_id(&self, id: DbId) -> StoreResult<Option<Event>> {
        Ok(EventRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        Ok(EventRepo::list(&self.pool, filter).await?)
    }

    async fn create_guest(&self, input: &CreateGuest) -> StoreResult<Guest> {
        GuestRepo::create(&self.pool, input)
            .await
            .map_err(|err| classify_guest_insert(err, input.event_id))
    }

    async fn find_guest_by_phone_and_event(
        &self,
        event_id: DbId,
        phone: &str,
    ) -> StoreResult<Option<Guest>> {
        Ok(GuestRepo::find_by_phone_and_event(&self.pool, event_id, phone).await?)
    }

    async fn list_guests(&self, filter: &GuestFilter) -> StoreResult<Vec<Guest>> {
        Ok(GuestRepo::list(&self.pool, filter).await?)
    }

    async fn count_guests(&self, event_id: DbId) -> StoreResult<GuestCounts> {
        Ok(GuestRepo::count_for_event(&self.pool, event_id).await?)
    }

    async fn mark_signed(&self, guest_id: DbId) -> StoreResult<bool> {
        let updated = GuestRepo::mark_signed(&self.pool, guest_id).await?;
        if !updated {
            tracing::debug!(guest_id, "Conditional sign update matched no row");
        }
        Ok(updated)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, input).await.map_err(|err| {
            if constraint_of(&err) == Some(USERNAME_CONSTRAINT) {
                let username = &input.username;
                return StoreError::Conflict(format!("username '{username}' already exists"));
            }
            StoreError::Database(err)
        })
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn record_login(&self, user_id: DbId) -> StoreResult<()> {
        Ok(UserRepo::record_successful_login(&self.pool, user_id).await?)
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

fn classify_guest_insert(err: sqlx::Error, event_id: DbId) -> StoreError {
    if constraint_of(&err) == Some(GUEST_PHONE_CONSTRAINT) {
        return StoreError::Conflict(MSG_PHONE_REPEAT.into());
    }
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return StoreError::MissingReference {
                entity: "Event",
                id: event_id,
            };
        }
    }
    StoreError::Database(err)
}
