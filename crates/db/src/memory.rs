//! In-process [`CheckinStore`] used by the router tests and for local demos.
//!
//! Mirrors the PostgreSQL schema rules: ids are assigned sequentially from 1,
//! `(event_id, phone)` and `username` are unique, and guests must reference an
//! existing event.

use async_trait::async_trait;
use checkin_core::registration::MSG_PHONE_REPEAT;
use checkin_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::event::{CreateEvent, Event, EventFilter};
use crate::models::guest::{CreateGuest, Guest, GuestCounts, GuestFilter};
use crate::models::user::{CreateUser, User};
use crate::repositories::{clamp_limit, clamp_offset};
use crate::store::{CheckinStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    events: Vec<Event>,
    guests: Vec<Guest>,
    users: Vec<User>,
}

/// A [`CheckinStore`] holding every table in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> DbId {
    len as DbId + 1
}

#[async_trait]
impl CheckinStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_event(&self, input: &CreateEvent) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let event = Event {
            id: next_id(tables.events.len()),
            name: input.name.clone(),
            limit: input.limit,
            status: input.status.unwrap_or(true),
            address: input.address.clone(),
            start_time: input.start_time,
            created_at: now,
            updated_at: now,
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn find_event_by_id(&self, id: DbId) -> StoreResult<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .filter(|e| filter.name.as_deref().map_or(true, |name| e.name.contains(name)))
            .cloned()
            .collect())
    }

    async fn create_guest(&self, input: &CreateGuest) -> StoreResult<Guest> {
        let mut tables = self.tables.write().await;
        if !tables.events.iter().any(|e| e.id == input.event_id) {
            return Err(StoreError::MissingReference {
                entity: "Event",
                id: input.event_id,
            });
        }
        if tables
            .guests
            .iter()
            .any(|g| g.event_id == input.event_id && g.phone == input.phone)
        {
            return Err(StoreError::Conflict(MSG_PHONE_REPEAT.into()));
        }
        let now = Utc::now();
        let guest = Guest {
            id: next_id(tables.guests.len()),
            event_id: input.event_id,
            guest_name: input.guest_name.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            sign: false,
            created_at: now,
            updated_at: now,
        };
        tables.guests.push(guest.clone());
        Ok(guest)
    }

    async fn find_guest_by_phone_and_event(
        &self,
        event_id: DbId,
        phone: &str,
    ) -> StoreResult<Option<Guest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .guests
            .iter()
            .find(|g| g.event_id == event_id && g.phone == phone)
            .cloned())
    }

    async fn list_guests(&self, filter: &GuestFilter) -> StoreResult<Vec<Guest>> {
        let tables = self.tables.read().await;
        let limit = clamp_limit(filter.limit) as usize;
        let offset = clamp_offset(filter.offset) as usize;
        Ok(tables
            .guests
            .iter()
            .filter(|g| filter.phone.as_deref().map_or(true, |phone| g.phone.contains(phone)))
            .filter(|g| filter.event_id.map_or(true, |id| g.event_id == id))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_guests(&self, event_id: DbId) -> StoreResult<GuestCounts> {
        let tables = self.tables.read().await;
        let mut counts = GuestCounts::default();
        for guest in tables.guests.iter().filter(|g| g.event_id == event_id) {
            counts.total += 1;
            if guest.sign {
                counts.signed += 1;
            }
        }
        Ok(counts)
    }

    async fn mark_signed(&self, guest_id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .guests
            .iter_mut()
            .find(|g| g.id == guest_id && !g.sign)
        {
            Some(guest) => {
                guest.sign = true;
                guest.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already exists",
                input.username
            )));
        }
        let now = Utc::now();
        let user = User {
            id: next_id(tables.users.len()),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            is_active: input.is_active,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn record_login(&self, user_id: DbId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}
