//! Guest registration rules.
//!
//! A guest may only be added to an event that is active, has capacity left
//! and has not started yet. Phone uniqueness per event is enforced by the
//! store (and by the `uq_guests_event_phone` constraint).

use crate::error::CoreError;
use crate::types::Timestamp;

pub const MSG_EVENT_UNAVAILABLE: &str = "event status is not available";
pub const MSG_EVENT_FULL: &str = "event number is full";
pub const MSG_EVENT_STARTED: &str = "event has started";
pub const MSG_PHONE_REPEAT: &str = "the event guest phone number repeat";

/// The event state a registration is checked against.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationWindow {
    /// The event's active flag.
    pub status: bool,
    /// Event capacity.
    pub limit: i32,
    /// Guests already registered for the event.
    pub registered: i64,
    pub start_time: Timestamp,
}

/// Check whether one more guest may register, as of `now`.
pub fn check_registration(window: &RegistrationWindow, now: Timestamp) -> Result<(), CoreError> {
    if !window.status {
        return Err(CoreError::Conflict(MSG_EVENT_UNAVAILABLE.into()));
    }
    if window.registered >= i64::from(window.limit) {
        return Err(CoreError::Conflict(MSG_EVENT_FULL.into()));
    }
    if window.start_time <= now {
        return Err(CoreError::Conflict(MSG_EVENT_STARTED.into()));
    }
    Ok(())
}
