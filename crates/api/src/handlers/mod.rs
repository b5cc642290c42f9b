//! Request handlers.
//!
//! Handlers resolve data through the [`CheckinStore`](checkin_db::CheckinStore)
//! held in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod event;
pub mod guest;
pub mod login;
pub mod sign;
