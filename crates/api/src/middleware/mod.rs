//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the session token to an active user, rejecting with 401.
//! - [`session::LoginRequired`] -- Same check for browser pages, redirecting to the login page.

pub mod auth;
pub mod session;
