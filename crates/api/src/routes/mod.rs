pub mod auth;
pub mod event;
pub mod guest;
pub mod health;
pub mod sign;

use axum::Router;

use crate::state::AppState;

/// Build the browser-facing route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                   login page
/// /login_action/                      login (POST)
/// /logout/                            logout
///
/// /event_manage/                      event list (login required)
/// /search_name/                       event search by name (login required)
///
/// /guest_manage/                      guest list (login required)
/// /search_phone/                      guest search by phone (login required)
///
/// /sign_index/{event_id}/             kiosk page: event + head counts
/// /sign_index_action/{event_id}/      guest sign-in (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(event::router())
        .merge(guest::router())
        .merge(sign::router())
}

/// Build the `/api` JSON route tree. Every route requires a session.
///
/// ```text
/// /events/                            create (POST)
/// /events/{id}/                       get
/// /guests/                            register (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(event::api_router())
        .merge(guest::api_router())
}
