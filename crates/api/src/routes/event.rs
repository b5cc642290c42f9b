//! Route definitions for events.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// ```text
/// GET|POST  /event_manage/  -> event_manage
/// GET|POST  /search_name/   -> search_name
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/event_manage/",
            get(event::event_manage).post(event::event_manage),
        )
        .route(
            "/search_name/",
            get(event::search_name).post(event::search_name),
        )
}

/// Routes mounted under `/api`.
///
/// ```text
/// POST  /events/       -> create
/// GET   /events/{id}/  -> get_by_id
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/events/", post(event::create))
        .route("/events/{id}/", get(event::get_by_id))
}
