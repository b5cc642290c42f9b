//! Route definitions for guests.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::guest;
use crate::state::AppState;

/// ```text
/// GET|POST  /guest_manage/  -> guest_manage
/// GET|POST  /search_phone/  -> search_phone
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/guest_manage/",
            get(guest::guest_manage).post(guest::guest_manage),
        )
        .route(
            "/search_phone/",
            get(guest::search_phone).post(guest::search_phone),
        )
}

/// Routes mounted under `/api`.
///
/// ```text
/// POST  /guests/  -> create
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new().route("/guests/", post(guest::create))
}
