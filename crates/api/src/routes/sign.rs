//! Route definitions for the sign-in kiosk. No session required.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sign;
use crate::state::AppState;

/// ```text
/// GET   /sign_index/{event_id}/         -> sign_index
/// POST  /sign_index_action/{event_id}/  -> sign_index_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign_index/{event_id}/", get(sign::sign_index))
        .route(
            "/sign_index_action/{event_id}/",
            post(sign::sign_index_action),
        )
}
