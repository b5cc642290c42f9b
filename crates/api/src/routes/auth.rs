//! Route definitions for login and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::login;
use crate::state::AppState;

/// ```text
/// GET       /               -> index
/// POST      /login_action/  -> login_action
/// GET|POST  /logout/        -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(login::index))
        .route("/login_action/", post(login::login_action))
        .route("/logout/", get(login::logout).post(login::logout))
}
