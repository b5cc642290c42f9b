//! Login-required extractor for the browser-facing management pages.

use axum::extract::FromRequestParts;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkin_core::error::CoreError;

use super::auth::AuthUser;
use crate::auth::cookie::clear_session_cookie;
use crate::error::AppError;
use crate::state::AppState;

/// Path of the login page anonymous visitors are sent to.
pub const LOGIN_PAGE: &str = "/";

/// Requires a valid session. Anonymous or expired sessions are redirected
/// (302) to the login page with the session cookie cleared; store failures
/// still surface as [`AppError`] responses.
///
/// ```ignore
/// async fn page(LoginRequired(user): LoginRequired) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct LoginRequired(pub AuthUser);

impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(LoginRequired(user)),
            Err(AppError::Core(CoreError::Unauthorized(reason))) => {
                tracing::debug!(path = %parts.uri.path(), %reason, "Redirecting to login");
                Err(login_redirect())
            }
            Err(other) => Err(other.into_response()),
        }
    }
}

/// A 302 to the login page that also drops any stale session cookie.
pub fn login_redirect() -> Response {
    (
        StatusCode::FOUND,
        [
            (LOCATION, LOGIN_PAGE.to_string()),
            (SET_COOKIE, clear_session_cookie()),
        ],
    )
        .into_response()
}
