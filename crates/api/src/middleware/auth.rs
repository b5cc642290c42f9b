//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use checkin_core::error::CoreError;
use checkin_core::types::DbId;

use crate::auth::cookie::{read_cookie, SESSION_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session token.
///
/// The token is taken from an `Authorization: Bearer` header if present,
/// otherwise from the session cookie. The user is then looked up through the
/// store so deleted or deactivated accounts lose access immediately.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let token = bearer
            .or_else(|| read_cookie(&parts.headers, SESSION_COOKIE))
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Login required".into())))?;

        let claims = validate_token(token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let user = state
            .store
            .find_user_by_id(claims.sub)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "User no longer exists or is inactive".into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
