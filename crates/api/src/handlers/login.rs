//! Handlers for the login page, login action and logout.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::cookie::session_cookie;
use crate::auth::jwt::generate_session_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::session::login_redirect;
use crate::state::AppState;

/// Inline message for any failed login.
pub const MSG_LOGIN_ERROR: &str = "username or password error!";

/// Where a successful login lands.
pub const AFTER_LOGIN: &str = "/event_manage/";

const LOGIN_HTML: &str = include_str!("../../static/login.html");

/// Form body for `POST /login_action/`. Missing fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned with a 200 when the credentials are rejected.
#[derive(Debug, Serialize)]
pub struct LoginFailure {
    pub error: &'static str,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// POST /login_action/
///
/// Valid credentials set the session cookie and redirect (302) to the event
/// list. Anything else answers 200 with [`MSG_LOGIN_ERROR`], including a body
/// that is not url-encoded, which counts as empty credentials.
pub async fn login_action(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::debug!(%rejection, "Login body unreadable, treating as empty");
            LoginForm::default()
        }
    };
    let username = input.username.as_str();
    if username.is_empty() || input.password.is_empty() {
        return Ok(login_failed());
    }

    let Some(user) = state.store.find_user_by_username(username).await? else {
        tracing::info!(%username, "Login rejected: unknown user");
        return Ok(login_failed());
    };

    if !user.is_active {
        tracing::info!(user_id = user.id, "Login rejected: account inactive");
        return Ok(login_failed());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Ok(login_failed());
    }

    state.store.record_login(user.id).await?;

    let session = &state.config.session;
    let token = generate_session_token(user.id, &user.username, session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, AFTER_LOGIN.to_string()),
            (
                SET_COOKIE,
                session_cookie(&token, session.expiry_secs(), session.cookie_secure),
            ),
        ],
    )
        .into_response())
}

/// GET|POST /logout/
///
/// Clears the session cookie and returns to the login page.
pub async fn logout() -> Response {
    login_redirect()
}

fn login_failed() -> Response {
    (
        StatusCode::OK,
        Json(LoginFailure {
            error: MSG_LOGIN_ERROR,
        }),
    )
        .into_response()
}
