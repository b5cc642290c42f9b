//! Session token generation and validation.
//!
//! A session is an HS256-signed JWT carrying [`Claims`]. The token is handed
//! to the browser in the session cookie (see [`super::cookie`]) and may also
//! be presented as a `Bearer` token.

use checkin_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Username at the time of login.
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in minutes (default: 720).
    pub expiry_mins: i64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Default session lifetime in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 720;

impl SessionConfig {
    /// Load session configuration through `lookup`.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `SESSION_SECRET`         | **yes**  | --      |
    /// | `SESSION_EXPIRY_MINS`    | no       | `720`   |
    /// | `SESSION_COOKIE_SECURE`  | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret = lookup("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let expiry_mins: i64 = lookup("SESSION_EXPIRY_MINS")
            .unwrap_or_else(|| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_MINS must be a valid i64");

        let cookie_secure: bool = lookup("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        Self {
            secret,
            expiry_mins,
            cookie_secure,
        }
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_mins * 60
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    username: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: now + config.expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
