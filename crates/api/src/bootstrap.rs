//! Startup provisioning of the admin account.

use checkin_core::error::CoreError;
use checkin_db::models::user::CreateUser;
use checkin_db::CheckinStore;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminSeed;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless the username already exists.
///
/// Returns `true` when a new account was created. An existing account is left
/// untouched, including its password.
pub async fn ensure_admin(store: &dyn CheckinStore, seed: &AdminSeed) -> AppResult<bool> {
    if store.find_user_by_username(&seed.username).await?.is_some() {
        tracing::debug!(username = %seed.username, "Admin account already present");
        return Ok(false);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = store
        .create_user(&CreateUser {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            is_active: true,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use checkin_db::MemoryStore;

    use super::*;

    fn seed(password: &str) -> AdminSeed {
        AdminSeed {
            username: "admin".to_string(),
            password: password.to_string(),
            email: "admin@mail.com".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_admin_once() {
        let store = MemoryStore::new();
        assert!(ensure_admin(&store, &seed("admin123456")).await.unwrap());
        assert!(!ensure_admin(&store, &seed("other-password")).await.unwrap());

        let user = store.find_user_by_username("admin").await.unwrap().unwrap();
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.email, "admin@mail.com");
    }

    #[tokio::test]
    async fn rejects_weak_password() {
        let store = MemoryStore::new();
        assert_matches!(
            ensure_admin(&store, &seed("123")).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
