use crate::auth::jwt::SessionConfig;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Credentials for the admin account created at startup when missing.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Maximum pooled database connections (default: `10`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token and cookie settings.
    pub session: SessionConfig,
    /// Admin account to ensure at startup, if configured.
    pub admin: Option<AdminSeed>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, applying defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:8000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_USERNAME`       | unset                      |
    /// | `ADMIN_PASSWORD`       | unset                      |
    /// | `ADMIN_EMAIL`          | empty                      |
    /// | `LOG_FORMAT`           | `text`                     |
    ///
    /// Session settings are read by [`SessionConfig::from_source`].
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let db_max_connections: u32 = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() => Some(AdminSeed {
                username,
                password,
                email: lookup("ADMIN_EMAIL").unwrap_or_default(),
            }),
            _ => None,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let session = SessionConfig::from_source(&lookup);

        Self {
            host,
            port,
            db_max_connections,
            cors_origins,
            request_timeout_secs,
            session,
            admin,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_source(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config_from(&[("SESSION_SECRET", "s")]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.cors_origins, vec!["http://localhost:8000".to_string()]);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.admin.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = config_from(&[
            ("SESSION_SECRET", "s"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
        ]);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn admin_seed_needs_username_and_password() {
        let config = config_from(&[("SESSION_SECRET", "s"), ("ADMIN_USERNAME", "admin")]);
        assert!(config.admin.is_none());

        let config = config_from(&[
            ("SESSION_SECRET", "s"),
            ("ADMIN_USERNAME", "admin"),
            ("ADMIN_PASSWORD", "admin123456"),
        ]);
        let admin = config.admin.expect("admin seed should be configured");
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password, "admin123456");
        assert_eq!(admin.email, "");
    }

    #[test]
    fn json_log_format() {
        let config = config_from(&[("SESSION_SECRET", "s"), ("LOG_FORMAT", "json")]);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn invalid_port_panics() {
        config_from(&[("SESSION_SECRET", "s"), ("PORT", "eighty")]);
    }
}
