//! Session configuration.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig` and `MongoConfig`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Default session lifetime: one day.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

/// Session token configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `SESSION_TTL_SECS` (default: 86400)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::auth::SessionConfig;
/// use core_config::FromEnv;
///
/// let config = SessionConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = SessionConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Token signing secret (minimum 32 characters)
    pub secret: String,
    /// Token and cookie lifetime in seconds
    pub ttl_seconds: i64,
}

impl SessionConfig {
    /// Create a config with the given secret and the default lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_seconds: DEFAULT_SESSION_TTL_SECS,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl FromEnv for SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_seconds = env_or_default("SESSION_TTL_SECS", &DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<i64>()
            .map_err(|e| ConfigError::ParseError {
                key: "SESSION_TTL_SECS".to_string(),
                details: e.to_string(),
            })?;

        if ttl_seconds <= 0 {
            return Err(ConfigError::ParseError {
                key: "SESSION_TTL_SECS".to_string(),
                details: "must be a positive number of seconds".to_string(),
            });
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_session_config_new_valid() {
        let config = SessionConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_seconds, DEFAULT_SESSION_TTL_SECS);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_session_config_new_too_short() {
        SessionConfig::new("short");
    }

    #[test]
    fn test_session_config_from_env_defaults_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("SESSION_TTL_SECS", None)],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_seconds, 86_400);
            },
        );
    }

    #[test]
    fn test_session_config_from_env_custom_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("SESSION_TTL_SECS", Some("3600"))],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert_eq!(config.ttl_seconds, 3600);
            },
        );
    }

    #[test]
    fn test_session_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = SessionConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_session_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = SessionConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_session_config_rejects_non_positive_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("SESSION_TTL_SECS", Some("0"))],
            || {
                let err = SessionConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SESSION_TTL_SECS"));
            },
        );
    }
}
