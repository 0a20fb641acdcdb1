//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `CANTEEN_BIND_ADDR` | `0.0.0.0:8080` |
//! | `DATABASE_URL` | `sqlite://canteen.db?mode=rwc` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `SESSION_TTL_SECS` | `86400` |
//! | `CANTEEN_ADMIN_EMAIL`, `CANTEEN_ADMIN_PASSWORD` | unset |

use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Credentials for the account created at startup if it does not exist yet.
#[derive(Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_ttl: Duration,
    pub admin: Option<AdminAccount>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let admin = match (var("CANTEEN_ADMIN_EMAIL"), var("CANTEEN_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminAccount { email, password }),
            (None, None) => None,
            _ => {
                warn!("Only one of CANTEEN_ADMIN_EMAIL and CANTEEN_ADMIN_PASSWORD is set, ignoring both");
                None
            }
        };

        Ok(Self {
            bind_addr: try_load("CANTEEN_BIND_ADDR", "0.0.0.0:8080")?,
            database_url: try_load("DATABASE_URL", "sqlite://canteen.db?mode=rwc")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            session_ttl: Duration::from_secs(try_load("SESSION_TTL_SECS", "86400")?),
            admin,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            session_ttl: Duration::from_secs(86400),
            admin: None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_load_falls_back_to_default() {
        let port: u16 = try_load("CANTEEN_TEST_UNSET_VARIABLE", "1111").unwrap();
        assert_eq!(port, 1111);
    }

    #[test]
    fn try_load_reports_bad_values() {
        let err = try_load::<u32>("CANTEEN_TEST_UNSET_VARIABLE", "lots").unwrap_err();
        assert!(err.to_string().contains("CANTEEN_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn admin_password_is_not_debug_printed() {
        let admin = AdminAccount {
            email: "root@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{admin:?}").contains("hunter22"));
    }
}
