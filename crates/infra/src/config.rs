//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BIND_ADDR` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `USE_PERSISTENT_STORES` | `false` |
//! | `DATABASE_URL` | required when persistent |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `LOCK_TIMEOUT_MS` | unset (wait indefinitely); must be ≥ 1 when set |
//! | `PURCHASE_MAX_ATTEMPTS` | `3` |
//! | `PURCHASE_RETRY_BASE_MS` | `50` |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::retry::RetryPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_MS: u64 = 50;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Which store backs the running service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub backend: StoreBackend,
    /// Upper bound on waiting for an item lock; `None` waits indefinitely.
    pub lock_timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            backend: StoreBackend::InMemory,
            lock_timeout: None,
            retry: RetryPolicy::exponential(
                DEFAULT_MAX_ATTEMPTS,
                Duration::from_millis(DEFAULT_RETRY_BASE_MS),
                MAX_RETRY_DELAY,
            ),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let persistent = match get("USE_PERSISTENT_STORES") {
            None => false,
            Some(v) => parse_flag("USE_PERSISTENT_STORES", &v)?,
        };
        let backend = if persistent {
            StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    get("DATABASE_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            }
        } else {
            StoreBackend::InMemory
        };

        let lock_timeout = match get("LOCK_TIMEOUT_MS") {
            None => None,
            Some(v) => match parse::<u64>("LOCK_TIMEOUT_MS", &v)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        name: "LOCK_TIMEOUT_MS",
                        value: v,
                        reason: "must be at least 1; leave unset to wait indefinitely"
                            .to_string(),
                    });
                }
                ms => Some(Duration::from_millis(ms)),
            },
        };

        let max_attempts: u32 = parse_or(
            "PURCHASE_MAX_ATTEMPTS",
            get("PURCHASE_MAX_ATTEMPTS"),
            DEFAULT_MAX_ATTEMPTS,
        )?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "PURCHASE_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let base_ms: u64 = parse_or(
            "PURCHASE_RETRY_BASE_MS",
            get("PURCHASE_RETRY_BASE_MS"),
            DEFAULT_RETRY_BASE_MS,
        )?;

        Ok(Self {
            bind_addr,
            port,
            backend,
            lock_timeout,
            retry: RetryPolicy::exponential(
                max_attempts,
                Duration::from_millis(base_ms),
                MAX_RETRY_DELAY.max(Duration::from_millis(base_ms)),
            ),
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => parse(name, &v),
        None => Ok(default),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn persistent_store_requires_database_url() {
        let err = config(&[("USE_PERSISTENT_STORES", "true")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn persistent_store_reads_pool_settings() {
        let cfg = config(&[
            ("USE_PERSISTENT_STORES", "1"),
            ("DATABASE_URL", "postgres://localhost/bazaar"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("LOCK_TIMEOUT_MS", "250"),
        ])
        .unwrap();
        assert_eq!(
            cfg.backend,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/bazaar".to_string(),
                max_connections: 4,
            }
        );
        assert_eq!(cfg.lock_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn retry_settings_are_applied() {
        let cfg = config(&[("PURCHASE_MAX_ATTEMPTS", "5"), ("PURCHASE_RETRY_BASE_MS", "10")])
            .unwrap();
        assert_eq!(cfg.retry.max_attempts, 5);
        assert_eq!(cfg.retry.base_delay, Duration::from_millis(10));
    }

    #[test]
    fn bad_values_are_reported_by_name() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("USE_PERSISTENT_STORES", "maybe")]),
            Err(ConfigError::Invalid { name: "USE_PERSISTENT_STORES", .. })
        ));
        assert!(matches!(
            config(&[("PURCHASE_MAX_ATTEMPTS", "0")]),
            Err(ConfigError::Invalid { name: "PURCHASE_MAX_ATTEMPTS", .. })
        ));
    }

    #[test]
    fn zero_lock_timeout_is_rejected() {
        assert!(matches!(
            config(&[("LOCK_TIMEOUT_MS", "0")]),
            Err(ConfigError::Invalid { name: "LOCK_TIMEOUT_MS", .. })
        ));
        assert_eq!(
            config(&[("LOCK_TIMEOUT_MS", "1")]).unwrap().lock_timeout,
            Some(Duration::from_millis(1))
        );
    }
}
