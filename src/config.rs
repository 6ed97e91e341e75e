//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset or unparsable numeric values fall back to their
//! defaults; only an invalid listen address is an error.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::SportType;

/// Log output format chosen by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    ListenAddr {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct KeeperConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Capacity of the notice broadcast channel.
    pub notice_bus_capacity: usize,
    /// Join-code draws before event creation gives up.
    pub join_code_max_attempts: u32,
    /// bcrypt cost factor.
    pub password_hash_cost: u32,
    /// Sport used when a new event names none.
    pub default_sport: SportType,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Whether to load demo data at startup.
    pub seed_demo_data: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            notice_bus_capacity: 1024,
            join_code_max_attempts: 32,
            password_hash_cost: bcrypt::DEFAULT_COST,
            default_sport: SportType::Basketball,
            request_timeout: Duration::from_secs(30),
            seed_demo_data: false,
            log_format: LogFormat::Text,
        }
    }
}

impl KeeperConfig {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` first to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ListenAddr`] if `LISTEN_ADDR` is set to
    /// something that is not a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`KeeperConfig::from_env`].
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::ListenAddr { value, source })?,
            None => defaults.listen_addr,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            notice_bus_capacity: parse_key(
                &lookup,
                "NOTICE_BUS_CAPACITY",
                defaults.notice_bus_capacity,
            ),
            join_code_max_attempts: parse_key(
                &lookup,
                "JOIN_CODE_MAX_ATTEMPTS",
                defaults.join_code_max_attempts,
            )
            .max(1),
            password_hash_cost: parse_key(
                &lookup,
                "PASSWORD_HASH_COST",
                defaults.password_hash_cost,
            )
            .clamp(MIN_HASH_COST, MAX_HASH_COST),
            default_sport: parse_key(&lookup, "DEFAULT_SPORT", defaults.default_sport),
            request_timeout: Duration::from_secs(parse_key(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            seed_demo_data: parse_bool(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data),
            log_format,
        })
    }
}

/// Cost range bcrypt accepts.
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_key<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses `key` as a boolean. Accepts `true`/`1`/`false`/`0` in any case.
fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<KeeperConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        KeeperConfig::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let Ok(config) = load(&[]) else {
            panic!("defaults load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.notice_bus_capacity, 1024);
        assert_eq!(config.join_code_max_attempts, 32);
        assert_eq!(config.default_sport, SportType::Basketball);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:8081"),
            ("DEFAULT_SPORT", "tennis"),
            ("SEED_DEMO_DATA", "TRUE"),
            ("LOG_FORMAT", "json"),
            ("PASSWORD_HASH_COST", "4"),
            ("JOIN_CODE_MAX_ATTEMPTS", "0"),
        ]) else {
            panic!("valid overrides");
        };
        assert_eq!(config.listen_addr.port(), 8081);
        assert_eq!(config.default_sport, SportType::Tennis);
        assert!(config.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.password_hash_cost, 4);
        assert_eq!(config.join_code_max_attempts, 1);
    }

    #[test]
    fn bad_numbers_fall_back_but_bad_addr_fails() {
        let Ok(config) = load(&[("NOTICE_BUS_CAPACITY", "lots")]) else {
            panic!("numbers fall back");
        };
        assert_eq!(config.notice_bus_capacity, 1024);
        assert!(matches!(
            load(&[("LISTEN_ADDR", "not-an-addr")]),
            Err(ConfigError::ListenAddr { .. })
        ));
        let Ok(config) = load(&[("DEFAULT_SPORT", "quidditch")]) else {
            panic!("unknown sport falls back");
        };
        assert_eq!(config.default_sport, SportType::Basketball);
    }
}
