//! Runtime configuration from environment variables

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Longest accepted cache TTL or warm-up period
pub const MAX_CACHE_SECS: u64 = 86_400 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub database_max_connections: u32,
    /// TTL for cached marketplace listings and ledger totals
    pub cache_ttl: Duration,
    pub cache_warm_interval: Duration,
    /// Mount `/api/cache/*` admin routes
    pub cache_admin_enabled: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            cache_ttl: parse_secs(&lookup, "CACHE_TTL_SECS", 15 * 60)?,
            cache_warm_interval: parse_secs(&lookup, "CACHE_WARM_INTERVAL_SECS", 10 * 60)?,
            cache_admin_enabled: parse_or(&lookup, "ENABLE_CACHE_ADMIN", false)?,
        })
    }

    /// Socket address to bind the HTTP server to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: self.host.clone(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Whole seconds in `1..=MAX_CACHE_SECS`
fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(lookup, name, default)?;
    if !(1..=MAX_CACHE_SECS).contains(&secs) {
        return Err(ConfigError::Invalid {
            name,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/haulers")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.cache_ttl, Duration::from_secs(900));
        assert_eq!(config.cache_warm_interval, Duration::from_secs(600));
        assert!(!config.cache_admin_enabled);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/haulers"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/haulers"),
            ("HOST", "127.0.0.1"),
            ("PORT", " 3000 "),
            ("CACHE_TTL_SECS", "60"),
            ("ENABLE_CACHE_ADMIN", "true"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert!(config.cache_admin_enabled);
    }

    #[test]
    fn test_zero_warm_interval_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/haulers"),
            ("CACHE_WARM_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name: "CACHE_WARM_INTERVAL_SECS", .. }
        ));
    }

    #[test]
    fn test_cache_ttl_bounds() {
        let u64_max = u64::MAX.to_string();
        let over_a_year = (MAX_CACHE_SECS + 1).to_string();
        for value in ["0", over_a_year.as_str(), u64_max.as_str()] {
            let err = Config::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/haulers"),
                ("CACHE_TTL_SECS", value),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: "CACHE_TTL_SECS", .. }));
        }

        let year = MAX_CACHE_SECS.to_string();
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/haulers"),
            ("CACHE_TTL_SECS", year.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(MAX_CACHE_SECS));
    }

    #[test]
    fn test_invalid_admin_flag_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/haulers"),
            ("ENABLE_CACHE_ADMIN", "sure"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ENABLE_CACHE_ADMIN"));
    }
}
