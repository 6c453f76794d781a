//! Dev server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPFRONT_PORT` - Listen port (default: 5173)
//! - `SHOPFRONT_PROXY_TARGET` - Local HTTPS origin for `/user` and `/admin`
//!   (default: <https://localhost:7001>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

use crate::proxy::DevProxyConfig;

/// Default local origin the dev proxy forwards to.
pub const DEFAULT_PROXY_TARGET: &str = "https://localhost:7001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dev server configuration.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Proxy rules for backend paths
    pub proxy: DevProxyConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl DevServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup };

        let host = env.parse_or("SHOPFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or("SHOPFRONT_PORT", "5173")?;
        let proxy_target: Url = env.parse_or("SHOPFRONT_PROXY_TARGET", DEFAULT_PROXY_TARGET)?;
        if proxy_target.host_str().is_none() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_PROXY_TARGET".to_string(),
                "must include a host".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            proxy: DevProxyConfig::standard(&proxy_target),
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DevServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DevServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5173");
        assert!(config.sentry_dsn.is_none());

        let prefixes: Vec<&str> = config.proxy.rules.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["/user", "/admin"]);
        for rule in &config.proxy.rules {
            assert_eq!(rule.target.as_str(), "https://localhost:7001/");
            assert!(rule.change_origin);
            assert!(!rule.secure);
        }
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPFRONT_HOST", "0.0.0.0"),
            ("SHOPFRONT_PORT", "8080"),
            ("SHOPFRONT_PROXY_TARGET", "https://127.0.0.1:9443"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.proxy.rules.first().map(|r| r.target.as_str()),
            Some("https://127.0.0.1:9443/")
        );
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("SHOPFRONT_PORT", ""), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 5173);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SHOPFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOPFRONT_PORT"));
    }

    #[test]
    fn test_invalid_proxy_target() {
        for target in ["not a url", "data:text/plain,hi"] {
            assert!(load(&[("SHOPFRONT_PROXY_TARGET", target)]).is_err());
        }
    }
}
