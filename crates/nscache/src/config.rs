//! # Cache Configuration
//!
//! Environment-based configuration for the Redis cache facade.

use std::env;

use crate::error::{CacheError, Result};

/// Environment variable selecting the Redis server as `host:port`.
pub const SERVER_ENV_VAR: &str = "NSCACHE_SERVER";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_RECONNECT_ATTEMPTS: usize = 3;

/// Connection configuration for [`CacheFacade`](crate::CacheFacade).
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis server host.
    pub host: String,

    /// Redis server port.
    pub port: u16,

    /// Automatic reconnect attempts before a command fails with a
    /// connection error.
    pub reconnect_attempts: usize,
}

impl CacheConfig {
    /// Load configuration from the environment.
    ///
    /// Reads [`SERVER_ENV_VAR`] as `host:port`; when unset, falls back to
    /// `127.0.0.1:6379`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidAddress`] if the variable is set but
    /// not a valid `host:port` pair.
    pub fn from_env() -> Result<Self> {
        match env::var(SERVER_ENV_VAR) {
            Ok(addr) => Self::parse_server_addr(&addr),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a `host:port` address string into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidAddress`] when the separator is missing,
    /// the host is empty, or the port does not parse.
    pub fn parse_server_addr(addr: &str) -> Result<Self> {
        let invalid = |reason: &str| CacheError::InvalidAddress {
            addr: addr.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected host:port"))?;
        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        let port: u16 = port.parse().map_err(|_| invalid("invalid port"))?;

        Ok(Self {
            host: host.to_string(),
            port,
            reconnect_attempts: DEFAULT_RECONNECT_ATTEMPTS,
        })
    }

    /// Redis connection URL for this configuration.
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            reconnect_attempts: DEFAULT_RECONNECT_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.reconnect_attempts, 3);
        assert_eq!(config.url(), "redis://127.0.0.1:6379");
    }

    #[test]
    fn test_parse_host_port() {
        let config = CacheConfig::parse_server_addr("cache.internal:6380").unwrap();
        assert_eq!(config.host, "cache.internal");
        assert_eq!(config.port, 6380);
        assert_eq!(config.url(), "redis://cache.internal:6380");
    }

    #[test]
    fn test_parse_missing_port_is_error() {
        let result = CacheConfig::parse_server_addr("localhost");
        assert!(matches!(result, Err(CacheError::InvalidAddress { .. })));
    }

    #[test]
    fn test_parse_bad_port_is_error() {
        let result = CacheConfig::parse_server_addr("localhost:port");
        assert!(matches!(result, Err(CacheError::InvalidAddress { .. })));
    }

    #[test]
    fn test_parse_empty_host_is_error() {
        let result = CacheConfig::parse_server_addr(":6379");
        assert!(matches!(result, Err(CacheError::InvalidAddress { .. })));
    }
}
