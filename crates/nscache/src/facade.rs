//! # Cache Facade
//!
//! Namespaced get/set/delete/enumerate/ttl operations over a shared
//! multiplexed Redis connection, with transparent value encoding.

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::codec::{CacheValue, decode, encode};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::key::{cache_key, namespace_prefix, scan_pattern};

/// Namespaced cache facade over a shared multiplexed Redis connection.
///
/// Cloning is cheap: all clones multiplex over the same underlying
/// connection, so concurrent callers need no external locking.
#[derive(Clone)]
pub struct CacheFacade {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl CacheFacade {
    /// Connect to the configured Redis server.
    ///
    /// The connection is established eagerly, retrying up to
    /// `config.reconnect_attempts` times. There is no fallback store:
    /// exhausting the budget is a [`CacheError::Connection`] and callers
    /// are expected to abort rather than degrade.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the server cannot be reached.
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let client = Client::open(config.url())
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        let manager_config =
            ConnectionManagerConfig::new().set_number_of_retries(config.reconnect_attempts);
        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { conn, config })
    }

    /// Connect using [`CacheConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidAddress`] for a malformed address and
    /// [`CacheError::Connection`] if the server cannot be reached.
    pub async fn from_env() -> Result<Self> {
        Self::new(CacheConfig::from_env()?).await
    }

    /// The configuration this facade was built from.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Fetch the value stored under `(namespace, key)`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`] on a corrupt stored envelope
    /// and command/connection errors otherwise.
    pub async fn get(&self, namespace: &str, key: &str) -> Result<Option<CacheValue>> {
        let mut conn = self.conn.clone();
        let raw: Option<Vec<u8>> = conn.get(cache_key(namespace, key)).await?;

        match raw {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Store a value under `(namespace, key)`.
    ///
    /// With `exptime` (seconds, fractional allowed) the key expires after
    /// `floor(exptime * 1000)` milliseconds; without it the key persists
    /// until deleted or flushed.
    ///
    /// # Errors
    ///
    /// Returns command/connection errors from the store.
    pub async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: impl Into<CacheValue> + Send,
        exptime: Option<f64>,
    ) -> Result<()> {
        let payload = encode(&value.into())?;
        self.write(&cache_key(namespace, key), payload, exptime.map(exptime_to_millis))
            .await
    }

    /// Store a value without waiting for the store's acknowledgment.
    ///
    /// The write runs on a detached task; store errors are unobservable to
    /// the caller (logged at debug level only). Best-effort by design.
    ///
    /// # Errors
    ///
    /// Only local encoding failures are observable, as
    /// [`CacheError::Serialization`].
    pub async fn set_no_wait(
        &self,
        namespace: &str,
        key: &str,
        value: impl Into<CacheValue> + Send,
        exptime: Option<f64>,
    ) -> Result<()> {
        let payload = encode(&value.into())?;
        let storage_key = cache_key(namespace, key);
        let expire_ms = exptime.map(exptime_to_millis);

        let facade = self.clone();
        tokio::spawn(async move {
            if let Err(e) = facade.write(&storage_key, payload, expire_ms).await {
                debug!(key = %storage_key, error = %e, "fire-and-forget write failed");
            }
        });

        Ok(())
    }

    /// Delete the given keys from `namespace`, returning how many existed.
    ///
    /// # Errors
    ///
    /// Returns command/connection errors from the store.
    pub async fn del(&self, namespace: &str, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let storage_keys: Vec<String> = keys.iter().map(|k| cache_key(namespace, k)).collect();
        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(storage_keys).await?;
        Ok(removed)
    }

    /// Enumerate every key in `namespace`, with the namespace prefix
    /// stripped. Order follows the store's scan and is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns command/connection errors from the store.
    pub async fn keys(&self, namespace: &str) -> Result<Vec<String>> {
        let prefix = namespace_prefix(namespace);
        let mut conn = self.conn.clone();
        let found: Vec<String> = conn.keys(scan_pattern(namespace)).await?;

        Ok(found
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(String::from))
            .collect())
    }

    /// Remaining time-to-live of `(namespace, key)` in whole seconds,
    /// truncated toward zero so the reported value never overstates the
    /// remaining life. Missing and expired keys report 0, as do keys
    /// stored without an expiry.
    ///
    /// # Errors
    ///
    /// Returns command/connection errors from the store.
    pub async fn ttl(&self, namespace: &str, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let millis: i64 = conn.pttl(cache_key(namespace, key)).await?;

        if millis <= 0 {
            Ok(0)
        } else {
            Ok((millis / 1000) as u64)
        }
    }

    /// Remove every key in the store, across all namespaces. Destructive
    /// and process-wide.
    ///
    /// # Errors
    ///
    /// Returns command/connection errors from the store.
    pub async fn flush_all(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        Ok(())
    }

    /// Store any serializable value via the structured envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`] if `value` cannot be encoded,
    /// and command/connection errors from the store.
    pub async fn set_json<T: Serialize + Sync>(
        &self,
        namespace: &str,
        key: &str,
        value: &T,
        exptime: Option<f64>,
    ) -> Result<()> {
        self.set(namespace, key, CacheValue::from_serialize(value)?, exptime)
            .await
    }

    /// Fetch and reconstruct a value stored via [`Self::set_json`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`] if the stored value does not
    /// deserialize into `T`, and command/connection errors from the store.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<T>> {
        match self.get(namespace, key).await? {
            Some(value) => Ok(Some(value.deserialize_into()?)),
            None => Ok(None),
        }
    }

    async fn write(&self, storage_key: &str, payload: Vec<u8>, expire_ms: Option<u64>) -> Result<()> {
        let mut conn = self.conn.clone();
        match expire_ms {
            Some(ms) => {
                let _: () = conn.pset_ex(storage_key, payload, ms).await?;
            }
            None => {
                let _: () = conn.set(storage_key, payload).await?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CacheFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFacade")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Convert an expiry in fractional seconds to whole milliseconds,
/// truncating the sub-millisecond remainder.
fn exptime_to_millis(exptime: f64) -> u64 {
    if exptime <= 0.0 {
        0
    } else {
        (exptime * 1000.0).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exptime_whole_seconds() {
        assert_eq!(exptime_to_millis(5.0), 5000);
        assert_eq!(exptime_to_millis(1.0), 1000);
    }

    #[test]
    fn test_exptime_fractional_seconds() {
        assert_eq!(exptime_to_millis(5.5), 5500);
        assert_eq!(exptime_to_millis(0.25), 250);
    }

    #[test]
    fn test_exptime_truncates_sub_millisecond() {
        assert_eq!(exptime_to_millis(1.000_9), 1000);
        assert_eq!(exptime_to_millis(0.000_4), 0);
    }

    #[test]
    fn test_exptime_non_positive() {
        assert_eq!(exptime_to_millis(0.0), 0);
        assert_eq!(exptime_to_millis(-3.0), 0);
    }
}
