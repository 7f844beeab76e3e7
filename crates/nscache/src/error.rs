//! Cache facade error types

use thiserror::Error;

/// Errors surfaced by cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The connection to Redis could not be established or was lost after
    /// the reconnect budget was exhausted. Not recoverable at this layer;
    /// callers are expected to abort the operation chain.
    #[error("Redis connection error: {0}")]
    Connection(String),

    /// A Redis command failed on an established connection.
    #[error("Redis command error: {0}")]
    Command(String),

    /// A value could not be encoded for storage, or a stored envelope could
    /// not be decoded. Decode failures propagate rather than falling back
    /// to raw bytes, so a misidentified envelope never masquerades as data.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The configured server address was not a `host:port` pair.
    #[error("Invalid server address {addr:?}: {reason}")]
    InvalidAddress { addr: String, reason: String },
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            Self::Connection(err.to_string())
        } else {
            Self::Command(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
