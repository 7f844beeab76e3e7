//! # nscache
//!
//! Namespaced cache facade over a single shared Redis connection with
//! transparent value encoding.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CacheFacade                           │
//! │   get / set / set_no_wait / del / keys / ttl / flush_all     │
//! └─────────────────────────────────────────────────────────────┘
//!             │                                │
//!             ▼                                ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │   Key derivation +       │   │   Shared multiplexed         │
//! │   value codec            │   │   Redis connection           │
//! │   ("ns::key", tagged     │   │   (bounded reconnects)       │
//! │    raw/JSON envelope)    │   │                              │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! All the heavy lifting (networking, expiry, persistence) lives in Redis;
//! this crate only derives collision-free keys from `(namespace, key)`
//! pairs, wraps values so structured data survives a byte-string store,
//! and manages one connection per process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nscache::{CacheFacade, CacheConfig};
//!
//! let cache = CacheFacade::new(CacheConfig::default()).await?;
//!
//! cache.set("session", "user-42", "token", Some(30.0)).await?;
//! let token = cache.get("session", "user-42").await?;
//! let remaining = cache.ttl("session", "user-42").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod error;
pub mod facade;
pub mod global;
pub mod key;

// Re-export commonly used types
pub use codec::{CacheValue, decode, encode};
pub use config::{CacheConfig, SERVER_ENV_VAR};
pub use error::{CacheError, Result};
pub use facade::CacheFacade;
pub use global::{reset_shared, set_shared, shared};
pub use key::{cache_key, namespace_prefix};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
