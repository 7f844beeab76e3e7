//! # Shared Process-Wide Handle
//!
//! One lazily-created facade per process for callers that do not want to
//! thread a handle through their call graph. Explicit construction plus
//! [`set_shared`] remains the preferred path; the global exists for the
//! "one connection per process" usage pattern and ships reset hooks so
//! tests can swap or clear it.

use tokio::sync::RwLock;

use crate::error::Result;
use crate::facade::CacheFacade;

static SHARED: RwLock<Option<CacheFacade>> = RwLock::const_new(None);

/// Return the process-wide facade, connecting from the environment on
/// first use.
///
/// Initialization is guarded by a double-checked async lock, so concurrent
/// first callers create exactly one connection.
///
/// # Errors
///
/// Propagates [`CacheFacade::from_env`] errors; a failed attempt leaves the
/// slot empty, so a later call retries.
pub async fn shared() -> Result<CacheFacade> {
    if let Some(facade) = SHARED.read().await.as_ref() {
        return Ok(facade.clone());
    }

    let mut slot = SHARED.write().await;
    // Re-check: another task may have won the write lock first.
    if let Some(facade) = slot.as_ref() {
        return Ok(facade.clone());
    }

    let facade = CacheFacade::from_env().await?;
    *slot = Some(facade.clone());
    Ok(facade)
}

/// Install `facade` as the process-wide handle.
pub async fn set_shared(facade: CacheFacade) {
    *SHARED.write().await = Some(facade);
}

/// Clear the process-wide handle; the next [`shared`] call reconnects.
pub async fn reset_shared() {
    *SHARED.write().await = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_slot() {
        tokio_test::block_on(async {
            reset_shared().await;
            assert!(SHARED.read().await.is_none());
        });
    }
}
