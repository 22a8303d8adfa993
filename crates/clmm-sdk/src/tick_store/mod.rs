//! Tick lookup
//!
//! A [`TickStore`] answers "what is the state of tick N" for ticks the caller
//! already knows the index of. Lookups may suspend on I/O; callers may run
//! several concurrently.

use async_trait::async_trait;
use clmm_core::Tick;

use crate::error::{SdkError, SdkResult};

mod list;
mod onchain;

pub use list::TickListStore;
pub use onchain::OnchainTickStore;

/// Per-tick snapshot source
#[async_trait]
pub trait TickStore: Send + Sync {
    /// Fetch one tick; `TickNotFound` if it is not initialized
    async fn get_tick(&self, index: i32) -> SdkResult<Tick>;
}

/// Placeholder store for pools built without tick access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTickStore;

#[async_trait]
impl TickStore for NoTickStore {
    async fn get_tick(&self, _index: i32) -> SdkResult<Tick> {
        Err(SdkError::DataUnavailable("no tick store configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_tick_store_always_fails() {
        let result = NoTickStore.get_tick(0).await;
        assert!(matches!(result, Err(SdkError::DataUnavailable(_))));
    }
}
