//! Tick store backed by ledger reads

use std::sync::Arc;

use async_trait::async_trait;
use clmm_core::Tick;
use tracing::{debug, trace};

use super::TickStore;
use crate::config::NetworkConfig;
use crate::error::{SdkError, SdkResult};
use crate::ledger::{DynamicFieldName, LedgerReader};
use crate::raw::TickRawData;

/// Reads each tick from the pool's tick table on every call; nothing is cached
pub struct OnchainTickStore<R: LedgerReader> {
    reader: Arc<R>,
    tick_manager_id: String,
    i32_type: String,
}

impl<R: LedgerReader> OnchainTickStore<R> {
    /// Store reading ticks stored under `tick_manager_id`, keyed by the
    /// mainnet `I32` type
    pub fn new(reader: Arc<R>, tick_manager_id: impl Into<String>) -> Self {
        Self {
            reader,
            tick_manager_id: tick_manager_id.into(),
            i32_type: NetworkConfig::mainnet().i32_type,
        }
    }

    /// Use another network's `I32` key type
    pub fn with_i32_type(mut self, i32_type: impl Into<String>) -> Self {
        self.i32_type = i32_type.into();
        self
    }

    pub fn tick_manager_id(&self) -> &str {
        &self.tick_manager_id
    }
}

#[async_trait]
impl<R: LedgerReader> TickStore for OnchainTickStore<R> {
    async fn get_tick(&self, index: i32) -> SdkResult<Tick> {
        let name = DynamicFieldName::tick_index(&self.i32_type, index);
        trace!(tick = index, parent = %self.tick_manager_id, "fetching tick");

        let object = self
            .reader
            .get_dynamic_field_object(&self.tick_manager_id, &name)
            .await
            .map_err(|e| match e {
                unavailable @ SdkError::DataUnavailable(_) => unavailable,
                other => SdkError::DataUnavailable(format!("tick {} lookup failed: {}", index, other)),
            })?
            .ok_or(SdkError::TickNotFound(index))?;

        let fields = object
            .pointer("/content/fields/value/fields")
            .cloned()
            .ok_or_else(|| SdkError::decode("content.fields.value.fields", "missing"))?;
        let raw: TickRawData = serde_json::from_value(fields)?;

        let tick = raw.into_tick(index)?;
        debug!(tick = index, liquidity_net = tick.liquidity_net, "tick fetched");
        Ok(tick)
    }
}
