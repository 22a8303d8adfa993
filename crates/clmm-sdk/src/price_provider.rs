//! Coin price boundary

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{SdkError, SdkResult};

/// Source of spot prices in a common quote unit
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Price of one whole unit of `coin_type`
    async fn get_price(&self, coin_type: &str) -> SdkResult<f64>;
}

/// Fixed price table
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    prices: HashMap<String, f64>,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, coin_type: impl Into<String>, price: f64) -> Self {
        self.insert(coin_type, price);
        self
    }

    pub fn insert(&mut self, coin_type: impl Into<String>, price: f64) {
        self.prices.insert(coin_type.into(), price);
    }
}

#[async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn get_price(&self, coin_type: &str) -> SdkResult<f64> {
        self.prices
            .get(coin_type)
            .copied()
            .ok_or_else(|| SdkError::DataUnavailable(format!("no price for {}", coin_type)))
    }
}
