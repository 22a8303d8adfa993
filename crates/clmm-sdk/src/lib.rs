//! # CLMM SDK
//!
//! Async orchestration over `clmm-core`: values liquidity positions against a
//! pool snapshot, fetching boundary ticks through an injected [`TickStore`].
//!
//! ## Layout
//!
//! - [`ledger`]: the [`LedgerReader`] capability callers implement for object reads
//! - [`raw`]: serde models of ledger objects and their conversion to core types
//! - [`tick_store`]: in-memory and ledger-backed tick lookup
//! - [`position`]: amounts, slippage guards, fees and rewards of a position
//! - [`zap`]: single-sided deposit sizing from external prices
//! - [`config`] and [`telemetry`]: TOML configuration and tracing setup

pub mod config;
pub mod error;
pub mod ledger;
pub mod position;
pub mod price_provider;
pub mod raw;
pub mod telemetry;
pub mod tick_store;
pub mod zap;

pub use config::{Network, NetworkConfig, SdkConfig};
pub use error::{SdkError, SdkResult};
pub use ledger::{DynamicFieldName, LedgerReader};
pub use position::{Position, PositionArgs};
pub use price_provider::{PriceProvider, StaticPriceProvider};
pub use telemetry::init_tracing;
pub use tick_store::{NoTickStore, OnchainTickStore, TickListStore, TickStore};
pub use zap::ZapCalculator;

// Re-export the math crate so callers need a single dependency
pub use clmm_core;
