//! # CLMM Core - Position and Pricing Math
//!
//! Pure math and value types for concentrated liquidity pools. Everything in
//! this crate is synchronous and side-effect free:
//!
//! - Tick index <-> Q64.64 sqrt price conversion, bit-exact with the pool contract
//! - Liquidity sizing from token amounts and the inverse
//! - Fee and reward growth accounting for a tick range
//! - Slippage-guarded mint and burn amounts
//!
//! ## Feature Flags
//!
//! - `serde`: Enables serde derives on the value types (on by default)

pub mod constants;
pub mod errors;
pub mod math;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{ClmmError, CoreResult, ErrorCategory};
pub use types::*;
