//! # Mathematical Functions
//!
//! Pure fixed-point math for concentrated liquidity positions.

pub mod full_math;
pub mod growth;
pub mod liquidity_math;
pub mod price;
pub mod slippage;
pub mod sqrt_price_math;
pub mod tick_math;

// Re-export commonly used functions
pub use full_math::*;
pub use growth::*;
pub use liquidity_math::*;
pub use price::*;
pub use slippage::*;
pub use sqrt_price_math::*;
pub use tick_math::*;
