//! # Core Type Definitions
//!
//! Read-only value types shared by the math layer and the async SDK.

pub mod fees;
pub mod percent;
pub mod pool;
pub mod position;
pub mod tick;

// Re-export all types
pub use fees::*;
pub use percent::*;
pub use pool::*;
pub use position::*;
pub use tick::*;
