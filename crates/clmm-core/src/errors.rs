//! # Core Error Types
//!
//! Errors raised by the pure math and value-type layer. Every failure is
//! surfaced to the caller; nothing here clamps or retries silently.

use thiserror::Error;

use crate::constants::{MAX_TICK, MIN_TICK};

/// Core errors shared by every math module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClmmError {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    #[error("Tick order violated: lower {lower} must be below upper {upper}")]
    TickOrderViolation { lower: i32, upper: i32 },

    #[error("Tick {tick} violates bounds: {reason}")]
    TickBoundsViolation { tick: i32, reason: &'static str },

    #[error("Invalid tick list: {0}")]
    InvalidTickList(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    // ========================================================================
    // Domain Errors
    // ========================================================================
    #[error("Sqrt price {0} is outside the supported range")]
    OutOfRange(u128),

    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

/// Coarse classification of a failure, used by callers deciding how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid constructor input; fix the input
    PreconditionViolation,
    /// A tick or sqrt price outside the representable domain
    DomainBounds,
    /// A tick lookup failed or returned nothing; raised by the SDK's tick stores
    DataUnavailable,
    /// A fixed-point operation exceeded its target width
    ArithmeticOverflow,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, ClmmError>;

impl ClmmError {
    /// Create a bounds error for a tick outside [MIN_TICK, MAX_TICK]
    pub fn tick_out_of_domain(tick: i32) -> Self {
        Self::TickBoundsViolation {
            tick,
            reason: "outside [MIN_TICK, MAX_TICK]",
        }
    }

    /// Create a bounds error for a tick that is not a multiple of the spacing
    pub fn tick_misaligned(tick: i32) -> Self {
        Self::TickBoundsViolation {
            tick,
            reason: "not a multiple of tick spacing",
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TickBoundsViolation { tick, .. } if !(MIN_TICK..=MAX_TICK).contains(tick) => {
                ErrorCategory::DomainBounds
            }
            Self::TickOrderViolation { .. }
            | Self::TickBoundsViolation { .. }
            | Self::InvalidTickList(_)
            | Self::InvalidParameter(_) => ErrorCategory::PreconditionViolation,
            Self::OutOfRange(_) => ErrorCategory::DomainBounds,
            Self::Overflow | Self::DivisionByZero => ErrorCategory::ArithmeticOverflow,
        }
    }
}
