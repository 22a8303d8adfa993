//! # Full-Width Fixed-Point Math
//!
//! Multiply-divide with a 256-bit intermediate, wrap-around subtraction for
//! growth counters and an integer square root. All narrowing is checked.

use ethnum::U256;

use crate::errors::{ClmmError, CoreResult};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

impl Rounding {
    /// Build from the `round_up` flag used by call sites
    pub const fn from_round_up(round_up: bool) -> Self {
        if round_up {
            Rounding::Up
        } else {
            Rounding::Down
        }
    }
}

// ============================================================================
// 256-bit Helpers
// ============================================================================

/// Narrow a U256 to u128, failing if it does not fit
pub fn u256_to_u128(value: U256) -> CoreResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(ClmmError::Overflow);
    }
    Ok(value.as_u128())
}

/// Divide and round the quotient up
pub fn div_rounding_up(numerator: U256, denominator: U256) -> CoreResult<U256> {
    if denominator == U256::ZERO {
        return Err(ClmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    if numerator % denominator != U256::ZERO {
        return quotient.checked_add(U256::ONE).ok_or(ClmmError::Overflow);
    }
    Ok(quotient)
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div_u256(
    a: U256,
    b: U256,
    denominator: U256,
    rounding: Rounding,
) -> CoreResult<U256> {
    if denominator == U256::ZERO {
        return Err(ClmmError::DivisionByZero);
    }

    let product = a.checked_mul(b).ok_or(ClmmError::Overflow)?;
    match rounding {
        Rounding::Down => Ok(product / denominator),
        Rounding::Up => div_rounding_up(product, denominator),
    }
}

// ============================================================================
// u128 Multiply-Divide
// ============================================================================

/// Multiply two u128 values and divide by a third with specified rounding
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div_u256(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        rounding,
    )?;
    u256_to_u128(result)
}

/// floor(a * b / denominator)
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> CoreResult<u128> {
    mul_div(a, b, denominator, Rounding::Down)
}

/// ceil(a * b / denominator)
pub fn mul_div_ceil(a: u128, b: u128, denominator: u128) -> CoreResult<u128> {
    mul_div(a, b, denominator, Rounding::Up)
}

// ============================================================================
// Growth Counter Arithmetic
// ============================================================================

/// (x - y) mod 2^128
///
/// Growth counters on the ledger only ever increase and are allowed to wrap,
/// so differences between two snapshots must wrap the same way.
#[inline]
pub const fn wrapping_sub_128(x: u128, y: u128) -> u128 {
    x.wrapping_sub(y)
}

// ============================================================================
// Square Root
// ============================================================================

/// Integer square root for U256 (floor)
pub fn sqrt_u256(n: U256) -> U256 {
    if n == U256::ZERO {
        return U256::ZERO;
    }

    // Newton's method for integer square root
    let mut x = n;
    let mut y = (x >> 1) + (x & U256::ONE);
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}
