//! # Price Conversions
//!
//! Between Q64.64 sqrt prices, exact X128 price ratios and display prices.
//! A pool price is always "token Y per token X".

use ethnum::U256;

use crate::constants::MAX_TICK;
use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::{sqrt_u256, u256_to_u128};
use crate::math::tick_math::{sqrt_price_x64_to_tick, tick_to_sqrt_price_x64};

/// price * 2^128, exact
pub fn sqrt_price_x64_to_price_x128(sqrt_price_x64: u128) -> U256 {
    U256::from(sqrt_price_x64) * U256::from(sqrt_price_x64)
}

/// sqrt(numerator / denominator) in Q64.64, floored
pub fn encode_sqrt_ratio_x64(numerator: u128, denominator: u128) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(ClmmError::DivisionByZero);
    }
    let ratio_x128 = (U256::from(numerator) << 128) / U256::from(denominator);
    u256_to_u128(sqrt_u256(ratio_x128))
}

/// Greatest tick whose price is <= numerator / denominator
pub fn price_to_closest_tick(numerator: u128, denominator: u128) -> CoreResult<i32> {
    let sqrt_price_x64 = encode_sqrt_ratio_x64(numerator, denominator)?;
    let tick = sqrt_price_x64_to_tick(sqrt_price_x64)?;
    if tick == MAX_TICK {
        return Ok(tick);
    }

    // The floored sqrt can land one tick low; bump when the exact price
    // already reaches the next tick
    let ratio_x128 = (U256::from(numerator) << 128) / U256::from(denominator);
    let next_price_x128 = sqrt_price_x64_to_price_x128(tick_to_sqrt_price_x64(tick + 1)?);
    if ratio_x128 >= next_price_x128 {
        Ok(tick + 1)
    } else {
        Ok(tick)
    }
}

/// Human-readable price of one whole X in whole Y
pub fn sqrt_price_x64_to_price(sqrt_price_x64: u128, decimals_x: u8, decimals_y: u8) -> f64 {
    let sqrt = sqrt_price_x64 as f64 / 2f64.powi(64);
    sqrt * sqrt * 10f64.powi(decimals_x as i32 - decimals_y as i32)
}

/// Human-readable price at a tick
pub fn tick_to_price(tick: i32, decimals_x: u8, decimals_y: u8) -> CoreResult<f64> {
    Ok(sqrt_price_x64_to_price(
        tick_to_sqrt_price_x64(tick)?,
        decimals_x,
        decimals_y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q64;

    #[test]
    fn test_encode_sqrt_ratio() {
        assert_eq!(encode_sqrt_ratio_x64(1, 1).unwrap(), Q64);
        assert_eq!(encode_sqrt_ratio_x64(4, 1).unwrap(), 2 * Q64);
        assert_eq!(encode_sqrt_ratio_x64(1, 4).unwrap(), Q64 / 2);
        assert_eq!(encode_sqrt_ratio_x64(1, 0), Err(ClmmError::DivisionByZero));
    }

    #[test]
    fn test_price_x128() {
        assert_eq!(sqrt_price_x64_to_price_x128(Q64), U256::ONE << 128);
    }

    #[test]
    fn test_price_to_closest_tick() {
        assert_eq!(price_to_closest_tick(1, 1).unwrap(), 0);
        // 1.0001^60 ~= 1.0060177
        assert_eq!(price_to_closest_tick(1_006_017, 1_000_000).unwrap(), 59);
        assert_eq!(price_to_closest_tick(1_006_018, 1_000_000).unwrap(), 60);
        assert_eq!(price_to_closest_tick(1_000_000, 1_006_017).unwrap(), -60);
    }

    #[test]
    fn test_display_price() {
        let price = sqrt_price_x64_to_price(Q64, 9, 6);
        assert!((price - 1_000.0).abs() < 1e-9);
        let price = tick_to_price(0, 6, 6).unwrap();
        assert!((price - 1.0).abs() < 1e-12);
    }
}
