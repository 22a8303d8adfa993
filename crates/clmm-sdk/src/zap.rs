//! Single-sided deposit sizing
//!
//! To add liquidity with only one coin, part of it is swapped into the
//! other first. With `ratio` the value of Y the range needs per unit value
//! of X, the amount kept is `amount / (ratio * (1 - fee) + 1)` and the rest
//! is swapped.

use clmm_core::math::u256_to_u128;
use clmm_core::{ClmmError, PoolSnapshot, FEE_RATE_DENOMINATOR};
use ethnum::U256;
use tracing::debug;

use crate::error::SdkResult;
use crate::price_provider::PriceProvider;

/// Prices are fixed-point with this many fractional units before entering
/// integer math
const PRICE_SCALE: f64 = 1_000_000_000.0;

pub struct ZapCalculator;

impl ZapCalculator {
    /// Portion of `amount` (of coin X when `is_coin_x`, else coin Y) to swap
    /// before depositing into [tick_lower, tick_upper]
    pub async fn zap_amount(
        pool: &PoolSnapshot,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        is_coin_x: bool,
        provider: &dyn PriceProvider,
    ) -> SdkResult<u128> {
        let (price_x, price_y) = futures::try_join!(
            provider.get_price(&pool.coin_x.coin_type),
            provider.get_price(&pool.coin_y.coin_type),
        )?;

        let fee_rate = u128::from(pool.fee_rate);
        if fee_rate > FEE_RATE_DENOMINATOR {
            return Err(ClmmError::InvalidParameter("fee rate exceeds denominator").into());
        }

        let mint = pool.ratio(tick_lower, tick_upper)?;
        let price_x = scale_price(price_x)?;
        let price_y = scale_price(price_y)?;

        // ratio = (mint_y * price_y * 10^dec_x) / (mint_x * price_x * 10^dec_y)
        let mut numerator = checked_product(&[
            U256::from(mint.amount_y),
            U256::from(price_y),
            pow10(pool.coin_x.decimals)?,
        ])?;
        let mut denominator = checked_product(&[
            U256::from(mint.amount_x),
            U256::from(price_x),
            pow10(pool.coin_y.decimals)?,
        ])?;
        if !is_coin_x {
            std::mem::swap(&mut numerator, &mut denominator);
        }

        let fee_denominator = U256::from(FEE_RATE_DENOMINATOR);
        let divisor = checked_product(&[numerator, fee_denominator - U256::from(fee_rate)])?
            .checked_add(checked_product(&[denominator, fee_denominator])?)
            .ok_or(ClmmError::Overflow)?;
        if divisor == U256::ZERO {
            return Err(ClmmError::DivisionByZero.into());
        }

        let keep = checked_product(&[U256::from(amount), denominator, fee_denominator])? / divisor;
        let keep = u256_to_u128(keep)?;
        let swap = amount - keep;

        debug!(
            pool = %pool.pool_id,
            tick_lower,
            tick_upper,
            amount,
            is_coin_x,
            swap,
            "zap amount computed"
        );
        Ok(swap)
    }
}

fn scale_price(price: f64) -> SdkResult<u128> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ClmmError::InvalidParameter("price must be positive and finite").into());
    }
    let scaled = (price * PRICE_SCALE).round();
    if scaled < 1.0 || scaled >= u128::MAX as f64 {
        return Err(ClmmError::InvalidParameter("price out of representable range").into());
    }
    Ok(scaled as u128)
}

fn pow10(decimals: u8) -> SdkResult<U256> {
    U256::from(10u8)
        .checked_pow(u32::from(decimals))
        .ok_or_else(|| ClmmError::Overflow.into())
}

fn checked_product(factors: &[U256]) -> SdkResult<U256> {
    factors
        .iter()
        .try_fold(U256::ONE, |product, factor| product.checked_mul(*factor))
        .ok_or_else(|| ClmmError::Overflow.into())
}
