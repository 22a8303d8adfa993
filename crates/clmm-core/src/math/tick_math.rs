//! # Tick Math
//!
//! Conversions between ticks and Q64.64 sqrt prices. The forward conversion
//! multiplies per-bit constants of sqrt(1.0001)^(2^i) and must agree with the
//! pool contract bit for bit; the inverse estimates log_sqrt(1.0001) of the
//! price and resolves the remaining one-tick ambiguity with the forward map.

use ethnum::U256;

use crate::constants::{
    BIT_PRECISION, LOG_B_2_X32, LOG_B_P_ERR_MARGIN_LOWER_X64, LOG_B_P_ERR_MARGIN_UPPER_X64,
    MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};
use crate::errors::{ClmmError, CoreResult};
use crate::math::full_math::u256_to_u128;

// ============================================================================
// Constant Tables
// ============================================================================

/// sqrt(1.0001)^(2^i) in Q32.96 for bits 1..=18 of a positive tick
const POSITIVE_TICK_FACTORS_X96: [u128; 18] = [
    79236085330515764027303304731,
    79244008939048815603706035061,
    79259858533276714757314932305,
    79291567232598584799939703904,
    79355022692464371645785046466,
    79482085999252804386437311141,
    79736823300114093921829183326,
    80248749790819932309965073892,
    81282483887344747381513967011,
    83390072131320151908154831281,
    87770609709833776024991924138,
    97234110755111693312479820773,
    119332217159966728226237229890,
    179736315981702064433883588727,
    407748233172238350107850275304,
    2098478828474011932436660412517,
    55581415166113811149459800483533,
    38992368544603139932233054999993551,
];

/// Starting ratio for an odd positive tick: sqrt(1.0001) in Q32.96
const POSITIVE_TICK_BIT0_X96: u128 = 79232123823359799118286999567;

/// 1.0 in Q32.96
const ONE_X96: u128 = 79228162514264337593543950336;

/// 1 / sqrt(1.0001)^(2^i) in Q64.64 for bits 1..=18 of a negative tick
const NEGATIVE_TICK_FACTORS_X64: [u128; 18] = [
    18444899583751176498,
    18443055278223354162,
    18439367220385604838,
    18431993317065449817,
    18417254355718160513,
    18387811781193591352,
    18329067761203520168,
    18212142134806087854,
    17980523815641551639,
    17526086738831147013,
    16651378430235024244,
    15030750278693429944,
    12247334978882834399,
    8131365268884726200,
    3584323654723342297,
    696457651847595233,
    26294789957452057,
    37481735321082,
];

/// Starting ratio for an odd negative tick: 1 / sqrt(1.0001) in Q64.64
const NEGATIVE_TICK_BIT0_X64: u128 = 18445821805675392311;

/// 1.0 in Q64.64
const ONE_X64: u128 = 18446744073709551616;

// ============================================================================
// Tick -> Sqrt Price
// ============================================================================

/// Get the Q64.64 sqrt price for a tick
pub fn tick_to_sqrt_price_x64(tick: i32) -> CoreResult<u128> {
    if !is_valid_tick(tick) {
        return Err(ClmmError::tick_out_of_domain(tick));
    }

    if tick > 0 {
        sqrt_price_positive_tick(tick)
    } else {
        Ok(sqrt_price_negative_tick(tick))
    }
}

/// Q32.96 accumulation, shifted down to Q64.64 at the end
fn sqrt_price_positive_tick(tick: i32) -> CoreResult<u128> {
    let mut ratio = if tick & 1 != 0 {
        POSITIVE_TICK_BIT0_X96
    } else {
        ONE_X96
    };

    for (i, factor) in POSITIVE_TICK_FACTORS_X96.iter().enumerate() {
        if tick & (2 << i) != 0 {
            ratio = mul_shift_96(ratio, *factor)?;
        }
    }

    Ok(ratio >> 32)
}

/// Q64.64 accumulation. Both operands stay below 2^64 so the product fits u128.
fn sqrt_price_negative_tick(tick: i32) -> u128 {
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        NEGATIVE_TICK_BIT0_X64
    } else {
        ONE_X64
    };

    for (i, factor) in NEGATIVE_TICK_FACTORS_X64.iter().enumerate() {
        if abs_tick & (2 << i) != 0 {
            ratio = (ratio * factor) >> 64;
        }
    }

    ratio
}

fn mul_shift_96(n0: u128, n1: u128) -> CoreResult<u128> {
    let product: U256 = (U256::from(n0) * U256::from(n1)) >> 96;
    u256_to_u128(product)
}

// ============================================================================
// Sqrt Price -> Tick
// ============================================================================

/// Get the greatest tick whose sqrt price is <= `sqrt_price_x64`
pub fn sqrt_price_x64_to_tick(sqrt_price_x64: u128) -> CoreResult<i32> {
    if !is_valid_sqrt_price(sqrt_price_x64) {
        return Err(ClmmError::OutOfRange(sqrt_price_x64));
    }

    // Integer part of log2 from the most significant bit
    let msb: u32 = 128 - sqrt_price_x64.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    // Normalize to r in [1, 2) as Q1.63, then square repeatedly. Each time
    // r^2 >= 2 the current fractional bit of log2 is set.
    let mut bit: i128 = 0x8000_0000_0000_0000i128;
    let mut precision = 0;
    let mut log2p_fraction_x64: i128 = 0;

    let mut r = if msb >= 64 {
        sqrt_price_x64 >> (msb - 63)
    } else {
        sqrt_price_x64 << (63 - msb)
    };

    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127_u32;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;

    // Change of base from 2 to sqrt(1.0001)
    let logbp_x64 = log2p_x32 * LOG_B_2_X32;

    let tick_low = ((logbp_x64 - LOG_B_P_ERR_MARGIN_LOWER_X64) >> 64) as i32;
    let tick_high = ((logbp_x64 + LOG_B_P_ERR_MARGIN_UPPER_X64) >> 64) as i32;

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    // tick_high wins only when its exact price does not exceed the input
    match tick_to_sqrt_price_x64(tick_high) {
        Ok(high_price) if high_price <= sqrt_price_x64 => Ok(tick_high),
        _ => Ok(tick_low),
    }
}

// ============================================================================
// Tick Spacing Helpers
// ============================================================================

/// Round a tick down to the nearest multiple of `tick_spacing` (toward -inf)
pub fn get_initializable_tick_index(tick: i32, tick_spacing: u32) -> CoreResult<i32> {
    let spacing = spacing_as_i32(tick_spacing)?;
    Ok(tick.div_euclid(spacing) * spacing)
}

/// Check if a tick is within [MIN_TICK, MAX_TICK]
#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Check if a sqrt price is within [MIN_SQRT_RATIO, MAX_SQRT_RATIO]
#[inline]
pub fn is_valid_sqrt_price(sqrt_price_x64: u128) -> bool {
    (MIN_SQRT_RATIO..=MAX_SQRT_RATIO).contains(&sqrt_price_x64)
}

/// Smallest tick usable as a position bound for this spacing
pub fn min_usable_tick(tick_spacing: u32) -> CoreResult<i32> {
    Ok(-max_usable_tick(tick_spacing)?)
}

/// Largest tick usable as a position bound for this spacing
pub fn max_usable_tick(tick_spacing: u32) -> CoreResult<i32> {
    let spacing = spacing_as_i32(tick_spacing)?;
    Ok(MAX_TICK / spacing * spacing)
}

/// Validate a position range: ordered, inside the domain and spacing-aligned
pub fn check_tick_range(tick_lower: i32, tick_upper: i32, tick_spacing: u32) -> CoreResult<()> {
    let spacing = spacing_as_i32(tick_spacing)?;

    if tick_lower >= tick_upper {
        return Err(ClmmError::TickOrderViolation {
            lower: tick_lower,
            upper: tick_upper,
        });
    }
    if tick_lower < MIN_TICK {
        return Err(ClmmError::tick_out_of_domain(tick_lower));
    }
    if tick_upper > MAX_TICK {
        return Err(ClmmError::tick_out_of_domain(tick_upper));
    }
    if tick_lower.rem_euclid(spacing) != 0 {
        return Err(ClmmError::tick_misaligned(tick_lower));
    }
    if tick_upper.rem_euclid(spacing) != 0 {
        return Err(ClmmError::tick_misaligned(tick_upper));
    }
    Ok(())
}

fn spacing_as_i32(tick_spacing: u32) -> CoreResult<i32> {
    match i32::try_from(tick_spacing) {
        Ok(spacing) if spacing > 0 => Ok(spacing),
        _ => Err(ClmmError::InvalidParameter("tick spacing must be positive")),
    }
}
