//! Raw ledger object decoding
//!
//! Serde models of the pool, position and tick objects as the ledger returns
//! them in JSON. Large integers arrive as decimal strings and signed values
//! as two's-complement `bits`; conversion into the core types parses and
//! checks both.

use clmm_core::{CoinInfo, PoolSnapshot, PositionRewardInfo, RewardSchedule, Tick};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{SdkError, SdkResult};
use crate::position::PositionArgs;

// ============================================================================
// Move Wrappers
// ============================================================================

/// A nested Move struct: `{ "type": ..., "fields": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveObject<T> {
    pub fields: T,
    #[serde(rename = "type", default)]
    pub type_: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTypeName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTable {
    pub id: Id,
    pub size: String,
}

/// Integer encoded as a number or a decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(u64),
    Text(String),
}

impl RawNumber {
    fn to_u128(&self, field: &str) -> SdkResult<u128> {
        match self {
            RawNumber::Number(n) => Ok(u128::from(*n)),
            RawNumber::Text(s) => parse_u128(field, s),
        }
    }
}

/// Signed integer wrapper holding two's-complement bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInteger {
    pub bits: RawNumber,
}

impl MoveInteger {
    /// Reinterpret the low 32 bits as an i32
    pub fn as_i32(&self, field: &str) -> SdkResult<i32> {
        let bits = self.bits.to_u128(field)?;
        let bits = u32::try_from(bits).map_err(|_| SdkError::decode(field, "exceeds 32 bits"))?;
        Ok(bits as i32)
    }

    /// Reinterpret 128 bits as an i128
    pub fn as_i128(&self, field: &str) -> SdkResult<i128> {
        Ok(self.bits.to_u128(field)? as i128)
    }
}

// ============================================================================
// Object Layouts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardInfoRaw {
    pub ended_at_seconds: String,
    pub last_update_time: String,
    pub reward_coin_type: MoveObject<MoveTypeName>,
    pub reward_growth_global: String,
    pub reward_per_seconds: String,
    pub total_reward: String,
    pub total_reward_allocated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRawData {
    pub id: Id,
    pub coin_type_x: MoveObject<MoveTypeName>,
    pub coin_type_y: MoveObject<MoveTypeName>,
    pub liquidity: String,
    pub reserve_x: String,
    pub reserve_y: String,
    pub sqrt_price: String,
    pub swap_fee_rate: String,
    pub tick_index: MoveObject<MoveInteger>,
    pub tick_spacing: u32,
    pub fee_growth_global_x: String,
    pub fee_growth_global_y: String,
    pub reward_infos: Vec<MoveObject<RewardInfoRaw>>,
    pub ticks: MoveObject<MoveTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRewardInfoRaw {
    pub coins_owed_reward: String,
    pub reward_growth_inside_last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRawData {
    pub id: Id,
    pub liquidity: String,
    pub pool_id: String,
    pub tick_lower_index: MoveObject<MoveInteger>,
    pub tick_upper_index: MoveObject<MoveInteger>,
    pub coins_owed_x: String,
    pub coins_owed_y: String,
    pub fee_growth_inside_x_last: String,
    pub fee_growth_inside_y_last: String,
    pub reward_infos: Vec<MoveObject<PositionRewardInfoRaw>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRawData {
    pub fee_growth_outside_x: String,
    pub fee_growth_outside_y: String,
    pub liquidity_gross: String,
    pub liquidity_net: MoveObject<MoveInteger>,
    pub reward_growths_outside: Vec<String>,
    #[serde(default)]
    pub seconds_out_side: Option<String>,
    #[serde(default)]
    pub seconds_per_liquidity_out_side: Option<String>,
    #[serde(default)]
    pub tick_cumulative_out_side: Option<MoveObject<MoveInteger>>,
}

// ============================================================================
// Conversions
// ============================================================================

fn parse_u128(field: &str, value: &str) -> SdkResult<u128> {
    value.parse::<u128>().map_err(|e| {
        warn!(field, value, "malformed integer in ledger object");
        SdkError::decode(field, e)
    })
}

fn parse_u64(field: &str, value: &str) -> SdkResult<u64> {
    value.parse::<u64>().map_err(|e| SdkError::decode(field, e))
}

/// Type names come back without the `0x` prefix
fn normalize_coin_type(name: &str) -> String {
    if name.starts_with("0x") {
        name.to_string()
    } else {
        format!("0x{}", name)
    }
}

/// Pull `content.fields` out of an object response
pub fn object_fields(object: &Value) -> SdkResult<&Value> {
    object
        .pointer("/content/fields")
        .ok_or_else(|| SdkError::decode("content.fields", "missing"))
}

impl TickRawData {
    /// Decode the tick stored at `index`
    pub fn into_tick(self, index: i32) -> SdkResult<Tick> {
        let reward_growths_outside = self
            .reward_growths_outside
            .iter()
            .map(|growth| parse_u128("reward_growths_outside", growth))
            .collect::<SdkResult<Vec<_>>>()?;

        Ok(Tick::new(
            index,
            parse_u128("liquidity_gross", &self.liquidity_gross)?,
            self.liquidity_net.fields.as_i128("liquidity_net")?,
            parse_u128("fee_growth_outside_x", &self.fee_growth_outside_x)?,
            parse_u128("fee_growth_outside_y", &self.fee_growth_outside_y)?,
            reward_growths_outside,
        )?)
    }
}

impl TryFrom<&RewardInfoRaw> for RewardSchedule {
    type Error = SdkError;

    fn try_from(raw: &RewardInfoRaw) -> SdkResult<Self> {
        Ok(RewardSchedule {
            reward_coin_type: normalize_coin_type(&raw.reward_coin_type.fields.name),
            reward_per_second: parse_u128("reward_per_seconds", &raw.reward_per_seconds)?,
            ended_at_seconds: parse_u64("ended_at_seconds", &raw.ended_at_seconds)?,
            last_update_time: parse_u64("last_update_time", &raw.last_update_time)?,
            reward_growth_global: parse_u128("reward_growth_global", &raw.reward_growth_global)?,
            total_reward: parse_u128("total_reward", &raw.total_reward)?,
        })
    }
}

/// Coin decimals are not part of the pool object; both coins decode with
/// zero decimals and callers fill them in from coin metadata.
impl TryFrom<&PoolRawData> for PoolSnapshot {
    type Error = SdkError;

    fn try_from(raw: &PoolRawData) -> SdkResult<Self> {
        let fee_rate = u32::try_from(parse_u64("swap_fee_rate", &raw.swap_fee_rate)?)
            .map_err(|e| SdkError::decode("swap_fee_rate", e))?;

        let reward_schedules = raw
            .reward_infos
            .iter()
            .map(|info| RewardSchedule::try_from(&info.fields))
            .collect::<SdkResult<Vec<_>>>()?;

        let snapshot = PoolSnapshot::new(
            parse_u128("sqrt_price", &raw.sqrt_price)?,
            raw.tick_index.fields.as_i32("tick_index")?,
            raw.tick_spacing,
            parse_u128("liquidity", &raw.liquidity)?,
        )?
        .with_id(raw.id.id.clone())
        .with_coins(
            CoinInfo::new(normalize_coin_type(&raw.coin_type_x.fields.name), 0),
            CoinInfo::new(normalize_coin_type(&raw.coin_type_y.fields.name), 0),
        )
        .with_fee_rate(fee_rate)
        .with_reserves(
            parse_u128("reserve_x", &raw.reserve_x)?,
            parse_u128("reserve_y", &raw.reserve_y)?,
        )
        .with_fee_growth_global(
            parse_u128("fee_growth_global_x", &raw.fee_growth_global_x)?,
            parse_u128("fee_growth_global_y", &raw.fee_growth_global_y)?,
        )
        .with_reward_schedules(reward_schedules)
        .with_tick_manager_id(raw.ticks.fields.id.id.clone());

        Ok(snapshot)
    }
}

impl TryFrom<&PositionRawData> for PositionArgs {
    type Error = SdkError;

    fn try_from(raw: &PositionRawData) -> SdkResult<Self> {
        let reward_infos = raw
            .reward_infos
            .iter()
            .map(|info| {
                Ok(PositionRewardInfo {
                    coins_owed_reward: parse_u128("coins_owed_reward", &info.fields.coins_owed_reward)?,
                    reward_growth_inside_last: parse_u128(
                        "reward_growth_inside_last",
                        &info.fields.reward_growth_inside_last,
                    )?,
                })
            })
            .collect::<SdkResult<Vec<_>>>()?;

        Ok(PositionArgs {
            tick_lower: raw.tick_lower_index.fields.as_i32("tick_lower_index")?,
            tick_upper: raw.tick_upper_index.fields.as_i32("tick_upper_index")?,
            liquidity: parse_u128("liquidity", &raw.liquidity)?,
            coins_owed_x: parse_u128("coins_owed_x", &raw.coins_owed_x)?,
            coins_owed_y: parse_u128("coins_owed_y", &raw.coins_owed_y)?,
            fee_growth_inside_x_last: parse_u128("fee_growth_inside_x_last", &raw.fee_growth_inside_x_last)?,
            fee_growth_inside_y_last: parse_u128("fee_growth_inside_y_last", &raw.fee_growth_inside_y_last)?,
            reward_infos,
            position_id: Some(raw.id.id.clone()),
            owner: None,
        })
    }
}
