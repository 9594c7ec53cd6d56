//! Parameters for adding liquidity to an existing campaign.
//!
//! This path predates the campaign builder and keeps its simpler math: the
//! price is the ratio of raw smallest units, the spread has no minimum width
//! and liquidity is a single-price estimate.

use crate::builder::config::{ConfigError, DEFAULT_BASE_SPREAD, env_var};
use crate::error::{RangeError, ValidationError};
use crate::fees::FeeTier;
use crate::math::amount::{parse_units, u256_to_f64};
use crate::math::concentrated_liquidity::liquidity_estimate_at_price;
use crate::math::price_tick::{align_to_tick_spacing, check_tick_bounds, price_to_tick};
use crate::math::sqrt_price::encode_sqrt_price_x96;
use crate::pool::PoolKey;
use crate::serde_utils::u256_dec;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Add-liquidity settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityConfig {
    pub base_spread: i32,
    pub deadline_window_secs: u64,
    /// Spacing assumed for fees outside the standard tiers.
    pub fallback_tick_spacing: i32,
}

impl Default for AddLiquidityConfig {
    fn default() -> Self {
        Self {
            base_spread: DEFAULT_BASE_SPREAD,
            deadline_window_secs: 3600,
            fallback_tick_spacing: 200,
        }
    }
}

impl AddLiquidityConfig {
    /// Defaults with `STREAMS_BASE_SPREAD` applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            base_spread: env_var("STREAMS_BASE_SPREAD")?.unwrap_or(defaults.base_spread),
            ..defaults
        })
    }

    /// Tick spacing used for `fee`.
    pub fn tick_spacing_for_fee(&self, fee: u32) -> i32 {
        FeeTier::tick_spacing_for_fee(fee).unwrap_or(self.fallback_tick_spacing)
    }
}

/// Arguments of the streamer's `addLiquidity` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityParams {
    #[serde(with = "u256_dec")]
    pub campaign_id: U256,
    pub tick_lower: i32,
    pub tick_upper: i32,
    #[serde(with = "u256_dec")]
    pub liquidity: U256,
    #[serde(with = "u256_dec")]
    pub amount0_max: U256,
    #[serde(with = "u256_dec")]
    pub amount1_max: U256,
    pub deadline: u64,
}

/// Builds add-liquidity parameters for `campaign_id` at time `now`.
///
/// Amounts are human decimal strings already in pool order.
#[allow(clippy::too_many_arguments)]
pub fn build_add_liquidity_params(
    config: &AddLiquidityConfig,
    campaign_id: U256,
    pool_key: &PoolKey,
    amount0: &str,
    amount1: &str,
    decimals0: u8,
    decimals1: u8,
    now: u64,
) -> Result<AddLiquidityParams, ValidationError> {
    let raw0 = parse_units(amount0, decimals0)?;
    let raw1 = parse_units(amount1, decimals1)?;
    if raw0.is_zero() {
        return Err(ValidationError::InvalidAmount(amount0.to_string()));
    }
    if raw1.is_zero() {
        return Err(ValidationError::InvalidAmount(amount1.to_string()));
    }

    let tick_spacing = config.tick_spacing_for_fee(pool_key.fee);
    let price = u256_to_f64(raw1) / u256_to_f64(raw0);
    let aligned = align_to_tick_spacing(price_to_tick(price)?, tick_spacing)?;

    let spread = config.base_spread.div_euclid(tick_spacing) * tick_spacing;
    if spread <= 0 {
        return Err(RangeError::SpreadTooNarrow {
            spread,
            tick_spacing,
        }
        .into());
    }
    let tick_lower = i64::from(aligned) - i64::from(spread);
    let tick_upper = i64::from(aligned) + i64::from(spread);
    check_tick_bounds(tick_lower, tick_upper)?;

    let liquidity = liquidity_estimate_at_price(encode_sqrt_price_x96(price)?, raw0)?;

    Ok(AddLiquidityParams {
        campaign_id,
        tick_lower: tick_lower as i32,
        tick_upper: tick_upper as i32,
        liquidity,
        amount0_max: raw0,
        amount1_max: raw1,
        deadline: now.saturating_add(config.deadline_window_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Address;

    fn pool(fee: u32) -> PoolKey {
        PoolKey {
            currency0: Address::from_bytes([0x11; 20]),
            currency1: Address::from_bytes([0x22; 20]),
            fee,
            tick_spacing: 60,
            hooks: Address::ZERO,
        }
    }

    fn build(fee: u32, amount0: &str, amount1: &str) -> Result<AddLiquidityParams, ValidationError> {
        build_add_liquidity_params(
            &AddLiquidityConfig::default(),
            U256::from(7u64),
            &pool(fee),
            amount0,
            amount1,
            0,
            0,
            1_000,
        )
    }

    #[test]
    fn test_add_liquidity_params() {
        let params = build(3000, "1000", "2000").unwrap();
        assert_eq!(params.campaign_id, U256::from(7u64));
        // tick(2.0) = 6931, aligned to 6900
        assert_eq!(params.tick_lower, 3900);
        assert_eq!(params.tick_upper, 9900);
        assert_eq!(params.liquidity, U256::from(1414u64));
        assert_eq!(params.amount0_max, U256::from(1000u64));
        assert_eq!(params.amount1_max, U256::from(2000u64));
        assert_eq!(params.deadline, 4_600);
    }

    #[test]
    fn test_spacing_from_fee_map() {
        let params = build(100, "1000", "2000").unwrap();
        assert_eq!((params.tick_lower, params.tick_upper), (3931, 9931));

        // Unknown fee falls back to a spacing of 200.
        let params = build(1234, "1000", "2000").unwrap();
        assert_eq!((params.tick_lower, params.tick_upper), (3800, 9800));
    }

    #[test]
    fn test_price_uses_raw_units() {
        let params = build_add_liquidity_params(
            &AddLiquidityConfig::default(),
            U256::one(),
            &pool(3000),
            "1",
            "1",
            18,
            6,
            0,
        )
        .unwrap();
        // 10^6 / 10^18
        assert_eq!(params.tick_lower, -279_360);
        assert_eq!(params.tick_upper, -273_360);
    }

    #[test]
    fn test_zero_spread_is_rejected() {
        let config = AddLiquidityConfig {
            base_spread: 100,
            ..AddLiquidityConfig::default()
        };
        let err = build_add_liquidity_params(
            &config,
            U256::one(),
            &pool(10000),
            "1",
            "1",
            0,
            0,
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRange(RangeError::SpreadTooNarrow {
                spread: 0,
                tick_spacing: 200
            })
        );
    }

    #[test]
    fn test_rejects_bad_amounts() {
        assert!(matches!(
            build(3000, "abc", "1"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            build(3000, "0", "1"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            build(3000, "1", "0"),
            Err(ValidationError::InvalidAmount(_))
        ));
    }
}
