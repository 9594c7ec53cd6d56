use crate::serde_utils::{hex_bytes, u128_dec, u256_dec};
use crate::token::Address;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A tick interval `[tick_lower, tick_upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    pub tick_lower: i32,
    pub tick_upper: i32,
}

impl TickRange {
    pub fn new(tick_lower: i32, tick_upper: i32) -> Self {
        Self {
            tick_lower,
            tick_upper,
        }
    }

    /// Number of ticks covered.
    pub fn width(&self) -> i64 {
        i64::from(self.tick_upper) - i64::from(self.tick_lower)
    }

    pub fn contains(&self, tick: i32) -> bool {
        tick >= self.tick_lower && tick < self.tick_upper
    }

    /// Whether both bounds are multiples of `tick_spacing`.
    pub fn is_aligned(&self, tick_spacing: i32) -> bool {
        tick_spacing > 0
            && self.tick_lower.rem_euclid(tick_spacing) == 0
            && self.tick_upper.rem_euclid(tick_spacing) == 0
    }
}

/// Position to mint alongside a new campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPositionParams {
    pub tick_lower: i32,
    pub tick_upper: i32,
    #[serde(with = "u128_dec")]
    pub liquidity: u128,
    /// Slippage bound for currency0, in smallest units.
    #[serde(with = "u256_dec")]
    pub amount0_max: U256,
    /// Slippage bound for currency1, in smallest units.
    #[serde(with = "u256_dec")]
    pub amount1_max: U256,
    pub recipient: Address,
    #[serde(with = "hex_bytes")]
    pub hook_data: Vec<u8>,
}

impl MintPositionParams {
    pub fn range(&self) -> TickRange {
        TickRange::new(self.tick_lower, self.tick_upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_range_helpers() {
        let range = TickRange::new(-120, 180);
        assert_eq!(range.width(), 300);
        assert!(range.contains(-120));
        assert!(!range.contains(180));
        assert!(range.is_aligned(60));
        assert!(!range.is_aligned(200));
    }

    #[test]
    fn test_mint_params_json_is_lossless() {
        let params = MintPositionParams {
            tick_lower: -60,
            tick_upper: 60,
            liquidity: u128::MAX,
            amount0_max: U256::MAX,
            amount1_max: U256::from(1u64),
            recipient: Address::from_bytes([0x01; 20]),
            hook_data: Vec::new(),
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["liquidity"], u128::MAX.to_string());
        assert_eq!(json["amount0_max"], U256::MAX.to_string());
        assert_eq!(json["hook_data"], "0x");

        let back: MintPositionParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
