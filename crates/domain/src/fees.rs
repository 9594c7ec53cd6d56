use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Largest value representable by a `uint24` fee.
pub const MAX_FEE: u32 = 0x00FF_FFFF;

/// Largest value representable by an `int24` tick spacing.
pub const MAX_TICK_SPACING: i32 = 0x007F_FFFF;

/// A pool fee tier and the tick spacing paired with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    /// Fee in hundredths of a bip (3000 = 0.3%).
    pub fee: u32,
    pub tick_spacing: i32,
    pub label: String,
    pub description: String,
}

impl FeeTier {
    pub fn new(fee: u32, tick_spacing: i32) -> Self {
        Self {
            fee,
            tick_spacing,
            label: String::new(),
            description: String::new(),
        }
    }

    fn labelled(fee: u32, tick_spacing: i32, label: &str, description: &str) -> Self {
        Self {
            fee,
            tick_spacing,
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    /// The Uniswap v4 tiers offered when creating a campaign.
    pub fn standard() -> Vec<FeeTier> {
        vec![
            Self::labelled(100, 1, "0.01%", "Best for very stable pairs."),
            Self::labelled(500, 10, "0.05%", "Best for stable pairs."),
            Self::labelled(3000, 60, "0.3%", "Best for most pairs."),
            Self::labelled(10000, 200, "1%", "Best for exotic pairs."),
        ]
    }

    /// Looks up a standard tier by fee.
    pub fn by_fee(fee: u32) -> Result<FeeTier, ValidationError> {
        Self::standard()
            .into_iter()
            .find(|tier| tier.fee == fee)
            .ok_or(ValidationError::UnknownFeeTier(fee))
    }

    /// Tick spacing of the standard tier with this fee, if any.
    pub fn tick_spacing_for_fee(fee: u32) -> Option<i32> {
        Self::by_fee(fee).ok().map(|tier| tier.tick_spacing)
    }

    /// Checks that the tier fits the `uint24` fee and `int24` spacing fields of a pool key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee > MAX_FEE {
            return Err(ValidationError::FeeOutOfRange(self.fee));
        }
        validate_tick_spacing(self.tick_spacing)
    }
}

pub(crate) fn validate_tick_spacing(tick_spacing: i32) -> Result<(), ValidationError> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK_SPACING {
        return Err(ValidationError::TickSpacingOutOfRange(tick_spacing));
    }
    Ok(())
}
