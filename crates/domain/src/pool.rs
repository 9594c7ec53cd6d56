use crate::error::ValidationError;
use crate::fees::FeeTier;
use crate::token::{Address, SortedTokens};
use serde::{Deserialize, Serialize};

/// Identifies a Uniswap v4 pool.
///
/// `currency0` must sort strictly below `currency1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub currency0: Address,
    pub currency1: Address,
    /// Fee in hundredths of a bip (uint24).
    pub fee: u32,
    /// Tick spacing (int24).
    pub tick_spacing: i32,
    /// Hooks contract attached to the pool.
    pub hooks: Address,
}

impl PoolKey {
    /// Builds the key for a sorted pair and fee tier.
    pub fn new(
        tokens: &SortedTokens,
        fee_tier: &FeeTier,
        hooks: Address,
    ) -> Result<Self, ValidationError> {
        fee_tier.validate()?;
        if tokens.currency0.address == tokens.currency1.address {
            return Err(ValidationError::IdenticalTokens(
                tokens.currency0.address.to_string(),
            ));
        }
        Ok(Self {
            currency0: tokens.currency0.address,
            currency1: tokens.currency1.address,
            fee: fee_tier.fee,
            tick_spacing: fee_tier.tick_spacing,
            hooks,
        })
    }

    /// Whether the currencies are in pool order.
    pub fn is_sorted(&self) -> bool {
        self.currency0 < self.currency1
    }
}
