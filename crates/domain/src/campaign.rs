use crate::pool::PoolKey;
use crate::position::MintPositionParams;
use crate::serde_utils::u256_dec;
use crate::token::Address;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// How a campaign pays out its budget. Discriminants match the contract enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardType {
    Points = 0,
    Streaming = 1,
    Tokens = 2,
}

impl RewardType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Arguments of the streamer's `createCampaign` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCampaignParams {
    pub pool: PoolKey,
    /// Reward token address.
    pub reward: Address,
    /// Reward budget in reward-token smallest units.
    #[serde(with = "u256_dec")]
    pub budget: U256,
    /// Liquidity target, in the same units as position liquidity.
    #[serde(with = "u256_dec")]
    pub goal: U256,
    /// Campaign length in seconds.
    pub duration: u64,
    /// Unix timestamp after which the transaction must revert.
    pub deadline: u64,
    pub reward_type: RewardType,
    /// Initial pool price as a Q64.96 sqrt price (uint160).
    #[serde(with = "u256_dec")]
    pub starting_price: U256,
    pub mint_params: MintPositionParams,
}
