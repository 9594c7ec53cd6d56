//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use streams_domain::prelude::*;
//! ```

// Builder
pub use crate::builder::config::{BuilderConfig, ConfigError, STREAMER_HOOK_ADDRESS};
pub use crate::builder::observer::{BuildObserver, NoopObserver, TracingObserver};
pub use crate::builder::{
    CampaignInput, CampaignParamsBuilder, build_create_campaign_params, reward_per_second,
};

// Add liquidity
pub use crate::add_liquidity::{AddLiquidityConfig, AddLiquidityParams, build_add_liquidity_params};

// Values
pub use crate::campaign::{CreateCampaignParams, RewardType};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::error::{RangeError, ValidationError};
pub use crate::fees::FeeTier;
pub use crate::pool::PoolKey;
pub use crate::position::{MintPositionParams, TickRange};
pub use crate::token::{Address, SortedTokens, TokenDescriptor, sort_tokens};

// Math
pub use crate::math::{
    MAX_TICK, MIN_TICK, Q96, align_to_tick_spacing, compute_tick_range, encode_sqrt_price_x96,
    format_units, goal_from_usd_budget, liquidity_for_amount0, liquidity_to_value, parse_units,
    price_to_tick, spread_for_tick_spacing, tick_to_price,
};
