//! Campaign parameter builder.
//!
//! Turns the human-entered values of the new-campaign form into the exact
//! arguments of the streamer's `createCampaign` call. Every step is pure
//! apart from reading the clock for the deadline.

pub mod config;
pub mod observer;

use crate::campaign::{CreateCampaignParams, RewardType};
use crate::clock::{Clock, SystemClock};
use crate::error::ValidationError;
use crate::fees::FeeTier;
use crate::math::amount::{parse_units, to_human};
use crate::math::concentrated_liquidity::{goal_from_usd_budget, liquidity_for_amount0};
use crate::math::price_tick::{place_tick_range, spread_for_tick_spacing};
use crate::math::sqrt_price::{encode_sqrt_price_x96, sqrt_prices_for_range};
use crate::pool::PoolKey;
use crate::position::MintPositionParams;
use crate::token::{Address, TokenDescriptor, sort_tokens};
use config::BuilderConfig;
use observer::{BuildObserver, NoopObserver};
use primitive_types::U256;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Values collected by the new-campaign form.
///
/// Amounts are human decimal strings in the order the tokens were presented,
/// which need not be pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignInput {
    pub token0: TokenDescriptor,
    pub token1: TokenDescriptor,
    pub fee_tier: FeeTier,
    /// Price typed by the user. Only checked for sanity; the deposit ratio
    /// decides the actual price. Empty means no hint.
    pub initial_price_hint: String,
    pub amount0: String,
    pub amount1: String,
    pub reward_token: TokenDescriptor,
    pub reward_amount: String,
    pub duration_days: u64,
    /// Owner of the minted position.
    pub recipient: Address,
}

/// Builds [`CreateCampaignParams`] from form input.
#[derive(Clone)]
pub struct CampaignParamsBuilder {
    config: BuilderConfig,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn BuildObserver>,
}

impl Default for CampaignParamsBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl CampaignParamsBuilder {
    /// Creates a builder reading the system clock and observing nothing.
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            observer: Arc::new(NoopObserver),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn BuildObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Runs the full computation. The first failing check aborts the build.
    pub fn build(&self, input: &CampaignInput) -> Result<CreateCampaignParams, ValidationError> {
        let observer = self.observer.as_ref();
        observer.on_input(
            &input.amount0,
            &input.amount1,
            &input.reward_amount,
            input.duration_days,
        );

        input.fee_tier.validate()?;
        let duration = duration_seconds(input.duration_days)?;
        check_price_hint(&input.initial_price_hint)?;

        let sorted = sort_tokens(&input.token0, &input.token1);
        if sorted.currency0.address == sorted.currency1.address {
            return Err(ValidationError::IdenticalTokens(
                sorted.currency0.address.to_string(),
            ));
        }
        observer.on_sorted(&sorted);

        let (amount0_str, amount1_str) = if sorted.swapped {
            (&input.amount1, &input.amount0)
        } else {
            (&input.amount0, &input.amount1)
        };
        let amount0 = parse_units(amount0_str, sorted.currency0.decimals)?;
        let amount1 = parse_units(amount1_str, sorted.currency1.decimals)?;
        let budget = parse_units(&input.reward_amount, input.reward_token.decimals)?;
        observer.on_amounts(amount0, amount1, budget);

        let price = to_human(amount1, sorted.currency1.decimals)
            / to_human(amount0, sorted.currency0.decimals);
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }
        observer.on_price(price);

        let tick_spacing = input.fee_tier.tick_spacing;
        let spread = spread_for_tick_spacing(self.config.base_spread, tick_spacing);
        observer.on_spread(tick_spacing, spread);

        let placement = place_tick_range(price, tick_spacing, spread)?;
        observer.on_tick_range(&placement);
        let range = placement.range;

        let (sqrt_lower, sqrt_upper) = sqrt_prices_for_range(&range)?;
        let liquidity = liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)?;
        observer.on_liquidity(sqrt_lower, sqrt_upper, liquidity);

        let usd_budget = self.usd_budget(&input.reward_amount)?;
        let goal = goal_from_usd_budget(usd_budget, sorted.currency0.decimals, price, &range)?;
        observer.on_goal(usd_budget, goal);

        let deadline = self
            .clock
            .now_unix()
            .saturating_add(self.config.deadline_window_secs);
        let starting_price = encode_sqrt_price_x96(price)?;
        let pool = PoolKey::new(&sorted, &input.fee_tier, self.config.hooks)?;

        let params = CreateCampaignParams {
            pool,
            reward: input.reward_token.address,
            budget,
            goal,
            duration,
            deadline,
            reward_type: RewardType::Streaming,
            starting_price,
            mint_params: MintPositionParams {
                tick_lower: range.tick_lower,
                tick_upper: range.tick_upper,
                liquidity,
                amount0_max: amount0,
                amount1_max: amount1,
                recipient: input.recipient,
                hook_data: Vec::new(),
            },
        };
        observer.on_built(&params);
        Ok(params)
    }

    /// The reward amount numeral read as USD, scaled by the configured rate.
    fn usd_budget(&self, reward_amount: &str) -> Result<f64, ValidationError> {
        let invalid = || ValidationError::InvalidAmount(reward_amount.to_string());
        let amount: f64 = reward_amount.trim().parse().map_err(|_| invalid())?;
        let rate = self.config.usd_per_reward_token.to_f64().ok_or_else(invalid)?;
        Ok(amount * rate)
    }
}

/// `days * 86400`, rejecting zero and overflow.
pub fn duration_seconds(duration_days: u64) -> Result<u64, ValidationError> {
    if duration_days == 0 {
        return Err(ValidationError::InvalidDuration);
    }
    duration_days
        .checked_mul(SECONDS_PER_DAY)
        .ok_or(ValidationError::InvalidDuration)
}

/// Accepts an empty hint; anything else must be a finite positive number.
pub fn check_price_hint(hint: &str) -> Result<(), ValidationError> {
    let hint = hint.trim();
    if hint.is_empty() {
        return Ok(());
    }
    match hint.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(()),
        Ok(price) => Err(ValidationError::InvalidPrice(price)),
        Err(_) => Err(ValidationError::InvalidPrice(f64::NAN)),
    }
}

/// Builds campaign parameters with the default configuration and the system clock.
#[allow(clippy::too_many_arguments)]
pub fn build_create_campaign_params(
    token0: &TokenDescriptor,
    token1: &TokenDescriptor,
    fee_tier: &FeeTier,
    initial_price_hint: &str,
    amount0: &str,
    amount1: &str,
    reward_token: &TokenDescriptor,
    reward_amount: &str,
    duration_days: u64,
    recipient: Address,
) -> Result<CreateCampaignParams, ValidationError> {
    let input = CampaignInput {
        token0: token0.clone(),
        token1: token1.clone(),
        fee_tier: fee_tier.clone(),
        initial_price_hint: initial_price_hint.to_string(),
        amount0: amount0.to_string(),
        amount1: amount1.to_string(),
        reward_token: reward_token.clone(),
        reward_amount: reward_amount.to_string(),
        duration_days,
        recipient,
    };
    CampaignParamsBuilder::default().build(&input)
}

/// Smallest-unit budget paid per second over the campaign, floored.
pub fn reward_per_second(budget: U256, duration: u64) -> U256 {
    if duration == 0 {
        return U256::zero();
    }
    budget / U256::from(duration)
}
