//! Hooks for watching a build step by step.
//!
//! The builder never logs on its own. Attach a [`TracingObserver`] to get the
//! intermediate values in the trace output, or implement [`BuildObserver`] to
//! collect them elsewhere.

use crate::campaign::CreateCampaignParams;
use crate::math::price_tick::TickPlacement;
use crate::token::SortedTokens;
use primitive_types::U256;
use tracing::{debug, info};

/// Receives intermediate values of a campaign build, in computation order.
///
/// Every method defaults to doing nothing.
pub trait BuildObserver: Send + Sync {
    /// Raw user inputs, before any parsing.
    fn on_input(&self, _amount0: &str, _amount1: &str, _reward_amount: &str, _duration_days: u64) {}

    fn on_sorted(&self, _tokens: &SortedTokens) {}

    /// Deposit amounts after sorting, in smallest units.
    fn on_amounts(&self, _amount0: U256, _amount1: U256, _budget: U256) {}

    /// Price derived from the deposit ratio.
    fn on_price(&self, _price: f64) {}

    fn on_spread(&self, _tick_spacing: i32, _spread: i32) {}

    fn on_tick_range(&self, _placement: &TickPlacement) {}

    fn on_liquidity(&self, _sqrt_lower_x96: U256, _sqrt_upper_x96: U256, _liquidity: u128) {}

    fn on_goal(&self, _usd_budget: f64, _goal: U256) {}

    /// The finished parameters.
    fn on_built(&self, _params: &CreateCampaignParams) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

/// Forwards intermediate values to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_input(&self, amount0: &str, amount1: &str, reward_amount: &str, duration_days: u64) {
        debug!(amount0, amount1, reward_amount, duration_days, "Building campaign params");
    }

    fn on_sorted(&self, tokens: &SortedTokens) {
        debug!(
            currency0 = %tokens.currency0,
            currency1 = %tokens.currency1,
            swapped = tokens.swapped,
            "Sorted tokens"
        );
    }

    fn on_amounts(&self, amount0: U256, amount1: U256, budget: U256) {
        debug!(%amount0, %amount1, %budget, "Parsed amounts");
    }

    fn on_price(&self, price: f64) {
        debug!(price, "Derived price from deposit ratio");
    }

    fn on_spread(&self, tick_spacing: i32, spread: i32) {
        debug!(tick_spacing, spread, "Selected spread");
    }

    fn on_tick_range(&self, placement: &TickPlacement) {
        debug!(
            tick = placement.tick,
            aligned = placement.aligned,
            tick_lower = placement.range.tick_lower,
            tick_upper = placement.range.tick_upper,
            "Computed tick range"
        );
    }

    fn on_liquidity(&self, sqrt_lower_x96: U256, sqrt_upper_x96: U256, liquidity: u128) {
        debug!(%sqrt_lower_x96, %sqrt_upper_x96, liquidity, "Computed liquidity");
    }

    fn on_goal(&self, usd_budget: f64, goal: U256) {
        debug!(usd_budget, %goal, "Computed goal");
    }

    fn on_built(&self, params: &CreateCampaignParams) {
        info!(
            currency0 = %params.pool.currency0,
            currency1 = %params.pool.currency1,
            fee = params.pool.fee,
            budget = %params.budget,
            goal = %params.goal,
            liquidity = params.mint_params.liquidity,
            deadline = params.deadline,
            "Campaign params built"
        );
    }
}
