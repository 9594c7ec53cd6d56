//! Tick, price and liquidity math.

/// Human amount parsing and `U256`/`f64` conversions.
pub mod amount;
/// Liquidity and goal computations.
pub mod concentrated_liquidity;
/// Tick and price conversions, tick ranges.
pub mod price_tick;
/// Q64.96 sqrt price encoding.
pub mod sqrt_price;

pub use amount::{format_units, parse_units};
pub use concentrated_liquidity::{
    goal_from_usd_budget, liquidity_for_amount0, liquidity_to_value, value_per_liquidity,
};
pub use price_tick::{
    MAX_TICK, MIN_TICK, align_to_tick_spacing, compute_tick_range, price_to_tick,
    spread_for_tick_spacing, tick_to_price,
};
pub use sqrt_price::{Q96, encode_sqrt_price_x96, sqrt_price_x96_at_tick};
