use crate::error::ValidationError;
use crate::math::amount::{parse_units, u256_from_f64_floor, u256_to_f64};
use crate::math::price_tick::tick_to_price;
use crate::math::sqrt_price::Q96;
use crate::position::TickRange;
use primitive_types::{U256, U512};

fn narrow_to_u256(value: U512) -> Option<U256> {
    if value.bits() > 256 {
        return None;
    }
    let U512(limbs) = value;
    Some(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Liquidity supplied entirely in currency0 across `[sqrt_lower, sqrt_upper]`.
///
/// L = amount0 * sqrt_lower * sqrt_upper / 2^96 / (sqrt_upper - sqrt_lower)
///
/// Divisions floor in exactly this order so the result matches the
/// contract-side computation bit for bit.
pub fn liquidity_for_amount0(
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    amount0: U256,
) -> Result<u128, ValidationError> {
    if sqrt_lower_x96 >= sqrt_upper_x96 {
        return Err(ValidationError::InvalidSqrtPriceOrder {
            lower: sqrt_lower_x96,
            upper: sqrt_upper_x96,
        });
    }

    let numerator = sqrt_lower_x96
        .full_mul(sqrt_upper_x96)
        .checked_mul(U512::from(amount0))
        .ok_or(ValidationError::ArithmeticOverflow)?;
    let denominator = U512::from(sqrt_upper_x96 - sqrt_lower_x96);
    let liquidity = numerator / U512::from(Q96) / denominator;

    if liquidity > U512::from(u128::MAX) {
        return Err(ValidationError::LiquidityOverflow);
    }
    Ok(liquidity.low_u128())
}

/// Rough liquidity estimate `amount0 * sqrt_price / 2^96` used when adding to
/// an existing campaign.
pub fn liquidity_estimate_at_price(
    sqrt_price_x96: U256,
    amount0: U256,
) -> Result<U256, ValidationError> {
    let scaled = amount0.full_mul(sqrt_price_x96) / U512::from(Q96);
    narrow_to_u256(scaled).ok_or(ValidationError::ArithmeticOverflow)
}

/// Currency0 value carried by one unit of liquidity over `range` at `price`.
///
/// k0 = (sqrtB - sqrtP) / (sqrtP * sqrtB) + (sqrtP - sqrtA) / P
pub fn value_per_liquidity(price: f64, range: &TickRange) -> f64 {
    let sqrt_p = price.sqrt();
    let sqrt_a = tick_to_price(range.tick_lower).sqrt();
    let sqrt_b = tick_to_price(range.tick_upper).sqrt();
    (sqrt_b - sqrt_p) / (sqrt_p * sqrt_b) + (sqrt_p - sqrt_a) / price
}

/// Liquidity target equivalent to a USD budget held in currency0.
///
/// The budget is taken as currency0 whole units (currency0 assumed USD
/// denominated), scaled to smallest units, then divided by the range's k0.
pub fn goal_from_usd_budget(
    usd_budget: f64,
    token0_decimals: u8,
    price: f64,
    range: &TickRange,
) -> Result<U256, ValidationError> {
    if !usd_budget.is_finite() || usd_budget < 0.0 {
        return Err(ValidationError::InvalidAmount(usd_budget.to_string()));
    }
    let budget_token0 = parse_units(&usd_budget.to_string(), token0_decimals)?;
    let value_token0 = u256_to_f64(budget_token0);

    let k0 = value_per_liquidity(price, range);
    if k0.is_nan() || k0 <= 0.0 {
        return Err(ValidationError::InvalidKFactor(k0));
    }

    u256_from_f64_floor(value_token0 / k0).ok_or(ValidationError::ArithmeticOverflow)
}

/// Currency0 whole-unit value of `liquidity` over `range` at `price`.
///
/// Returns 0 when the range's k0 is not positive.
pub fn liquidity_to_value(
    liquidity: u128,
    price: f64,
    range: &TickRange,
    token0_decimals: u8,
) -> f64 {
    if liquidity == 0 {
        return 0.0;
    }
    let k0 = value_per_liquidity(price, range);
    if k0.is_nan() || k0 <= 0.0 {
        return 0.0;
    }
    liquidity as f64 * k0 / 10f64.powi(i32::from(token0_decimals))
}
