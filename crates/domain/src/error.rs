//! Validation errors raised while building campaign parameters.
//!
//! Every error is fatal to the current build attempt. Nothing in this crate
//! retries or returns partial results.

use crate::math::price_tick::{MAX_TICK, MIN_TICK};
use primitive_types::U256;
use thiserror::Error;

/// Tick range precondition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Spread is smaller than the tick spacing.
    #[error("spread must be >= tick spacing: {spread} < {tick_spacing}")]
    SpreadTooNarrow {
        /// Requested spread in ticks.
        spread: i32,
        /// Tick spacing of the pool.
        tick_spacing: i32,
    },
    /// Spread is not a multiple of the tick spacing.
    #[error("spread must be divisible by tick spacing: {spread} % {tick_spacing} != 0")]
    SpreadMisaligned {
        /// Requested spread in ticks.
        spread: i32,
        /// Tick spacing of the pool.
        tick_spacing: i32,
    },
}

/// Errors raised by the campaign parameter builder and its helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A human-entered amount is not a valid non-negative decimal numeral.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    /// A derived or hinted price is not a finite positive number.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
    /// The requested spread does not fit the tick spacing.
    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),
    /// A computed tick bound falls outside the enforced global range.
    #[error(
        "tick out of range: [{tick_lower}, {tick_upper}] not within [{min}, {max}]",
        min = MIN_TICK,
        max = MAX_TICK
    )]
    TickOutOfRange {
        /// Computed lower tick.
        tick_lower: i64,
        /// Computed upper tick.
        tick_upper: i64,
    },
    /// Lower sqrt price is not strictly below the upper one.
    #[error("sqrt price lower bound must be < upper bound: {lower} >= {upper}")]
    InvalidSqrtPriceOrder {
        /// Lower bound as Q64.96.
        lower: U256,
        /// Upper bound as Q64.96.
        upper: U256,
    },
    /// The value-to-liquidity factor of the range is not positive.
    #[error("invalid K factor for liquidity calculation: {0}")]
    InvalidKFactor(f64),
    /// Liquidity does not fit in 128 bits.
    #[error("liquidity exceeds uint128")]
    LiquidityOverflow,
    /// An encoded sqrt price does not fit in 160 bits.
    #[error("sqrt price exceeds uint160")]
    SqrtPriceOverflow,
    /// An intermediate fixed-point value exceeds the working width.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// Campaign duration must be at least one day.
    #[error("duration must be at least one day")]
    InvalidDuration,
    /// Fee does not fit in a uint24.
    #[error("fee out of range: {0}")]
    FeeOutOfRange(u32),
    /// Tick spacing is not positive or does not fit in an int24.
    #[error("tick spacing out of range: {0}")]
    TickSpacingOutOfRange(i32),
    /// Both pool currencies resolve to the same address.
    #[error("pool currencies must differ: {0}")]
    IdenticalTokens(String),
    /// Address string is not 20 hex bytes.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    /// No registered fee tier has this fee.
    #[error("unknown fee tier: {0}")]
    UnknownFeeTier(u32),
}
