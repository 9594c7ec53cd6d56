//! Campaign parameter construction for Streams liquidity-mining campaigns.
//!
//! This crate turns human-entered token amounts, a fee tier and a reward
//! budget into the exact arguments of the streamer contract:
//! - Token ordering and Uniswap v4 pool keys
//! - Tick and price conversions, tick-range placement
//! - Q64.96 sqrt price encoding and liquidity math
//! - The campaign parameter builder and the add-liquidity variant
//!
//! Everything here is synchronous and performs no I/O.

/// Prelude module for convenient imports.
pub mod prelude;

/// Add-liquidity parameters for existing campaigns.
pub mod add_liquidity;
/// Campaign parameter builder.
pub mod builder;
/// Campaign call arguments.
pub mod campaign;
/// Time source.
pub mod clock;
/// Validation errors.
pub mod error;
/// Fee tiers.
pub mod fees;
/// Tick, price and liquidity math.
pub mod math;
/// Pool keys.
pub mod pool;
/// Tick ranges and mint parameters.
pub mod position;
/// Serde adapters.
pub mod serde_utils;
/// Addresses and token metadata.
pub mod token;
