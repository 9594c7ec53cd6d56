//! Transaction status tracking.
//!
//! A batch moves through:
//! - Idle
//! - Preparing (reading allowances, building params)
//! - AwaitingSignature (wallet prompt open)
//! - Pending (submitted, polling)
//! - Success or Failed

mod machine;
mod tracker;

pub use machine::*;
pub use tracker::*;
