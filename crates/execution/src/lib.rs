//! Transaction planning and submission for Streams campaigns.
//!
//! This crate connects the campaign builder to the chain:
//! - The chain gateway interface and an in-memory implementation
//! - ERC-20 approval planning
//! - The transaction status machine
//! - Batch submission and confirmation polling

/// Prelude module for convenient imports.
pub mod prelude;

/// Approval planning.
pub mod approvals;
/// Execution settings.
pub mod config;
/// Execution errors.
pub mod error;
/// Chain gateway.
pub mod gateway;
/// Stale result filtering.
pub mod latest;
/// Transaction status.
pub mod status;
/// Batch submission.
pub mod submission;
