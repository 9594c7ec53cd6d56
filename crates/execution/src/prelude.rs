//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use streams_execution::prelude::*;
//! ```

// Approvals
pub use crate::approvals::{ApprovalRequest, approval_requests, plan_approvals};

// Config
pub use crate::config::{ExecutionConfig, STREAMER_ADDRESS};

// Errors
pub use crate::error::ExecutionError;

// Gateway
pub use crate::gateway::{
    BatchId, BatchStatus, BatchStatusReport, ChainGateway, ContractCall, InMemoryGateway, Receipt,
};

// Latest
pub use crate::latest::{LatestOnly, Ticket};

// Status
pub use crate::status::{TxEvent, TxStatus, TxTracker};

// Submission
pub use crate::submission::{AddLiquidityRequest, CampaignSubmitter, SubmissionOutcome};
