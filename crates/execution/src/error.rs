//! Execution errors.

use crate::gateway::BatchId;
use crate::status::TxStatus;
use streams_domain::error::ValidationError;
use thiserror::Error;

/// Errors raised while planning or submitting transactions.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Parameters failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The chain gateway reported an error.
    #[error("gateway error: {0}")]
    Gateway(String),
    /// No account is available to sign with.
    #[error("wallet not connected")]
    WalletNotConnected,
    /// Approval tokens and amounts have different lengths.
    #[error("approval mismatch: {tokens} tokens, {amounts} amounts")]
    ApprovalMismatch {
        /// Number of tokens.
        tokens: usize,
        /// Number of amounts.
        amounts: usize,
    },
    /// The status machine does not accept this event in its current state.
    #[error("invalid transition: {event} while {from}")]
    InvalidTransition {
        /// State the event arrived in.
        from: TxStatus,
        /// Event name.
        event: &'static str,
    },
    /// The batch was mined but reverted.
    #[error("batch {0} failed")]
    BatchFailed(BatchId),
    /// The batch was still pending after the last poll.
    #[error("batch {batch_id} still pending after {polls} polls")]
    PollLimitReached {
        /// Submitted batch.
        batch_id: BatchId,
        /// Polls performed.
        polls: u32,
    },
}
