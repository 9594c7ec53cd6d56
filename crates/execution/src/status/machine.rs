use crate::error::ExecutionError;
use crate::gateway::{BatchId, BatchStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    #[default]
    Idle,
    Preparing,
    AwaitingSignature,
    Pending,
    Success,
    Failed,
}

/// Inputs of the status machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    /// Submission started.
    Prepare,
    /// Calls are ready and the wallet has been asked to sign.
    RequestSignature,
    /// The wallet accepted the batch.
    Submitted { batch_id: BatchId },
    /// A status poll came back.
    Polled(BatchStatus),
    /// Submission aborted: validation error, signature refused or send failure.
    Rejected(String),
    /// Back to idle.
    Reset,
}

impl TxEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TxEvent::Prepare => "prepare",
            TxEvent::RequestSignature => "request_signature",
            TxEvent::Submitted { .. } => "submitted",
            TxEvent::Polled(_) => "polled",
            TxEvent::Rejected(_) => "rejected",
            TxEvent::Reset => "reset",
        }
    }
}

impl TxStatus {
    /// Applies an event, returning the next status.
    pub fn reduce(self, event: &TxEvent) -> Result<TxStatus, ExecutionError> {
        use TxStatus::*;

        let next = match (self, event) {
            (_, TxEvent::Reset) => Idle,
            (Idle, TxEvent::Prepare) => Preparing,
            (Preparing, TxEvent::RequestSignature) => AwaitingSignature,
            (AwaitingSignature, TxEvent::Submitted { .. }) => Pending,
            (Pending, TxEvent::Polled(BatchStatus::Pending)) => Pending,
            (Pending, TxEvent::Polled(BatchStatus::Success)) => Success,
            (Pending, TxEvent::Polled(BatchStatus::Failure)) => Failed,
            (from, TxEvent::Rejected(_)) if !from.is_terminal() => Failed,
            (from, event) => {
                return Err(ExecutionError::InvalidTransition {
                    from,
                    event: event.name(),
                });
            }
        };
        Ok(next)
    }

    /// Whether a submission is in flight.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            TxStatus::Preparing | TxStatus::AwaitingSignature | TxStatus::Pending
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TxStatus::Success | TxStatus::Failed)
    }

    /// Progress message shown to the user.
    pub fn status_message(self) -> &'static str {
        match self {
            TxStatus::Idle => "",
            TxStatus::Preparing => "Checking allowances...",
            TxStatus::AwaitingSignature => "Please confirm in your wallet...",
            TxStatus::Pending => "Transaction submitted! Waiting for confirmation...",
            TxStatus::Success => "Transaction confirmed",
            TxStatus::Failed => "Transaction failed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxStatus::Idle => "idle",
            TxStatus::Preparing => "preparing",
            TxStatus::AwaitingSignature => "awaiting_signature",
            TxStatus::Pending => "pending",
            TxStatus::Success => "success",
            TxStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}
