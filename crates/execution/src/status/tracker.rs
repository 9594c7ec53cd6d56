use super::{TxEvent, TxStatus};
use crate::error::ExecutionError;
use crate::gateway::{BatchId, BatchStatusReport};
use tracing::{debug, info, warn};

/// Holds the status of one submission and what it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxTracker {
    status: TxStatus,
    batch_id: Option<BatchId>,
    tx_hash: Option<String>,
    error: Option<String>,
}

impl TxTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TxStatus {
        self.status
    }

    pub fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }

    /// Hash of the final transaction once the batch succeeded.
    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    /// Reason of the last rejection.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Feeds an event through the status machine.
    pub fn apply(&mut self, event: TxEvent) -> Result<TxStatus, ExecutionError> {
        let from = self.status;
        let next = from.reduce(&event)?;

        match event {
            TxEvent::Reset => {
                self.batch_id = None;
                self.tx_hash = None;
                self.error = None;
            }
            TxEvent::Prepare => self.error = None,
            TxEvent::Submitted { batch_id } => {
                info!(batch_id = %batch_id, "Batch submitted");
                self.batch_id = Some(batch_id);
            }
            TxEvent::Rejected(reason) => {
                warn!(from = %from, reason = %reason, "Submission rejected");
                self.error = Some(reason);
            }
            TxEvent::RequestSignature | TxEvent::Polled(_) => {}
        }

        if from != next {
            debug!(from = %from, to = %next, "Transaction status changed");
        }
        self.status = next;
        Ok(next)
    }

    /// Applies a poll result, keeping the final receipt hash on success.
    pub fn apply_report(&mut self, report: &BatchStatusReport) -> Result<TxStatus, ExecutionError> {
        let next = self.apply(TxEvent::Polled(report.status))?;
        if next == TxStatus::Success {
            self.tx_hash = report.final_transaction_hash().map(str::to_string);
        }
        Ok(next)
    }
}
