use super::{BatchId, BatchStatus, BatchStatusReport, ChainGateway, ContractCall, Receipt};
use crate::error::ExecutionError;
use async_trait::async_trait;
use primitive_types::U256;
use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::Mutex;
use tracing::debug;
use streams_domain::token::Address;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    allowances: HashMap<(Address, Address, Address), U256>,
    failing_tokens: HashSet<Address>,
    campaign_counter: U256,
    batches: Vec<(BatchId, Vec<ContractCall>)>,
    scripted: VecDeque<BatchStatus>,
    reject_reason: Option<String>,
    block_number: u64,
}

/// Gateway that keeps chain state in memory.
///
/// Batches settle according to a scripted list of poll results and
/// succeed once the script runs out. Approvals and campaign creation are
/// applied only when a batch succeeds, on behalf of `account`.
#[derive(Debug)]
pub struct InMemoryGateway {
    account: Address,
    state: Mutex<MemoryState>,
}

impl InMemoryGateway {
    pub fn new(account: Address) -> Self {
        Self {
            account,
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// The account batches are sent from.
    pub fn account(&self) -> Address {
        self.account
    }

    pub async fn set_allowance(&self, owner: Address, token: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .await
            .allowances
            .insert((owner, token, spender), amount);
    }

    /// Makes allowance reads for `token` fail.
    pub async fn fail_allowance(&self, token: Address) {
        self.state.lock().await.failing_tokens.insert(token);
    }

    /// Queues poll results returned before a batch settles.
    pub async fn script_statuses(&self, statuses: impl IntoIterator<Item = BatchStatus>) {
        self.state.lock().await.scripted.extend(statuses);
    }

    /// Rejects every following `send_calls`, as a user declining to sign would.
    pub async fn reject_sends(&self, reason: impl Into<String>) {
        self.state.lock().await.reject_reason = Some(reason.into());
    }

    /// Every batch sent so far, oldest first.
    pub async fn sent_batches(&self) -> Vec<Vec<ContractCall>> {
        self.state
            .lock()
            .await
            .batches
            .iter()
            .map(|(_, calls)| calls.clone())
            .collect()
    }
}

impl MemoryState {
    fn settle(&mut self, account: Address, batch_id: &BatchId, applied: bool) -> Vec<Receipt> {
        let Some((_, calls)) = self.batches.iter().find(|(id, _)| id == batch_id) else {
            return Vec::new();
        };
        let calls = calls.clone();
        let mut receipts = Vec::with_capacity(calls.len());
        for call in &calls {
            if applied {
                self.apply(account, call);
            }
            self.block_number += 1;
            receipts.push(Receipt {
                transaction_hash: format!("0x{}", Uuid::new_v4().simple()),
                block_number: self.block_number,
            });
        }
        receipts
    }

    fn apply(&mut self, account: Address, call: &ContractCall) {
        match call {
            ContractCall::Approve {
                token,
                spender,
                amount,
            } => {
                self.allowances.insert((account, *token, *spender), *amount);
            }
            ContractCall::CreateCampaign(_) => {
                self.campaign_counter = self.campaign_counter.saturating_add(U256::one());
            }
            ContractCall::AddLiquidity(_) => {}
        }
    }
}

#[async_trait]
impl ChainGateway for InMemoryGateway {
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
    ) -> Result<U256, ExecutionError> {
        let state = self.state.lock().await;
        if state.failing_tokens.contains(&token) {
            return Err(ExecutionError::Gateway(format!(
                "allowance read failed for {token}"
            )));
        }
        Ok(state
            .allowances
            .get(&(owner, token, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn campaign_counter(&self) -> Result<U256, ExecutionError> {
        Ok(self.state.lock().await.campaign_counter)
    }

    async fn send_calls(&self, calls: Vec<ContractCall>) -> Result<BatchId, ExecutionError> {
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.reject_reason {
            return Err(ExecutionError::Gateway(reason.clone()));
        }
        let batch_id = BatchId(format!("0x{}", Uuid::new_v4().simple()));
        debug!(batch_id = %batch_id, calls = calls.len(), "Batch accepted");
        state.batches.push((batch_id.clone(), calls));
        Ok(batch_id)
    }

    async fn calls_status(&self, batch_id: &BatchId) -> Result<BatchStatusReport, ExecutionError> {
        let mut state = self.state.lock().await;
        if !state.batches.iter().any(|(id, _)| id == batch_id) {
            return Err(ExecutionError::Gateway(format!("unknown batch {batch_id}")));
        }
        let status = state.scripted.pop_front().unwrap_or(BatchStatus::Success);
        let receipts = match status {
            BatchStatus::Pending => Vec::new(),
            BatchStatus::Success => state.settle(self.account, batch_id, true),
            BatchStatus::Failure => state.settle(self.account, batch_id, false),
        };
        Ok(BatchStatusReport { status, receipts })
    }
}
