//! Chain read/write gateway.
//!
//! The gateway is the only component that talks to the chain. Calls are
//! passed in typed form; ABI encoding is up to the implementation.

mod memory;

pub use memory::*;

use crate::error::ExecutionError;
use async_trait::async_trait;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use streams_domain::add_liquidity::AddLiquidityParams;
use streams_domain::campaign::CreateCampaignParams;
use streams_domain::serde_utils::u256_dec;
use streams_domain::token::Address;

/// Identifier of a submitted call batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub String);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Batch state reported by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Pending,
    Success,
    Failure,
}

/// Receipt of one transaction in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: String,
    pub block_number: u64,
}

/// Result of polling a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatusReport {
    pub status: BatchStatus,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

impl BatchStatusReport {
    /// Hash of the last receipt, which carries the final call of the batch.
    pub fn final_transaction_hash(&self) -> Option<&str> {
        self.receipts.last().map(|r| r.transaction_hash.as_str())
    }
}

/// A contract call in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "camelCase")]
pub enum ContractCall {
    /// ERC-20 `approve(spender, amount)` on `token`.
    Approve {
        token: Address,
        spender: Address,
        #[serde(with = "u256_dec")]
        amount: U256,
    },
    /// Streamer `createCampaign(params)`.
    CreateCampaign(Box<CreateCampaignParams>),
    /// Streamer `addLiquidityToCampaign(...)`.
    AddLiquidity(AddLiquidityParams),
}

impl ContractCall {
    /// Contract the call is sent to.
    pub fn target(&self, streamer: Address) -> Address {
        match self {
            ContractCall::Approve { token, .. } => *token,
            ContractCall::CreateCampaign(_) | ContractCall::AddLiquidity(_) => streamer,
        }
    }

    /// Solidity function name.
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::Approve { .. } => "approve",
            ContractCall::CreateCampaign(_) => "createCampaign",
            ContractCall::AddLiquidity(_) => "addLiquidityToCampaign",
        }
    }
}

/// Reads and writes chain state for the submission flow.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// ERC-20 allowance granted by `owner` to `spender`.
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
    ) -> Result<U256, ExecutionError>;

    /// Number of campaigns created so far; also the id of the newest one.
    async fn campaign_counter(&self) -> Result<U256, ExecutionError>;

    /// Submits calls as one ordered batch.
    async fn send_calls(&self, calls: Vec<ContractCall>) -> Result<BatchId, ExecutionError>;

    /// Current state of a submitted batch.
    async fn calls_status(&self, batch_id: &BatchId) -> Result<BatchStatusReport, ExecutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_call_json() {
        let token = Address::from_bytes([0x11; 20]);
        let spender = Address::from_bytes([0x22; 20]);
        let call = ContractCall::Approve {
            token,
            spender,
            amount: U256::MAX,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["function"], "approve");
        assert_eq!(json["token"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["amount"], U256::MAX.to_string());

        assert_eq!(call.target(spender), token);
        assert_eq!(call.function_name(), "approve");
    }

    #[test]
    fn test_final_transaction_hash() {
        let report: BatchStatusReport = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(report.status, BatchStatus::Pending);
        assert_eq!(report.final_transaction_hash(), None);
    }
}
