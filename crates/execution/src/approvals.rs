//! ERC-20 approval planning.

use crate::error::ExecutionError;
use crate::gateway::ContractCall;
use primitive_types::U256;
use std::collections::HashMap;
use streams_domain::token::Address;
use tracing::debug;

/// A token the streamer must be allowed to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub token: Address,
    /// Amount the call will pull, in smallest units.
    pub amount: U256,
    /// Allowance currently granted to the spender.
    pub allowance: U256,
}

/// Pairs tokens with amounts and their known allowances.
///
/// Tokens missing from `allowances` count as having none.
pub fn approval_requests(
    tokens: &[Address],
    amounts: &[U256],
    allowances: &HashMap<Address, U256>,
) -> Result<Vec<ApprovalRequest>, ExecutionError> {
    if tokens.len() != amounts.len() {
        return Err(ExecutionError::ApprovalMismatch {
            tokens: tokens.len(),
            amounts: amounts.len(),
        });
    }
    Ok(tokens
        .iter()
        .zip(amounts)
        .map(|(token, amount)| ApprovalRequest {
            token: *token,
            amount: *amount,
            allowance: allowances.get(token).copied().unwrap_or_default(),
        })
        .collect())
}

/// Approve calls needed before `spender` can pull every requested amount.
///
/// Requests for the same token are summed first. The native currency, zero
/// amounts and sufficient allowances need nothing. A non-zero allowance that
/// is too small is reset to zero before approving the maximum, which tokens
/// like USDT require.
pub fn plan_approvals(requests: &[ApprovalRequest], spender: Address) -> Vec<ContractCall> {
    let mut merged: Vec<ApprovalRequest> = Vec::with_capacity(requests.len());
    for request in requests {
        match merged.iter_mut().find(|m| m.token == request.token) {
            Some(existing) => existing.amount = existing.amount.saturating_add(request.amount),
            None => merged.push(*request),
        }
    }

    let mut calls = Vec::new();
    for request in merged {
        if request.token.is_zero() || request.amount.is_zero() {
            continue;
        }
        if request.allowance >= request.amount {
            debug!(token = %request.token, "Allowance already sufficient");
            continue;
        }
        if !request.allowance.is_zero() {
            calls.push(ContractCall::Approve {
                token: request.token,
                spender,
                amount: U256::zero(),
            });
        }
        calls.push(ContractCall::Approve {
            token: request.token,
            spender,
            amount: U256::MAX,
        });
    }

    debug!(approvals = calls.len(), spender = %spender, "Planned approvals");
    calls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn request(token: Address, amount: u64, allowance: u64) -> ApprovalRequest {
        ApprovalRequest {
            token,
            amount: U256::from(amount),
            allowance: U256::from(allowance),
        }
    }

    fn approve(token: Address, amount: U256) -> ContractCall {
        ContractCall::Approve {
            token,
            spender: addr(0xee),
            amount,
        }
    }

    #[test]
    fn test_plan_approvals() {
        let calls = plan_approvals(
            &[
                request(addr(1), 100, 0),
                request(addr(2), 100, 100),
                request(addr(3), 100, 40),
            ],
            addr(0xee),
        );
        assert_eq!(
            calls,
            vec![
                approve(addr(1), U256::MAX),
                approve(addr(3), U256::zero()),
                approve(addr(3), U256::MAX),
            ]
        );
    }

    #[test]
    fn test_plan_approvals_skips_native_and_zero() {
        let calls = plan_approvals(
            &[request(Address::ZERO, 100, 0), request(addr(1), 0, 0)],
            addr(0xee),
        );
        assert!(calls.is_empty());
    }

    #[test]
    fn test_plan_approvals_merges_repeated_tokens() {
        // Reward token equal to a pool token: 60 + 50 exceeds the allowance of 100.
        let calls = plan_approvals(
            &[request(addr(1), 60, 100), request(addr(1), 50, 100)],
            addr(0xee),
        );
        assert_eq!(
            calls,
            vec![approve(addr(1), U256::zero()), approve(addr(1), U256::MAX)]
        );
    }

    #[test]
    fn test_approval_requests() {
        let allowances = HashMap::from([(addr(1), U256::from(5u64))]);
        let requests = approval_requests(
            &[addr(1), addr(2)],
            &[U256::from(10u64), U256::from(20u64)],
            &allowances,
        )
        .unwrap();
        assert_eq!(requests[0], request(addr(1), 10, 5));
        assert_eq!(requests[1], request(addr(2), 20, 0));

        let err = approval_requests(&[addr(1)], &[], &allowances).unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::ApprovalMismatch {
                tokens: 1,
                amounts: 0
            }
        ));
    }
}
