//! Submission of campaign and add-liquidity batches.

use crate::approvals::{approval_requests, plan_approvals};
use crate::config::ExecutionConfig;
use crate::error::ExecutionError;
use crate::gateway::{BatchId, BatchStatus, ChainGateway, ContractCall};
use crate::status::{TxEvent, TxStatus, TxTracker};
use primitive_types::U256;
use std::collections::HashMap;
use std::sync::Arc;
use streams_domain::add_liquidity::{AddLiquidityConfig, build_add_liquidity_params};
use streams_domain::builder::{CampaignInput, CampaignParamsBuilder};
use streams_domain::clock::{Clock, SystemClock};
use streams_domain::math::amount::parse_units;
use streams_domain::pool::PoolKey;
use streams_domain::token::Address;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// What a confirmed batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub batch_id: BatchId,
    /// Hash of the last transaction in the batch.
    pub tx_hash: Option<String>,
    /// Id of the created campaign, when the counter could be read.
    pub campaign_id: Option<U256>,
}

/// A request to add liquidity to an existing campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityRequest {
    pub campaign_id: U256,
    pub pool: PoolKey,
    pub amount0: String,
    pub amount1: String,
    pub decimals0: u8,
    pub decimals1: u8,
}

/// Drives a submission from allowance checks to a confirmed batch.
pub struct CampaignSubmitter<G: ChainGateway> {
    gateway: Arc<G>,
    config: ExecutionConfig,
    builder: CampaignParamsBuilder,
    add_liquidity: AddLiquidityConfig,
    clock: Arc<dyn Clock>,
    account: Option<Address>,
    tracker: Arc<RwLock<TxTracker>>,
}

impl<G: ChainGateway> CampaignSubmitter<G> {
    /// Creates a submitter with default builder settings and no account.
    pub fn new(gateway: Arc<G>, config: ExecutionConfig) -> Self {
        Self {
            gateway,
            config,
            builder: CampaignParamsBuilder::default(),
            add_liquidity: AddLiquidityConfig::default(),
            clock: Arc::new(SystemClock),
            account: None,
            tracker: Arc::new(RwLock::new(TxTracker::new())),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: CampaignParamsBuilder) -> Self {
        self.builder = builder.with_clock(self.clock.clone());
        self
    }

    #[must_use]
    pub fn with_add_liquidity_config(mut self, config: AddLiquidityConfig) -> Self {
        self.add_liquidity = config;
        self
    }

    /// Sets the clock used for every deadline.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.builder = self.builder.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    /// Sets the connected account that signs and owns positions.
    #[must_use]
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    /// Shared handle to the status tracker.
    pub fn tracker(&self) -> Arc<RwLock<TxTracker>> {
        self.tracker.clone()
    }

    pub async fn status(&self) -> TxStatus {
        self.tracker.read().await.status()
    }

    /// Returns the tracker to idle so another submission can start.
    pub async fn reset(&self) -> Result<(), ExecutionError> {
        self.tracker.write().await.apply(TxEvent::Reset)?;
        Ok(())
    }

    /// Creates a campaign: approvals for both deposits and the budget, then
    /// `createCampaign`, in one batch.
    pub async fn create_campaign(
        &self,
        input: &CampaignInput,
    ) -> Result<SubmissionOutcome, ExecutionError> {
        let owner = self.account.ok_or(ExecutionError::WalletNotConnected)?;
        self.transition(TxEvent::Prepare).await?;

        let prepared = self.prepare_campaign(owner, input).await;
        let calls = self.abort_on_error(prepared).await?;
        let outcome = self.send_and_confirm(calls).await?;

        let campaign_id = match self.gateway.campaign_counter().await {
            Ok(counter) => Some(counter),
            Err(e) => {
                warn!(error = %e, "Failed to read campaign counter");
                None
            }
        };
        Ok(SubmissionOutcome {
            campaign_id,
            ..outcome
        })
    }

    /// Adds liquidity to an existing campaign.
    pub async fn add_liquidity(
        &self,
        request: &AddLiquidityRequest,
    ) -> Result<SubmissionOutcome, ExecutionError> {
        let owner = self.account.ok_or(ExecutionError::WalletNotConnected)?;
        self.transition(TxEvent::Prepare).await?;

        let prepared = self.prepare_add_liquidity(owner, request).await;
        let calls = self.abort_on_error(prepared).await?;
        self.send_and_confirm(calls).await
    }

    async fn prepare_campaign(
        &self,
        owner: Address,
        input: &CampaignInput,
    ) -> Result<Vec<ContractCall>, ExecutionError> {
        let tokens = [
            input.token0.address,
            input.token1.address,
            input.reward_token.address,
        ];
        let amounts = [
            parse_units(&input.amount0, input.token0.decimals)?,
            parse_units(&input.amount1, input.token1.decimals)?,
            parse_units(&input.reward_amount, input.reward_token.decimals)?,
        ];

        let allowances = self.read_allowances(owner, &tokens).await;
        let requests = approval_requests(&tokens, &amounts, &allowances)?;
        let mut calls = plan_approvals(&requests, self.config.streamer);

        let params = self.builder.build(input)?;
        calls.push(ContractCall::CreateCampaign(Box::new(params)));
        Ok(calls)
    }

    async fn prepare_add_liquidity(
        &self,
        owner: Address,
        request: &AddLiquidityRequest,
    ) -> Result<Vec<ContractCall>, ExecutionError> {
        let params = build_add_liquidity_params(
            &self.add_liquidity,
            request.campaign_id,
            &request.pool,
            &request.amount0,
            &request.amount1,
            request.decimals0,
            request.decimals1,
            self.clock.now_unix(),
        )?;

        let tokens = [request.pool.currency0, request.pool.currency1];
        let amounts = [params.amount0_max, params.amount1_max];
        let allowances = self.read_allowances(owner, &tokens).await;
        let requests = approval_requests(&tokens, &amounts, &allowances)?;

        let mut calls = plan_approvals(&requests, self.config.streamer);
        calls.push(ContractCall::AddLiquidity(params));
        Ok(calls)
    }

    /// Reads allowances towards the streamer. A failed read counts as zero.
    async fn read_allowances(&self, owner: Address, tokens: &[Address]) -> HashMap<Address, U256> {
        let mut allowances = HashMap::with_capacity(tokens.len());
        for token in tokens {
            if allowances.contains_key(token) || token.is_zero() {
                continue;
            }
            let allowance = match self
                .gateway
                .allowance(owner, *token, self.config.streamer)
                .await
            {
                Ok(allowance) => allowance,
                Err(e) => {
                    warn!(token = %token, error = %e, "Failed to fetch allowance");
                    U256::zero()
                }
            };
            allowances.insert(*token, allowance);
        }
        allowances
    }

    async fn send_and_confirm(
        &self,
        calls: Vec<ContractCall>,
    ) -> Result<SubmissionOutcome, ExecutionError> {
        self.transition(TxEvent::RequestSignature).await?;
        info!(
            calls = calls.len(),
            functions = ?calls.iter().map(ContractCall::function_name).collect::<Vec<_>>(),
            "Sending batch"
        );

        let sent = self.gateway.send_calls(calls).await;
        let batch_id = self.abort_on_error(sent).await?;
        self.transition(TxEvent::Submitted {
            batch_id: batch_id.clone(),
        })
        .await?;

        self.poll(batch_id).await
    }

    async fn poll(&self, batch_id: BatchId) -> Result<SubmissionOutcome, ExecutionError> {
        for attempt in 1..=self.config.max_polls {
            tokio::time::sleep(self.config.poll_interval).await;

            let report = match self.gateway.calls_status(&batch_id).await {
                Ok(report) => report,
                Err(e) => {
                    warn!(batch_id = %batch_id, attempt, error = %e, "Status poll failed");
                    continue;
                }
            };
            debug!(batch_id = %batch_id, attempt, status = ?report.status, "Polled batch");

            let mut tracker = self.tracker.write().await;
            tracker.apply_report(&report)?;
            match report.status {
                BatchStatus::Pending => {}
                BatchStatus::Success => {
                    info!(batch_id = %batch_id, tx_hash = ?tracker.tx_hash(), "Batch confirmed");
                    return Ok(SubmissionOutcome {
                        batch_id,
                        tx_hash: tracker.tx_hash().map(str::to_string),
                        campaign_id: None,
                    });
                }
                BatchStatus::Failure => {
                    warn!(batch_id = %batch_id, "Batch failed");
                    return Err(ExecutionError::BatchFailed(batch_id));
                }
            }
        }

        Err(ExecutionError::PollLimitReached {
            batch_id,
            polls: self.config.max_polls,
        })
    }

    async fn transition(&self, event: TxEvent) -> Result<TxStatus, ExecutionError> {
        self.tracker.write().await.apply(event)
    }

    /// Marks the submission failed when `result` is an error.
    async fn abort_on_error<T>(
        &self,
        result: Result<T, ExecutionError>,
    ) -> Result<T, ExecutionError> {
        if let Err(e) = &result {
            self.transition(TxEvent::Rejected(e.to_string())).await?;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;
    use std::time::Duration;
    use streams_domain::clock::FixedClock;
    use streams_domain::error::ValidationError;
    use streams_domain::fees::FeeTier;
    use streams_domain::token::TokenDescriptor;

    const OWNER: Address = Address::from_bytes([0x44; 20]);

    fn token(byte: u8, decimals: u8, symbol: &str) -> TokenDescriptor {
        TokenDescriptor::new(Address::from_bytes([byte; 20]), decimals, symbol)
    }

    fn input() -> CampaignInput {
        CampaignInput {
            token0: token(0x22, 6, "USDC"),
            token1: token(0x11, 18, "WETH"),
            fee_tier: FeeTier::new(3000, 60),
            initial_price_hint: String::new(),
            amount0: "1000".into(),
            amount1: "1000".into(),
            reward_token: token(0x33, 18, "STRM"),
            reward_amount: "500".into(),
            duration_days: 7,
            recipient: OWNER,
        }
    }

    fn fast_config() -> ExecutionConfig {
        ExecutionConfig::default()
            .with_poll_interval(Duration::from_millis(1))
            .with_max_polls(5)
    }

    fn submitter(gateway: Arc<InMemoryGateway>) -> CampaignSubmitter<InMemoryGateway> {
        CampaignSubmitter::new(gateway, fast_config())
            .with_clock(Arc::new(FixedClock(1_000)))
            .with_account(OWNER)
    }

    #[tokio::test]
    async fn test_create_campaign_batch() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        gateway.script_statuses([BatchStatus::Pending]).await;
        let submitter = submitter(gateway.clone());

        let outcome = submitter.create_campaign(&input()).await.unwrap();
        assert_eq!(outcome.campaign_id, Some(U256::one()));
        assert!(outcome.tx_hash.is_some());
        assert_eq!(submitter.status().await, TxStatus::Success);

        let batches = gateway.sent_batches().await;
        assert_eq!(batches.len(), 1);
        let names: Vec<_> = batches[0].iter().map(ContractCall::function_name).collect();
        assert_eq!(names, ["approve", "approve", "approve", "createCampaign"]);
        match &batches[0][3] {
            ContractCall::CreateCampaign(params) => {
                assert_eq!(params.deadline, 2_800);
                // Sorted into pool order.
                assert_eq!(params.pool.currency0, Address::from_bytes([0x11; 20]));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_existing_allowances_skip_approvals() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        let streamer = ExecutionConfig::default().streamer;
        for byte in [0x11, 0x22, 0x33] {
            gateway
                .set_allowance(OWNER, Address::from_bytes([byte; 20]), streamer, U256::MAX)
                .await;
        }
        let submitter = submitter(gateway.clone());
        submitter.create_campaign(&input()).await.unwrap();

        let batches = gateway.sent_batches().await;
        assert_eq!(batches[0].len(), 1);
    }

    #[tokio::test]
    async fn test_failed_allowance_read_counts_as_zero() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        let streamer = ExecutionConfig::default().streamer;
        let reward = Address::from_bytes([0x33; 20]);
        gateway.set_allowance(OWNER, reward, streamer, U256::MAX).await;
        gateway.fail_allowance(reward).await;

        submitter(gateway.clone()).create_campaign(&input()).await.unwrap();
        let batches = gateway.sent_batches().await;
        assert_eq!(batches[0].len(), 4);
    }

    #[tokio::test]
    async fn test_validation_error_sends_nothing() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        let submitter = submitter(gateway.clone());
        let mut bad = input();
        bad.amount1 = "abc".into();

        let err = submitter.create_campaign(&bad).await.unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::Validation(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(submitter.status().await, TxStatus::Failed);
        assert!(gateway.sent_batches().await.is_empty());

        // A new attempt needs a reset first.
        assert!(matches!(
            submitter.create_campaign(&input()).await,
            Err(ExecutionError::InvalidTransition { .. })
        ));
        submitter.reset().await.unwrap();
        submitter.create_campaign(&input()).await.unwrap();
    }

    #[tokio::test]
    async fn test_wallet_not_connected() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        let submitter = CampaignSubmitter::new(gateway, fast_config());
        assert!(matches!(
            submitter.create_campaign(&input()).await,
            Err(ExecutionError::WalletNotConnected)
        ));
        assert_eq!(submitter.status().await, TxStatus::Idle);
    }

    #[tokio::test]
    async fn test_rejected_signature() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        gateway.reject_sends("User rejected the request").await;
        let submitter = submitter(gateway);

        let err = submitter.create_campaign(&input()).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Gateway(_)));
        let tracker = submitter.tracker();
        let tracker = tracker.read().await;
        assert_eq!(tracker.status(), TxStatus::Failed);
        assert_eq!(tracker.error(), Some("gateway error: User rejected the request"));
    }

    #[tokio::test]
    async fn test_batch_failure_and_poll_limit() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        gateway.script_statuses([BatchStatus::Failure]).await;
        let submitter = submitter(gateway.clone());
        assert!(matches!(
            submitter.create_campaign(&input()).await,
            Err(ExecutionError::BatchFailed(_))
        ));
        assert_eq!(submitter.status().await, TxStatus::Failed);

        gateway.script_statuses([BatchStatus::Pending; 5]).await;
        submitter.reset().await.unwrap();
        assert!(matches!(
            submitter.create_campaign(&input()).await,
            Err(ExecutionError::PollLimitReached { polls: 5, .. })
        ));
        assert_eq!(submitter.status().await, TxStatus::Pending);
    }

    #[tokio::test]
    async fn test_add_liquidity_batch() {
        let gateway = Arc::new(InMemoryGateway::new(OWNER));
        let submitter = submitter(gateway.clone());
        let request = AddLiquidityRequest {
            campaign_id: U256::from(3u64),
            pool: PoolKey {
                currency0: Address::from_bytes([0x11; 20]),
                currency1: Address::from_bytes([0x22; 20]),
                fee: 3000,
                tick_spacing: 60,
                hooks: Address::ZERO,
            },
            amount0: "1000".into(),
            amount1: "2000".into(),
            decimals0: 0,
            decimals1: 0,
        };

        let outcome = submitter.add_liquidity(&request).await.unwrap();
        assert_eq!(outcome.campaign_id, None);

        let batches = gateway.sent_batches().await;
        match batches[0].last() {
            Some(ContractCall::AddLiquidity(params)) => {
                assert_eq!(params.campaign_id, U256::from(3u64));
                assert_eq!(params.deadline, 4_600);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
