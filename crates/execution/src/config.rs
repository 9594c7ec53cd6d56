//! Execution settings.

use std::time::Duration;
use streams_domain::builder::config::{ConfigError, env_var};
use streams_domain::token::Address;

/// Streamer contract on Sepolia, the spender of every approval.
pub const STREAMER_ADDRESS: Address = Address::from_bytes([
    0x08, 0x44, 0x0b, 0x61, 0x18, 0x72, 0x14, 0x14, 0xfc, 0x35, 0x61, 0x6d, 0xa4, 0x52, 0x51, 0xf1,
    0x2e, 0x63, 0x4f, 0xa4,
]);

/// Configuration for submitting batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Streamer contract address.
    pub streamer: Address,
    /// Delay between batch status polls.
    pub poll_interval: Duration,
    /// Polls before giving up on a pending batch.
    pub max_polls: u32,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            streamer: STREAMER_ADDRESS,
            poll_interval: Duration::from_secs(2),
            max_polls: 90, // 3 minutes
        }
    }
}

impl ExecutionConfig {
    /// Defaults overridden by `STREAMS_STREAMER_ADDRESS`, `STREAMS_POLL_INTERVAL_MS`
    /// and `STREAMS_MAX_POLLS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            streamer: env_var("STREAMS_STREAMER_ADDRESS")?.unwrap_or(defaults.streamer),
            poll_interval: env_var::<u64>("STREAMS_POLL_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            max_polls: env_var("STREAMS_MAX_POLLS")?.unwrap_or(defaults.max_polls),
        })
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }
}
