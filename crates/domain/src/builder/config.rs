use crate::token::Address;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Streamer hook deployed on Sepolia.
pub const STREAMER_HOOK_ADDRESS: Address = Address::from_bytes([
    0xdf, 0x12, 0x8f, 0x75, 0x82, 0x2b, 0x36, 0xfb, 0xca, 0x98, 0xc3, 0x02, 0xb7, 0x01, 0x1a, 0x40,
    0xcf, 0x6c, 0xc5, 0x00,
]);

/// Spread in ticks applied on each side of the current tick.
pub const DEFAULT_BASE_SPREAD: i32 = 3000;

/// Submission window added to the current time to form the deadline.
pub const DEFAULT_DEADLINE_WINDOW_SECS: u64 = 1800;

/// Environment configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparsable value.
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar {
        /// Variable name.
        name: String,
        /// Raw value.
        value: String,
    },
}

/// Reads and parses an optional environment variable.
pub fn env_var<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration for the campaign parameter builder.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    /// Spread in ticks before alignment to the pool's tick spacing.
    ///
    /// The same value is used for every fee tier.
    pub base_spread: i32,
    /// USD value of one reward token when deriving the liquidity goal.
    ///
    /// The reward amount numeral doubles as the USD goal, so this is 1.
    pub usd_per_reward_token: Decimal,
    /// Seconds between now and the transaction deadline.
    pub deadline_window_secs: u64,
    /// Hooks contract of the campaign pool.
    pub hooks: Address,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            base_spread: DEFAULT_BASE_SPREAD,
            usd_per_reward_token: Decimal::ONE,
            deadline_window_secs: DEFAULT_DEADLINE_WINDOW_SECS,
            hooks: STREAMER_HOOK_ADDRESS,
        }
    }
}

impl BuilderConfig {
    /// Defaults overridden by `STREAMS_BASE_SPREAD`, `STREAMS_USD_PER_REWARD_TOKEN`,
    /// `STREAMS_DEADLINE_WINDOW_SECS` and `STREAMS_HOOKS_ADDRESS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            base_spread: env_var("STREAMS_BASE_SPREAD")?.unwrap_or(defaults.base_spread),
            usd_per_reward_token: env_var("STREAMS_USD_PER_REWARD_TOKEN")?
                .unwrap_or(defaults.usd_per_reward_token),
            deadline_window_secs: env_var("STREAMS_DEADLINE_WINDOW_SECS")?
                .unwrap_or(defaults.deadline_window_secs),
            hooks: env_var("STREAMS_HOOKS_ADDRESS")?.unwrap_or(defaults.hooks),
        })
    }

    #[must_use]
    pub fn with_base_spread(mut self, base_spread: i32) -> Self {
        self.base_spread = base_spread;
        self
    }

    #[must_use]
    pub fn with_usd_per_reward_token(mut self, usd_per_reward_token: Decimal) -> Self {
        self.usd_per_reward_token = usd_per_reward_token;
        self
    }
}
