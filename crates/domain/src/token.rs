use crate::error::ValidationError;
use primitive_types::H160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account or contract address.
///
/// Ordering compares the raw bytes, which matches comparing the lowercase
/// hex strings of two addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub H160);

impl Address {
    /// The zero address, used for the native currency.
    pub const ZERO: Address = Address(H160([0u8; 20]));

    /// Creates an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAddress(s.to_string());
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if hex.len() != 40 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 20];
        for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
            let hi = (pair[0] as char).to_digit(16).ok_or_else(invalid)?;
            let lo = (pair[1] as char).to_digit(16).ok_or_else(invalid)?;
            bytes[i] = (hi * 16 + lo) as u8;
        }
        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Token metadata as supplied by the token registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub name: Option<String>,
}

impl TokenDescriptor {
    pub fn new(address: Address, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
            name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for TokenDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) decimals={}", self.symbol, self.address, self.decimals)
    }
}

/// A token pair in pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedTokens {
    pub currency0: TokenDescriptor,
    pub currency1: TokenDescriptor,
    /// True when the caller's second token became `currency0`.
    pub swapped: bool,
}

/// Orders two tokens so that `currency0 < currency1`.
///
/// `swapped` is true iff `token_a`'s address sorts after `token_b`'s.
pub fn sort_tokens(token_a: &TokenDescriptor, token_b: &TokenDescriptor) -> SortedTokens {
    let swapped = token_a.address > token_b.address;
    let (currency0, currency1) = if swapped {
        (token_b.clone(), token_a.clone())
    } else {
        (token_a.clone(), token_b.clone())
    };
    SortedTokens {
        currency0,
        currency1,
        swapped,
    }
}
