//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format CoinGecko sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for CoinGecko coin identifiers (e.g. `"usd-coin"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── ContractAddress ─────────────────────────────────────────────────────────

/// A token contract address in lookup form (lower-cased).
///
/// Matching is case-insensitive but otherwise exact: surrounding whitespace
/// is kept, so `" 0xabc"` does not match `"0xabc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(s: &str) -> Self {
        Self(s.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContractAddress {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl Serialize for ContractAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ContractAddress::new(&s))
    }
}

// ─── OhlcRange ───────────────────────────────────────────────────────────────

/// Look-back window accepted by the `/coins/{id}/ohlc?days=` parameter.
///
/// CoinGecko picks the candle width from the window: 30 minutes up to two
/// days, 4 hours up to 30 days, 4 days beyond that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OhlcRange {
    #[serde(rename = "1")]
    Day1,
    #[serde(rename = "7")]
    Day7,
    #[serde(rename = "14")]
    Day14,
    #[default]
    #[serde(rename = "30")]
    Day30,
    #[serde(rename = "90")]
    Day90,
    #[serde(rename = "180")]
    Day180,
    #[serde(rename = "365")]
    Day365,
    #[serde(rename = "max")]
    Max,
}

impl OhlcRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Day7 => "7",
            Self::Day14 => "14",
            Self::Day30 => "30",
            Self::Day90 => "90",
            Self::Day180 => "180",
            Self::Day365 => "365",
            Self::Max => "max",
        }
    }

    /// Number of days covered, `None` for [`OhlcRange::Max`].
    pub fn days(&self) -> Option<u32> {
        match self {
            Self::Day1 => Some(1),
            Self::Day7 => Some(7),
            Self::Day14 => Some(14),
            Self::Day30 => Some(30),
            Self::Day90 => Some(90),
            Self::Day180 => Some(180),
            Self::Day365 => Some(365),
            Self::Max => None,
        }
    }
}

impl std::fmt::Display for OhlcRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OhlcRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::Day1),
            "7" => Ok(Self::Day7),
            "14" => Ok(Self::Day14),
            "30" => Ok(Self::Day30),
            "90" => Ok(Self::Day90),
            "180" => Ok(Self::Day180),
            "365" => Ok(Self::Day365),
            "max" => Ok(Self::Max),
            other => Err(format!("unsupported OHLC range: {other}")),
        }
    }
}
