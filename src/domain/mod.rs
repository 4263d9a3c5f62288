//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching CoinGecko responses
//! - `client.rs` — Sub-client with HTTP methods (and caching, for assets)
//!
//! plus slice-specific pieces (`catalog.rs`, `normalize.rs`).

pub mod asset;
pub mod ohlc;

use serde::{Deserialize, Serialize};

use asset::AssetRecord;
use ohlc::OhlcSeries;

/// Result of one successful lookup: the resolved asset and its candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenChart {
    pub asset: AssetRecord,
    pub series: OhlcSeries,
}

impl TokenChart {
    /// `"Token: Name (SYMBOL)"`.
    pub fn banner(&self) -> String {
        format!("Token: {}", self.asset.display_name())
    }
}
