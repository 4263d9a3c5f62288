//! Wire types for the coin catalog (REST).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of `GET /coins/list?include_platform=true`.
///
/// `platforms` maps platform name → contract address. CoinGecko sends
/// `null` or `""` for assets without a contract on a platform, and
/// `{}` for native coins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub platforms: BTreeMap<String, Option<String>>,
}
