//! Address-indexed asset catalog.
//!
//! The catalog endpoint returns every coin CoinGecko knows about (tens of
//! thousands of entries). Resolving an address by scanning that list on every
//! lookup is linear; the catalog is indexed once into a hash table keyed by
//! contract address instead, and may be reused across lookups for a TTL.

use super::wire::CoinListEntry;
use super::AssetRecord;
use crate::shared::ContractAddress;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// All catalog assets plus a `contract address → asset` index.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Vec<AssetRecord>,
    by_address: HashMap<ContractAddress, usize>,
}

impl AssetCatalog {
    /// Index assets by every contract address they list.
    ///
    /// When two assets list the same address the one earlier in the catalog
    /// wins, which is what a front-to-back scan would return.
    pub fn from_records(assets: Vec<AssetRecord>) -> Self {
        let mut by_address = HashMap::new();
        for (idx, asset) in assets.iter().enumerate() {
            for address in asset.platform_addresses.values() {
                by_address.entry(address.clone()).or_insert(idx);
            }
        }
        Self { assets, by_address }
    }

    pub fn find(&self, address: &ContractAddress) -> Option<&AssetRecord> {
        self.by_address
            .get(address)
            .and_then(|idx| self.assets.get(*idx))
    }

    /// Number of assets (not addresses).
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Number of distinct indexed addresses.
    pub fn address_count(&self) -> usize {
        self.by_address.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord> {
        self.assets.iter()
    }
}

impl From<Vec<CoinListEntry>> for AssetCatalog {
    fn from(entries: Vec<CoinListEntry>) -> Self {
        Self::from_records(entries.into_iter().map(AssetRecord::from).collect())
    }
}

/// A catalog together with the moment it was downloaded.
#[derive(Debug, Clone)]
pub(crate) struct CachedCatalog {
    pub(crate) catalog: Arc<AssetCatalog>,
    pub(crate) fetched_at: DateTime<Utc>,
}

impl CachedCatalog {
    pub(crate) fn new(catalog: AssetCatalog, fetched_at: DateTime<Utc>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            fetched_at,
        }
    }

    /// A zero TTL is never fresh. A clock that moved backwards counts as stale.
    pub(crate) fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(elapsed) => elapsed < ttl,
            Err(_) => false,
        }
    }
}
