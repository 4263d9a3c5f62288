//! Assets sub-client — catalog download, address lookup, catalog cache.

use super::catalog::{AssetCatalog, CachedCatalog};
use super::AssetRecord;
use crate::client::CoinGeckoClient;
use crate::error::{LookupError, SdkError};
use crate::shared::ContractAddress;
use chrono::Utc;
use std::sync::Arc;

/// Sub-client for catalog operations.
pub struct Assets<'a> {
    pub(crate) client: &'a CoinGeckoClient,
}

impl<'a> Assets<'a> {
    /// The address-indexed catalog. Reuses the last download while it is
    /// younger than the configured TTL.
    pub async fn catalog(&self) -> Result<Arc<AssetCatalog>, SdkError> {
        let ttl = self.client.catalog_ttl;
        {
            let cache = self.client.catalog_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_fresh(ttl, Utc::now()) {
                    return Ok(cached.catalog.clone());
                }
            }
        }

        let entries = self.client.http.get_coins_list().await?;
        let cached = CachedCatalog::new(AssetCatalog::from(entries), Utc::now());
        tracing::info!(
            assets = cached.catalog.len(),
            addresses = cached.catalog.address_count(),
            "Indexed asset catalog"
        );

        let catalog = cached.catalog.clone();
        *self.client.catalog_cache.write().await = Some(cached);
        Ok(catalog)
    }

    /// Resolve a contract address (any case) to the asset deployed at it.
    pub async fn find_by_address(&self, address: &str) -> Result<AssetRecord, SdkError> {
        let address = ContractAddress::new(address);
        // Empty addresses are never indexed, so nothing can match.
        if address.is_empty() {
            tracing::warn!("Empty contract address");
            return Err(LookupError::NotFound(address.to_string()).into());
        }

        let catalog = self.catalog().await?;
        match catalog.find(&address) {
            Some(asset) => {
                tracing::info!(id = %asset.id, %address, "Resolved contract address");
                Ok(asset.clone())
            }
            None => {
                tracing::warn!(%address, "No asset for contract address");
                Err(LookupError::NotFound(address.to_string()).into())
            }
        }
    }

    /// Drop the cached catalog so the next lookup downloads it again.
    pub async fn clear_cache(&self) {
        *self.client.catalog_cache.write().await = None;
    }
}
