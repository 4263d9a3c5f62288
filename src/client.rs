//! High-level client — `CoinGeckoClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and the composed
//! address → chart lookup.

use crate::dashboard::MarketData;
use crate::domain::asset::catalog::CachedCatalog;
use crate::domain::asset::client::Assets;
use crate::domain::ohlc::client::Ohlc;
use crate::domain::TokenChart;
use crate::error::SdkError;
use crate::http::CoinGeckoHttp;
use crate::shared::OhlcRange;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::ohlc::client::Ohlc as OhlcClient;

/// The primary entry point: resolves contract addresses and fetches candles.
///
/// Cheap to clone; clones share the catalog cache.
#[derive(Clone)]
pub struct CoinGeckoClient {
    pub(crate) http: CoinGeckoHttp,
    pub(crate) vs_currency: String,
    pub(crate) range: OhlcRange,
    /// Last downloaded catalog index + download time.
    pub(crate) catalog_cache: Arc<RwLock<Option<CachedCatalog>>>,
    pub(crate) catalog_ttl: Duration,
}

impl CoinGeckoClient {
    pub fn builder() -> CoinGeckoClientBuilder {
        CoinGeckoClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn ohlc(&self) -> Ohlc<'_> {
        Ohlc { client: self }
    }

    // ── Composed lookup ──────────────────────────────────────────────────

    /// Resolve `address` to its asset, then fetch that asset's candles for
    /// the configured range.
    ///
    /// The two calls run in sequence; a failure in either aborts the lookup.
    pub async fn lookup(&self, address: &str) -> Result<TokenChart, SdkError> {
        let asset = self.assets().find_by_address(address).await?;
        let series = self.ohlc().get(&asset.id, self.range).await?;
        Ok(TokenChart { asset, series })
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    pub fn range(&self) -> OhlcRange {
        self.range
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl MarketData for CoinGeckoClient {
    async fn lookup(&self, address: &str) -> Result<TokenChart, SdkError> {
        CoinGeckoClient::lookup(self, address).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinGeckoClientBuilder {
    base_url: String,
    vs_currency: String,
    range: OhlcRange,
    catalog_ttl: Duration,
    timeout: Duration,
}

impl Default for CoinGeckoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            vs_currency: crate::network::DEFAULT_VS_CURRENCY.to_string(),
            range: OhlcRange::default(),
            catalog_ttl: crate::network::DEFAULT_CATALOG_TTL,
            timeout: crate::network::DEFAULT_TIMEOUT,
        }
    }
}

impl CoinGeckoClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.to_lowercase();
        self
    }

    pub fn range(mut self, range: OhlcRange) -> Self {
        self.range = range;
        self
    }

    /// How long a downloaded catalog may serve lookups. `Duration::ZERO`
    /// downloads it on every lookup.
    pub fn catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    /// Per-request timeout. Ignored on WASM.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CoinGeckoClient, SdkError> {
        if self.vs_currency.is_empty() {
            return Err(SdkError::Validation("vs_currency must not be empty".into()));
        }

        Ok(CoinGeckoClient {
            http: CoinGeckoHttp::new(&self.base_url, self.timeout)?,
            vs_currency: self.vs_currency,
            range: self.range,
            catalog_cache: Arc::new(RwLock::new(None)),
            catalog_ttl: self.catalog_ttl,
        })
    }
}
