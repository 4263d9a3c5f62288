//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Requests are sent once: no retries.

use crate::domain::asset::wire::CoinListEntry;
use crate::domain::ohlc::wire::RawOhlc;
use crate::error::HttpError;
use crate::shared::{AssetId, OhlcRange};

use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing;

/// Low-level HTTP client for the CoinGecko v3 REST API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    /// The full coin catalog, including per-platform contract addresses.
    ///
    /// Unpaginated: the response holds every listed coin.
    pub async fn get_coins_list(&self) -> Result<Vec<CoinListEntry>, HttpError> {
        self.get(&coins_list_url(&self.base_url)).await
    }

    // ── OHLC ─────────────────────────────────────────────────────────────

    pub async fn get_ohlc(
        &self,
        id: &AssetId,
        vs_currency: &str,
        range: OhlcRange,
    ) -> Result<Vec<RawOhlc>, HttpError> {
        self.get(&ohlc_url(&self.base_url, id, vs_currency, range))
            .await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_secs = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body_text = resp.text().await.unwrap_or_default();

        tracing::debug!(status = status_code, url, "request failed");

        Err(status_error(status_code, body_text, retry_after_secs))
    }
}

fn coins_list_url(base_url: &str) -> String {
    format!("{base_url}/coins/list?include_platform=true")
}

fn ohlc_url(base_url: &str, id: &AssetId, vs_currency: &str, range: OhlcRange) -> String {
    format!(
        "{}/coins/{}/ohlc?vs_currency={}&days={}",
        base_url,
        urlencoding::encode(id.as_str()),
        urlencoding::encode(vs_currency),
        range.as_str()
    )
}

fn map_transport_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}

fn status_error(status: u16, body: String, retry_after_secs: Option<u64>) -> HttpError {
    match status {
        401 | 403 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_secs },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}
