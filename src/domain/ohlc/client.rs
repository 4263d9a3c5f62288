//! OHLC sub-client — candle history queries.

use super::{normalize, OhlcSeries};
use crate::client::CoinGeckoClient;
use crate::error::SdkError;
use crate::shared::{AssetId, OhlcRange};

/// Sub-client for OHLC history.
pub struct Ohlc<'a> {
    pub(crate) client: &'a CoinGeckoClient,
}

impl<'a> Ohlc<'a> {
    /// Normalized candles for `id` over `range`, in the client's fiat currency.
    pub async fn get(&self, id: &AssetId, range: OhlcRange) -> Result<OhlcSeries, SdkError> {
        let raw = self
            .client
            .http
            .get_ohlc(id, &self.client.vs_currency, range)
            .await?;
        let received = raw.len();
        let series = normalize(raw);
        tracing::info!(
            %id,
            %range,
            received,
            kept = series.len(),
            "Fetched OHLC history"
        );
        Ok(series)
    }
}
