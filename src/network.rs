//! Network URL constants and request defaults for the CoinGecko API.

use std::time::Duration;

/// Default REST API base URL (public, unauthenticated tier).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Fiat currency the OHLC series is denominated in.
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// How long a downloaded catalog index may be reused for address lookups.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(300);

/// Request timeout (native only; the browser owns timeouts on WASM).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
