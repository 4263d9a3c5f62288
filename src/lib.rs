//! # token-candles
//!
//! Resolve a token contract address to a CoinGecko asset, fetch its OHLC
//! history and draw it as a candlestick chart. Runs natively and in the
//! browser (WASM).
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, domain models, the OHLC normalizer (always available, WASM-safe)
//! 2. **HTTP API** — `CoinGeckoHttp`, one method per endpoint
//! 3. **High-Level Client** — `CoinGeckoClient` with sub-clients and the catalog index cache
//! 4. **Dashboard** — single-value UI state with request generations
//! 5. **Chart** — renderer / surface / viewport boundary and the SVG renderer
//! 6. **Web** — DOM front-end (`web` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use token_candles::prelude::*;
//!
//! let client = CoinGeckoClient::builder().build()?;
//!
//! let chart = client.lookup("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").await?;
//! println!("{}", chart.banner()); // Token: USDC (USDC)
//!
//! let mut svg = SvgCandlestickChart::new(800);
//! svg.set_series(&chart.series);
//! let markup = svg.render();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and request defaults.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the CoinGecko endpoints.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinGeckoClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Dashboard ───────────────────────────────────────────────────────

/// Dashboard state machine and request generations.
pub mod dashboard;

// ── Layer 5: Chart ───────────────────────────────────────────────────────────

/// Charting boundary and the bundled SVG renderer.
pub mod chart;

// ── Layer 6: Web ─────────────────────────────────────────────────────────────

/// Browser front-end mounted into a DOM container.
#[cfg(feature = "web")]
pub mod web;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, ContractAddress, OhlcRange};

    // Domain types
    pub use crate::domain::asset::{AssetCatalog, AssetRecord};
    pub use crate::domain::ohlc::{normalize, OhlcPoint, OhlcSeries};
    pub use crate::domain::TokenChart;

    // Errors
    pub use crate::error::{HttpError, LookupError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AssetsClient, CoinGeckoClient, CoinGeckoClientBuilder, OhlcClient};

    // Dashboard
    pub use crate::dashboard::{Dashboard, DashboardState, MarketData, RequestTicket};

    // Chart
    pub use crate::chart::{
        ChartHost, ChartOptions, ChartRenderer, ChartSurface, ManualViewport, MemorySurface,
        SvgCandlestickChart, Viewport,
    };

    // Web
    #[cfg(feature = "web")]
    pub use crate::web::{mount_dashboard, unmount_dashboard};
}
