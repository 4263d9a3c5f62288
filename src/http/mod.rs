//! HTTP client layer — `CoinGeckoHttp`, one method per endpoint.

pub mod client;

pub use client::CoinGeckoHttp;
