//! End-to-end tests for address → chart resolution.
//!
//! The fixture tests drive `CoinGeckoClient` against a local HTTP server that
//! serves captured CoinGecko payloads, then push the result through the
//! dashboard and the chart host. They need no network.
//!
//! The live tests are `#[ignore]` because they hit the public API, which is
//! rate limited. Set `COINGECKO_API_URL` in `.env` to point them elsewhere.
//!
//! Run with:
//! ```bash
//! cargo test --features native --test coingecko_integration -- --ignored
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use token_candles::domain::asset::wire::CoinListEntry;
use token_candles::domain::ohlc::wire::RawOhlc;
use token_candles::error::{GENERIC_ERROR_MESSAGE, NOT_FOUND_MESSAGE};
use token_candles::prelude::*;

/// USDC on Ethereum, mixed case as users paste it.
const USDC_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

const COINS_LIST: &str = r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "platforms": {}},
    {
        "id": "usd-coin",
        "symbol": "usdc",
        "name": "USDC",
        "platforms": {
            "ethereum": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "solana": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "near-protocol": null
        }
    },
    {
        "id": "bridged-usdc-copy",
        "symbol": "usdc.e",
        "name": "Bridged USDC Copy",
        "platforms": {"ethereum": "0xA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48"}
    },
    {"id": "no-platforms", "symbol": "np", "name": "No Platforms"}
]"#;

/// Out of order, with a duplicated open time and a sub-second twin.
const OHLC: &str = r#"[
    [1709409600000, 1.0002, 1.0011, 0.9994, 1.0003],
    [1709395200000, 0.9998, 1.0006, 0.9991, 1.0002],
    [1709409600000, 9.9, 9.9, 9.9, 9.9],
    [1709424000000, 1.0003, 1.0004, 0.9987, 0.9990],
    [1709424000500, 7.7, 7.7, 7.7, 7.7]
]"#;

const COINS_LIST_TARGET: &str = "/api/v3/coins/list?include_platform=true";
const USDC_OHLC_TARGET: &str = "/api/v3/coins/usd-coin/ohlc?vs_currency=usd&days=30";

fn catalog() -> AssetCatalog {
    let entries: Vec<CoinListEntry> = serde_json::from_str(COINS_LIST).unwrap();
    AssetCatalog::from(entries)
}

fn series() -> OhlcSeries {
    let raw: Vec<RawOhlc> = serde_json::from_str(OHLC).unwrap();
    normalize(raw)
}

// ─── Fixture server ──────────────────────────────────────────────────────────

type Route = (&'static str, u16, &'static str);

/// Serves canned JSON keyed by request target and records every target hit.
struct FixtureServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&head);
                    let target = head.split_whitespace().nth(1).unwrap_or("").to_string();
                    log.lock().unwrap().push(target.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|(t, _, _)| *t == target)
                        .map(|(_, status, body)| (*status, *body))
                        .unwrap_or((404, r#"{"error":"coin not found"}"#));
                    let reason = if status == 200 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/api/v3"),
            requests,
        }
    }

    /// Catalog plus USDC candles.
    async fn healthy() -> Self {
        Self::start(vec![
            (COINS_LIST_TARGET, 200, COINS_LIST),
            (USDC_OHLC_TARGET, 200, OHLC),
        ])
        .await
    }

    fn client(&self) -> CoinGeckoClient {
        CoinGeckoClient::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client should build")
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

// ─── Fixture payloads ────────────────────────────────────────────────────────

#[test]
fn catalog_resolves_mixed_case_address_to_first_listing() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 4);

    let asset = catalog.find(&ContractAddress::new(USDC_ADDRESS)).unwrap();
    assert_eq!(asset.id, AssetId::from("usd-coin"));
    assert_eq!(asset.display_name(), "USDC (USDC)");
    assert!(!asset.platform_addresses.contains_key("near-protocol"));
}

#[test]
fn ohlc_payload_normalizes_to_strictly_increasing_seconds() {
    let series = series();
    let times: Vec<i64> = series.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![1709395200, 1709409600, 1709424000]);

    // First occurrence of each second wins.
    assert_eq!(series.points()[1].close, 1.0003);
    assert_eq!(series.points()[2].close, 0.9990);
}

#[test]
fn renderer_alone_draws_fixture_series() {
    let mut chart = SvgCandlestickChart::new(640);
    chart.set_series(&series());
    let svg = chart.render();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r#"class="wick""#).count(), 3);
}

// ─── Client over HTTP ────────────────────────────────────────────────────────

#[tokio::test]
async fn client_lookup_requests_catalog_then_thirty_day_usd_ohlc() {
    let server = FixtureServer::healthy().await;
    let client = server.client();

    let chart = client.lookup(USDC_ADDRESS).await.expect("lookup should succeed");
    assert_eq!(chart.asset.id, AssetId::from("usd-coin"));
    assert_eq!(chart.banner(), "Token: USDC (USDC)");
    assert_eq!(chart.series, series());

    assert_eq!(server.requests(), vec![COINS_LIST_TARGET, USDC_OHLC_TARGET]);
}

#[tokio::test]
async fn client_reuses_catalog_between_lookups() {
    let server = FixtureServer::healthy().await;
    let client = server.client();

    client.lookup(USDC_ADDRESS).await.unwrap();
    client.lookup(&USDC_ADDRESS.to_lowercase()).await.unwrap();

    let catalog_hits = server
        .requests()
        .iter()
        .filter(|t| *t == COINS_LIST_TARGET)
        .count();
    assert_eq!(catalog_hits, 1);
}

#[tokio::test]
async fn client_catalog_miss_skips_ohlc_request() {
    let server = FixtureServer::healthy().await;
    let client = server.client();

    let err = client
        .lookup("0x0000000000000000000000000000000000000000")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected not found, got: {err}");
    assert_eq!(err.user_message(), NOT_FOUND_MESSAGE);
    assert_eq!(server.requests(), vec![COINS_LIST_TARGET]);
}

#[tokio::test]
async fn client_malformed_ohlc_fails_whole_lookup() {
    let server = FixtureServer::start(vec![
        (COINS_LIST_TARGET, 200, COINS_LIST),
        (USDC_OHLC_TARGET, 200, r#"{"prices": []}"#),
    ])
    .await;

    let err = server.client().lookup(USDC_ADDRESS).await.unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn client_ohlc_server_error_fails_whole_lookup() {
    let server = FixtureServer::start(vec![
        (COINS_LIST_TARGET, 200, COINS_LIST),
        (USDC_OHLC_TARGET, 503, r#"{"error":"busy"}"#),
    ])
    .await;

    let err = server.client().lookup(USDC_ADDRESS).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Http(HttpError::ServerError { status: 503, .. })
    ));
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn client_rate_limited_catalog_is_generic_error() {
    let server = FixtureServer::start(vec![(COINS_LIST_TARGET, 429, "{}")]).await;

    let err = server.client().lookup(USDC_ADDRESS).await.unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::RateLimited { .. })));
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

// ─── Dashboard + chart ───────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_success_banner_and_chart() {
    let server = FixtureServer::healthy().await;
    let client = server.client();
    let mut dashboard = Dashboard::new();
    dashboard.set_address(USDC_ADDRESS);

    let state = dashboard.submit(&client).await.clone();
    assert_eq!(state.banner().as_deref(), Some("Token: USDC (USDC)"));
    assert!(state.error_message().is_none());

    let series = state.visible_series().unwrap();
    let surface = MemorySurface::new(720);
    let viewport = ManualViewport::new();
    let host = ChartHost::mount(
        SvgCandlestickChart::new(0),
        surface.clone(),
        series,
        &viewport,
    );
    assert_eq!(host.width(), 720);
    assert_eq!(
        surface.markup().unwrap().matches(r#"class="candle""#).count(),
        3
    );

    surface.set_width(480);
    viewport.notify_resize();
    assert_eq!(host.width(), 480);

    drop(host);
    assert_eq!(viewport.listener_count(), 0);
    assert!(surface.markup().is_none());
}

#[tokio::test]
async fn dashboard_unknown_address_is_not_found() {
    let server = FixtureServer::healthy().await;
    let mut dashboard = Dashboard::new();
    dashboard.set_address("0x0000000000000000000000000000000000000000");

    let state = dashboard.submit(&server.client()).await;
    assert_eq!(state.error_message(), Some(NOT_FOUND_MESSAGE));
    assert!(state.banner().is_none());
    assert!(state.visible_series().is_none());
}

#[tokio::test]
async fn dashboard_empty_address_is_not_found() {
    let server = FixtureServer::healthy().await;
    let mut dashboard = Dashboard::new();

    let state = dashboard.submit(&server.client()).await;
    assert_eq!(state.error_message(), Some(NOT_FOUND_MESSAGE));
    assert!(state.visible_series().is_none());
    assert!(server.requests().is_empty());
}

// ─── Live API ────────────────────────────────────────────────────────────────

fn live_client() -> CoinGeckoClient {
    dotenvy::dotenv().ok();
    let mut builder = CoinGeckoClient::builder().timeout(Duration::from_secs(20));
    if let Ok(url) = std::env::var("COINGECKO_API_URL") {
        builder = builder.base_url(&url);
    }
    builder.build().expect("client should build")
}

#[tokio::test]
#[ignore]
async fn live_lookup_usdc() {
    let client = live_client();
    let chart = client.lookup(USDC_ADDRESS).await.expect("lookup should succeed");

    assert_eq!(chart.asset.id.as_str(), "usd-coin");
    assert!(!chart.series.is_empty());
    assert!(chart
        .series
        .points()
        .windows(2)
        .all(|w| w[0].time < w[1].time));
}

#[tokio::test]
#[ignore]
async fn live_catalog_is_cached_between_lookups() {
    let client = live_client();
    let first = client.assets().catalog().await.expect("catalog");
    let second = client.assets().catalog().await.expect("catalog");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(first.address_count() > 0);
}

#[tokio::test]
#[ignore]
async fn live_unknown_address_not_found() {
    let client = live_client();
    let err = client
        .lookup("0x000000000000000000000000000000000000dead")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected not found, got: {err}");
}
