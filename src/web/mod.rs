//! Browser front-end — mounts the dashboard into a DOM container.
//!
//! ```js
//! import init, { mountDashboard } from "./pkg/token_candles.js";
//! await init();
//! mountDashboard("app");
//! ```

pub mod app;
pub mod dom;

use crate::client::CoinGeckoClient;
use wasm_bindgen::prelude::*;

pub use dom::{ElementSurface, WindowViewport};

/// Mount the dashboard into `#container_id`, optionally against another
/// CoinGecko-compatible base URL.
#[wasm_bindgen(js_name = mountDashboard)]
pub fn mount_dashboard(container_id: &str, api_url: Option<String>) -> Result<(), JsValue> {
    let mut builder = CoinGeckoClient::builder();
    if let Some(url) = api_url.as_deref() {
        builder = builder.base_url(url);
    }
    let client = builder
        .build()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    app::mount(container_id, client)
}

/// Tear the dashboard down: abort the in-flight lookup, drop the chart and
/// its resize listener, remove the DOM nodes.
#[wasm_bindgen(js_name = unmountDashboard)]
pub fn unmount_dashboard() {
    app::unmount();
}
