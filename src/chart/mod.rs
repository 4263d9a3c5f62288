//! Chart boundary — renderer, drawing surface, resize lifecycle.
//!
//! The pipeline above hands an [`OhlcSeries`] to a [`ChartRenderer`] and never
//! looks inside it. [`ChartHost`] owns one renderer + one [`ChartSurface`] for
//! as long as a series is on screen and tears both down on drop.

pub mod host;
pub mod surface;
pub mod svg;
pub mod viewport;

use crate::domain::ohlc::OhlcSeries;

pub use host::ChartHost;
pub use surface::{ChartSurface, MemorySurface};
pub use svg::SvgCandlestickChart;
pub use viewport::{ListenerGuard, ManualViewport, Viewport};

/// Fixed chart height in pixels.
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// Draws candlesticks for one series at a given width.
pub trait ChartRenderer {
    /// Replace the drawn data. Rebuilds the whole chart.
    fn set_series(&mut self, series: &OhlcSeries);

    /// Change the width. The data is left untouched.
    fn resize(&mut self, width: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Markup for the current series and size.
    fn render(&self) -> String;
}

/// Visual options. Defaults: transparent background, muted grey text,
/// faint violet grid, green up / red down candles without borders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub height: u32,
    pub background: String,
    pub text_color: String,
    pub grid_color: String,
    pub up_color: String,
    pub down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
    pub border_visible: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_CHART_HEIGHT,
            background: "rgba(0, 0, 0, 0)".to_string(),
            text_color: "#9ca3af".to_string(),
            grid_color: "rgba(139, 92, 246, 0.1)".to_string(),
            up_color: "#22c55e".to_string(),
            down_color: "#ef4444".to_string(),
            wick_up_color: "#22c55e".to_string(),
            wick_down_color: "#ef4444".to_string(),
            border_visible: false,
        }
    }
}
