//! SVG candlestick renderer.
//!
//! Layout: plot area on the left, price scale on the right, time scale along
//! the bottom. All candles are fitted into the plot width (one slot each).

use super::{ChartOptions, ChartRenderer};
use crate::domain::ohlc::{OhlcPoint, OhlcSeries};
use crate::shared::fmt::format_price;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Width reserved for price labels.
const PRICE_AXIS_WIDTH: u32 = 64;
/// Height reserved for time labels.
const TIME_AXIS_HEIGHT: u32 = 24;
const TOP_MARGIN: f64 = 8.0;
/// Horizontal grid lines / price labels.
const PRICE_TICKS: usize = 5;
/// Upper bound on vertical grid lines / time labels.
const MAX_TIME_TICKS: usize = 6;
/// Body width as a fraction of the candle slot.
const BODY_RATIO: f64 = 0.6;
/// Extra room above the highest high and below the lowest low.
const PRICE_PADDING: f64 = 0.05;

/// Renders an [`OhlcSeries`] as a standalone `<svg>` element.
#[derive(Debug, Clone)]
pub struct SvgCandlestickChart {
    options: ChartOptions,
    width: u32,
    series: OhlcSeries,
}

/// Maps prices and candle indices to pixel coordinates.
struct Scale {
    plot_width: f64,
    plot_height: f64,
    low: f64,
    high: f64,
    slot: f64,
}

impl Scale {
    fn new(width: u32, height: u32, series: &OhlcSeries) -> Self {
        let plot_width = width.saturating_sub(PRICE_AXIS_WIDTH).max(1) as f64;
        let plot_height = (height.saturating_sub(TIME_AXIS_HEIGHT) as f64 - TOP_MARGIN).max(1.0);

        let (min, max) = series
            .price_range()
            .filter(|(lo, hi)| lo.is_finite() && hi.is_finite())
            .unwrap_or((0.0, 1.0));
        let span = max - min;
        let (low, high) = if span > 0.0 {
            (min - span * PRICE_PADDING, max + span * PRICE_PADDING)
        } else {
            // Flat series: centre it in a band of ±1% (or ±1 around zero).
            let pad = if max != 0.0 { max.abs() * 0.01 } else { 1.0 };
            (min - pad, max + pad)
        };

        let slot = plot_width / series.len().max(1) as f64;

        Self {
            plot_width,
            plot_height,
            low,
            high,
            slot,
        }
    }

    fn y(&self, price: f64) -> f64 {
        TOP_MARGIN + (self.high - price) / (self.high - self.low) * self.plot_height
    }

    fn x_center(&self, index: usize) -> f64 {
        (index as f64 + 0.5) * self.slot
    }

    fn body_width(&self) -> f64 {
        (self.slot * BODY_RATIO).max(1.0)
    }
}

impl SvgCandlestickChart {
    pub fn new(width: u32) -> Self {
        Self::with_options(width, ChartOptions::default())
    }

    pub fn with_options(width: u32, options: ChartOptions) -> Self {
        Self {
            options,
            width,
            series: OhlcSeries::default(),
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn series(&self) -> &OhlcSeries {
        &self.series
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        let (w, h) = (self.width, self.options.height);
        let scale = Scale::new(w, h, &self.series);

        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="11">"#
        )?;
        write!(
            out,
            r#"<rect class="background" width="{w}" height="{h}" fill="{}"/>"#,
            self.options.background
        )?;

        self.write_price_scale(out, &scale)?;
        self.write_time_scale(out, &scale)?;

        for (idx, point) in self.series.iter().enumerate() {
            self.write_candle(out, &scale, idx, point)?;
        }

        out.push_str("</svg>");
        Ok(())
    }

    fn write_price_scale(&self, out: &mut String, scale: &Scale) -> std::fmt::Result {
        let label_x = scale.plot_width + 6.0;
        for i in 0..PRICE_TICKS {
            let price = scale.low + (scale.high - scale.low) * i as f64 / (PRICE_TICKS - 1) as f64;
            let y = scale.y(price);
            write!(
                out,
                r#"<line class="grid" x1="0" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="1"/>"#,
                scale.plot_width, self.options.grid_color
            )?;
            write!(
                out,
                r#"<text class="price-label" x="{label_x:.1}" y="{:.1}" fill="{}">{}</text>"#,
                y + 4.0,
                self.options.text_color,
                format_price(price)
            )?;
        }
        Ok(())
    }

    fn write_time_scale(&self, out: &mut String, scale: &Scale) -> std::fmt::Result {
        let n = self.series.len();
        if n == 0 {
            return Ok(());
        }

        let step = n.div_ceil(MAX_TIME_TICKS).max(1);
        let grid_bottom = TOP_MARGIN + scale.plot_height;
        let label_y = grid_bottom + TIME_AXIS_HEIGHT as f64 - 8.0;

        for (idx, point) in self.series.iter().enumerate().step_by(step) {
            let x = scale.x_center(idx);
            write!(
                out,
                r#"<line class="grid" x1="{x:.1}" y1="{TOP_MARGIN:.1}" x2="{x:.1}" y2="{grid_bottom:.1}" stroke="{}" stroke-width="1"/>"#,
                self.options.grid_color
            )?;
            write!(
                out,
                r#"<text class="time-label" x="{x:.1}" y="{label_y:.1}" text-anchor="middle" fill="{}">{}</text>"#,
                self.options.text_color,
                time_label(point.time)
            )?;
        }
        Ok(())
    }

    fn write_candle(
        &self,
        out: &mut String,
        scale: &Scale,
        idx: usize,
        point: &OhlcPoint,
    ) -> std::fmt::Result {
        let (body_color, wick_color) = if point.is_up() {
            (&self.options.up_color, &self.options.wick_up_color)
        } else {
            (&self.options.down_color, &self.options.wick_down_color)
        };

        let x = scale.x_center(idx);
        write!(
            out,
            r#"<line class="wick" x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{wick_color}" stroke-width="1"/>"#,
            scale.y(point.high),
            scale.y(point.low)
        )?;

        let top = scale.y(point.open.max(point.close));
        let bottom = scale.y(point.open.min(point.close));
        let body_w = scale.body_width();
        let border = if self.options.border_visible {
            format!(r#" stroke="{body_color}" stroke-width="1""#)
        } else {
            String::new()
        };
        write!(
            out,
            r#"<rect class="candle" x="{:.1}" y="{top:.1}" width="{body_w:.1}" height="{:.1}" fill="{body_color}"{border}/>"#,
            x - body_w / 2.0,
            (bottom - top).max(1.0)
        )
    }
}

impl ChartRenderer for SvgCandlestickChart {
    fn set_series(&mut self, series: &OhlcSeries) {
        self.series = series.clone();
    }

    fn resize(&mut self, width: u32) {
        self.width = width;
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.options.height
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(512 + self.series.len() * 256);
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }
}

fn time_label(time: i64) -> String {
    DateTime::<Utc>::from_timestamp(time, 0)
        .map(|dt| dt.format("%b %d").to_string())
        .unwrap_or_default()
}
