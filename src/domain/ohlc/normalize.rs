//! Raw candle rows → [`OhlcSeries`].

use super::wire::RawOhlc;
use super::{OhlcPoint, OhlcSeries};

impl From<RawOhlc> for OhlcPoint {
    fn from(raw: RawOhlc) -> Self {
        Self {
            time: raw.timestamp_ms.div_euclid(1000),
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
        }
    }
}

/// Convert rows to second-resolution points, order them by time and keep one
/// point per second.
///
/// Millisecond timestamps are floored to seconds, so rows a few hundred
/// milliseconds apart collapse onto the same time. The sort is stable: among
/// rows sharing a time, the one that came first in `raw` is kept.
pub fn normalize(raw: impl IntoIterator<Item = RawOhlc>) -> OhlcSeries {
    let mut points: Vec<OhlcPoint> = raw.into_iter().map(OhlcPoint::from).collect();
    points.sort_by_key(|p| p.time);
    points.dedup_by_key(|p| p.time);
    OhlcSeries::from_sorted_unique(points)
}
