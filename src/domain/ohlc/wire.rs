//! Wire types for `GET /coins/{id}/ohlc` (REST).

use serde::{Deserialize, Serialize};

/// One raw candle: `[timestamp_ms, open, high, low, close]`.
///
/// Four-element rows carry no close and are read as a flat candle
/// (`close == open`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 5]")]
pub struct RawOhlc {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl TryFrom<Vec<f64>> for RawOhlc {
    type Error = String;

    fn try_from(row: Vec<f64>) -> Result<Self, Self::Error> {
        let (ts, open, high, low, close) = match row.as_slice() {
            [ts, o, h, l] => (*ts, *o, *h, *l, *o),
            [ts, o, h, l, c] => (*ts, *o, *h, *l, *c),
            other => {
                return Err(format!(
                    "OHLC row must have 4 or 5 elements, got {}",
                    other.len()
                ))
            }
        };

        if !ts.is_finite() || ts.fract() != 0.0 {
            return Err(format!("OHLC timestamp is not a whole number of ms: {ts}"));
        }

        Ok(Self {
            timestamp_ms: ts as i64,
            open,
            high,
            low,
            close,
        })
    }
}

impl From<RawOhlc> for [f64; 5] {
    fn from(raw: RawOhlc) -> Self {
        [
            raw.timestamp_ms as f64,
            raw.open,
            raw.high,
            raw.low,
            raw.close,
        ]
    }
}
