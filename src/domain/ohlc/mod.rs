//! OHLC domain — candles, the ordered series, normalization.

#[cfg(feature = "http")]
pub mod client;
pub mod normalize;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use normalize::normalize;

/// One sampled interval: open/high/low/close prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    /// Unix timestamp in seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcPoint {
    /// Closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.time, 0)
    }
}

/// Candles ordered by strictly increasing `time`.
///
/// Built by [`normalize`] or the checked [`OhlcSeries::try_from_points`];
/// there is no way to obtain a series with duplicate or unordered times.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OhlcSeries {
    points: Vec<OhlcPoint>,
}

impl OhlcSeries {
    pub(crate) fn from_sorted_unique(points: Vec<OhlcPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time < w[1].time));
        Self { points }
    }

    /// Accept already-ordered points, rejecting the first out-of-order one.
    pub fn try_from_points(points: Vec<OhlcPoint>) -> Result<Self, OhlcSeriesError> {
        for (idx, pair) in points.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(OhlcSeriesError::NotStrictlyIncreasing {
                    index: idx + 1,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[OhlcPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&OhlcPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&OhlcPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OhlcPoint> {
        self.points.iter()
    }

    /// `(lowest low, highest high)` across the series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold((first.low, first.high), |(lo, hi), p| {
            (lo.min(p.low), hi.max(p.high))
        }))
    }

    /// `(first time, last time)` in seconds.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((self.points.first()?.time, self.points.last()?.time))
    }

    pub fn into_points(self) -> Vec<OhlcPoint> {
        self.points
    }
}

impl<'a> IntoIterator for &'a OhlcSeries {
    type Item = &'a OhlcPoint;
    type IntoIter = std::slice::Iter<'a, OhlcPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<'de> Deserialize<'de> for OhlcSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<OhlcPoint>::deserialize(deserializer)?;
        OhlcSeries::try_from_points(points).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OhlcSeriesError {
    NotStrictlyIncreasing {
        index: usize,
        previous: i64,
        time: i64,
    },
}

impl fmt::Display for OhlcSeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OhlcSeriesError::NotStrictlyIncreasing {
                index,
                previous,
                time,
            } => write!(
                f,
                "point {index} has time {time}, not after the previous {previous}"
            ),
        }
    }
}

impl std::error::Error for OhlcSeriesError {}
