//! Dashboard state — one value, explicit transitions.
//!
//! ```text
//! Idle ──begin──▶ Loading ──complete(Ok)──▶ Success
//!                    │   └──complete(Err)─▶ Error
//!                    ◀──────begin─────────── Success | Error | Loading
//! ```
//!
//! Every [`Dashboard::begin`] issues a [`RequestTicket`]. A completion carrying
//! any ticket other than the latest is discarded, so a slow, superseded
//! request can never overwrite the result of a newer one.

pub mod ticket;

use crate::domain::ohlc::OhlcSeries;
use crate::domain::TokenChart;
use crate::error::SdkError;
use std::future::Future;

pub use ticket::{Generation, RequestTicket};

/// Source of resolved token charts.
///
/// Implemented by [`CoinGeckoClient`](crate::client::CoinGeckoClient); tests
/// and alternative providers plug in here.
pub trait MarketData {
    fn lookup(&self, address: &str) -> impl Future<Output = Result<TokenChart, SdkError>>;
}

/// What the user currently sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    #[default]
    Idle,
    /// Spinner shown, trigger disabled.
    Loading { address: String },
    /// Banner + chart.
    Success(TokenChart),
    /// Error banner; no token name, no chart.
    Error { message: String, not_found: bool },
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading { .. })
    }

    /// `"Token: Name (SYMBOL)"` once a lookup succeeded.
    pub fn banner(&self) -> Option<String> {
        match self {
            DashboardState::Success(chart) => Some(chart.banner()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DashboardState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&TokenChart> {
        match self {
            DashboardState::Success(chart) => Some(chart),
            _ => None,
        }
    }

    /// The series to draw. `None` when there is nothing to chart, including
    /// a successful lookup that returned no candles.
    pub fn visible_series(&self) -> Option<&OhlcSeries> {
        self.chart()
            .map(|c| &c.series)
            .filter(|series| !series.is_empty())
    }
}

/// Address input + state + request generations for one dashboard.
#[derive(Debug, Default)]
pub struct Dashboard {
    address: String,
    state: DashboardState,
    generation: Generation,
    revision: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Update the text field contents. Does not touch the displayed state.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Bumped on every state transition; views compare it to know when to
    /// rebuild.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    /// Start a request for the current address. Supersedes any in-flight one.
    pub fn begin(&mut self) -> RequestTicket {
        let ticket = self.generation.next();
        tracing::debug!(generation = ticket.generation(), address = %self.address, "Lookup started");
        self.transition(DashboardState::Loading {
            address: self.address.clone(),
        });
        ticket
    }

    /// Publish a finished request. Returns `false` (and changes nothing) when
    /// the ticket has been superseded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<TokenChart, SdkError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::warn!(
                generation = ticket.generation(),
                "Discarding result of superseded lookup"
            );
            return false;
        }

        let next = match result {
            Ok(chart) => DashboardState::Success(chart),
            Err(err) => {
                tracing::warn!(error = %err, "Lookup failed");
                DashboardState::Error {
                    message: err.user_message().to_string(),
                    not_found: err.is_not_found(),
                }
            }
        };
        self.transition(next);
        true
    }

    /// Back to `Idle`; any in-flight request is superseded.
    pub fn reset(&mut self) {
        self.generation.invalidate();
        self.transition(DashboardState::Idle);
    }

    /// Run one lookup to completion against `source`.
    ///
    /// For callers that own the dashboard across the await. UI code that
    /// shares it (e.g. behind a `RefCell`) uses `begin`/`complete` directly
    /// so no borrow is held while the request is in flight.
    pub async fn submit<M: MarketData>(&mut self, source: &M) -> &DashboardState {
        let ticket = self.begin();
        let address = self.address.clone();
        let result = source.lookup(&address).await;
        self.complete(ticket, result);
        &self.state
    }

    fn transition(&mut self, next: DashboardState) {
        self.state = next;
        self.revision += 1;
    }
}
