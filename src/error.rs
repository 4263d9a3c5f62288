//! Unified SDK error types.

use thiserror::Error;

/// Banner text for an address that matches no catalog entry.
pub const NOT_FOUND_MESSAGE: &str = "Token not found on CoinGecko";

/// Banner text for every other failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Error fetching data. Please check the address and try again.";

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The single line shown in the dashboard's error banner.
    ///
    /// Only a failed address lookup gets a specific message; transport
    /// failures and malformed responses collapse into the generic one.
    pub fn user_message(&self) -> &'static str {
        match self {
            SdkError::Lookup(LookupError::NotFound(_)) => NOT_FOUND_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Lookup(LookupError::NotFound(_)))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,
}

/// Address → asset resolution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no asset lists contract address {0:?}")]
    NotFound(String),
}
