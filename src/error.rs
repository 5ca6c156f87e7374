//! Error taxonomy for the fetch → transform → assemble cycle.
//!
//! Only the dashboard boundary (`dashboard.rs`) turns these into user-facing
//! text; everything below it returns `Result<_, PestwatchError>`.

use thiserror::Error;

/// Errors raised while acquiring readings or computing risk indices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PestwatchError {
    /// Transport failure or non-success status from the station API.
    #[error("Failed to reach station API: {0}")]
    Fetch(String),

    /// The station API did not answer within the configured timeout.
    #[error("Station API request timed out")]
    Timeout,

    /// Malformed body, missing field or unparseable timestamp.
    #[error("Failed to parse station data: {0}")]
    Parse(String),

    /// No readings survived filtering.
    #[error("No data available")]
    EmptyWindow,

    /// A formula hit a zero divisor.
    #[error("Division by zero in {0}")]
    Division(&'static str),
}

impl From<reqwest::Error> for PestwatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PestwatchError::Timeout
        } else if err.is_decode() {
            PestwatchError::Parse(err.to_string())
        } else {
            PestwatchError::Fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PestwatchError {
    fn from(err: serde_json::Error) -> Self {
        PestwatchError::Parse(err.to_string())
    }
}
