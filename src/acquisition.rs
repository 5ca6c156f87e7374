//! Station API client.
//!
//! One GET per call, bounded by the configured timeout, no retry. The body is
//! turned into a [`ReadingWindow`] by [`parse_window`], which is kept free of
//! I/O so the selection rules can be tested directly.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::{PestwatchError, RawReading, Reading, ReadingWindow};

// ---

/// HTTP client bound to a single station endpoint.
#[derive(Debug, Clone)]
pub struct StationClient {
    client: Client,
    url: String,
}

impl StationClient {
    // ---
    /// Build a client whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PestwatchError> {
        // ---
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PestwatchError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(StationClient {
            client,
            url: url.into(),
        })
    }

    /// Fetch the station's records and select the current reading window.
    pub async fn fetch_readings(&self) -> Result<ReadingWindow, PestwatchError> {
        // ---
        debug!("Fetching station data from: {}", self.url);

        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.text().await?;

        debug!("Station response: {} bytes", body.len());

        let window = parse_window(&body)?;

        info!(
            "Fetched reading window with {} readings (latest: {:?})",
            window.len(),
            window.latest().map(|r| r.timestamp)
        );
        Ok(window)
    }
}

/// Parse a station response body into readings.
///
/// The body must be a JSON array; a single bad record fails the batch.
pub fn parse_records(body: &str) -> Result<Vec<Reading>, PestwatchError> {
    // ---
    let raw: Vec<RawReading> = serde_json::from_str(body)?;

    debug!("Parsed {} raw records", raw.len());

    raw.into_iter().map(Reading::try_from).collect()
}

/// Parse a station response body and select the reading window from it.
pub fn parse_window(body: &str) -> Result<ReadingWindow, PestwatchError> {
    // ---
    let records = parse_records(body)?;
    let total = records.len();
    let window = ReadingWindow::from_readings(records);

    debug!("Selected {} of {} records for the window", window.len(), total);
    Ok(window)
}
