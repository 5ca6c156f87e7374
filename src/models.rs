//! Data models for station readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::PestwatchError;

// ---

/// Timestamp layout used by the station API (`createdAt`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Chart label layout.
pub const LABEL_FORMAT: &str = "%H:%M:%S";

/// Most readings a window ever holds.
pub const MAX_WINDOW_LEN: usize = 20;

/// Readings at or below this temperature (°C) are dropped.
pub const MIN_TEMPERATURE_C: f64 = 5.0;

/// Raw record as served by the station API
#[derive(Debug, Deserialize)]
pub struct RawReading {
    // ---
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub temp: f64,
    pub hum: f64,
    pub pres: f64,
}

/// One sensor sample with a parsed, station-local timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    // ---
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl TryFrom<RawReading> for Reading {
    type Error = PestwatchError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        // ---
        let timestamp = NaiveDateTime::parse_from_str(&raw.created_at, TIMESTAMP_FORMAT)
            .map_err(|e| {
                PestwatchError::Parse(format!("bad createdAt '{}': {}", raw.created_at, e))
            })?;

        Ok(Reading {
            timestamp,
            temperature: raw.temp,
            humidity: raw.hum,
            pressure: raw.pres,
        })
    }
}

/// The most recent readings, oldest first.
///
/// Built only through [`ReadingWindow::from_readings`], so every window holds
/// at most [`MAX_WINDOW_LEN`] readings, all warmer than
/// [`MIN_TEMPERATURE_C`], in non-decreasing timestamp order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReadingWindow {
    readings: Vec<Reading>,
}

impl ReadingWindow {
    // ---
    /// Select the newest qualifying readings from an unordered batch.
    ///
    /// Sorts newest first, keeps `temperature > MIN_TEMPERATURE_C`, takes
    /// the first `MAX_WINDOW_LEN`, then flips back to chronological order.
    pub fn from_readings(mut readings: Vec<Reading>) -> Self {
        // ---
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut readings: Vec<Reading> = readings
            .into_iter()
            .filter(|r| r.temperature > MIN_TEMPERATURE_C)
            .take(MAX_WINDOW_LEN)
            .collect();
        readings.reverse();

        ReadingWindow { readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Newest reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Chart labels, one `HH:MM:SS` string per reading.
    pub fn labels(&self) -> Vec<String> {
        self.readings
            .iter()
            .map(|r| r.timestamp.format(LABEL_FORMAT).to_string())
            .collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.temperature).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.humidity).collect()
    }

    pub fn pressures(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.pressure).collect()
    }
}
