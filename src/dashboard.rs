//! Render payload assembly.
//!
//! This is the error boundary of a dashboard cycle: acquisition failures
//! become a user-visible notice, an empty window becomes the "no data" body,
//! and a failing risk formula only blanks the risk panel.

use serde::Serialize;
use tracing::{error, warn};

use crate::normalize::normalize;
use crate::risk::{compute_risk, RiskCoefficients, RiskIndices};
use crate::{PestwatchError, ReadingWindow};

// ---

/// Everything a front end needs to draw one dashboard refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Error text to show above the body, if acquisition failed.
    pub notice: Option<String>,
    pub body: DashboardBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardBody {
    NoData { message: String },
    Ready(Panels),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panels {
    pub metrics: MetricCards,
    pub chart: Chart,
    pub risk: RiskPanel,
}

/// Latest values for the three metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricCards {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// `HH:MM:SS`, oldest first.
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// One chart line: normalized values for plotting, raw values for annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub raw: Vec<f64>,
    pub normalized: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RiskPanel {
    Computed(RiskIndices),
    Unavailable { reason: String },
}

impl Dashboard {
    // ---
    /// Build the payload from the outcome of one acquisition attempt.
    pub fn assemble(
        fetched: Result<ReadingWindow, PestwatchError>,
        coefficients: &RiskCoefficients,
    ) -> Dashboard {
        // ---
        match fetched {
            Ok(window) => Dashboard {
                notice: None,
                body: DashboardBody::from_window(&window, coefficients),
            },
            Err(e) => {
                error!("Failed to fetch station data: {}", e);
                Dashboard {
                    notice: Some(format!("Error fetching data: {e}")),
                    body: DashboardBody::no_data(),
                }
            }
        }
    }
}

impl DashboardBody {
    // ---
    fn no_data() -> Self {
        DashboardBody::NoData {
            message: PestwatchError::EmptyWindow.to_string(),
        }
    }

    fn from_window(window: &ReadingWindow, coefficients: &RiskCoefficients) -> Self {
        // ---
        let Some(latest) = window.latest() else {
            warn!("Reading window is empty, nothing to display");
            return Self::no_data();
        };

        let metrics = MetricCards {
            temperature: latest.temperature,
            humidity: latest.humidity,
            pressure: latest.pressure,
        };

        let normalized = normalize(window);
        let chart = Chart {
            labels: window.labels(),
            series: vec![
                ChartSeries {
                    name: "Temperature",
                    raw: window.temperatures(),
                    normalized: normalized.temperature,
                },
                ChartSeries {
                    name: "Humidity",
                    raw: window.humidities(),
                    normalized: normalized.humidity,
                },
                ChartSeries {
                    name: "Pressure",
                    raw: window.pressures(),
                    normalized: normalized.pressure,
                },
            ],
        };

        let risk = match compute_risk(latest, coefficients) {
            Ok(indices) => RiskPanel::Computed(indices),
            Err(e) => {
                warn!("Risk indices unavailable: {}", e);
                RiskPanel::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        DashboardBody::Ready(Panels {
            metrics,
            chart,
            risk,
        })
    }
}
