//! Dashboard endpoint.
//!
//! Each request runs one acquisition cycle against the station API and
//! returns the assembled render payload. Acquisition and risk failures are
//! reported inside the payload, so the status is always 200.

use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, info};

use crate::{Config, Dashboard, StationClient};

// ---

pub fn router() -> Router<(StationClient, Config)> {
    // ---
    Router::new().route("/dashboard", get(handler))
}

async fn handler(State((station, config)): State<(StationClient, Config)>) -> Json<Dashboard> {
    // ---
    info!("GET /dashboard - Starting refresh");

    debug!("GET /dashboard - Step 1: fetch");
    let fetched = station.fetch_readings().await;

    debug!("GET /dashboard - Step 2: assemble");
    let dashboard = Dashboard::assemble(fetched, &config.coefficients);

    info!(
        "Refresh complete (notice: {})",
        dashboard.notice.as_deref().unwrap_or("none")
    );
    Json(dashboard)
}
