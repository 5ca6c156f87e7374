// src/routes/health.rs
//! Liveness endpoint for the pest-watch service.
//!
//! `/health` answers without contacting the station API, so it reports on
//! this process only. The gateway (`mod.rs`) merges this subrouter alongside
//! the dashboard route.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges with the gateway router
/// whatever state type the gateway carries.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
