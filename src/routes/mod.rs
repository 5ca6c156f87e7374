use axum::Router;

use crate::{Config, StationClient};

mod dashboard;
mod health;

// ---

pub fn router(station: StationClient, config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(health::router())
        .with_state((station, config))
}
