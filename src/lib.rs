//! Core of the `tiraque-pestwatch` service.
//!
//! One dashboard refresh is a straight pipeline:
//! - `acquisition` fetches the station records and selects the reading window
//! - `normalize` scales each series to `[0, 1]` for the chart
//! - `risk` derives the pest-risk indices from the newest reading
//! - `dashboard` assembles the render payload and absorbs failures
//!
//! `routes` exposes that payload over HTTP; `config` loads settings.

pub mod acquisition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod normalize;
pub mod risk;
pub mod routes;

pub use acquisition::StationClient;
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::PestwatchError;
pub use models::{RawReading, Reading, ReadingWindow};
