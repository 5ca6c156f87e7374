//! Configuration loader for the `tiraque-pestwatch` service.
//!
//! All runtime settings and their defaults live here, loaded from environment
//! variables (with optional `.env` support provided by the caller). Risk
//! coefficients are configuration too, so they can be recalibrated without a
//! rebuild.
//!
use std::{env, time::Duration};

use anyhow::{anyhow, bail, Result};

use crate::risk::{
    DevelopmentRateCoefficients, InfestationCoefficients, MothActivityCoefficients,
    RiskCoefficients,
};

/// Station endpoint used when `STATION_API_URL` is unset.
pub const DEFAULT_STATION_URL: &str =
    "https://watchcloud.piensadiferente.net/weather/api/device/get/list/sebas/data";

/// Parse an optional environment variable with a default value.
macro_rules! parse_env {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Weather-station API URL.
    pub api_url: String,

    /// Upper bound on a single station request.
    pub fetch_timeout: Duration,

    /// Port the HTTP service listens on.
    pub listen_port: u16,

    /// Coefficients for the risk formulas.
    pub coefficients: RiskCoefficients,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `STATION_API_URL` – station API URL (default: the Tiraque station)
/// - `FETCH_TIMEOUT_SECS` – request timeout in seconds (default: 10)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
/// - `DEV_RATE_INTERCEPT`, `DEV_RATE_SLOPE`
/// - `IPPO_ALPHA`, `IPPO_BETA`, `IPPO_GAMMA`, `IPPO_DELTA`, `IPPO_ALERT_THRESHOLD`
/// - `MOTH_TEMP_WEIGHT`, `MOTH_HUM_WEIGHT`, `MOTH_PRES_WEIGHT`, `MOTH_OFFSET`
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    load_with(|name| env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let api_url = lookup("STATION_API_URL").unwrap_or_else(|| DEFAULT_STATION_URL.to_string());
    let fetch_timeout_secs = parse_env!(lookup, "FETCH_TIMEOUT_SECS", u64, 10);
    let listen_port = parse_env!(lookup, "LISTEN_PORT", u16, 8080);

    if fetch_timeout_secs == 0 {
        bail!("FETCH_TIMEOUT_SECS must be greater than zero");
    }

    let dev = DevelopmentRateCoefficients::default();
    let development_rate = DevelopmentRateCoefficients {
        intercept: parse_env!(lookup, "DEV_RATE_INTERCEPT", f64, dev.intercept),
        slope: parse_env!(lookup, "DEV_RATE_SLOPE", f64, dev.slope),
    };
    if development_rate.slope == 0.0 {
        bail!("DEV_RATE_SLOPE must be non-zero");
    }

    let ippo = InfestationCoefficients::default();
    let infestation = InfestationCoefficients {
        alpha: parse_env!(lookup, "IPPO_ALPHA", f64, ippo.alpha),
        beta: parse_env!(lookup, "IPPO_BETA", f64, ippo.beta),
        gamma: parse_env!(lookup, "IPPO_GAMMA", f64, ippo.gamma),
        delta: parse_env!(lookup, "IPPO_DELTA", f64, ippo.delta),
        alert_threshold: parse_env!(lookup, "IPPO_ALERT_THRESHOLD", f64, ippo.alert_threshold),
    };

    let moth = MothActivityCoefficients::default();
    let moth_activity = MothActivityCoefficients {
        temperature_weight: parse_env!(lookup, "MOTH_TEMP_WEIGHT", f64, moth.temperature_weight),
        humidity_weight: parse_env!(lookup, "MOTH_HUM_WEIGHT", f64, moth.humidity_weight),
        pressure_weight: parse_env!(lookup, "MOTH_PRES_WEIGHT", f64, moth.pressure_weight),
        offset: parse_env!(lookup, "MOTH_OFFSET", f64, moth.offset),
    };

    Ok(Config {
        api_url,
        fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        listen_port,
        coefficients: RiskCoefficients {
            development_rate,
            infestation,
            moth_activity,
        },
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let c = &self.coefficients;

        tracing::info!("Configuration loaded:");
        tracing::info!("  STATION_API_URL    : {}", self.api_url);
        tracing::info!("  FETCH_TIMEOUT_SECS : {}", self.fetch_timeout.as_secs());
        tracing::info!("  LISTEN_PORT        : {}", self.listen_port);
        tracing::info!("  development rate   : {:?}", c.development_rate);
        tracing::info!("  infestation (IPPO) : {:?}", c.infestation);
        tracing::info!("  moth activity      : {:?}", c.moth_activity);
    }
}
