//! Pest-risk indices computed from the latest reading.
//!
//! Three independent affine models, each with its own coefficient set. The
//! default coefficients are illustrative placeholders, not calibrated values;
//! they can be overridden through configuration.

use serde::Serialize;

use crate::{PestwatchError, Reading};

// ---

/// `Y = intercept + slope * T` (days of development).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DevelopmentRateCoefficients {
    pub intercept: f64,
    pub slope: f64,
}

impl Default for DevelopmentRateCoefficients {
    fn default() -> Self {
        Self {
            intercept: 1.2,
            slope: 0.37,
        }
    }
}

/// `IPPO = alpha * T + beta * H + gamma / P + delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InfestationCoefficients {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    /// IPPO above this value means infestation is likely.
    pub alert_threshold: f64,
}

impl Default for InfestationCoefficients {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            beta: 0.005,
            gamma: 0.02,
            delta: 1.0,
            alert_threshold: 1.5,
        }
    }
}

/// `score = temperature_weight * T + humidity_weight * H + pressure_weight * P + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MothActivityCoefficients {
    pub temperature_weight: f64,
    pub humidity_weight: f64,
    pub pressure_weight: f64,
    pub offset: f64,
}

impl Default for MothActivityCoefficients {
    fn default() -> Self {
        Self {
            temperature_weight: 0.4,
            humidity_weight: 0.3,
            pressure_weight: 0.2,
            offset: 1.0,
        }
    }
}

/// All coefficient sets used by [`compute_risk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RiskCoefficients {
    pub development_rate: DevelopmentRateCoefficients,
    pub infestation: InfestationCoefficients,
    pub moth_activity: MothActivityCoefficients,
}

/// Development-rate model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DevelopmentRate {
    /// Y, estimated days for the life stage.
    pub days: f64,
    /// K = 1 / slope.
    pub thermal_constant: f64,
    /// t_min = -intercept / slope, in °C.
    pub lower_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskIndices {
    pub development_rate: DevelopmentRate,
    pub infestation_index: f64,
    pub infestation_likely: bool,
    pub moth_activity_score: f64,
}

/// Compute all three indices from `latest`.
///
/// Fails with [`PestwatchError::Division`] when the development-rate slope
/// is zero or the reading's pressure is too close to zero to divide by.
pub fn compute_risk(
    latest: &Reading,
    coefficients: &RiskCoefficients,
) -> Result<RiskIndices, PestwatchError> {
    // ---
    let development_rate = development_rate(latest.temperature, &coefficients.development_rate)?;
    let infestation_index = infestation_index(latest, &coefficients.infestation)?;
    let moth_activity_score = moth_activity_score(latest, &coefficients.moth_activity);

    Ok(RiskIndices {
        development_rate,
        infestation_index,
        infestation_likely: infestation_index > coefficients.infestation.alert_threshold,
        moth_activity_score,
    })
}

pub fn development_rate(
    temperature: f64,
    c: &DevelopmentRateCoefficients,
) -> Result<DevelopmentRate, PestwatchError> {
    // ---
    if c.slope == 0.0 {
        return Err(PestwatchError::Division("development-rate slope"));
    }

    Ok(DevelopmentRate {
        days: c.intercept + c.slope * temperature,
        thermal_constant: 1.0 / c.slope,
        lower_threshold: -c.intercept / c.slope,
    })
}

pub fn infestation_index(
    reading: &Reading,
    c: &InfestationCoefficients,
) -> Result<f64, PestwatchError> {
    // ---
    // Near-zero pressure overflows just like zero does
    let pressure_term = c.gamma / reading.pressure;
    let index =
        c.alpha * reading.temperature + c.beta * reading.humidity + pressure_term + c.delta;

    if reading.pressure == 0.0 || !pressure_term.is_finite() || !index.is_finite() {
        return Err(PestwatchError::Division("IPPO pressure term"));
    }
    Ok(index)
}

pub fn moth_activity_score(reading: &Reading, c: &MothActivityCoefficients) -> f64 {
    // ---
    c.temperature_weight * reading.temperature
        + c.humidity_weight * reading.humidity
        + c.pressure_weight * reading.pressure
        + c.offset
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn create_test_reading(temp: f64, hum: f64, pres: f64) -> Reading {
        // ---
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            temperature: temp,
            humidity: hum,
            pressure: pres,
        }
    }

    #[test]
    fn test_default_coefficients() {
        // ---
        let reading = create_test_reading(20.0, 60.0, 1000.0);
        let risk = compute_risk(&reading, &RiskCoefficients::default()).unwrap();

        // Y = 1.2 + 0.37 * 20
        assert!((risk.development_rate.days - 8.6).abs() < EPS);
        assert!((risk.development_rate.thermal_constant - 1.0 / 0.37).abs() < EPS);
        assert!((risk.development_rate.lower_threshold + 1.2 / 0.37).abs() < EPS);

        // IPPO = 0.2 + 0.3 + 0.00002 + 1
        assert!((risk.infestation_index - 1.50002).abs() < EPS);
        assert!(risk.infestation_likely);

        // 8 + 18 + 200 + 1
        assert!((risk.moth_activity_score - 227.0).abs() < EPS);
    }

    #[test]
    fn test_injected_coefficients() {
        // ---
        let coefficients = RiskCoefficients {
            development_rate: DevelopmentRateCoefficients {
                intercept: 0.0,
                slope: 2.0,
            },
            infestation: InfestationCoefficients {
                alpha: 1.0,
                beta: 0.0,
                gamma: 10.0,
                delta: 0.0,
                alert_threshold: 100.0,
            },
            moth_activity: MothActivityCoefficients {
                temperature_weight: 0.0,
                humidity_weight: 1.0,
                pressure_weight: 0.0,
                offset: -5.0,
            },
        };
        let reading = create_test_reading(10.0, 40.0, 5.0);
        let risk = compute_risk(&reading, &coefficients).unwrap();

        assert_eq!(risk.development_rate.days, 20.0);
        assert_eq!(risk.development_rate.thermal_constant, 0.5);
        assert_eq!(risk.infestation_index, 12.0);
        assert!(!risk.infestation_likely);
        assert_eq!(risk.moth_activity_score, 35.0);
    }

    #[test]
    fn test_zero_pressure_is_division_error() {
        // ---
        let reading = create_test_reading(20.0, 60.0, 0.0);
        assert_eq!(
            compute_risk(&reading, &RiskCoefficients::default()),
            Err(PestwatchError::Division("IPPO pressure term"))
        );

        // The moth score has no divisor and still evaluates
        let score = moth_activity_score(&reading, &MothActivityCoefficients::default());
        assert!(score.is_finite());
    }

    #[test]
    fn test_tiny_pressure_is_division_error() {
        // ---
        let reading = create_test_reading(20.0, 60.0, 1e-320);
        assert_eq!(
            compute_risk(&reading, &RiskCoefficients::default()),
            Err(PestwatchError::Division("IPPO pressure term"))
        );

        // Small but representable pressure still evaluates
        let reading = create_test_reading(20.0, 60.0, 1e-3);
        let ippo = infestation_index(&reading, &InfestationCoefficients::default()).unwrap();
        assert!((ippo - 21.5).abs() < EPS);
    }

    #[test]
    fn test_zero_slope_is_division_error() {
        // ---
        let c = DevelopmentRateCoefficients {
            intercept: 1.0,
            slope: 0.0,
        };
        assert!(matches!(
            development_rate(20.0, &c),
            Err(PestwatchError::Division(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        // ---
        let reading = create_test_reading(17.3, 71.0, 752.4);
        let coefficients = RiskCoefficients::default();

        let first = compute_risk(&reading, &coefficients).unwrap();
        for _ in 0..10 {
            assert_eq!(compute_risk(&reading, &coefficients).unwrap(), first);
        }
    }
}
