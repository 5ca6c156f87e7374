//! Min-max normalization of the reading window for charting.

use serde::Serialize;

use crate::ReadingWindow;

// ---

/// Value assigned to every point of a constant series.
pub const FLAT_SERIES_VALUE: f64 = 0.5;

/// Per-quantity series scaled to `[0, 1]`, parallel to the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSeries {
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub pressure: Vec<f64>,
}

/// Normalize each quantity of the window independently.
pub fn normalize(window: &ReadingWindow) -> NormalizedSeries {
    // ---
    NormalizedSeries {
        temperature: min_max(&window.temperatures()),
        humidity: min_max(&window.humidities()),
        pressure: min_max(&window.pressures()),
    }
}

/// Scale `values` so the minimum maps to 0 and the maximum to 1.
///
/// A series with `max == min` has no range to divide by; every point maps to
/// [`FLAT_SERIES_VALUE`] instead. Spans wider than `f64::MAX` are scaled in
/// halves so the result stays in `[0, 1]`.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    // ---
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return vec![FLAT_SERIES_VALUE; values.len()];
    }
    if !range.is_finite() {
        // Span exceeds f64::MAX; halving every term keeps it representable
        let half_range = max / 2.0 - min / 2.0;
        return values
            .iter()
            .map(|&v| (v / 2.0 - min / 2.0) / half_range)
            .collect();
    }
    values.iter().map(|&v| (v - min) / range).collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::acquisition::parse_window;

    #[test]
    fn test_two_record_scenario() {
        // ---
        let body = r#"[
            {"createdAt":"2024-01-01 10:00:00","temp":10,"hum":50,"pres":1000},
            {"createdAt":"2024-01-01 09:00:00","temp":20,"hum":60,"pres":1010}
        ]"#;
        let series = normalize(&parse_window(body).unwrap());

        assert_eq!(series.temperature, vec![1.0, 0.0]);
        assert_eq!(series.humidity, vec![1.0, 0.0]);
        assert_eq!(series.pressure, vec![1.0, 0.0]);
    }

    #[test]
    fn test_bounds_and_extremes() {
        // ---
        let values = [18.5, 22.0, 9.25, 30.0, 14.0];
        let scaled = min_max(&values);

        assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(scaled[2], 0.0);
        assert_eq!(scaled[3], 1.0);
    }

    #[test]
    fn test_constant_series_does_not_produce_nan() {
        // ---
        let scaled = min_max(&[760.0, 760.0, 760.0]);
        assert_eq!(scaled, vec![FLAT_SERIES_VALUE; 3]);

        let single = min_max(&[12.0]);
        assert_eq!(single, vec![FLAT_SERIES_VALUE]);
    }

    #[test]
    fn test_extreme_span_stays_in_range() {
        // ---
        let scaled = min_max(&[-1.7e308, 0.0, 1.7e308]);

        assert_eq!(scaled[0], 0.0);
        assert_eq!(scaled[1], 0.5);
        assert_eq!(scaled[2], 1.0);
        assert!(scaled.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_empty_series() {
        // ---
        assert!(min_max(&[]).is_empty());
        assert_eq!(normalize(&ReadingWindow::default()), NormalizedSeries::default());
    }
}
