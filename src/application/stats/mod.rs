//! Stateless reducers over a point slice.
//!
//! Every aggregator returns zero values for empty or all-invalid input and guards each
//! division, so any slice of a log (including an empty phase selection) is safe to feed.

pub mod cc_cv;
pub mod charge;
pub mod efficiency;
pub mod format;
pub mod params;
pub mod phase_summary;
pub mod power;
pub mod thermal;

use crate::domain::battery::DataPoint;

/// Fraction of the peak current above which a sample counts as constant-current.
pub const CC_THRESHOLD_RATIO: f64 = 0.7;

const SECONDS_PER_HOUR: f64 = 3600.0;

pub(crate) fn finite(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values.filter(|v| v.is_finite()).collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation around `mean`.
pub(crate) fn std_deviation(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.max(0.0).sqrt()
}

pub(crate) fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub(crate) fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// `numerator / denominator`, or 0 unless the denominator is positive and finite.
pub(crate) fn div_positive(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

pub(crate) fn total_time_secs(points: &[DataPoint]) -> i64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => 0,
    }
}

pub(crate) fn total_time_hours(points: &[DataPoint]) -> f64 {
    total_time_secs(points) as f64 / SECONDS_PER_HOUR
}

/// Largest finite `|current|`, zeros included.
pub(crate) fn max_abs_current(points: &[DataPoint]) -> f64 {
    max_of(&finite(points.iter().map(DataPoint::abs_current)))
}

/// Largest finite accumulated capacity.
pub(crate) fn max_capacity(points: &[DataPoint]) -> f64 {
    max_of(&finite(points.iter().map(|p| p.ah)))
}

/// Energy in Wh: each interval weighted by the power at its closing sample.
pub(crate) fn cycle_energy_wh(points: &[DataPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            let dt = (pair[1].timestamp - pair[0].timestamp) as f64 / SECONDS_PER_HOUR;
            (pair[1].abs_power(), dt)
        })
        .filter(|(power, dt)| power.is_finite() && dt.is_finite())
        .map(|(power, dt)| power * dt)
        .sum()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::battery::DataPoint;

    /// Points one minute apart: `(voltage, current, ah)`.
    pub fn points(samples: &[(f64, f64, f64)]) -> Vec<DataPoint> {
        samples
            .iter()
            .enumerate()
            .map(|(i, &(voltage, current, ah))| DataPoint {
                timestamp: 1_700_000_000 + i as i64 * 60,
                voltage,
                current,
                ah,
                power_voltage: 12.0,
                temp_q1: 25,
                temp_akb: 0,
            })
            .collect()
    }
}
