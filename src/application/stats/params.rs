// Calculated parameters - Internal resistance, C-rate, energy density
use super::format::fixed;
use super::{
    cycle_energy_wh, div_positive, finite, max_capacity, max_of, min_of, total_time_hours,
};
use crate::domain::analysis::{CalculatedParams, CalculatedParamsStats, DisplayItem, Section};
use crate::domain::battery::DataPoint;

/// Below this current swing (A) a ΔU/ΔI estimate is mostly noise.
const MIN_CURRENT_RANGE: f64 = 0.1;

fn range(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        max_of(values) - min_of(values)
    }
}

pub fn compute(points: &[DataPoint]) -> CalculatedParamsStats {
    if points.is_empty() {
        return CalculatedParamsStats::default();
    }

    let voltages = finite(points.iter().map(|p| p.voltage));
    let currents = finite(points.iter().map(DataPoint::abs_current));

    let current_range = range(&currents);
    let internal_resistance = if current_range > MIN_CURRENT_RANGE {
        range(&voltages) / current_range
    } else {
        0.0
    };

    CalculatedParamsStats {
        internal_resistance,
        c_rate: div_positive(max_of(&currents), max_capacity(points)),
        energy_density: div_positive(cycle_energy_wh(points), total_time_hours(points)),
    }
}

pub fn summarize(stats: &CalculatedParamsStats) -> CalculatedParams {
    CalculatedParams {
        internal_resistance: fixed(stats.internal_resistance, 2),
        c_rate: fixed(stats.c_rate, 1),
        energy_density: fixed(stats.energy_density, 1),
    }
}

fn items(params: &CalculatedParams) -> Vec<DisplayItem> {
    vec![
        DisplayItem::new(
            "internalResistance",
            "Внутреннее сопротивление",
            format!("~ {} Ω (ΔU / ΔI)", params.internal_resistance),
        ),
        DisplayItem::new("cRate", "C-рейт заряда", format!("{} C (I / Ёмкость)", params.c_rate)),
        DisplayItem::new(
            "energyDensity",
            "Энергетическая плотность",
            format!("{} Вт (Wh / Время)", params.energy_density),
        ),
    ]
}

pub fn section(points: &[DataPoint]) -> Section<CalculatedParamsStats, CalculatedParams> {
    let stats = compute(points);
    let data = summarize(&stats);
    let items = if points.is_empty() { Vec::new() } else { items(&data) };
    Section { stats, data, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stats::testing::points;

    #[test]
    fn test_calculated_params() {
        let data = points(&[(3.6, 2.0, 0.0), (3.8, 1.0, 0.5), (4.0, 0.0, 1.0)]);
        let stats = compute(&data);

        // 0.4 V over 2 A
        assert!((stats.internal_resistance - 0.2).abs() < 1e-9);
        assert_eq!(stats.c_rate, 2.0);
        // (3.8 + 0) W for one minute each, over two minutes
        assert!((stats.energy_density - 1.9).abs() < 1e-9);

        let params = summarize(&stats);
        assert_eq!(params.internal_resistance, "0.20");
        assert_eq!(params.c_rate, "2.0");
        assert_eq!(params.energy_density, "1.9");
    }

    #[test]
    fn test_resistance_needs_current_swing() {
        let data = points(&[(3.6, 1.0, 0.0), (4.0, 1.05, 0.5)]);
        assert_eq!(compute(&data).internal_resistance, 0.0);
    }

    #[test]
    fn test_c_rate_without_capacity() {
        let data = points(&[(3.6, 1.0, 0.0), (4.0, 1.0, 0.0)]);
        assert_eq!(compute(&data).c_rate, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let section = section(&[]);
        assert_eq!(section.stats, CalculatedParamsStats::default());
        assert_eq!(section.data.c_rate, "0.0");
        assert!(section.items.is_empty());
    }
}
