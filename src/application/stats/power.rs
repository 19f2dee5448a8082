// Power quality - Supply rail mean, ripple, stability and worst deviation
use super::format::fixed;
use super::{div_positive, finite, max_of, mean, min_of, std_deviation};
use crate::domain::analysis::{DisplayItem, PowerQuality, PowerQualityStats, Section};
use crate::domain::battery::DataPoint;

pub fn compute(points: &[DataPoint]) -> PowerQualityStats {
    let voltages: Vec<f64> = finite(points.iter().map(|p| p.power_voltage))
        .into_iter()
        .filter(|v| *v > 0.0)
        .collect();

    if voltages.is_empty() {
        return PowerQualityStats::default();
    }

    let average = mean(&voltages);
    let std_dev = std_deviation(&voltages, average);
    let max_deviation = (max_of(&voltages) - average).max(average - min_of(&voltages));
    let stability = div_positive(average - std_dev, average) * 100.0;

    PowerQualityStats {
        samples: voltages.len(),
        average_voltage: average,
        std_deviation: std_dev,
        ripple_mv: std_dev * 1000.0,
        stability_percent: stability.max(0.0),
        max_deviation_mv: max_deviation * 1000.0,
    }
}

pub fn summarize(stats: &PowerQualityStats) -> PowerQuality {
    if stats.samples == 0 {
        return PowerQuality {
            average_power_voltage: "0".to_string(),
            power_ripple: "0".to_string(),
            power_stability: "0".to_string(),
            max_deviation: "0".to_string(),
        };
    }

    PowerQuality {
        average_power_voltage: fixed(stats.average_voltage, 2),
        power_ripple: fixed(stats.ripple_mv, 0),
        power_stability: fixed(stats.stability_percent, 1),
        max_deviation: fixed(stats.max_deviation_mv, 0),
    }
}

fn items(quality: &PowerQuality) -> Vec<DisplayItem> {
    vec![
        DisplayItem::new(
            "averagePowerVoltage",
            "Напряжение БП среднее",
            format!("{} В", quality.average_power_voltage),
        ),
        DisplayItem::new("powerRipple", "Пульсации БП", format!("± {} мВ", quality.power_ripple)),
        DisplayItem::new("powerStability", "Стабильность БП", format!("{} %", quality.power_stability)),
        DisplayItem::new("maxDeviation", "Максимальное отклонение", format!("{} мВ", quality.max_deviation)),
    ]
}

/// Items stay empty when the log carries no supply-rail readings.
pub fn section(points: &[DataPoint]) -> Section<PowerQualityStats, PowerQuality> {
    let stats = compute(points);
    let data = summarize(&stats);
    let items = if stats.samples == 0 { Vec::new() } else { items(&data) };
    Section { stats, data, items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rail(voltages: &[f64]) -> Vec<DataPoint> {
        voltages
            .iter()
            .enumerate()
            .map(|(i, &power_voltage)| DataPoint {
                timestamp: i as i64 + 1,
                power_voltage,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_power_quality() {
        let stats = compute(&rail(&[12.0, 12.2, 11.8, 12.0]));
        assert_eq!(stats.samples, 4);
        assert!((stats.average_voltage - 12.0).abs() < 1e-9);
        // sqrt(0.08 / 4)
        assert!((stats.ripple_mv - 141.421).abs() < 0.01);
        assert!((stats.max_deviation_mv - 200.0).abs() < 1e-6);

        let quality = summarize(&stats);
        assert_eq!(quality.average_power_voltage, "12.00");
        assert_eq!(quality.power_ripple, "141");
        assert_eq!(quality.power_stability, "98.8");
        assert_eq!(quality.max_deviation, "200");
    }

    #[test]
    fn test_non_positive_rail_samples_are_ignored() {
        let stats = compute(&rail(&[0.0, -1.0, 5.0, 5.0]));
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.ripple_mv, 0.0);
        assert_eq!(stats.stability_percent, 100.0);
    }

    #[test]
    fn test_no_rail_readings() {
        let section = section(&rail(&[0.0, 0.0]));
        assert_eq!(section.stats, PowerQualityStats::default());
        assert_eq!(section.data.power_ripple, "0");
        assert!(section.items.is_empty());
        assert!(super::section(&[]).items.is_empty());
    }
}
