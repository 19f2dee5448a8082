// Thermal characteristics - Q1 and battery temperature rise, heating per amp
use super::format::fixed;
use super::{div_positive, max_abs_current};
use crate::domain::analysis::{ChannelStats, TableSection, ThermalRow, ThermalStats};
use crate::domain::battery::DataPoint;

/// Zero and negative readings mean the probe is absent or not yet settled.
fn channel(samples: impl Iterator<Item = i32>) -> ChannelStats {
    let readings: Vec<i32> = samples.filter(|t| *t > 0).collect();
    let (Some(start), Some(max)) = (readings.iter().min(), readings.iter().max()) else {
        return ChannelStats::default();
    };

    ChannelStats {
        samples: readings.len(),
        start: *start,
        max: *max,
        growth: max - start,
    }
}

pub fn compute(points: &[DataPoint]) -> ThermalStats {
    let q1 = channel(points.iter().map(|p| p.temp_q1));
    let battery = channel(points.iter().map(|p| p.temp_akb));

    ThermalStats {
        q1,
        battery,
        heat_per_amp: div_positive(q1.growth as f64, max_abs_current(points)),
    }
}

pub fn rows(stats: &ThermalStats) -> Vec<ThermalRow> {
    let battery = if stats.battery.has_sensor() {
        ThermalRow {
            key: 2,
            name: "Температура АКБ".to_string(),
            start: format!("{} °C", stats.battery.start),
            max: format!("{} °C", stats.battery.max),
            growth: format!("+{} °C", stats.battery.growth),
        }
    } else {
        ThermalRow {
            key: 2,
            name: "Температура АКБ".to_string(),
            start: "0 °C".to_string(),
            max: "0 °C".to_string(),
            growth: "нет датчика".to_string(),
        }
    };

    let heat_per_amp = if stats.heat_per_amp > 0.0 {
        format!("{} °C/А", fixed(stats.heat_per_amp, 1))
    } else {
        "–".to_string()
    };

    vec![
        ThermalRow {
            key: 1,
            name: "Температура Q1".to_string(),
            start: format!("{} °C", stats.q1.start),
            max: format!("{} °C", stats.q1.max),
            growth: format!("+{} °C", stats.q1.growth),
        },
        battery,
        ThermalRow {
            key: 3,
            name: "Нагрев/Ампер".to_string(),
            start: "–".to_string(),
            max: heat_per_amp,
            growth: "–".to_string(),
        },
    ]
}

pub fn table(points: &[DataPoint]) -> TableSection<ThermalStats, ThermalRow> {
    let stats = compute(points);
    let rows = if points.is_empty() { Vec::new() } else { rows(&stats) };
    TableSection { stats, rows }
}
