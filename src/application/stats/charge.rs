// Charge summary - Duration, voltage span, current extremes, capacity and mean power
use super::format::{duration, fixed};
use super::{finite, max_capacity, max_of, mean, min_of, total_time_secs};
use crate::domain::analysis::{ChargeStats, ChargeSummary, DisplayItem, Section};
use crate::domain::battery::DataPoint;

pub fn compute(points: &[DataPoint]) -> ChargeStats {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return ChargeStats::default();
    };

    let currents: Vec<f64> = finite(points.iter().map(DataPoint::abs_current))
        .into_iter()
        .filter(|c| *c > 0.0)
        .collect();
    let powers: Vec<f64> = finite(points.iter().map(DataPoint::abs_power))
        .into_iter()
        .filter(|p| *p > 0.0)
        .collect();

    ChargeStats {
        total_time_secs: total_time_secs(points),
        initial_voltage: first.voltage,
        final_voltage: last.voltage,
        max_current: max_of(&currents),
        min_current: min_of(&currents),
        accumulated_capacity: max_capacity(points),
        average_power: mean(&powers),
    }
}

pub fn summarize(stats: &ChargeStats) -> ChargeSummary {
    ChargeSummary {
        total_time: duration(stats.total_time_secs),
        initial_voltage: fixed(stats.initial_voltage, 2),
        final_voltage: fixed(stats.final_voltage, 2),
        max_current: fixed(stats.max_current, 2),
        min_current: fixed(stats.min_current, 2),
        accumulated_capacity: fixed(stats.accumulated_capacity, 3),
        average_power: fixed(stats.average_power, 1),
    }
}

fn items(summary: &ChargeSummary) -> Vec<DisplayItem> {
    vec![
        DisplayItem::new("totalTime", "Общее время", summary.total_time.clone()),
        DisplayItem::new("initialVoltage", "Начальное напряжение", format!("{} В", summary.initial_voltage)),
        DisplayItem::new("finalVoltage", "Конечное напряжение", format!("{} В", summary.final_voltage)),
        DisplayItem::new("maxCurrent", "Максимальный ток", format!("{} А", summary.max_current)),
        DisplayItem::new("minCurrent", "Минимальный ток", format!("{} А", summary.min_current)),
        DisplayItem::new(
            "accumulatedCapacity",
            "Накопленная емкость",
            format!("{} Ач", summary.accumulated_capacity),
        ),
        DisplayItem::new("averagePower", "Средняя мощность", format!("{} Вт", summary.average_power)),
    ]
}

pub fn section(points: &[DataPoint]) -> Section<ChargeStats, ChargeSummary> {
    let stats = compute(points);
    let data = summarize(&stats);
    let items = if points.is_empty() { Vec::new() } else { items(&data) };
    Section { stats, data, items }
}
