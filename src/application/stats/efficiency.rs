// Efficiency - Charge rate, cycle energy, CC share and uniformity, time to 80 %
use super::format::{duration, fixed};
use super::{
    CC_THRESHOLD_RATIO, cycle_energy_wh, div_positive, finite, max_abs_current, max_capacity, mean,
    std_deviation, total_time_hours,
};
use crate::domain::analysis::{DisplayItem, Efficiency, EfficiencyStats, Section};
use crate::domain::battery::DataPoint;

const CAPACITY_MARK: f64 = 0.8;

pub fn compute(points: &[DataPoint]) -> EfficiencyStats {
    let Some(first) = points.first() else {
        return EfficiencyStats::default();
    };

    let max_capacity = max_capacity(points);
    let cc_threshold = max_abs_current(points) * CC_THRESHOLD_RATIO;

    let cc_points = points
        .iter()
        .filter(|p| p.abs_current() > cc_threshold)
        .count();
    let cc_currents = finite(
        points
            .iter()
            .map(DataPoint::abs_current)
            .filter(|c| *c > cc_threshold),
    );
    let cc_average = mean(&cc_currents);
    let cc_uniformity = div_positive(std_deviation(&cc_currents, cc_average), cc_average) * 100.0;

    let capacity_mark = max_capacity * CAPACITY_MARK;
    let time_80_percent_secs = match points.iter().position(|p| p.ah >= capacity_mark) {
        Some(index) if index > 0 => points[index].timestamp - first.timestamp,
        _ => 0,
    };

    EfficiencyStats {
        charge_rate: div_positive(max_capacity, total_time_hours(points)),
        cycle_energy_wh: cycle_energy_wh(points),
        cc_threshold,
        cc_phase_efficiency: cc_points as f64 / points.len() as f64 * 100.0,
        cc_current_uniformity: cc_uniformity,
        time_80_percent_secs,
    }
}

pub fn summarize(stats: &EfficiencyStats) -> Efficiency {
    Efficiency {
        charge_rate: fixed(stats.charge_rate, 3),
        cycle_energy: fixed(stats.cycle_energy_wh, 1),
        cc_phase_efficiency: fixed(stats.cc_phase_efficiency, 0),
        cc_current_uniformity: fixed(stats.cc_current_uniformity, 0),
        time_80_percent: duration(stats.time_80_percent_secs),
    }
}

fn items(efficiency: &Efficiency) -> Vec<DisplayItem> {
    vec![
        DisplayItem::new("chargeRate", "Скорость заряда", format!("{} Ач/ч", efficiency.charge_rate)),
        DisplayItem::new("cycleEnergy", "Энергия цикла", format!("{} Втч", efficiency.cycle_energy)),
        DisplayItem::new("ccPhaseEfficiency", "КПД фазы CC", format!("{} %", efficiency.cc_phase_efficiency)),
        DisplayItem::new(
            "ccCurrentUniformity",
            "Равномерность тока CC",
            format!("± {} %", efficiency.cc_current_uniformity),
        ),
        DisplayItem::new("time80Percent", "Время 80% заряда", efficiency.time_80_percent.clone()),
    ]
}

pub fn section(points: &[DataPoint]) -> Section<EfficiencyStats, Efficiency> {
    let stats = compute(points);
    let data = summarize(&stats);
    let items = if points.is_empty() { Vec::new() } else { items(&data) };
    Section { stats, data, items }
}
