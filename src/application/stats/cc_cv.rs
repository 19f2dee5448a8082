// CC/CV split - Constant-current and constant-voltage sub-phases of a charge
use super::format::{duration, fixed};
use super::{CC_THRESHOLD_RATIO, finite, max_abs_current, mean, total_time_secs};
use crate::domain::analysis::{CcCvRow, CcCvSplit, TableSection};
use crate::domain::battery::DataPoint;

pub fn compute(points: &[DataPoint]) -> CcCvSplit {
    let Some(last) = points.last() else {
        return CcCvSplit::default();
    };
    let last_index = points.len() - 1;
    let threshold = max_abs_current(points) * CC_THRESHOLD_RATIO;

    let cc_start = points
        .iter()
        .position(|p| p.abs_current() > threshold)
        .unwrap_or(0);
    // The final sample never closes CC; a log that never tapers is all CC.
    let cc_end = (cc_start..last_index)
        .find(|&i| points[i].abs_current() < threshold)
        .unwrap_or(last_index);

    let total_time_secs = total_time_secs(points);
    let cc_time_secs = if cc_end > cc_start {
        points[cc_end].timestamp - points[cc_start].timestamp
    } else {
        0
    };

    let cc_currents = finite(points[cc_start..cc_end].iter().map(DataPoint::abs_current));
    let cv_voltages = finite(points[cc_end..].iter().map(|p| p.voltage));

    CcCvSplit {
        total_time_secs,
        cc_start_index: cc_start,
        cc_end_index: cc_end,
        cc_time_secs,
        cv_time_secs: total_time_secs - cc_time_secs,
        cc_voltage_start: points[cc_start].voltage,
        cc_voltage_end: points[cc_end].voltage,
        cc_current_avg: mean(&cc_currents),
        cv_voltage_avg: mean(&cv_voltages),
        cv_current_start: points[cc_end].abs_current(),
        cv_current_end: last.abs_current(),
    }
}

fn share(part_secs: i64, total_secs: i64) -> String {
    if total_secs > 0 {
        format!("{} %", fixed(part_secs as f64 / total_secs as f64 * 100.0, 0))
    } else {
        "0 %".to_string()
    }
}

pub fn rows(split: &CcCvSplit) -> Vec<CcCvRow> {
    vec![
        CcCvRow {
            key: 1,
            phase: "CC (постоянный ток)".to_string(),
            time: duration(split.cc_time_secs),
            voltage: format!(
                "{} → {} В",
                fixed(split.cc_voltage_start, 2),
                fixed(split.cc_voltage_end, 1)
            ),
            current: format!("~ {} А", fixed(split.cc_current_avg, 2)),
            cycle: share(split.cc_time_secs, split.total_time_secs),
        },
        CcCvRow {
            key: 2,
            phase: "CV (постоянное напряжение)".to_string(),
            time: duration(split.cv_time_secs),
            voltage: format!("~ {} В", fixed(split.cv_voltage_avg, 2)),
            current: format!(
                "{} → {} А",
                fixed(split.cv_current_start, 2),
                fixed(split.cv_current_end, 2)
            ),
            cycle: share(split.cv_time_secs, split.total_time_secs),
        },
    ]
}

pub fn table(points: &[DataPoint]) -> TableSection<CcCvSplit, CcCvRow> {
    let stats = compute(points);
    let rows = if points.is_empty() { Vec::new() } else { rows(&stats) };
    TableSection { stats, rows }
}
