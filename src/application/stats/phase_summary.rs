// Phase summary - One overview row per detected phase
use super::format::{duration, fixed, wall_clock};
use super::{finite, max_of, mean, min_of};
use crate::domain::analysis::PhaseSummaryRow;
use crate::domain::battery::{DataPoint, Phase, PhaseType};
use chrono::FixedOffset;

fn row(index: usize, phase: &Phase, offset: &FixedOffset) -> PhaseSummaryRow {
    let currents = finite(phase.data.iter().map(DataPoint::abs_current));
    let voltages = finite(phase.data.iter().map(|p| p.voltage));

    let avg_current = match phase.phase_type {
        PhaseType::Rest => "~0 А".to_string(),
        PhaseType::Discharge | PhaseType::Charge => format!("{} А", fixed(mean(&currents), 2)),
    };

    let start = phase.data.first().map_or(0, |p| p.timestamp);
    let end = phase.data.last().map_or(0, |p| p.timestamp);

    PhaseSummaryRow {
        key: index,
        phase_type: phase.label.clone(),
        duration: duration(phase.duration),
        start_time: wall_clock(start, offset),
        end_time: wall_clock(end, offset),
        points: phase.data.len(),
        avg_current,
        voltage_range: format!("{} - {} В", fixed(min_of(&voltages), 1), fixed(max_of(&voltages), 1)),
    }
}

pub fn summarize(phases: &[Phase], offset: &FixedOffset) -> Vec<PhaseSummaryRow> {
    phases
        .iter()
        .enumerate()
        .map(|(index, phase)| row(index, phase, offset))
        .collect()
}
