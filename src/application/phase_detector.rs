// Phase detector - Segments a point sequence into discharge / rest / charge phases
use crate::domain::battery::{DataPoint, Phase, PhaseType};

/// A differing run must reach this many points before it opens a phase, and a phase
/// must hold this many points before it is emitted on its own.
pub const MIN_PHASE_POINTS: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Run {
    phase_type: PhaseType,
    start: usize,
}

/// Fold accumulator: the open phase, a not-yet-confirmed differing run, and output.
#[derive(Debug, Default)]
struct Scan {
    open: Option<Run>,
    pending: Option<Run>,
    phases: Vec<Phase>,
}

impl Scan {
    fn step(mut self, points: &[DataPoint], index: usize, detected: PhaseType) -> Self {
        let Some(open) = self.open else {
            self.open = Some(Run { phase_type: detected, start: index });
            return self;
        };

        if detected == open.phase_type {
            // A blip of 3 points or fewer stays inside the open phase.
            self.pending = None;
            return self;
        }

        let pending = match self.pending {
            Some(run) if run.phase_type == detected => run,
            _ => Run { phase_type: detected, start: index },
        };

        if index + 1 - pending.start < MIN_PHASE_POINTS {
            self.pending = Some(pending);
            return self;
        }

        if pending.start - open.start >= MIN_PHASE_POINTS {
            self.phases.push(Phase::from_range(
                open.phase_type,
                points,
                open.start,
                pending.start - 1,
            ));
            self.open = Some(pending);
        } else {
            // Too short to stand alone: the open run takes the new type and keeps its start.
            self.open = Some(Run { phase_type: detected, start: open.start });
        }
        self.pending = None;
        self
    }

    fn finish(mut self, points: &[DataPoint]) -> Vec<Phase> {
        if let Some(open) = self.open {
            self.phases.push(Phase::from_range(
                open.phase_type,
                points,
                open.start,
                points.len() - 1,
            ));
        }
        self.phases
    }
}

/// Split `points` into time-ordered, non-overlapping phases.
pub fn detect(points: &[DataPoint]) -> Vec<Phase> {
    points
        .iter()
        .enumerate()
        .fold(Scan::default(), |scan, (index, point)| {
            scan.step(points, index, PhaseType::classify(point.current))
        })
        .finish(points)
}
