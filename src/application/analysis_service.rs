// Analysis orchestrator - Parse once, detect once, aggregate over the chosen scope
use crate::application::stats::{cc_cv, charge, efficiency, params, phase_summary, power, thermal};
use crate::application::{parser, phase_detector};
use crate::domain::analysis::{AnalysisResult, Scope};
use crate::domain::battery::{DataPoint, Phase};
use chrono::{FixedOffset, Offset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Offset used when phase boundaries are rendered as wall-clock times.
    pub utc_offset: FixedOffset,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
        }
    }
}

impl AnalysisOptions {
    /// `None` when the offset lies outside ±24 h.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|utc_offset| Self { utc_offset })
    }
}

/// A log after parsing and phase detection, before any scope is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    pub points: Vec<DataPoint>,
    pub phases: Vec<Phase>,
}

impl ParsedLog {
    pub fn parse(raw: &str) -> Self {
        let points = parser::parse(raw);
        let phases = phase_detector::detect(&points);
        Self { points, phases }
    }

    /// The scope actually applied: an unknown phase index falls back to the whole log.
    pub fn effective_scope(&self, scope: Scope) -> Scope {
        match scope {
            Scope::Phase(index) if index < self.phases.len() => scope,
            _ => Scope::All,
        }
    }

    pub fn scoped(&self, scope: Scope) -> &[DataPoint] {
        match self.effective_scope(scope) {
            Scope::Phase(index) => &self.phases[index].data,
            Scope::All => &self.points,
        }
    }

    pub fn analyze(self, scope: Scope, options: &AnalysisOptions) -> AnalysisResult {
        let data = self.scoped(scope);

        let charge_summary = charge::section(data);
        let power_quality = power::section(data);
        let efficiency = efficiency::section(data);
        let calculated_params = params::section(data);
        let cc_cv_phases = cc_cv::table(data);
        let thermal_characteristics = thermal::table(data);
        let phases_summary = phase_summary::summarize(&self.phases, &options.utc_offset);

        AnalysisResult {
            phases: self.phases,
            phases_summary,
            charge_summary,
            power_quality,
            efficiency,
            calculated_params,
            cc_cv_phases,
            thermal_characteristics,
        }
    }
}

/// Analyze a raw log, rendering wall-clock times in UTC.
pub fn analyze(raw: &str, scope: Scope) -> AnalysisResult {
    analyze_with(raw, scope, &AnalysisOptions::default())
}

pub fn analyze_with(raw: &str, scope: Scope, options: &AnalysisOptions) -> AnalysisResult {
    let log = ParsedLog::parse(raw);
    tracing::debug!(
        points = log.points.len(),
        phases = log.phases.len(),
        scope = %log.effective_scope(scope),
        "analyzing battery log"
    );
    log.analyze(scope, options)
}
