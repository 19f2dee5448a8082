// Analysis result domain models
use super::battery::Phase;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which points the aggregators are fed: the whole log or one detected phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    All,
    Phase(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope '{0}': expected \"all\" or a phase index")]
pub struct ScopeParseError(pub String);

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Scope::All);
        }
        s.parse::<usize>()
            .map(Scope::Phase)
            .map_err(|_| ScopeParseError(s.to_string()))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Phase(index) => write!(f, "{}", index),
        }
    }
}

// Serialized the way clients send it back: "all" or a bare index.
impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scope::All => serializer.serialize_str("all"),
            Scope::Phase(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// A name/value pair ready for a description list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub key: String,
    pub label: String,
    pub value: String,
}

impl DisplayItem {
    pub fn new(key: &str, label: &str, value: String) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// One analytics block: raw numbers, their rounded display strings and the rendered items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<S, V> {
    pub stats: S,
    pub data: V,
    pub items: Vec<DisplayItem>,
}

/// One analytics block rendered as table rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSection<S, R> {
    pub stats: S,
    pub rows: Vec<R>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeStats {
    pub total_time_secs: i64,
    pub initial_voltage: f64,
    pub final_voltage: f64,
    pub max_current: f64,
    pub min_current: f64,
    pub accumulated_capacity: f64,
    pub average_power: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSummary {
    pub total_time: String,
    pub initial_voltage: String,
    pub final_voltage: String,
    pub max_current: String,
    pub min_current: String,
    pub accumulated_capacity: String,
    pub average_power: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityStats {
    pub samples: usize,
    pub average_voltage: f64,
    pub std_deviation: f64,
    pub ripple_mv: f64,
    pub stability_percent: f64,
    pub max_deviation_mv: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQuality {
    pub average_power_voltage: String,
    pub power_ripple: String,
    pub power_stability: String,
    pub max_deviation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyStats {
    pub charge_rate: f64,
    pub cycle_energy_wh: f64,
    pub cc_threshold: f64,
    pub cc_phase_efficiency: f64,
    pub cc_current_uniformity: f64,
    pub time_80_percent_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Efficiency {
    pub charge_rate: String,
    pub cycle_energy: String,
    pub cc_phase_efficiency: String,
    pub cc_current_uniformity: String,
    #[serde(rename = "time80Percent")]
    pub time_80_percent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedParamsStats {
    pub internal_resistance: f64,
    pub c_rate: f64,
    pub energy_density: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedParams {
    pub internal_resistance: String,
    pub c_rate: String,
    pub energy_density: String,
}

/// Boundaries and per-sub-phase figures of the CC/CV split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CcCvSplit {
    pub total_time_secs: i64,
    pub cc_start_index: usize,
    pub cc_end_index: usize,
    pub cc_time_secs: i64,
    pub cv_time_secs: i64,
    pub cc_voltage_start: f64,
    pub cc_voltage_end: f64,
    pub cc_current_avg: f64,
    pub cv_voltage_avg: f64,
    pub cv_current_start: f64,
    pub cv_current_end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CcCvRow {
    pub key: u8,
    pub phase: String,
    pub time: String,
    pub voltage: String,
    pub current: String,
    pub cycle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub samples: usize,
    pub start: i32,
    pub max: i32,
    pub growth: i32,
}

impl ChannelStats {
    pub fn has_sensor(&self) -> bool {
        self.samples > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalStats {
    pub q1: ChannelStats,
    pub battery: ChannelStats,
    pub heat_per_amp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalRow {
    pub key: u8,
    pub name: String,
    pub start: String,
    pub max: String,
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummaryRow {
    pub key: usize,
    #[serde(rename = "type")]
    pub phase_type: String,
    pub duration: String,
    pub start_time: String,
    pub end_time: String,
    pub points: usize,
    pub avg_current: String,
    pub voltage_range: String,
}

/// Everything derived from one log for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub phases: Vec<Phase>,
    pub phases_summary: Vec<PhaseSummaryRow>,
    pub charge_summary: Section<ChargeStats, ChargeSummary>,
    pub power_quality: Section<PowerQualityStats, PowerQuality>,
    pub efficiency: Section<EfficiencyStats, Efficiency>,
    pub calculated_params: Section<CalculatedParamsStats, CalculatedParams>,
    pub cc_cv_phases: TableSection<CcCvSplit, CcCvRow>,
    pub thermal_characteristics: TableSection<ThermalStats, ThermalRow>,
}
