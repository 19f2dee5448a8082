use battery_log_analyzer::domain::battery::PhaseType;
use battery_log_analyzer::{analyze, ParsedLog, Scope};

const START: i64 = 1_700_000_000;

fn line(offset: i64, voltage: &str, current: &str, ah: &str) -> String {
    format!("{};{};{};{};12,0;30;25", START + offset * 60, voltage, current, ah)
}

fn log_of(currents: &[&str]) -> String {
    currents
        .iter()
        .enumerate()
        .map(|(i, current)| line(i as i64, "3,9", current, "0"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn constant_current_charge_end_to_end() {
    let ah = [
        "0,000", "0,006", "0,011", "0,017", "0,022", "0,028", "0,033", "0,039", "0,044", "0,050",
    ];
    let raw = ah
        .iter()
        .enumerate()
        .map(|(i, ah)| line(i as i64, "4,1", "1,5", ah))
        .collect::<Vec<_>>()
        .join("\n");

    let result = analyze(&raw, Scope::All);

    assert_eq!(result.phases.len(), 1);
    assert_eq!(result.phases[0].phase_type, PhaseType::Charge);
    assert_eq!(result.phases[0].data.len(), 10);
    assert_eq!(result.charge_summary.data.accumulated_capacity, "0.050");
    // first point at or above 0.04 Ah is the ninth
    assert_eq!(result.efficiency.stats.time_80_percent_secs, 8 * 60);
    assert_eq!(result.efficiency.data.time_80_percent, "8 м");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["chargeSummary"]["data"]["accumulatedCapacity"], "0.050");
    assert_eq!(json["efficiency"]["data"]["time80Percent"], "8 м");
    assert_eq!(json["phases"][0]["type"], "charge");
}

#[test]
fn short_interruption_is_absorbed() {
    let mut currents = vec!["1,5"; 10];
    currents.extend(["-1,5"; 2]);
    currents.extend(["1,5"; 10]);

    let phases = analyze(&log_of(&currents), Scope::All).phases;
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].phase_type, PhaseType::Charge);
    assert_eq!(phases[0].data.len(), 22);
}

#[test]
fn dead_band_boundary() {
    let rest = ParsedLog::parse(&log_of(&["-0,01"; 6]));
    assert_eq!(rest.phases[0].phase_type, PhaseType::Rest);

    let discharge = ParsedLog::parse(&log_of(&["-0,011"; 6]));
    assert_eq!(discharge.phases[0].phase_type, PhaseType::Discharge);
}

#[test]
fn parser_drops_duplicates_and_invalid_rows() {
    let raw = [
        line(0, "3,70", "1", "0"),
        line(0, "3,99", "1", "0"),
        "0;3,7;1;0;12;30;25".to_string(),
        "abc;3,7;1;0;12;30;25".to_string(),
        "1700000600;3,7;1".to_string(),
        String::new(),
        line(1, "3.70", "1", "0"),
    ]
    .join("\n");

    let log = ParsedLog::parse(&raw);
    assert_eq!(log.points.len(), 2);
    assert_eq!(log.points[0].voltage, 3.7);
    assert_eq!(log.points[0].voltage, log.points[1].voltage);
}

#[test]
fn repeated_analysis_is_identical() {
    let raw = log_of(&["-2"; 8]);
    assert_eq!(analyze(&raw, Scope::All), analyze(&raw, Scope::All));
}

#[test]
fn unknown_phase_scope_means_whole_log() {
    let mut currents = vec!["-2"; 8];
    currents.extend(["1,5"; 8]);
    let raw = log_of(&currents);

    let all = analyze(&raw, Scope::All);
    assert_eq!(all.phases.len(), 2);
    assert_eq!(analyze(&raw, Scope::Phase(99)), all);
    assert_ne!(analyze(&raw, Scope::Phase(1)), all);
}

#[test]
fn empty_log_is_safe() {
    let result = analyze("", Scope::All);
    assert!(result.phases.is_empty());
    assert_eq!(result.charge_summary.data.accumulated_capacity, "0.000");
    assert!(result.power_quality.items.is_empty());
    assert!(result.efficiency.items.is_empty());
}
