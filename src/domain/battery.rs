// Battery log domain models
use serde::Serialize;

/// Currents inside `(-DEAD_BAND, DEAD_BAND)` inclusive are treated as sensor noise.
pub const CURRENT_DEAD_BAND: f64 = 0.01;

/// One sampled instant of a charge/discharge log.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub timestamp: i64,
    pub voltage: f64,
    pub current: f64,
    pub ah: f64,
    pub power_voltage: f64,
    pub temp_q1: i32,
    pub temp_akb: i32,
}

impl DataPoint {
    pub fn abs_current(&self) -> f64 {
        self.current.abs()
    }

    pub fn abs_power(&self) -> f64 {
        (self.voltage * self.current).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    Discharge,
    Rest,
    Charge,
}

impl PhaseType {
    pub fn classify(current: f64) -> Self {
        if current < -CURRENT_DEAD_BAND {
            PhaseType::Discharge
        } else if current > CURRENT_DEAD_BAND {
            PhaseType::Charge
        } else {
            PhaseType::Rest
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseType::Discharge => "🔋 Разряд",
            PhaseType::Rest => "⏸️ Покой",
            PhaseType::Charge => "⚡ Заряд",
        }
    }
}

/// A contiguous run of points sharing one operational mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
    pub start_index: usize,
    /// Inclusive.
    pub end_index: usize,
    pub duration: i64,
    pub data: Vec<DataPoint>,
    pub label: String,
}

impl Phase {
    /// Builds the phase covering `points[start..=end]`; requires `start <= end < points.len()`.
    pub(crate) fn from_range(phase_type: PhaseType, points: &[DataPoint], start: usize, end: usize) -> Self {
        let data = points[start..=end].to_vec();
        let duration = data[data.len() - 1].timestamp - data[0].timestamp;

        Self {
            phase_type,
            start_index: start,
            end_index: end,
            duration,
            data,
            label: phase_type.label().to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dead_band() {
        assert_eq!(PhaseType::classify(-0.01), PhaseType::Rest);
        assert_eq!(PhaseType::classify(0.01), PhaseType::Rest);
        assert_eq!(PhaseType::classify(0.0), PhaseType::Rest);
        assert_eq!(PhaseType::classify(-0.011), PhaseType::Discharge);
        assert_eq!(PhaseType::classify(0.011), PhaseType::Charge);
    }

    #[test]
    fn test_phase_from_range() {
        let points: Vec<DataPoint> = (1..=6)
            .map(|ts| DataPoint {
                timestamp: ts * 10,
                current: 1.0,
                ..Default::default()
            })
            .collect();

        let phase = Phase::from_range(PhaseType::Charge, &points, 1, 4);
        assert_eq!(phase.len(), 4);
        assert_eq!(phase.duration, 30);
        assert_eq!(phase.label, "⚡ Заряд");
    }

    #[test]
    fn test_phase_serializes_type_field() {
        let points = vec![DataPoint { timestamp: 1, ..Default::default() }];
        let phase = Phase::from_range(PhaseType::Rest, &points, 0, 0);
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["type"], "rest");
        assert_eq!(json["startIndex"], 0);
        assert_eq!(json["data"][0]["powerVoltage"], 0.0);
    }
}
