// Record parser - Raw semicolon-separated log text to ordered data points
use crate::domain::battery::DataPoint;
use csv::{ReaderBuilder, StringRecord, Trim};

/// `timestamp;voltage;current;ah;powerVoltage;tempQ1;tempAkb`
const FIELD_COUNT: usize = 7;

/// Parse a whole log into points.
///
/// Malformed numbers read as zero. Points with a non-positive timestamp are dropped, as are
/// points repeating the timestamp of the point kept just before them. Line order is preserved.
pub fn parse(raw: &str) -> Vec<DataPoint> {
    // No quoting: a `"` inside a field is kept as a literal character.
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(raw.trim().as_bytes());

    let mut points: Vec<DataPoint> = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping unreadable record: {}", e);
                continue;
            }
        };
        let Some(point) = parse_record(&record) else {
            continue;
        };
        if point.timestamp <= 0 {
            continue;
        }
        if points.last().is_some_and(|prev| prev.timestamp == point.timestamp) {
            continue;
        }
        points.push(point);
    }

    points
}

fn parse_record(record: &StringRecord) -> Option<DataPoint> {
    if record.len() < FIELD_COUNT {
        return None;
    }

    Some(DataPoint {
        timestamp: parse_integer(&record[0]),
        voltage: parse_decimal(&record[1]),
        current: parse_decimal(&record[2]),
        ah: parse_decimal(&record[3]),
        power_voltage: parse_decimal(&record[4]),
        temp_q1: parse_temperature(&record[5]),
        temp_akb: parse_temperature(&record[6]),
    })
}

/// Reads the numeric prefix of a field, accepting `,` as the decimal separator.
/// Only digits count, so `Infinity` and `NaN` read as zero.
pub fn parse_decimal(field: &str) -> f64 {
    if field.is_empty() {
        return 0.0;
    }
    let normalized = field.replacen(',', ".", 1);
    let end = float_prefix_len(normalized.as_bytes());
    normalized[..end].parse::<f64>().unwrap_or(0.0)
}

/// Reads the integer prefix of a field; `"25.9"` yields 25. Out-of-range values saturate.
pub fn parse_integer(field: &str) -> i64 {
    let end = integer_prefix_len(field.as_bytes());
    if end == 0 {
        return 0;
    }
    field[..end].parse::<i64>().unwrap_or(if field.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn parse_temperature(field: &str) -> i32 {
    i32::try_from(parse_integer(field)).unwrap_or(0)
}

fn sign_len(bytes: &[u8]) -> usize {
    matches!(bytes.first(), Some(b'+') | Some(b'-')) as usize
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn integer_prefix_len(bytes: &[u8]) -> usize {
    let sign = sign_len(bytes);
    match digits_from(bytes, sign) {
        0 => 0,
        digits => sign + digits,
    }
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut pos = sign_len(bytes);
    let int_digits = digits_from(bytes, pos);
    pos += int_digits;
    let mut end = if int_digits > 0 { pos } else { 0 };

    if bytes.get(pos) == Some(&b'.') {
        let frac_digits = digits_from(bytes, pos + 1);
        if frac_digits > 0 {
            pos += 1 + frac_digits;
            end = pos;
        }
    }

    if end == 0 {
        return 0;
    }

    // Exponent only counts when it carries digits: "1e" reads as 1.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digits_from(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic_line() {
        let points = parse("1700000000;3,70;-1,25;0,125;12,1;31;28\n");
        assert_eq!(points.len(), 1);
        let p = points[0];
        assert_eq!(p.timestamp, 1_700_000_000);
        assert_eq!(p.voltage, 3.70);
        assert_eq!(p.current, -1.25);
        assert_eq!(p.ah, 0.125);
        assert_eq!(p.power_voltage, 12.1);
        assert_eq!(p.temp_q1, 31);
        assert_eq!(p.temp_akb, 28);
    }

    #[test]
    fn test_decimal_normalization() {
        assert_eq!(parse_decimal("3,70"), parse_decimal("3.70"));
        assert_eq!(parse_decimal("3,70"), 3.70);
    }

    #[test]
    fn test_numeric_prefix_and_fallback() {
        assert_eq!(parse_decimal("3.7V"), 3.7);
        assert_eq!(parse_decimal(".5"), 0.5);
        assert_eq!(parse_decimal("-.5"), -0.5);
        assert_eq!(parse_decimal("5."), 5.0);
        assert_eq!(parse_decimal("1e3"), 1000.0);
        assert_eq!(parse_decimal("1e"), 1.0);
        assert_eq!(parse_decimal("abc"), 0.0);
        assert_eq!(parse_decimal("nan"), 0.0);
        assert_eq!(parse_decimal("inf"), 0.0);
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_integer("25.9"), 25);
        assert_eq!(parse_integer("-4"), -4);
        assert_eq!(parse_integer("+12abc"), 12);
        assert_eq!(parse_integer("x12"), 0);
        assert_eq!(parse_decimal("Infinity"), 0.0);
    }

    #[test]
    fn test_integer_overflow_saturates() {
        assert_eq!(parse_integer("99999999999999999999"), i64::MAX);
        assert_eq!(parse_integer("-99999999999999999999"), i64::MIN);

        let points = parse("99999999999999999999;3.7;1;0;12;25;0");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, i64::MAX);
    }

    #[test]
    fn test_quotes_are_literal() {
        let points = parse("1;\"3,7\";1;0;12;25;0\n2;3.8;\"1;0;12;25;0");
        assert_eq!(points.len(), 2);
        // the quote stops the numeric prefix
        assert_eq!(points[0].voltage, 0.0);
        assert_eq!(points[1].voltage, 3.8);
        assert_eq!(points[1].current, 0.0);
    }

    #[test]
    fn test_rejects_short_lines_and_keeps_extra_fields() {
        let raw = "1;3.7;1.0;0;12;25\n2;3.7;1.0;0;12;25;0;extra;fields\n";
        let points = parse(raw);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, 2);
    }

    #[test]
    fn test_zero_and_malformed_timestamps_are_dropped() {
        let raw = "timestamp;voltage;current;ah;pv;q1;akb\n0;3.7;1;0;12;25;0\n-5;3.7;1;0;12;25;0\n7;3.7;1;0;12;25;0";
        let points = parse(raw);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, 7);
    }

    #[test]
    fn test_adjacent_duplicates_are_dropped() {
        let raw = "10;3.7;1;0;12;25;0\n10;3.9;1;0;12;25;0\n11;3.7;1;0;12;25;0\n10;3.8;1;0;12;25;0";
        let points = parse(raw);
        let timestamps: Vec<i64> = points.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![10, 11, 10]);
        assert_eq!(points[0].voltage, 3.7);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let raw = "\r\n1;3.7;1;0;12;25;0\r\n\r\n   \n2;3.8;1;0;12;25;0\r\n";
        let points = parse(raw);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].voltage, 3.8);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
        assert!(parse("garbage").is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_has_positive_unique_adjacent_timestamps(
            rows in prop::collection::vec((-3i64..50, -5.0f64..5.0), 0..60)
        ) {
            let raw: String = rows
                .iter()
                .map(|(ts, current)| format!("{};3.7;{};0;12;25;0\n", ts, current))
                .collect();
            let points = parse(&raw);

            prop_assert!(points.iter().all(|p| p.timestamp > 0));
            prop_assert!(points.windows(2).all(|w| w[0].timestamp != w[1].timestamp));
        }

        #[test]
        fn prop_comma_and_dot_agree(int in 0u32..10_000, frac in 0u32..1000) {
            let dot = format!("{}.{:03}", int, frac);
            let comma = format!("{},{:03}", int, frac);
            prop_assert_eq!(parse_decimal(&dot), parse_decimal(&comma));
        }
    }
}
