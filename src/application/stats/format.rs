// Display formatting shared by the aggregators
use chrono::{DateTime, FixedOffset};

/// Fixed-point rendering with halves rounded away from zero; non-finite values render as
/// zero and `-0` loses its sign.
pub fn fixed(value: f64, digits: usize) -> String {
    let value = if value.is_finite() && value != 0.0 { value } else { 0.0 };
    // `{:.N}` breaks exact ties toward even, so settle those first.
    let value = if is_decimal_tie(value, digits) {
        let scale = 10f64.powi(digits as i32);
        (value * scale).round() / scale
    } else {
        value
    };
    format!("{:.*}", digits, value)
}

/// Whether `value` lies exactly halfway between two neighbours with `digits` decimals,
/// i.e. its binary expansion ends at 2^-(digits + 1).
fn is_decimal_tie(value: f64, digits: usize) -> bool {
    if value == 0.0 || !value.is_finite() {
        return false;
    }
    let bits = value.abs().to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };
    exponent + mantissa.trailing_zeros() as i64 == -(digits as i64 + 1)
}

/// `"2 ч 5 м"` from one hour up, `"5 м"` below; negative spans read as zero.
pub fn duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{} ч {} м", hours, minutes)
    } else {
        format!("{} м", minutes)
    }
}

/// `"dd.mm, HH:MM"` for a timestamp in seconds, shown at `offset`.
pub fn wall_clock(timestamp: i64, offset: &FixedOffset) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(offset).format("%d.%m, %H:%M").to_string())
        .unwrap_or_else(|| "–".to_string())
}
