//! Conversions between upstream ticks and milliseconds.
//!
//! Jellyfin and Emby report positions and runtimes in 100ns ticks, so one
//! millisecond is 10,000 ticks. Upstream payloads are loosely typed: the same
//! field may arrive as a number, a numeric string, or not at all, and these
//! helpers treat anything unparseable as "unknown" rather than failing.

use serde_json::Value;

/// Ticks per millisecond (upstream uses 100ns ticks).
pub const TICKS_PER_MS: u64 = 10_000;

/// Convert an upstream tick value to whole milliseconds.
///
/// Absent, null, non-numeric and negative values yield `None`. Zero is a
/// meaningful position and yields `Some(0)`.
pub fn ticks_to_ms(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    if let Some(ticks) = value.as_u64() {
        return Some(ticks / TICKS_PER_MS);
    }
    let ticks = numeric(value)?;
    Some((ticks / TICKS_PER_MS as f64).floor() as u64)
}

/// Read a value that is already in milliseconds, flooring fractions.
pub fn millis(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    if let Some(ms) = value.as_u64() {
        return Some(ms);
    }
    numeric(value).map(|ms| ms.floor() as u64)
}

/// Percentage of `runtime_ms` covered by `position_ms`, rounded.
///
/// Returns 0 when either side is unknown or zero. The result is not clamped:
/// a position past the runtime reports more than 100.
pub fn progress_percent(runtime_ms: Option<u64>, position_ms: Option<u64>) -> u32 {
    match (runtime_ms, position_ms) {
        (Some(runtime), Some(position)) if runtime > 0 && position > 0 => {
            (position as f64 / runtime as f64 * 100.0).round() as u32
        }
        _ => 0,
    }
}

/// Non-negative finite number from a JSON number or numeric string.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticks_to_ms_numbers() {
        assert_eq!(ticks_to_ms(Some(&json!(600_000_000))), Some(60_000));
        assert_eq!(ticks_to_ms(Some(&json!(9_999))), Some(0));
        assert_eq!(ticks_to_ms(Some(&json!(10_000))), Some(1));
        assert_eq!(ticks_to_ms(Some(&json!(123_456_789))), Some(12_345));
        assert_eq!(ticks_to_ms(Some(&json!(25_000.7))), Some(2));
    }

    #[test]
    fn test_ticks_to_ms_zero_is_known() {
        assert_eq!(ticks_to_ms(Some(&json!(0))), Some(0));
        assert_eq!(ticks_to_ms(Some(&json!("0"))), Some(0));
    }

    #[test]
    fn test_ticks_to_ms_unknown_inputs() {
        assert_eq!(ticks_to_ms(None), None);
        assert_eq!(ticks_to_ms(Some(&Value::Null)), None);
        assert_eq!(ticks_to_ms(Some(&json!("abc"))), None);
        assert_eq!(ticks_to_ms(Some(&json!(true))), None);
        assert_eq!(ticks_to_ms(Some(&json!({"ticks": 1}))), None);
        assert_eq!(ticks_to_ms(Some(&json!(-50_000))), None);
    }

    #[test]
    fn test_ticks_to_ms_numeric_string() {
        assert_eq!(ticks_to_ms(Some(&json!("300000000"))), Some(30_000));
        assert_eq!(ticks_to_ms(Some(&json!(" 20000 "))), Some(2));
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(Some(&json!(1500))), Some(1500));
        assert_eq!(millis(Some(&json!("1500.9"))), Some(1500));
        assert_eq!(millis(Some(&json!("soon"))), None);
        assert_eq!(millis(None), None);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(Some(60_000), Some(30_000)), 50);
        assert_eq!(progress_percent(Some(3), Some(1)), 33);
        assert_eq!(progress_percent(Some(3), Some(2)), 67);
        assert_eq!(progress_percent(Some(1000), Some(1000)), 100);
    }

    #[test]
    fn test_progress_percent_unknown_or_zero() {
        assert_eq!(progress_percent(Some(0), Some(100)), 0);
        assert_eq!(progress_percent(Some(100), Some(0)), 0);
        assert_eq!(progress_percent(None, Some(100)), 0);
        assert_eq!(progress_percent(Some(100), None), 0);
    }

    #[test]
    fn test_progress_percent_is_not_clamped() {
        assert_eq!(progress_percent(Some(1000), Some(1100)), 110);
    }
}
