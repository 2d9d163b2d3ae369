//! Strict decoders for the loosely typed fields of the feed.
//!
//! Flags arrive as JSON booleans, numbers, or strings such as `"1"` and `"True"`.
//! They are decoded by matching a closed set of spellings; nothing received from
//! the feed is ever evaluated.

use crate::data_fetcher::models::LivePeriod;
use serde_json::Value;

/// Decodes an integer from a JSON number or a numeric string.
pub fn decode_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Decodes a boolean flag. Missing, null and unrecognised values are `false`.
pub fn decode_flag(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                true
            } else if trimmed.eq_ignore_ascii_case("false") || trimmed.is_empty() {
                false
            } else if let Ok(n) = trimmed.parse::<i64>() {
                n != 0
            } else {
                tracing::debug!("Unrecognised flag value {:?}, treating as false", s);
                false
            }
        }
        Some(other) => {
            tracing::debug!("Unexpected flag type {:?}, treating as false", other);
            false
        }
    }
}

/// Decodes `livePeriod`; unknown or missing values become `NotStarted`.
pub fn decode_live_period(value: Option<&Value>) -> LivePeriod {
    decode_integer(value).map_or(LivePeriod::NotStarted, LivePeriod::from_code)
}

/// Renders a scalar as display text. Null, arrays and objects render empty.
pub fn value_to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
