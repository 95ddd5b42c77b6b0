// Value-level parsers used by the pipeline stages. None of them fail loudly:
// a value that cannot be read comes back as `None` and the stage records it
// as missing.
pub mod dates;
pub mod number_words;

use shared::models::Value;
use shared::utils::parse_finite;

/// Generic numeric coercion: numbers pass through, text is parsed as a
/// decimal, everything else (dates, missing, unreadable text) has no number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(*n),
        Value::Text(s) => parse_finite(s),
        _ => None,
    }
}
