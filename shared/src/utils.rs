// Formatting helpers for cell values, shared by the identifier stage and the writer.

/// Renders a number the way a spreadsheet user expects to read it back:
/// whole values drop the fractional part (`123`, not `123.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        // -0.0 prints as "0"
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Parses a trimmed decimal string into a finite number.
///
/// Accepts the forms `str::parse::<f64>` accepts (`"500"`, `"12.5"`, `"1e3"`),
/// but rejects `NaN` and infinities so that they never masquerade as amounts.
pub fn parse_finite(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns `base`, or `base.1`, `base.2`, ... if a name equal to it ignoring
/// case is already in `existing`. Excel table headers must differ beyond case.
pub fn unique_column_name(existing: &[String], base: &str) -> String {
    let taken = |name: &str| existing.iter().any(|c| c.to_lowercase() == name.to_lowercase());
    let mut candidate = base.to_string();
    let mut suffix = 1;
    while taken(&candidate) {
        candidate = format!("{}.{}", base, suffix);
        suffix += 1;
    }
    candidate
}
