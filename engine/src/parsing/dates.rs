use chrono::{NaiveDate, NaiveDateTime};

// Two-digit-year formats come first: `%Y` would otherwise read "23" as year 23.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y",
    "%d-%m-%y", "%d-%m-%Y",
    "%d.%m.%y", "%d.%m.%Y",
    "%Y-%m-%d", "%Y/%m/%d",
];

// Only consulted when the day-first reading is not a valid calendar date.
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y"];

const TIME_SUFFIXES: &[&str] = &[" %H:%M", " %H:%M:%S", "T%H:%M:%S"];

pub const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Parses a date string day-first ("01/03/2023" is 1 March).
///
/// An optional time of day is accepted and dropped. A slash or dash date whose
/// day-first reading is impossible but whose month-first reading is valid
/// ("12/25/2023") is read month-first. Returns `None` for anything else.
pub fn parse_day_first(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    try_formats(s, DAY_FIRST_FORMATS).or_else(|| try_formats(s, MONTH_FIRST_FORMATS))
}

fn try_formats(s: &str, formats: &[&str]) -> Option<NaiveDate> {
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
        for suffix in TIME_SUFFIXES {
            let with_time = format!("{}{}", fmt, suffix);
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, &with_time) {
                return Some(dt.date());
            }
        }
    }
    None
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_FORMAT).to_string()
}
