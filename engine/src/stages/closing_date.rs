use super::Stage;
use crate::parsing::dates::{format_date, parse_day_first, OUTPUT_FORMAT};
use chrono::Datelike;
use serde_json::Value;
use shared::models::{Table, Value as Cell};

/// Parses the closing date day-first, derives year and month columns from it,
/// then rewrites the date as `DD/MM/YYYY` text.
pub struct DeriveClosingDate {
    date_column: String,
    year_column: String,
    month_column: String,
}

impl DeriveClosingDate {
    pub fn new(date_column: &str, year_column: &str, month_column: &str) -> Self {
        Self {
            date_column: date_column.to_string(),
            year_column: year_column.to_string(),
            month_column: month_column.to_string(),
        }
    }
}

pub fn parse_closing_date(value: &Cell) -> Cell {
    match value {
        Cell::Date(d) => Cell::Date(*d),
        Cell::Text(s) => parse_day_first(s).into(),
        _ => Cell::Missing,
    }
}

impl Stage for DeriveClosingDate {
    fn name(&self) -> &str {
        "derive_closing_date"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "column": self.date_column,
            "year_column": self.year_column,
            "month_column": self.month_column,
            "output_format": OUTPUT_FORMAT,
        })
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.date_column.as_str()]
    }

    fn apply(&self, table: &mut Table) {
        let Some(date_idx) = table.column_index(&self.date_column) else {
            return;
        };

        let mut degraded = 0usize;
        table.map_column(date_idx, |value| {
            let parsed = parse_closing_date(value);
            if parsed.is_missing() && !value.is_missing() {
                degraded += 1;
                tracing::debug!(column = %self.date_column, value = %value, "Unparseable closing date, marking as missing");
            }
            parsed
        });
        if degraded > 0 {
            tracing::info!(column = %self.date_column, count = degraded, "Closing dates that could not be parsed were set to missing");
        }

        // Derive before reformatting: the text form no longer carries a date.
        let year_idx = table.ensure_column(&self.year_column);
        table.derive_column(year_idx, |record| {
            record.get(date_idx).as_date().map(|d| f64::from(d.year())).into()
        });
        let month_idx = table.ensure_column(&self.month_column);
        table.derive_column(month_idx, |record| {
            record.get(date_idx).as_date().map(|d| f64::from(d.month())).into()
        });

        table.map_column(date_idx, |value| value.as_date().map(format_date).into());
    }
}
