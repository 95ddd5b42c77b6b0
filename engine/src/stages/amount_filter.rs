use super::Stage;
use serde_json::Value;
use shared::models::Table;

/// Drops records whose amount is missing or exactly zero.
pub struct DropEmptyAmounts {
    column: String,
}

impl DropEmptyAmounts {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl Stage for DropEmptyAmounts {
    fn name(&self) -> &str {
        "drop_empty_amounts"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "column": self.column })
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.column.as_str()]
    }

    fn apply(&self, table: &mut Table) {
        let Some(index) = table.column_index(&self.column) else {
            return;
        };
        table.retain(|record| record.get(index).as_number().map_or(false, |n| n != 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Record, Value as Cell};

    #[test]
    fn test_drops_zero_and_missing() {
        let mut table = Table::new(vec!["Amount".to_string()]);
        for v in [Cell::Number(0.0), Cell::Missing, Cell::Number(500.0), Cell::Number(-20.0), Cell::Number(-0.0)] {
            table.push(Record::new(vec![v]));
        }
        DropEmptyAmounts::new("Amount").apply(&mut table);
        let kept: Vec<f64> = table.records().iter().filter_map(|r| r.get(0).as_number()).collect();
        assert_eq!(kept, vec![500.0, -20.0]);
    }

    #[test]
    fn test_skipped_without_amount_column() {
        let table = Table::new(vec!["Zone".to_string()]);
        assert!(!DropEmptyAmounts::new("Amount").is_applicable(&table));
    }
}
