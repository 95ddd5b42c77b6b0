use super::Stage;
use serde_json::Value;
use shared::models::{Record, Table};
use std::collections::HashSet;

/// Removes exact duplicate records, keeping the first occurrence.
pub struct DropDuplicates;

impl DropDuplicates {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DropDuplicates {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for DropDuplicates {
    fn name(&self) -> &str {
        "drop_duplicates"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn required_columns(&self) -> Vec<&str> {
        Vec::new()
    }

    fn apply(&self, table: &mut Table) {
        let mut seen: HashSet<Record> = HashSet::with_capacity(table.len());
        table.retain(|record| seen.insert(record.clone()));
    }
}

/// Removes records whose `column` value is missing.
pub struct RequireField {
    column: String,
}

impl RequireField {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl Stage for RequireField {
    fn name(&self) -> &str {
        "require_field"
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
        table.retain(|record| !record.get(index).is_missing());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Value as Cell;

    fn table(rows: Vec<Vec<Cell>>) -> Table {
        let mut table = Table::new(vec!["Zone".to_string(), "Amount".to_string()]);
        for row in rows {
            table.push(Record::new(row));
        }
        table
    }

    #[test]
    fn test_drop_duplicates_keeps_first_in_order() {
        let mut t = table(vec![
            vec!["North".into(), 10.0.into()],
            vec!["South".into(), 20.0.into()],
            vec!["North".into(), 10.0.into()],
            vec!["East".into(), Cell::Missing],
            vec!["East".into(), Cell::Missing],
        ]);
        DropDuplicates::new().apply(&mut t);
        assert_eq!(t.len(), 3);
        assert_eq!(t.records()[0].get(0), &Cell::from("North"));
        assert_eq!(t.records()[1].get(0), &Cell::from("South"));
        assert_eq!(t.records()[2].get(0), &Cell::from("East"));
    }

    #[test]
    fn test_drop_duplicates_is_idempotent() {
        let mut once = table(vec![
            vec!["North".into(), 10.0.into()],
            vec!["North".into(), 10.0.into()],
            vec!["North".into(), "10".into()],
        ]);
        DropDuplicates::new().apply(&mut once);
        let mut twice = once.clone();
        DropDuplicates::new().apply(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_require_field_drops_missing_zone() {
        let mut t = table(vec![
            vec![Cell::Missing, 10.0.into()],
            vec!["North".into(), 20.0.into()],
            vec!["".into(), 30.0.into()],
        ]);
        RequireField::new("Zone").apply(&mut t);
        // Empty text is a value; only Missing is dropped.
        assert_eq!(t.len(), 2);
        assert_eq!(t.records()[0].get(1), &Cell::Number(20.0));
    }

    #[test]
    fn test_require_field_skipped_when_column_absent() {
        let mut t = Table::new(vec!["Amount".to_string()]);
        t.push(Record::new(vec![Cell::Missing]));
        let stage = RequireField::new("Zone");
        assert!(!stage.is_applicable(&t));
        stage.apply(&mut t);
        assert_eq!(t.len(), 1);
    }
}
