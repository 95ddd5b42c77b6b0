use super::Stage;
use serde_json::Value;
use shared::models::{Table, Value as Cell};

/// Uppercases identifier columns. Numbers and dates are stringified first;
/// missing identifiers stay missing.
pub struct UppercaseIdentifiers {
    columns: Vec<String>,
}

impl UppercaseIdentifiers {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

pub fn normalize_identifier(value: &Cell) -> Cell {
    match value {
        Cell::Missing => Cell::Missing,
        other => Cell::Text(other.to_string().to_uppercase()),
    }
}

impl Stage for UppercaseIdentifiers {
    fn name(&self) -> &str {
        "uppercase_identifiers"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "columns": self.columns })
    }

    fn required_columns(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    // Each identifier column is optional on its own.
    fn is_applicable(&self, table: &Table) -> bool {
        self.columns.iter().any(|c| table.has_column(c))
    }

    fn apply(&self, table: &mut Table) {
        for column in &self.columns {
            if let Some(index) = table.column_index(column) {
                table.map_column(index, normalize_identifier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::Record;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier(&Cell::from("opp-001a")), Cell::from("OPP-001A"));
        assert_eq!(normalize_identifier(&Cell::Number(123.0)), Cell::from("123"));
        assert_eq!(normalize_identifier(&Cell::Number(1.5)), Cell::from("1.5"));
        let date = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(normalize_identifier(&Cell::Date(date)), Cell::from("2023-03-01"));
        assert_eq!(normalize_identifier(&Cell::Missing), Cell::Missing);
    }

    #[test]
    fn test_applies_only_to_present_columns() {
        let mut table = Table::new(vec!["CompanyId".to_string(), "Zone".to_string()]);
        table.push(Record::new(vec!["acme".into(), "north".into()]));
        let stage = UppercaseIdentifiers::new(vec![
            "OpportunityId".to_string(),
            "CompanyId".to_string(),
            "OwnerId".to_string(),
        ]);
        assert!(stage.is_applicable(&table));
        stage.apply(&mut table);
        assert_eq!(table.records()[0].get(0), &Cell::from("ACME"));
        assert_eq!(table.records()[0].get(1), &Cell::from("north"));
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_not_applicable_without_identifiers() {
        let table = Table::new(vec!["Zone".to_string()]);
        let stage = UppercaseIdentifiers::new(vec!["OwnerId".to_string()]);
        assert!(!stage.is_applicable(&table));
    }
}
