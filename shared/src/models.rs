use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::utils::{format_number, unique_column_name};

/// A single cell. `Missing` is a state of its own, distinct from zero and from
/// the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    #[default]
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

// Numbers compare by value, with every NaN equal to every other NaN, so that
// two rows read from the same dirty source still count as duplicates.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Number(n) => {
                let bits = if *n == 0.0 {
                    0.0f64.to_bits()
                } else if n.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    n.to_bits()
                };
                bits.hash(state);
            }
            Value::Date(d) => d.hash(state),
            Value::Missing => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Missing => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Missing, Into::into)
    }
}

/// One row of the opportunity dataset, aligned with its table's column list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> &Value {
        static MISSING: Value = Value::Missing;
        self.values.get(index).unwrap_or(&MISSING)
    }

    pub fn set(&mut self, index: usize, value: Value) {
        if index >= self.values.len() {
            self.values.resize(index + 1, Value::Missing);
        }
        self.values[index] = value;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An in-memory table: a schema of column names plus rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a record, padding it with `Missing` up to the schema width.
    pub fn push(&mut self, mut record: Record) {
        if record.values.len() < self.columns.len() {
            record.values.resize(self.columns.len(), Value::Missing);
        }
        self.records.push(record);
    }

    /// Returns the index of `name`, adding it as an all-`Missing` column if absent.
    ///
    /// If only a case variant of `name` exists (`amountrange` for `AmountRange`),
    /// that column is left alone and the new one gets a `.N` suffix.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        let unique = unique_column_name(&self.columns, name);
        self.columns.push(unique);
        let width = self.columns.len();
        for record in &mut self.records {
            record.values.resize(width, Value::Missing);
        }
        width - 1
    }

    /// Rewrites every value of column `index` in place.
    pub fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        for record in &mut self.records {
            let updated = f(record.get(index));
            record.set(index, updated);
        }
    }

    /// Sets column `target` from a function of each whole record.
    pub fn derive_column<F>(&mut self, target: usize, mut f: F)
    where
        F: FnMut(&Record) -> Value,
    {
        for record in &mut self.records {
            let derived = f(record);
            record.set(target, derived);
        }
    }

    /// Keeps only the records for which `keep` returns true, preserving order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(keep);
    }
}

/// Amount-range label, in ascending order of amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AmountRange {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AmountRange {
    pub const ALL: [AmountRange; 4] = [
        AmountRange::Low,
        AmountRange::Medium,
        AmountRange::High,
        AmountRange::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AmountRange::Low => "Low",
            AmountRange::Medium => "Medium",
            AmountRange::High => "High",
            AmountRange::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParticipantStatus {
    Active,
    Inactive,
    Unknown,
}

impl ParticipantStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ParticipantStatus::Active => "Active",
            ParticipantStatus::Inactive => "Inactive",
            ParticipantStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["Zone".to_string(), "Amount".to_string()]);
        table.push(Record::new(vec!["North".into(), 10.0.into()]));
        table.push(Record::new(vec!["South".into()]));
        table
    }

    #[test]
    fn test_push_pads_short_records() {
        let table = sample_table();
        assert_eq!(table.records()[1].values().len(), 2);
        assert!(table.records()[1].get(1).is_missing());
    }

    #[test]
    fn test_ensure_column_appends_once() {
        let mut table = sample_table();
        let idx = table.ensure_column("AmountRange");
        assert_eq!(idx, 2);
        assert_eq!(table.ensure_column("AmountRange"), 2);
        assert_eq!(table.columns().len(), 3);
        assert!(table.records().iter().all(|r| r.get(2).is_missing()));
    }

    #[test]
    fn test_ensure_column_avoids_case_variant() {
        let mut table = Table::new(vec!["Zone".to_string(), "amountrange".to_string()]);
        table.push(Record::new(vec!["North".into(), "legacy".into()]));
        let idx = table.ensure_column("AmountRange");
        assert_eq!(idx, 2);
        assert_eq!(table.columns()[2], "AmountRange.1");
        assert_eq!(table.records()[0].get(1), &Value::from("legacy"));
        assert!(table.records()[0].get(2).is_missing());
    }

    #[test]
    fn test_ensure_column_existing_returns_index() {
        let mut table = sample_table();
        assert_eq!(table.ensure_column("Amount"), 1);
    }

    #[test]
    fn test_value_equality_treats_nan_and_signed_zero() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::Text("1".to_string()));
        assert_eq!(Value::Missing, Value::Missing);

        let mut set = HashSet::new();
        set.insert(Value::Number(0.0));
        assert!(set.contains(&Value::Number(-0.0)));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(500.0).to_string(), "500");
        assert_eq!(Value::Missing.to_string(), "");
        let date = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2023-03-01");
    }

    #[test]
    fn test_value_from_option() {
        assert!(Value::from(None::<f64>).is_missing());
        assert_eq!(Value::from(Some(3.0)), Value::Number(3.0));
    }

    #[test]
    fn test_retain_preserves_order() {
        let mut table = Table::new(vec!["N".to_string()]);
        for n in 1..=5 {
            table.push(Record::new(vec![(n as f64).into()]));
        }
        table.retain(|r| r.get(0).as_number().map_or(false, |n| n as i64 % 2 == 1));
        let kept: Vec<f64> = table.records().iter().filter_map(|r| r.get(0).as_number()).collect();
        assert_eq!(kept, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AmountRange::VeryHigh.to_string(), "Very High");
        assert_eq!(ParticipantStatus::Inactive.label(), "Inactive");
        assert!(AmountRange::Low < AmountRange::Medium);
    }
}
