use super::Stage;
use serde_json::Value;
use shared::models::{AmountRange, Table, Value as Cell};

/// Lower edges of Medium, High and Very High. A boundary value belongs to the
/// higher bucket; Low starts just above zero.
pub const BOUNDARIES: [f64; 3] = [10_000.0, 50_000.0, 100_000.0];

pub fn bucket(amount: f64) -> Option<AmountRange> {
    if amount.is_nan() || amount <= 0.0 {
        return None;
    }
    let index = BOUNDARIES.iter().take_while(|edge| amount >= **edge).count();
    Some(AmountRange::ALL[index])
}

/// Labels each record with the range its amount falls in.
pub struct BucketAmounts {
    amount_column: String,
    range_column: String,
}

impl BucketAmounts {
    pub fn new(amount_column: &str, range_column: &str) -> Self {
        Self {
            amount_column: amount_column.to_string(),
            range_column: range_column.to_string(),
        }
    }
}

impl Stage for BucketAmounts {
    fn name(&self) -> &str {
        "bucket_amounts"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "column": self.amount_column,
            "target": self.range_column,
            "boundaries": BOUNDARIES,
        })
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![self.amount_column.as_str()]
    }

    fn apply(&self, table: &mut Table) {
        let Some(amount_idx) = table.column_index(&self.amount_column) else {
            return;
        };
        let range_idx = table.ensure_column(&self.range_column);
        table.derive_column(range_idx, |record| {
            record
                .get(amount_idx)
                .as_number()
                .and_then(bucket)
                .map(|range| Cell::Text(range.label().to_string()))
                .unwrap_or(Cell::Missing)
        });
    }
}
