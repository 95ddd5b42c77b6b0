use super::Stage;
use crate::parsing::coerce_number;
use serde_json::Value;
use shared::models::{ParticipantStatus, Table, Value as Cell};

pub fn status_for(count: &Cell) -> ParticipantStatus {
    match coerce_number(count) {
        Some(n) if n > 0.0 => ParticipantStatus::Active,
        Some(n) if n == 0.0 => ParticipantStatus::Inactive,
        // Negative counts are as unusable as missing ones.
        _ => ParticipantStatus::Unknown,
    }
}

/// Labels each record Active, Inactive or Unknown from its participant count.
/// Without a count column every record is Unknown.
pub struct DeriveParticipantStatus {
    count_column: String,
    status_column: String,
}

impl DeriveParticipantStatus {
    pub fn new(count_column: &str, status_column: &str) -> Self {
        Self {
            count_column: count_column.to_string(),
            status_column: status_column.to_string(),
        }
    }
}

impl Stage for DeriveParticipantStatus {
    fn name(&self) -> &str {
        "derive_participant_status"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "column": self.count_column, "target": self.status_column })
    }

    // Runs on every schema: an absent count column still yields a status column.
    fn required_columns(&self) -> Vec<&str> {
        Vec::new()
    }

    fn apply(&self, table: &mut Table) {
        let count_idx = table.column_index(&self.count_column);
        if count_idx.is_none() {
            tracing::info!(column = %self.count_column, "Participant column absent, every status is Unknown");
        }
        let status_idx = table.ensure_column(&self.status_column);
        table.derive_column(status_idx, |record| {
            let status = match count_idx {
                Some(idx) => status_for(record.get(idx)),
                None => ParticipantStatus::Unknown,
            };
            Cell::Text(status.label().to_string())
        });
    }
}
