// Pipeline stages over the in-memory opportunity table
pub mod amount_filter;
pub mod amount_range;
pub mod amounts;
pub mod closing_date;
pub mod dedup;
pub mod identifiers;
pub mod participant_status;

use crate::config::settings::ColumnNames;
use crate::parsing::number_words::EnglishNumberWords;
use serde_json::Value;
use shared::models::Table;

// Common trait for all stages
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Columns and constants this stage instance works with
    fn required_columns(&self) -> Vec<&str>;

    /// Schema check run before `apply`. A stage whose columns are absent is skipped.
    fn is_applicable(&self, table: &Table) -> bool {
        self.required_columns().iter().all(|c| table.has_column(c))
    }

    fn apply(&self, table: &mut Table);
}

/// The opportunity pipeline, in execution order.
///
/// Amount parsing must precede the zero/missing filter, and the filter must
/// precede bucketing, so that every bucketed amount is numeric and non-zero.
pub fn default_stages(columns: &ColumnNames) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(dedup::DropDuplicates::new()),
        Box::new(dedup::RequireField::new(&columns.zone)),
        Box::new(identifiers::UppercaseIdentifiers::new(columns.identifiers())),
        Box::new(amounts::ParseAmounts::new(&columns.amount, Box::new(EnglishNumberWords::new()))),
        Box::new(closing_date::DeriveClosingDate::new(
            &columns.closing_date,
            &columns.closing_year,
            &columns.closing_month,
        )),
        Box::new(amount_filter::DropEmptyAmounts::new(&columns.amount)),
        Box::new(amount_range::BucketAmounts::new(&columns.amount, &columns.amount_range)),
        Box::new(participant_status::DeriveParticipantStatus::new(
            &columns.participant_count,
            &columns.participant_status,
        )),
    ]
}
