// Applies the stage list to a loaded table
use crate::stages::Stage;
use shared::models::Table;

pub fn run_stages(stages: &[Box<dyn Stage>], table: &mut Table) {
    for stage in stages {
        if !stage.is_applicable(table) {
            tracing::info!(
                stage = stage.name(),
                required = ?stage.required_columns(),
                "Skipping stage, required columns absent"
            );
            continue;
        }
        let before = table.len();
        stage.apply(table);
        tracing::info!(
            stage = stage.name(),
            parameters = %stage.parameters(),
            rows_in = before,
            rows_out = table.len(),
            "Stage applied"
        );
    }
}
