// Engine main entry point: one load-transform-write run, then exit.
use engine::config::settings::{EngineSettings, DEFAULT_SETTINGS_PATH};
use engine::error::Result;
use engine::services::{EtlService, RunSummary};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

fn run() -> Result<RunSummary> {
    let settings = EngineSettings::load_or_default(Path::new(DEFAULT_SETTINGS_PATH))?;
    info!(input = %settings.input_path.display(), "Starting opportunity ETL run");
    EtlService::new(settings).run()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(summary) => {
            info!(
                rows_loaded = summary.rows_loaded,
                rows_written = summary.rows_written,
                path = %summary.output_path.display(),
                "File processed and saved"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(class = e.class(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
