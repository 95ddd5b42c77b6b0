// engine/src/services/etl_service/mod.rs
// The EtlService ties the loader, the stage list and the writer together.
// Nothing is written until every stage has run, so a failed run leaves no
// partial output behind.
use crate::config::settings::EngineSettings;
use crate::data::csv_parser::CsvTableParser;
use crate::data::xlsx_writer::{table_style, TableOptions, XlsxTableWriter};
use crate::error::Result;
use crate::stages::{default_stages, Stage};
use shared::models::Table;
use std::fs;
use std::path::PathBuf;

pub mod transform;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_written: usize,
    pub columns: Vec<String>,
    pub output_path: PathBuf,
}

pub struct EtlService {
    settings: EngineSettings,
    stages: Vec<Box<dyn Stage>>,
}

impl EtlService {
    pub fn new(settings: EngineSettings) -> Self {
        let stages = default_stages(&settings.columns);
        EtlService { settings, stages }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn load(&self) -> Result<Table> {
        let delimiter = self.settings.delimiter_byte()?;
        let identifiers = self.settings.columns.identifiers();
        let table = CsvTableParser::load_table(&self.settings.input_path, delimiter, &identifiers)?;
        tracing::info!(
            path = %self.settings.input_path.display(),
            rows = table.len(),
            columns = ?table.columns(),
            "Columns detected"
        );
        Ok(table)
    }

    pub fn transform(&self, table: &mut Table) {
        transform::run_stages(&self.stages, table);
        tracing::info!(rows = table.len(), "Transformations completed");
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        let options = TableOptions {
            name: self.settings.table_name.clone(),
            style: table_style(&self.settings.table_style)?,
        };
        if let Some(parent) = self.settings.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        XlsxTableWriter::write_table(table, &self.settings.output_path, &options)?;
        tracing::info!(path = %self.settings.output_path.display(), rows = table.len(), "Output written");
        Ok(())
    }

    pub fn run(&self) -> Result<RunSummary> {
        self.settings.validate()?;
        // Resolve the style up front so a bad setting fails before any work.
        table_style(&self.settings.table_style)?;

        let mut table = self.load()?;
        let rows_loaded = table.len();
        self.transform(&mut table);
        self.write(&table)?;

        Ok(RunSummary {
            rows_loaded,
            rows_written: table.len(),
            columns: table.columns().to_vec(),
            output_path: self.settings.output_path.clone(),
        })
    }
}
