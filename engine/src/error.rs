use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Settings file error: {source}")]
    SettingsError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Spreadsheet write error: {source}")]
    XlsxError {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EtlError {
    /// Short name of the failure class, used for the one-line fatal report.
    pub fn class(&self) -> &'static str {
        match self {
            EtlError::MissingSource { .. } => "missing-source",
            EtlError::ConfigError(_) | EtlError::SettingsError { .. } => "configuration",
            EtlError::CsvSystemError { .. } | EtlError::CsvDataFormatError(_) => "malformed-input",
            EtlError::IoError { .. } => "io",
            EtlError::XlsxError { .. } => "output",
            EtlError::ProcessingError(_) | EtlError::AnyhowError(_) => "unexpected",
        }
    }

    pub fn is_missing_source(&self) -> bool {
        matches!(self, EtlError::MissingSource { .. })
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
