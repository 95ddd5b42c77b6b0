// Engine settings, loaded from an optional JSON file next to the working directory.
use crate::error::{EtlError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_PATH: &str = "config/etl.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub csv_delimiter: char,
    pub table_name: String,
    pub table_style: String,
    pub columns: ColumnNames,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            input_path: PathBuf::from("data/BD_OPORTUNIDADES_23_24.csv"),
            output_path: PathBuf::from("data/OPORTUNIDADES_PROCESADO.xlsx"),
            csv_delimiter: ',',
            table_name: "DatosProcesados".to_string(),
            table_style: "TableStyleMedium9".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

/// Header names of the recognized input fields and of the derived fields.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub opportunity_id: String,
    pub company_id: String,
    pub owner_id: String,
    pub amount: String,
    pub closing_date: String,
    pub zone: String,
    pub participant_count: String,
    pub closing_year: String,
    pub closing_month: String,
    pub amount_range: String,
    pub participant_status: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            opportunity_id: "OpportunityId".to_string(),
            company_id: "CompanyId".to_string(),
            owner_id: "OwnerId".to_string(),
            amount: "Amount".to_string(),
            closing_date: "ClosingDate".to_string(),
            zone: "Zone".to_string(),
            participant_count: "ParticipantCount".to_string(),
            closing_year: "ClosingYear".to_string(),
            closing_month: "ClosingMonth".to_string(),
            amount_range: "AmountRange".to_string(),
            participant_status: "ParticipantStatus".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn identifiers(&self) -> Vec<String> {
        vec![
            self.opportunity_id.clone(),
            self.company_id.clone(),
            self.owner_id.clone(),
        ]
    }
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!(path = %path.display(), "Loading settings file");
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "No settings file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.csv_delimiter)
            .ok()
            .filter(|b| b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r')
            .ok_or_else(|| {
                EtlError::ConfigError(format!(
                    "CSV delimiter must be a single ASCII character, got {:?}",
                    self.csv_delimiter
                ))
            })
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        // Excel rejects table names with whitespace or a leading digit.
        let valid_name = self
            .table_name
            .chars()
            .next()
            .map_or(false, |c| c.is_alphabetic() || c == '_')
            && !self.table_name.chars().any(char::is_whitespace);
        if !valid_name {
            return Err(EtlError::ConfigError(format!(
                "Invalid table name '{}'",
                self.table_name
            )));
        }
        Ok(())
    }
}
