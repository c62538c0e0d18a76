//! Application settings.
//!
//! Every field has a default, so an empty or partial TOML file is valid.

use crate::error::ConfigError;
use crate::export::PageNumberStyle;
use echeancier_source::TableNames;
use echeancier_types::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub title: String,
    pub export_in_progress: String,
    pub export_done: String,
    pub export_failed: String,
    pub no_rows: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            title: "Échéancier de prêt".to_string(),
            export_in_progress: "Génération PDF en cours...".to_string(),
            export_done: "PDF généré".to_string(),
            export_failed: "Erreur lors de la génération du PDF".to_string(),
            no_rows: "Aucune ligne".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Exported files are named `{file_prefix}_{YYYY-MM-DD}.pdf`.
    pub file_prefix: String,
    pub output_dir: PathBuf,
    pub tables: TableNames,
    pub export: ExportOptions,
    pub page_numbers: PageNumberStyle,
    /// How long the "done" status stays visible.
    pub status_clear_after_ms: u64,
    pub messages: Messages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file_prefix: "echeancier".to_string(),
            output_dir: PathBuf::from("."),
            tables: TableNames::default(),
            export: ExportOptions::default(),
            page_numbers: PageNumberStyle::default(),
            status_clear_after_ms: 2500,
            messages: Messages::default(),
        }
    }
}

impl AppConfig {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn status_clear_after(&self) -> Duration {
        Duration::from_millis(self.status_clear_after_ms)
    }
}
