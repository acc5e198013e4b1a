//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LocalizationConfig, SkillConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::localization::{CatalogError, LocaleTable};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SkillConfig, ConfigError> {
    let config: SkillConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SkillConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Build the locale table named by the localization settings.
pub fn load_locale_table(config: &LocalizationConfig) -> Result<LocaleTable, CatalogError> {
    match &config.strings_path {
        Some(path) => LocaleTable::load(Path::new(path), &config.fallback_language),
        None => LocaleTable::builtin(&config.fallback_language),
    }
}
