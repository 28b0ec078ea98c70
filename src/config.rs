//! Configuration handling for the registration form

use crate::form::{registration_schema, FormSchema, RegistrationOptions};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration, read from `config.json` in the platform config dir
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Options offered by the country select
    pub countries: Option<Vec<String>>,
    /// Options offered by the gender radio group
    pub genders: Option<Vec<String>>,
    /// Minimum password length
    pub min_password_length: Option<usize>,
    /// JSON schema file replacing the built-in registration schema
    pub schema_path: Option<PathBuf>,
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "regform", "regform")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Registration options with configured values over the defaults
    pub fn registration_options(&self) -> RegistrationOptions {
        let defaults = RegistrationOptions::default();
        RegistrationOptions {
            genders: self.genders.clone().unwrap_or(defaults.genders),
            countries: self.countries.clone().unwrap_or(defaults.countries),
            min_password_length: self
                .min_password_length
                .unwrap_or(defaults.min_password_length),
        }
    }

    /// The schema to run: the configured schema file, or the registration schema
    pub fn build_schema(&self) -> Result<FormSchema> {
        if let Some(path) = &self.schema_path {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading schema {}", path.display()))?;
            let schema = FormSchema::from_json(&json)
                .with_context(|| format!("loading schema {}", path.display()))?;
            tracing::info!("Loaded form schema from {}", path.display());
            return Ok(schema);
        }
        Ok(registration_schema(&self.registration_options())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.countries.is_none());
        assert!(config.genders.is_none());
        assert!(config.min_password_length.is_none());
        assert!(config.schema_path.is_none());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            countries: Some(vec!["Germany".to_string(), "France".to_string()]),
            min_password_length: Some(8),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"min_password_length": 12, "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.min_password_length, Some(12));
    }

    #[test]
    fn test_registration_options_merge() {
        let config = AppConfig {
            genders: Some(vec!["Prefer not to say".to_string()]),
            ..Default::default()
        };
        let options = config.registration_options();
        assert_eq!(options.genders, vec!["Prefer not to say".to_string()]);
        assert_eq!(options.countries, RegistrationOptions::default().countries);
        assert_eq!(options.min_password_length, 6);
    }

    #[test]
    fn test_build_default_schema() {
        let schema = AppConfig::default().build_schema().unwrap();
        assert_eq!(schema.len(), 11);
    }

    #[test]
    fn test_build_schema_from_file() {
        let dir = TempDir::new().unwrap();
        let schema_path = dir.path().join("schema.json");
        fs::write(
            &schema_path,
            r#"{"fields": [{"name": "nickname", "kind": "text",
                "rules": [{"kind": "required"}]}]}"#,
        )
        .unwrap();
        let config = AppConfig {
            schema_path: Some(schema_path),
            ..Default::default()
        };
        let schema = config.build_schema().unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["nickname"]);
    }

    #[test]
    fn test_build_schema_rejects_bad_file() {
        let dir = TempDir::new().unwrap();
        let schema_path = dir.path().join("schema.json");
        fs::write(
            &schema_path,
            r#"{"fields": [{"name": "a", "kind": "text"}, {"name": "a", "kind": "text"}]}"#,
        )
        .unwrap();
        let config = AppConfig {
            schema_path: Some(schema_path),
            ..Default::default()
        };
        assert!(config.build_schema().is_err());
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = AppConfig::config_path();
    }
}
