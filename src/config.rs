//! Persisted user settings
//!
//! A flat key-value JSON document. Created with defaults on first
//! run; rewritten wholesale on every `set`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default settings file name in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "tripta_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown setting: {0}")]
    UnknownKey(String),

    #[error("invalid value for setting {key}: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Recognized settings with their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub units: String,
    pub standards: Vec<String>,
    pub export_formats: Vec<String>,
    pub validation_level: String,
    pub auto_backup: bool,
    pub backup_interval_hours: u32,
    pub simulation_enabled: bool,
    pub documentation_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            units: "mm".to_string(),
            standards: vec!["DIN_32676_A".to_string()],
            export_formats: vec!["STEP".to_string(), "DXF".to_string()],
            validation_level: "strict".to_string(),
            auto_backup: true,
            backup_interval_hours: 24,
            simulation_enabled: false,
            documentation_language: "en".to_string(),
        }
    }
}

/// Settings file handle: loads on open, saves on every mutation
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load the settings file, creating it with defaults (including
    /// parent directories) when absent
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let settings = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let defaults = Settings::default();
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                            path: path.clone(),
                            source,
                        })?;
                    }
                }
                write_settings(&path, &defaults)?;
                defaults
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Recognized keys in file order
    pub fn keys(&self) -> Vec<String> {
        match serde_json::to_value(&self.settings) {
            Ok(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Value of one setting
    pub fn get(&self, key: &str) -> Option<Value> {
        match serde_json::to_value(&self.settings) {
            Ok(Value::Object(map)) => map.get(key).cloned(),
            _ => None,
        }
    }

    /// Update one setting and rewrite the whole file.
    ///
    /// The value must deserialize into the setting's declared type;
    /// unrecognized keys are rejected rather than silently stored.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut map = match serde_json::to_value(&self.settings) {
            Ok(Value::Object(map)) => map,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        };
        if !map.contains_key(key) {
            return Err(SettingsError::UnknownKey(key.to_string()));
        }
        map.insert(key.to_string(), value);

        self.settings =
            serde_json::from_value(Value::Object(map)).map_err(|source| {
                SettingsError::InvalidValue {
                    key: key.to_string(),
                    source,
                }
            })?;
        write_settings(&self.path, &self.settings)
    }
}

fn write_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let json = serde_json::to_string_pretty(settings).expect("settings always serialize");
    std::fs::write(path, json).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}
