//! YAML configuration for the recitation checker.
//!
//! Every stage section is optional and falls back to its defaults, so the
//! smallest valid file is just the version line.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "strict checking"
//!
//! normalize:
//!   version: 1
//!   compatibility_decomposition: true
//!   strip_verse_numbers: true
//!   strip_quranic_marks: true
//!   strip_punctuation: true
//!
//! diff:
//!   match_threshold: 0.85
//!   report_near_matches: true
//!   align:
//!     autojunk: false
//!
//! session:
//!   hint_words: 5
//!   streaming_hint_words: 3
//! ```

use std::fs;
use std::path::Path;

use diff::DiffConfig;
use normalize::NormalizeConfig;
use serde::{Deserialize, Serialize};
use session::SessionConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for every stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TasmeeConfig {
    /// Configuration format version.
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub normalize: NormalizeConfig,

    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl TasmeeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TasmeeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.normalize
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("normalize: {e}")))?;
        self.diff
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("diff: {e}")))?;
        self.session
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("session: {e}")))?;

        Ok(())
    }
}

impl Default for TasmeeConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            normalize: NormalizeConfig::default(),
            diff: DiffConfig::default(),
            session: SessionConfig::default(),
        }
    }
}
