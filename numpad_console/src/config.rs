//! Session configuration
//!
//! Settings come from an optional JSON file; command-line flags override
//! individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use numpad_core::{NumberFormat, DEFAULT_PRECISION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Console error
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {field} {input:?} for {kind} entry")]
    InvalidNumber {
        field: &'static str,
        input: String,
        kind: KindName,
    },

    #[error("Unknown key {0:?}")]
    UnknownKey(char),
}

/// Console result
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Numeric kind selected for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KindName {
    #[value(name = "int")]
    #[serde(rename = "int")]
    Integer,
    #[default]
    Float,
    Decimal,
}

impl KindName {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindName::Integer => "int",
            KindName::Float => "float",
            KindName::Decimal => "decimal",
        }
    }
}

impl std::fmt::Display for KindName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one keypad session
///
/// Numbers are kept as text until the kind is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub kind: KindName,
    pub value: String,
    pub precision: u32,
    pub upper_bound: Option<String>,
    pub separator: Option<char>,
    pub locale: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            kind: KindName::default(),
            value: "0".into(),
            precision: DEFAULT_PRECISION,
            upper_bound: None,
            separator: None,
            locale: None,
        }
    }
}

impl SessionConfig {
    /// Loads a config file
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConsoleError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConsoleError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decimal separator: explicit setting, then locale, then `.`
    pub fn separator(&self) -> char {
        match (self.separator, &self.locale) {
            (Some(separator), _) => separator,
            (None, Some(locale)) => NumberFormat::separator_for_locale(locale),
            (None, None) => '.',
        }
    }
}
