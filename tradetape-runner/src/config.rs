//! Export configuration, loadable from TOML.
//!
//! ```toml
//! output_dir = "D:/exports/trades"
//! excluded_account = "Sim101"
//! quoting = "literal"
//! merge_instances = false
//! ```
//!
//! Every key is optional. An empty `output_dir` resolves to the user's
//! desktop directory at run time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account skipped by default: the platform's built-in simulation account.
pub const DEFAULT_EXCLUDED_ACCOUNT: &str = "Sim101";

/// Errors from loading an export configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How field values are written into the CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quoting {
    /// Values joined verbatim, never quoted. A value containing a comma
    /// shifts the columns of its row.
    #[default]
    Literal,
    /// Values quoted when they contain a delimiter, quote, or line break.
    Strict,
}

impl Quoting {
    pub fn quote_style(self) -> csv::QuoteStyle {
        match self {
            Quoting::Literal => csv::QuoteStyle::Never,
            Quoting::Strict => csv::QuoteStyle::Necessary,
        }
    }
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the CSV files are written to. Empty means desktop.
    pub output_dir: String,
    /// Account whose strategies are never exported.
    pub excluded_account: String,
    pub quoting: Quoting,
    /// Merge strategy instances that share a normalized name into one file.
    pub merge_instances: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            excluded_account: DEFAULT_EXCLUDED_ACCOUNT.to_string(),
            quoting: Quoting::Literal,
            merge_instances: false,
        }
    }
}

/// Output directory after defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    pub path: PathBuf,
    /// True when `output_dir` was empty and a fallback was used.
    pub substituted: bool,
}

impl ExportConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolve the output directory: the configured path, or desktop, then
    /// home, then the current directory.
    pub fn resolve_output_dir(&self) -> OutputDir {
        if !self.output_dir.is_empty() {
            return OutputDir {
                path: PathBuf::from(&self.output_dir),
                substituted: false,
            };
        }
        let path = dirs::desktop_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        OutputDir {
            path,
            substituted: true,
        }
    }
}
