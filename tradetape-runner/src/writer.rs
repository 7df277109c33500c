//! Writes one CSV file per strategy group into the output directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradetape_core::{StrategyTradeGroup, LOG_TARGET};

use crate::config::Quoting;
use crate::tape;

/// Failure writing a single strategy's file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode CSV for '{strategy}': {source}")]
    Encode {
        strategy: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file written by this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub strategy: String,
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
    /// BLAKE3 hex digest of the bytes written.
    pub digest: String,
}

/// A file this run failed to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub strategy: String,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub written: Vec<WrittenFile>,
    pub failed: Vec<WriteFailure>,
}

/// Writes trade tapes for strategy groups.
#[derive(Debug, Clone)]
pub struct TapeWriter {
    output_dir: PathBuf,
    quoting: Quoting,
}

impl TapeWriter {
    pub fn new(output_dir: impl AsRef<Path>, quoting: Quoting) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            quoting,
        }
    }

    pub fn path_for(&self, run_date: NaiveDate, strategy_name: &str) -> PathBuf {
        self.output_dir.join(tape::file_name(run_date, strategy_name))
    }

    /// Write every group, overwriting existing files. A failed file is logged
    /// and recorded; the remaining groups are still written.
    pub fn write_groups(&self, groups: &[StrategyTradeGroup], run_date: NaiveDate) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        if let Err(err) = std::fs::create_dir_all(&self.output_dir) {
            error!(
                target: LOG_TARGET,
                "ERROR: failed to create output directory {}: {err}",
                self.output_dir.display()
            );
        }

        for group in groups {
            if !tape::is_plain_file_stem(&group.strategy_name) {
                warn!(
                    target: LOG_TARGET,
                    "strategy name '{}' is not a plain file name; the file may land outside {}",
                    group.strategy_name,
                    self.output_dir.display()
                );
            }
            let path = self.path_for(run_date, &group.strategy_name);
            if !seen.insert(path.clone()) {
                warn!(
                    target: LOG_TARGET,
                    "{} already written by this run; overwriting with another '{}' instance",
                    path.display(),
                    group.strategy_name
                );
            }

            match self.write_group(group, &path) {
                Ok(file) => outcome.written.push(file),
                Err(err) => {
                    error!(target: LOG_TARGET, "ERROR: {err}");
                    outcome.failed.push(WriteFailure {
                        strategy: group.strategy_name.clone(),
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }

        outcome
    }

    fn write_group(&self, group: &StrategyTradeGroup, path: &Path) -> Result<WrittenFile, ExportError> {
        let bytes = tape::render_group(group, self.quoting).map_err(|source| ExportError::Encode {
            strategy: group.strategy_name.clone(),
            source,
        })?;
        std::fs::write(path, &bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(WrittenFile {
            strategy: group.strategy_name.clone(),
            path: path.to_path_buf(),
            rows: group.trades.len(),
            digest: blake3::hash(&bytes).to_hex().to_string(),
        })
    }
}
