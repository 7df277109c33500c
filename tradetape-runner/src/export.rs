//! End-of-day export — collect, then write.
//!
//! `run_export()` is the single entry point a host adapter calls once per
//! session boundary. It never returns an error: provider and I/O failures are
//! logged and carried in the returned [`ExportReport`].

use std::path::PathBuf;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use tradetape_core::{collect, Collection, DateWindow, TradeProvider, LOG_TARGET};

use crate::config::ExportConfig;
use crate::writer::{TapeWriter, WriteOutcome, WrittenFile};

/// Current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Which layer a recorded failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Provider,
    Io,
}

/// A failure caught during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub kind: FailureKind,
    /// What was being processed: `run`, an account, `account/strategy`, or a file path.
    pub scope: String,
    pub message: String,
}

/// Summary of one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_date: NaiveDate,
    pub window: DateWindow,
    pub output_dir: PathBuf,
    /// Sum of profit over every collected trade.
    pub total_pnl: f64,
    /// Strategy groups handed to the writer.
    pub strategies: usize,
    pub trades: usize,
    pub files: Vec<WrittenFile>,
    pub failures: Vec<ExportFailure>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn wrote_nothing(&self) -> bool {
        self.files.is_empty()
    }
}

/// Collect trades in `window` from every account except the excluded one
/// and write one CSV per strategy group, named after `run_date`.
pub fn run_export(
    provider: &dyn TradeProvider,
    window: &DateWindow,
    run_date: NaiveDate,
    config: &ExportConfig,
) -> ExportReport {
    let output = config.resolve_output_dir();
    if output.substituted {
        info!(
            target: LOG_TARGET,
            "Save directory is empty, defaulting to Desktop: {}",
            output.path.display()
        );
    }

    let mut collection = collect(provider, &config.excluded_account, window);
    if config.merge_instances {
        collection = collection.merge_instances();
    }

    let mut report = ExportReport {
        schema_version: SCHEMA_VERSION,
        run_date,
        window: *window,
        output_dir: output.path.clone(),
        total_pnl: collection.total_pnl,
        strategies: collection.groups.len(),
        trades: collection.trade_count(),
        files: Vec::new(),
        failures: provider_failures(&collection),
    };

    if collection.is_empty() {
        info!(target: LOG_TARGET, "No trades to save to a csv today.");
        return report;
    }

    let writer = TapeWriter::new(&output.path, config.quoting);
    let outcome = writer.write_groups(&collection.groups, run_date);
    info!(
        target: LOG_TARGET,
        "PnL: {} Saved {} strategies to path: {}",
        collection.total_pnl,
        outcome.written.len(),
        output.path.display()
    );

    absorb(&mut report, outcome);
    report
}

fn provider_failures(collection: &Collection) -> Vec<ExportFailure> {
    collection
        .failures
        .iter()
        .map(|f| {
            let scope = match (&f.account, &f.strategy) {
                (Some(account), Some(strategy)) => format!("{account}/{strategy}"),
                (Some(account), None) => account.clone(),
                _ => "run".to_string(),
            };
            ExportFailure {
                kind: FailureKind::Provider,
                scope,
                message: f.message.clone(),
            }
        })
        .collect()
}

fn absorb(report: &mut ExportReport, outcome: WriteOutcome) {
    report.files = outcome.written;
    report
        .failures
        .extend(outcome.failed.into_iter().map(|f| ExportFailure {
            kind: FailureKind::Io,
            scope: f.path.display().to_string(),
            message: f.message,
        }));
}
