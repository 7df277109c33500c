//! TradeTape Runner — export configuration, CSV rendering, and the
//! end-of-day export run.
//!
//! This crate builds on `tradetape-core` to provide:
//! - `ExportConfig` with TOML loading and output directory defaulting
//! - Trade tape rendering in the fixed 19-column schema
//! - `TapeWriter`, one file per strategy with per-file failure isolation
//! - `run_export()`, the collect → write entry point returning an `ExportReport`

pub mod config;
pub mod export;
pub mod tape;
pub mod writer;

pub use config::{ConfigError, ExportConfig, OutputDir, Quoting, DEFAULT_EXCLUDED_ACCOUNT};
pub use export::{run_export, ExportFailure, ExportReport, FailureKind, SCHEMA_VERSION};
pub use writer::{ExportError, TapeWriter, WriteFailure, WriteOutcome, WrittenFile};
