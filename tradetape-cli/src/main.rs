//! TradeTape CLI — end-of-day trade export.
//!
//! Commands:
//! - `export` — collect yesterday's trades from an account snapshot and write
//!   one CSV per strategy
//! - `preview` — collect only and print a per-strategy summary

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use tradetape_core::{collect, DateWindow, Snapshot, TradeProvider, LOG_TARGET};
use tradetape_runner::{run_export, ExportConfig, ExportReport, Quoting};

#[derive(Parser)]
#[command(
    name = "tradetape",
    about = "TradeTape CLI — export completed trades to per-strategy CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect trades for the target day and write one CSV per strategy.
    Export {
        /// JSON snapshot of accounts, strategies, and trade histories.
        #[arg(long)]
        snapshot: PathBuf,

        /// Path to a TOML export config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory. Defaults to the desktop when unset.
        #[arg(long)]
        output_dir: Option<String>,

        /// Account to skip. Defaults to Sim101.
        #[arg(long)]
        exclude_account: Option<String>,

        /// Trading day to export (YYYY-MM-DD). Defaults to the day before the run date.
        #[arg(long)]
        date: Option<String>,

        /// Date used in file names (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        run_date: Option<String>,

        /// Quote values containing commas, quotes, or line breaks.
        #[arg(long, default_value_t = false)]
        strict_quoting: bool,

        /// Write strategy instances sharing a name into one file.
        #[arg(long, default_value_t = false)]
        merge_instances: bool,

        /// Print the run report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Collect trades for the target day and print a summary without writing files.
    Preview {
        /// JSON snapshot of accounts, strategies, and trade histories.
        #[arg(long)]
        snapshot: PathBuf,

        /// Account to skip. Defaults to Sim101.
        #[arg(long)]
        exclude_account: Option<String>,

        /// Trading day to preview (YYYY-MM-DD). Defaults to yesterday.
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            snapshot,
            config,
            output_dir,
            exclude_account,
            date,
            run_date,
            strict_quoting,
            merge_instances,
            json,
        } => {
            let mut export_config = match config {
                Some(path) => ExportConfig::from_file(&path)?,
                None => ExportConfig::default(),
            };
            if let Some(dir) = output_dir {
                export_config.output_dir = dir;
            }
            if let Some(account) = exclude_account {
                export_config.excluded_account = account;
            }
            if strict_quoting {
                export_config.quoting = Quoting::Strict;
            }
            if merge_instances {
                export_config.merge_instances = true;
            }
            run_export_cmd(&snapshot, &export_config, date, run_date, json)
        }
        Commands::Preview {
            snapshot,
            exclude_account,
            date,
        } => run_preview(&snapshot, exclude_account, date),
    }
}

fn parse_date(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid --{flag} '{s}', expected YYYY-MM-DD"))
        })
        .transpose()
}

fn resolve_dates(date: Option<String>, run_date: Option<String>) -> Result<(DateWindow, NaiveDate)> {
    let run_date = parse_date(run_date.as_deref(), "run-date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let window = match parse_date(date.as_deref(), "date")? {
        Some(day) => DateWindow::single_day(day),
        None => DateWindow::previous_day(run_date),
    };
    Ok((window, run_date))
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let snapshot = Snapshot::from_file(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    info!(
        target: LOG_TARGET,
        "Loaded {} account(s) from {} provider at {}",
        snapshot.accounts.len(),
        snapshot.name(),
        path.display()
    );
    Ok(snapshot)
}

fn run_export_cmd(
    snapshot_path: &Path,
    config: &ExportConfig,
    date: Option<String>,
    run_date: Option<String>,
    json: bool,
) -> Result<()> {
    let (window, run_date) = resolve_dates(date, run_date)?;
    let snapshot = load_snapshot(snapshot_path)?;

    let report = run_export(&snapshot, &window, run_date, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_preview(
    snapshot_path: &Path,
    exclude_account: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let (window, _) = resolve_dates(date, None)?;
    let snapshot = load_snapshot(snapshot_path)?;
    let excluded = exclude_account.unwrap_or_else(|| ExportConfig::default().excluded_account);

    let collection = collect(&snapshot, &excluded, &window);

    println!();
    println!("=== Trades on {} (excluding {excluded}) ===", window.start);
    if collection.is_empty() {
        println!("No trades.");
    } else {
        println!("{:<28} {:>8} {:>14}", "Strategy", "Trades", "Net profit");
        println!("{}", "-".repeat(52));
        for group in &collection.groups {
            println!(
                "{:<28} {:>8} {:>14.2}",
                group.strategy_name,
                group.trades.len(),
                group.net_profit()
            );
        }
        println!("{}", "-".repeat(52));
        println!(
            "{:<28} {:>8} {:>14.2}",
            "Total",
            collection.trade_count(),
            collection.total_pnl
        );
    }
    for failure in &collection.failures {
        println!(
            "WARNING: {} {}: {}",
            failure.account.as_deref().unwrap_or("(accounts)"),
            failure.strategy.as_deref().unwrap_or(""),
            failure.message
        );
    }
    println!();
    Ok(())
}

fn print_report(report: &ExportReport) {
    println!();
    println!("=== Export Result ===");
    println!("Trading day:    {}", report.window.start);
    println!("Output:         {}", report.output_dir.display());
    println!("Strategies:     {}", report.strategies);
    println!("Trades:         {}", report.trades);
    println!("Net PnL:        {:.2}", report.total_pnl);
    if report.wrote_nothing() {
        println!("No files written.");
    }
    for file in &report.files {
        println!("  {} ({} rows)", file.path.display(), file.rows);
    }
    if !report.is_clean() {
        println!();
        println!("{} failure(s):", report.failures.len());
        for failure in &report.failures {
            println!("WARNING: {}: {}", failure.scope, failure.message);
        }
    }
    println!();
}
