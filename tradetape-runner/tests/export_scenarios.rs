//! End-to-end export scenarios: snapshot in, CSV files out.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tradetape_core::domain::{Account, Instrument, MarketPosition, Strategy, Trade};
use tradetape_core::{DateWindow, Snapshot};
use tradetape_runner::{run_export, ExportConfig, FailureKind};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn yesterday_at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 14)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn trade(number: u32, account: &str, entry: NaiveDateTime, profit: f64) -> Trade {
    Trade {
        trade_number: number,
        instrument: Instrument::new("NQ", "NQ 06-24"),
        account: account.into(),
        market_position: if number % 2 == 0 {
            MarketPosition::Short
        } else {
            MarketPosition::Long
        },
        quantity: 2,
        entry_price: 18100.5,
        entry_time: entry,
        entry_name: "Entry".into(),
        exit_price: 18110.75,
        exit_time: entry + chrono::Duration::minutes(12),
        exit_name: "Exit".into(),
        profit,
        commission: 4.3,
        mae: -80.0,
        mfe: 420.0,
        total_efficiency: 0.4949,
    }
}

fn config_for(dir: &Path) -> ExportConfig {
    ExportConfig {
        output_dir: dir.to_string_lossy().into_owned(),
        ..ExportConfig::default()
    }
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

/// `Sim101` with three qualifying trades, `Live1` with two under `Alpha`.
fn sim_and_live() -> Snapshot {
    Snapshot::new(vec![
        Account::new("Sim101")
            .with_strategy(Strategy::new(
                "Alpha",
                vec![trade(1, "Sim101", yesterday_at(9, 30, 0), 10.0)],
            ))
            .with_strategy(Strategy::new(
                "SimOnly",
                vec![
                    trade(2, "Sim101", yesterday_at(10, 0, 0), 10.0),
                    trade(3, "Sim101", yesterday_at(11, 0, 0), 10.0),
                ],
            )),
        Account::new("Live1").with_strategy(Strategy::new(
            "Alpha",
            vec![
                trade(1, "Live1", yesterday_at(9, 31, 5), 205.0),
                trade(2, "Live1", yesterday_at(15, 2, 0), -40.0),
            ],
        )),
    ])
}

#[test]
fn sim_account_is_excluded_from_output() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_export(
        &sim_and_live(),
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    assert_eq!(csv_files(dir.path()), vec!["20240315-Alpha.csv"]);
    let content = std::fs::read_to_string(dir.path().join("20240315-Alpha.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "header + 2 data rows");
    assert!(!content.contains("Sim101"));
    assert!((report.total_pnl - 165.0).abs() < 1e-9);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].rows, 2);
}

#[test]
fn rows_follow_discovery_order_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    run_export(
        &sim_and_live(),
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    let content = std::fs::read_to_string(dir.path().join("20240315-Alpha.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with("Trade number,Instrument,Account,Strategy,Market pos.,"));
    assert!(lines[0].ends_with("ETD,Bars,"));
    assert_eq!(
        lines[1],
        "1,NQ 06-24,Live1,Alpha,Long,2,18100.5,18110.75,03/14/2024 9:31:5 AM,\
         03/14/2024 9:43:5 AM,Entry,Exit,205,0.00,4.3,-80,420,0.49,0,"
    );
    assert!(lines[2].starts_with("2,NQ 06-24,Live1,Alpha,Short,"));
    assert!(lines[2].contains(",03/14/2024 3:2:0 PM,"));
}

#[test]
fn suffixed_strategy_writes_base_name_file() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = Snapshot::new(vec![Account::new("Live1").with_strategy(Strategy::new(
        "Beta (4)",
        vec![trade(1, "Live1", yesterday_at(12, 0, 0), 50.0)],
    ))]);

    run_export(
        &snapshot,
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    assert_eq!(csv_files(dir.path()), vec!["20240315-Beta.csv"]);
    let content = std::fs::read_to_string(dir.path().join("20240315-Beta.csv")).unwrap();
    assert!(content.lines().nth(1).unwrap().contains(",Live1,Beta,"));
}

#[test]
fn nothing_qualifies_writes_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_export(
        &sim_and_live(),
        &DateWindow::single_day(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        run_date(),
        &config_for(dir.path()),
    );

    assert!(report.wrote_nothing());
    assert_eq!(report.strategies, 0);
    assert!(csv_files(dir.path()).is_empty());
}

#[test]
fn midnight_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let today_midnight = run_date().and_hms_opt(0, 0, 0).unwrap();
    let snapshot = Snapshot::new(vec![Account::new("Live1").with_strategy(Strategy::new(
        "Gamma",
        vec![
            trade(1, "Live1", yesterday_at(0, 0, 0), 1.0),
            trade(2, "Live1", today_midnight, 2.0),
        ],
    ))]);

    let report = run_export(
        &snapshot,
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    assert_eq!(report.trades, 1);
    let content = std::fs::read_to_string(dir.path().join("20240315-Gamma.csv")).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().nth(1).unwrap().starts_with("1,"));
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let window = DateWindow::previous_day(run_date());
    let config = config_for(dir.path());

    let first = run_export(&sim_and_live(), &window, run_date(), &config);
    let bytes_first = std::fs::read(dir.path().join("20240315-Alpha.csv")).unwrap();
    let second = run_export(&sim_and_live(), &window, run_date(), &config);
    let bytes_second = std::fs::read(dir.path().join("20240315-Alpha.csv")).unwrap();

    assert_eq!(bytes_first, bytes_second);
    assert_eq!(first.files[0].digest, second.files[0].digest);
}

#[test]
fn unwritable_file_is_reported_and_others_still_written() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("20240315-Alpha.csv")).unwrap();
    let snapshot = Snapshot::new(vec![Account::new("Live1")
        .with_strategy(Strategy::new(
            "Alpha",
            vec![trade(1, "Live1", yesterday_at(9, 0, 0), 1.0)],
        ))
        .with_strategy(Strategy::new(
            "Delta",
            vec![trade(2, "Live1", yesterday_at(9, 5, 0), 1.0)],
        ))]);

    let report = run_export(
        &snapshot,
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].strategy, "Delta");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::Io);
    assert!(report.failures[0].scope.ends_with("20240315-Alpha.csv"));
}

#[test]
fn odd_records_from_earlier_days_do_not_block_export() {
    let dir = tempfile::tempdir().unwrap();
    let january = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut old = trade(1, "Live1", january.and_hms_opt(10, 0, 0).unwrap(), 3.0);
    old.quantity = 0;
    old.commission = f64::NAN;
    let snapshot = Snapshot::new(vec![Account::new("Live1").with_strategy(Strategy::new(
        "Alpha",
        vec![old, trade(2, "Live1", yesterday_at(9, 30, 0), 25.0)],
    ))]);

    let report = run_export(
        &snapshot,
        &DateWindow::previous_day(run_date()),
        run_date(),
        &config_for(dir.path()),
    );

    assert!(report.is_clean());
    assert_eq!(report.strategies, 1);
    assert_eq!(csv_files(dir.path()), vec!["20240315-Alpha.csv"]);
}
