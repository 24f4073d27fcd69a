// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use smartspend::commands::{budgets, categories, doctor, exporter, init, sync, transactions};
use smartspend::db::SqliteStore;
use smartspend::models::{BudgetScope, Snapshot};
use smartspend::persistence::{MemoryStore, SnapshotStore};
use smartspend::session::Session;
use smartspend::sync::{SyncScheduler, SyncStatus, DEFAULT_DEBOUNCE};
use smartspend::cli;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 5).unwrap()
}

fn demo() -> Session {
    Session::from_snapshot(Snapshot::demo(), None)
}

#[test]
fn tx_add_uses_defaults_and_flags() {
    let mut session = Session::default();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "tx", "add", "--title", "Coffee", "--amount", "3.50", "--category", "Food",
        "--scope", "none",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    transactions::handle(&mut session, tx_m, today()).unwrap();

    let t = &session.transactions()[0];
    assert_eq!(t.title, "Coffee");
    assert_eq!(t.amount, Decimal::new(350, 2));
    assert!(t.is_expense());
    assert_eq!(t.date, today());
    assert_eq!(t.budget_scope, BudgetScope::None);
}

#[test]
fn tx_add_rejects_unknown_category_without_flag() {
    let mut session = Session::default();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "tx", "add", "--title", "Kibble", "--amount", "30", "--category", "Pets",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    assert!(transactions::handle(&mut session, tx_m, today()).is_err());
    assert!(session.transactions().is_empty());

    let matches = cli::build_cli().get_matches_from([
        "smartspend", "tx", "add", "--title", "Kibble", "--amount", "30", "--category", "Pets",
        "--new-category",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    transactions::handle(&mut session, tx_m, today()).unwrap();
    assert_eq!(session.transactions().len(), 1);
}

#[test]
fn list_limit_and_filters_respected() {
    let session = demo();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "tx", "list", "--type", "expense", "--limit", "2",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(&session, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Pharmacy");
    assert_eq!(rows[1].title, "New Shoes");
    assert_eq!(rows[0].amount, "25.00");

    let matches = cli::build_cli().get_matches_from([
        "smartspend", "tx", "list", "--search", "SHOP",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(&session, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Grocery Shopping");
}

#[test]
fn category_rename_cascades_through_cli() {
    let mut session = demo();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "category", "rename", "--from", "Food", "--to", "Groceries",
    ]);
    let (_, cat_m) = matches.subcommand().unwrap();
    categories::handle(&mut session, cat_m).unwrap();
    assert_eq!(session.transaction("2").unwrap().category, "Groceries");

    let matches = cli::build_cli().get_matches_from(["smartspend", "category", "rm", "Other"]);
    let (_, cat_m) = matches.subcommand().unwrap();
    assert!(categories::handle(&mut session, cat_m).is_err());
}

#[test]
fn budget_set_and_rows() {
    let mut session = demo();
    let matches = cli::build_cli().get_matches_from([
        "smartspend", "budget", "set", "--period", "weekly", "--amount", "250",
    ]);
    let (_, budget_m) = matches.subcommand().unwrap();
    budgets::handle(&mut session, budget_m, today()).unwrap();
    assert_eq!(session.budgets().weekly, Decimal::from(250));

    let rows = budgets::budget_rows(&session, today());
    // 195 of 250 spent this week
    assert_eq!(rows[0].progress.percentage, Decimal::from(78));
    let v = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(v["period"], json!("weekly"));
    assert_eq!(v["status"], json!("warning"));

    let matches = cli::build_cli().get_matches_from([
        "smartspend", "budget", "set", "--period", "monthly", "--amount", "0",
    ]);
    let (_, budget_m) = matches.subcommand().unwrap();
    assert!(budgets::handle(&mut session, budget_m, today()).is_err());
}

#[test]
fn export_transactions_streams_pretty_json() {
    let mut session = Session::default();
    session
        .add_transaction(
            smartspend::models::NewTransaction::new(
                "Corner Shop",
                Decimal::new(1234, 2),
                "Food",
                smartspend::models::TransactionType::Expense,
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            )
            .with_id("t1")
            .with_description("Weekly run"),
        )
        .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "smartspend", "export", "transactions", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&session, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": "t1",
                "date": "2025-01-02",
                "title": "Corner Shop",
                "type": "expense",
                "category": "Food",
                "amount": "12.34",
                "budgetScope": "all",
                "isRecurring": false,
                "description": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let session = demo();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "smartspend", "export", "transactions", "--format", "xml", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&session, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}

#[test]
fn export_snapshot_reads_back() {
    let session = demo();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("snapshot.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches =
        cli::build_cli().get_matches_from(["smartspend", "export", "snapshot", "--out", &out_str]);
    let (_, export_m) = matches.subcommand().unwrap();
    exporter::handle(&session, export_m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let back: Snapshot = serde_json::from_str(&contents).unwrap();
    assert_eq!(back, session.snapshot());
}

#[test]
fn init_writes_once() {
    let mut store = MemoryStore::new();
    let matches = cli::build_cli().get_matches_from(["smartspend", "init", "--demo"]);
    let (_, init_m) = matches.subcommand().unwrap();
    assert!(init::handle(&mut store, init_m).unwrap());
    assert_eq!(store.saved(), Some(&Snapshot::demo()));
    assert!(!init::handle(&mut store, init_m).unwrap());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn doctor_reports_what_loading_would_repair() {
    assert!(doctor::check(&Snapshot::demo()).is_empty());

    let mut snap = Snapshot::demo();
    snap.categories.retain(|c| c != "Other");
    snap.transactions[0].category = "Gone".into();
    snap.transactions[1].id = "1".into();
    snap.weekly_budget = Decimal::ZERO;
    let issues: Vec<String> = doctor::check(&snap).into_iter().map(|r| r[0].clone()).collect();
    assert!(issues.contains(&"missing_other_category".to_string()));
    assert!(issues.contains(&"unknown_category".to_string()));
    assert!(issues.contains(&"duplicate_id".to_string()));
    assert!(issues.contains(&"non_positive_budget".to_string()));
}

#[test]
fn flush_changes_writes_to_sqlite() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut session = Session::load(&store).unwrap();
    let now = Instant::now();
    let mut scheduler = SyncScheduler::loaded(DEFAULT_DEBOUNCE, 5, now);

    session.add_category("Pets").unwrap();
    let status = sync::flush_changes(&mut session, &mut store, &mut scheduler, now).unwrap();
    assert_eq!(status, SyncStatus::Synced);

    let saved = store.load().unwrap().unwrap();
    assert!(saved.categories.iter().any(|c| c == "Pets"));
}

#[test]
fn list_rows_keep_the_exact_amount_for_display() {
    let mut session = Session::default();
    session
        .add_transaction(smartspend::models::NewTransaction::new(
            "Consulting",
            Decimal::new(123456789, 2),
            "Freelance",
            smartspend::models::TransactionType::Income,
            today(),
        ))
        .unwrap();
    let matches = cli::build_cli().get_matches_from(["smartspend", "tx", "list", "--json"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(&session, list_m).unwrap();

    assert_eq!(rows[0].value, Decimal::new(123456789, 2));
    assert_eq!(
        transactions::fmt_signed(rows[0].kind, &rows[0].value),
        "+₹12,34,567.89"
    );
    assert_eq!(
        transactions::fmt_signed(smartspend::models::TransactionType::Expense, &Decimal::from(25)),
        "-₹25.00"
    );

    // display-only fields stay out of the JSON rows
    let v = serde_json::to_value(&rows[0]).unwrap();
    assert!(v.get("value").is_none());
    assert!(v.get("kind").is_none());
    assert_eq!(v["amount"], json!("1234567.89"));
}
