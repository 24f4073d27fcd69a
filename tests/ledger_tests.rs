// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::ledger::TransactionStore;
use smartspend::models::{NewTransaction, TransactionPatch, TransactionType};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(title: &str, amount: i64, category: &str) -> NewTransaction {
    NewTransaction::new(
        title,
        Decimal::from(amount),
        category,
        TransactionType::Expense,
        d(2023, 10, 5),
    )
}

#[test]
fn add_assigns_unique_ids() {
    let mut store = TransactionStore::new();
    let a = store.add(expense("A", 10, "Food")).id.clone();
    let b = store.add(expense("B", 20, "Food")).id.clone();
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    assert_eq!(store.latest().unwrap().title, "B");
}

#[test]
fn add_keeps_given_id_unless_taken() {
    let mut store = TransactionStore::new();
    store.add(expense("A", 10, "Food").with_id("1"));
    let second = store.add(expense("B", 20, "Food").with_id("1")).id.clone();
    assert_ne!(second, "1");
    assert!(store.get("1").is_some());
    assert_eq!(store.get("1").unwrap().title, "A");
}

#[test]
fn update_and_remove_unknown_ids_are_noops() {
    let mut store = TransactionStore::new();
    store.add(expense("A", 10, "Food").with_id("1"));
    let before = store.clone();

    let patch = TransactionPatch {
        title: Some("Changed".into()),
        ..TransactionPatch::default()
    };
    assert!(!store.update("missing", patch));
    assert!(!store.remove("missing"));
    assert_eq!(store, before);
}

#[test]
fn update_patches_only_given_fields() {
    let mut store = TransactionStore::new();
    store.add(expense("Lunch", 10, "Food").with_id("1").with_description("work"));
    let patch = TransactionPatch {
        amount: Some(Decimal::from(12)),
        description: Some(None),
        ..TransactionPatch::default()
    };
    assert!(store.update("1", patch));
    let t = store.get("1").unwrap();
    assert_eq!(t.title, "Lunch");
    assert_eq!(t.amount, Decimal::from(12));
    assert_eq!(t.description, None);
}

#[test]
fn category_cascades_touch_only_matching_records() {
    let mut store = TransactionStore::new();
    store.add(expense("A", 10, "Food"));
    store.add(expense("B", 20, "Food"));
    store.add(expense("C", 30, "Transport"));

    assert_eq!(store.rename_category("Food", "Groceries"), 2);
    assert_eq!(store.count_in_category("Groceries"), 2);
    assert_eq!(store.count_in_category("Food"), 0);

    assert_eq!(store.reassign_category("Transport", "Other"), 1);
    assert_eq!(store.count_in_category("Other"), 1);
    assert!(store.all().iter().all(|t| t.r#type == TransactionType::Expense));
}

#[test]
fn clear_recurring_keeps_the_record() {
    let mut store = TransactionStore::new();
    store.add(
        expense("Rent", 900, "Utilities")
            .with_id("r")
            .recurring(Default::default()),
    );
    assert!(store.get("r").unwrap().is_recurring);
    assert!(store.clear_recurring("r"));
    assert_eq!(store.len(), 1);
    assert!(!store.get("r").unwrap().is_recurring);
}

#[test]
fn loading_reissues_duplicate_ids() {
    let mut seed = TransactionStore::new();
    seed.add(expense("A", 10, "Food").with_id("1"));
    let mut rows = seed.into_inner();
    let mut dup = rows[0].clone();
    dup.title = "B".into();
    rows.push(dup);

    let store = TransactionStore::from_transactions(rows);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("1").unwrap().title, "A");
    assert_ne!(store.all()[1].id, "1");
}
