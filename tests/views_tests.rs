// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::models::{FilterType, Recurrence, Transaction, TransactionType};
use smartspend::views::{filtered, recurring, TransactionFilter};

fn tx(id: &str, title: &str, kind: TransactionType, day: u32, rec: bool) -> Transaction {
    Transaction {
        id: id.into(),
        title: title.into(),
        amount: Decimal::from(10),
        category: "Other".into(),
        r#type: kind,
        date: NaiveDate::from_ymd_opt(2023, 10, day).unwrap(),
        description: None,
        is_recurring: rec,
        recurrence: Recurrence::Monthly,
        budget_scope: Default::default(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", "Monthly Salary", TransactionType::Income, 1, false),
        tx("2", "Grocery Shopping", TransactionType::Expense, 5, false),
        tx("3", "Rent", TransactionType::Expense, 3, true),
        tx("4", "Shoe shopping", TransactionType::Expense, 5, false),
        tx("5", "Dividend", TransactionType::Income, 22, false),
    ]
}

fn ids(list: &[&Transaction]) -> Vec<String> {
    list.iter().map(|t| t.id.clone()).collect()
}

#[test]
fn newest_first_with_stable_ties() {
    let data = sample();
    let out = filtered(&data, &TransactionFilter::default());
    assert_eq!(ids(&out), ["5", "2", "4", "1"]);
}

#[test]
fn search_is_case_insensitive_on_title() {
    let data = sample();
    let out = filtered(&data, &TransactionFilter::new(FilterType::All, "SHOPPING"));
    assert_eq!(ids(&out), ["2", "4"]);
}

#[test]
fn type_and_search_filters_commute() {
    let data = sample();
    let both = filtered(&data, &TransactionFilter::new(FilterType::Expense, "shop"));

    let by_type = filtered(&data, &TransactionFilter::new(FilterType::Expense, ""));
    let then_search: Vec<_> = by_type
        .into_iter()
        .filter(|t| t.title.to_lowercase().contains("shop"))
        .collect();
    let by_search = filtered(&data, &TransactionFilter::new(FilterType::All, "shop"));
    let then_type: Vec<_> = by_search.into_iter().filter(|t| t.is_expense()).collect();

    assert_eq!(ids(&both), ids(&then_search));
    assert_eq!(ids(&both), ids(&then_type));
}

#[test]
fn recurring_and_filtered_partition_the_list() {
    let data = sample();
    let main = filtered(&data, &TransactionFilter::default());
    let rec = recurring(&data);
    assert_eq!(ids(&rec), ["3"]);
    assert_eq!(main.len() + rec.len(), data.len());
    assert!(main.iter().all(|t| !rec.iter().any(|r| r.id == t.id)));
}
