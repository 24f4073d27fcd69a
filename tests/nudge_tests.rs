// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartspend::models::{Transaction, TransactionType};
use smartspend::nudge::{savings_suggestion, Nudge, NudgeAdvisor};
use smartspend::utils::fmt_inr;

fn tx(title: &str, amount: i64, kind: TransactionType) -> Transaction {
    Transaction {
        id: title.into(),
        title: title.into(),
        amount: Decimal::from(amount),
        category: "Other".into(),
        r#type: kind,
        date: NaiveDate::from_ymd_opt(2023, 10, 5).unwrap(),
        description: None,
        is_recurring: false,
        recurrence: Default::default(),
        budget_scope: Default::default(),
    }
}

fn weekly() -> Decimal {
    Decimal::from(10_000)
}

#[test]
fn large_expense_fires_above_half_the_weekly_budget() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![tx("Laptop", 6000, TransactionType::Expense)];
    let fired = advisor.evaluate(&list, weekly()).cloned();
    assert_eq!(
        fired,
        Some(Nudge::LargeExpense {
            title: "Laptop".into()
        })
    );
    assert_eq!(
        advisor.message().unwrap().to_string(),
        "Heads up! Your recent transaction for \"Laptop\" was quite large. Make sure it fits within your budget goals."
    );
}

#[test]
fn nothing_fires_for_a_modest_expense() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![tx("Phone", 4000, TransactionType::Expense)];
    assert!(advisor.evaluate(&list, weekly()).is_none());
    assert!(advisor.message().is_none());
}

#[test]
fn exactly_half_is_not_large() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![tx("Rent", 5000, TransactionType::Expense)];
    assert!(advisor.evaluate(&list, weekly()).is_none());
}

#[test]
fn empty_list_does_nothing() {
    let mut advisor = NudgeAdvisor::default();
    assert!(advisor.evaluate(&[], weekly()).is_none());
}

#[test]
fn large_expense_wins_over_savings() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![
        tx("Salary", 100_000, TransactionType::Income),
        tx("TV", 8000, TransactionType::Expense),
    ];
    assert!(matches!(
        advisor.evaluate(&list, weekly()),
        Some(Nudge::LargeExpense { .. })
    ));
    assert_eq!(advisor.last_suggestion(), None);
}

#[test]
fn savings_nudge_is_not_repeated() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![
        tx("Salary", 5000, TransactionType::Income),
        tx("Groceries", 150, TransactionType::Expense),
    ];
    let fired = advisor.evaluate(&list, weekly()).cloned().unwrap();
    assert_eq!(
        fired.to_string(),
        "Great job on your savings this period! You've saved ₹4,850.00 so far. Consider moving some of it to your savings account!"
    );
    assert_eq!(
        advisor.last_suggestion(),
        Some(savings_suggestion(&Decimal::from(4850)).as_str())
    );

    advisor.dismiss();
    assert!(advisor.evaluate(&list, weekly()).is_none());
    assert!(advisor.message().is_none());
}

#[test]
fn persisted_fingerprint_suppresses_the_same_suggestion() {
    let fp = savings_suggestion(&Decimal::from(4850));
    let mut advisor = NudgeAdvisor::new(Some(fp));
    let list = vec![
        tx("Salary", 5000, TransactionType::Income),
        tx("Groceries", 150, TransactionType::Expense),
    ];
    assert!(advisor.evaluate(&list, weekly()).is_none());
}

#[test]
fn only_the_last_suggestion_is_remembered() {
    let mut advisor = NudgeAdvisor::default();
    let mut list = vec![
        tx("Salary", 5000, TransactionType::Income),
        tx("Groceries", 150, TransactionType::Expense),
    ];
    assert!(advisor.evaluate(&list, weekly()).is_some());
    list.push(tx("Snacks", 50, TransactionType::Expense));
    assert!(advisor.evaluate(&list, weekly()).is_some());
    list.pop();
    // back to 4850, which is no longer the last suggestion
    assert!(advisor.evaluate(&list, weekly()).is_some());
}

#[test]
fn no_savings_nudge_without_enough_income() {
    let mut advisor = NudgeAdvisor::default();
    let list = vec![
        tx("Salary", 150, TransactionType::Income),
        tx("Groceries", 100, TransactionType::Expense),
    ];
    assert!(advisor.evaluate(&list, weekly()).is_none());
}

#[test]
fn rupees_use_indian_grouping() {
    assert_eq!(fmt_inr(&Decimal::from(0)), "₹0.00");
    assert_eq!(fmt_inr(&Decimal::from(950)), "₹950.00");
    assert_eq!(fmt_inr(&Decimal::from(4850)), "₹4,850.00");
    assert_eq!(fmt_inr(&Decimal::new(12345650, 2)), "₹1,23,456.50");
    assert_eq!(fmt_inr(&Decimal::from(12_345_678)), "₹1,23,45,678.00");
    assert_eq!(fmt_inr(&Decimal::from(-1500)), "-₹1,500.00");
    assert_eq!(fmt_inr(&Decimal::new(1005, 3)), "₹1.01");
}

#[test]
fn huge_amounts_do_not_overflow_the_rules() {
    let mut advisor = NudgeAdvisor::default();
    let mut big = tx("Yacht", 0, TransactionType::Expense);
    big.amount = "60000000000000000000000000000".parse().unwrap();
    let list = vec![big, tx("Gift", 1, TransactionType::Income)];
    assert!(advisor.evaluate(&list, weekly()).is_none());

    let mut rich = tx("Windfall", 0, TransactionType::Income);
    rich.amount = Decimal::MAX;
    let list = vec![rich.clone(), rich];
    assert!(matches!(
        advisor.evaluate(&list, Decimal::MAX),
        Some(Nudge::Savings { .. })
    ));
}
