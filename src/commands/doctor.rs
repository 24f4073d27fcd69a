// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::categories::OTHER;
use crate::models::{Snapshot, MAX_AMOUNT};
use crate::persistence::SnapshotStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;

/// Problems in saved data that loading a session would silently repair.
pub fn check(snapshot: &Snapshot) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    let categories: HashSet<&str> = snapshot.categories.iter().map(String::as_str).collect();
    if !categories.contains(OTHER) {
        rows.push(vec!["missing_other_category".into(), OTHER.to_string()]);
    }
    if categories.len() != snapshot.categories.len() {
        rows.push(vec!["duplicate_category".into(), String::new()]);
    }

    let mut ids = HashSet::new();
    for t in &snapshot.transactions {
        if !ids.insert(t.id.as_str()) {
            rows.push(vec!["duplicate_id".into(), t.id.clone()]);
        }
        if !categories.contains(t.category.as_str()) {
            rows.push(vec![
                "unknown_category".into(),
                format!("{} {}", t.id, t.category),
            ]);
        }
        if t.amount <= Decimal::ZERO {
            rows.push(vec!["non_positive_amount".into(), format!("{} {}", t.id, t.amount)]);
        }
        if t.amount > Decimal::from(MAX_AMOUNT) {
            rows.push(vec!["amount_too_large".into(), format!("{} {}", t.id, t.amount)]);
        }
        if t.title.trim().is_empty() {
            rows.push(vec!["empty_title".into(), t.id.clone()]);
        }
    }

    if snapshot.monthly_budget <= Decimal::ZERO {
        rows.push(vec!["non_positive_budget".into(), format!("monthly {}", snapshot.monthly_budget)]);
    }
    if snapshot.weekly_budget <= Decimal::ZERO {
        rows.push(vec!["non_positive_budget".into(), format!("weekly {}", snapshot.weekly_budget)]);
    }
    rows
}

pub fn handle<S: SnapshotStore + ?Sized>(store: &S) -> Result<()> {
    let Some(snapshot) = store.load()? else {
        println!("doctor: nothing saved yet (run `smartspend init`)");
        return Ok(());
    };
    let rows = check(&snapshot);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
