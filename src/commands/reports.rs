// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::{fmt_inr, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(session: &Session, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub, today)?,
        Some(("spend-by-category", sub)) => spend_by_category(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(session: &Session, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let totals = session.totals(today);
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let data = vec![
            vec!["Total Income".to_string(), fmt_inr(&totals.total_income)],
            vec!["Total Expense".to_string(), fmt_inr(&totals.all_time_total_expense)],
            vec!["Balance".to_string(), fmt_inr(&totals.balance)],
            vec!["Spent This Week".to_string(), fmt_inr(&totals.weekly_expense)],
            vec!["Spent This Month".to_string(), fmt_inr(&totals.monthly_expense)],
        ];
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}

fn spend_by_category(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let breakdown = session.expense_breakdown();
    if maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        return Ok(());
    }
    if breakdown.is_empty() {
        println!("No expense data to display.");
        return Ok(());
    }
    let mut data: Vec<Vec<String>> = breakdown
        .slices
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_inr(&s.total),
                format!("{:.1}%", breakdown.share(s)),
            ]
        })
        .collect();
    data.push(vec![
        "Total Spent".to_string(),
        fmt_inr(&breakdown.total),
        "100.0%".to_string(),
    ]);
    println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    Ok(())
}
