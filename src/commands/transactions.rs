// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::OTHER;
use crate::models::{
    BudgetScope, FilterType, NewTransaction, Recurrence, Transaction, TransactionPatch,
    TransactionType,
};
use crate::session::Session;
use crate::utils::{fmt_inr, maybe_print_json, parse_bool, parse_date, parse_decimal, pretty_table};
use crate::views::TransactionFilter;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub, today)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<TransactionType>()?,
        None => TransactionType::Expense,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.to_string())
        .unwrap_or_else(|| OTHER.to_string());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today,
    };

    let mut new = NewTransaction::new(title.as_str(), amount, category, kind, date);
    if let Some(d) = sub.get_one::<String>("description") {
        new = new.with_description(d.as_str());
    }
    if let Some(s) = sub.get_one::<String>("scope") {
        new = new.with_scope(s.parse::<BudgetScope>()?);
    }
    if sub.get_flag("recurring") {
        new = new.recurring(Recurrence::Monthly);
    }

    let id = if sub.get_flag("new-category") {
        session.add_transaction_creating_category(new)?
    } else {
        session.add_transaction(new)?
    };
    if let Some(t) = session.transaction(&id) {
        println!(
            "Recorded {} of {} '{}' on {} ({}) [{}]",
            t.r#type,
            fmt_inr(&t.amount),
            t.title,
            t.date,
            t.category,
            t.id
        );
    }
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let patch = patch_from_args(sub)?;
    if patch.is_empty() {
        println!("Nothing to change for {}", id);
        return Ok(());
    }
    if session.update_transaction(id, patch)? {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        title: sub.get_one::<String>("title").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        r#type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        description: sub
            .get_one::<String>("description")
            .map(|s| Some(s.to_string()).filter(|d| !d.trim().is_empty())),
        is_recurring: sub
            .get_one::<String>("recurring")
            .map(|s| parse_bool(s))
            .transpose()?,
        recurrence: None,
        budget_scope: sub
            .get_one::<String>("scope")
            .map(|s| s.parse::<BudgetScope>())
            .transpose()?,
    })
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    if session.remove_transaction(id) {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.title.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    fmt_signed(r.kind, &r.value),
                    r.budget_scope.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Title", "Type", "Category", "Amount", "Budget", "Description", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

/// Rupee amount with `+` for income and `-` for expenses.
pub fn fmt_signed(kind: TransactionType, amount: &Decimal) -> String {
    match kind {
        TransactionType::Income => format!("+{}", fmt_inr(amount)),
        TransactionType::Expense => format!("-{}", fmt_inr(amount)),
    }
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub budget_scope: String,
    pub description: String,
    #[serde(skip)]
    pub kind: TransactionType,
    #[serde(skip)]
    pub value: Decimal,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            title: t.title.clone(),
            r#type: t.r#type.to_string(),
            category: t.category.clone(),
            amount: format!("{:.2}", t.amount),
            budget_scope: t.budget_scope.to_string(),
            description: t.description.clone().unwrap_or_default(),
            kind: t.r#type,
            value: t.amount,
        }
    }
}

/// The filtered, newest-first list the `list` subcommand prints.
pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<FilterType>())
        .transpose()?
        .unwrap_or_default();
    let search = sub
        .get_one::<String>("search")
        .cloned()
        .unwrap_or_default();
    let filter = TransactionFilter::new(kind, search);

    let mut data: Vec<TransactionRow> = session
        .filtered(&filter)
        .into_iter()
        .map(TransactionRow::from)
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
