// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::TransactionRow;
use crate::session::Session;
use crate::utils::{fmt_inr, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let items = session.recurring();
            let data: Vec<TransactionRow> = items.iter().map(|t| TransactionRow::from(*t)).collect();
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                if items.is_empty() {
                    println!("No recurring transactions.");
                    return Ok(());
                }
                let rows = items
                    .iter()
                    .map(|t| {
                        vec![
                            t.title.clone(),
                            t.r#type.to_string(),
                            t.category.clone(),
                            fmt_inr(&t.amount),
                            t.recurrence.as_str().to_string(),
                            t.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Title", "Type", "Category", "Amount", "Every", "Id"], rows)
                );
            }
        }
        Some(("stop", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if session.stop_recurring(id) {
                println!("Transaction {} is no longer recurring", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
