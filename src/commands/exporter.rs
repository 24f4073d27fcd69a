// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use anyhow::{bail, Context, Result};
use serde_json::json;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session, sub),
        Some(("snapshot", sub)) => export_snapshot(session, sub),
        _ => Ok(()),
    }
}

fn export_transactions(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut rows: Vec<_> = session.transactions().iter().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "title",
                "type",
                "category",
                "amount",
                "budget_scope",
                "recurring",
                "description",
            ])?;
            for t in rows {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.title.clone(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.budget_scope.to_string(),
                    t.is_recurring.to_string(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .into_iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date.to_string(), "title": t.title,
                        "type": t.r#type, "category": t.category, "amount": t.amount.to_string(),
                        "budgetScope": t.budget_scope, "isRecurring": t.is_recurring,
                        "description": t.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Cannot write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

fn export_snapshot(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    std::fs::write(out, serde_json::to_string_pretty(&session.snapshot())?)
        .with_context(|| format!("Cannot write {}", out))?;
    println!("Exported snapshot to {}", out);
    Ok(())
}
