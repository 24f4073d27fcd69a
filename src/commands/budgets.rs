// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::BudgetPeriod;
use crate::session::Session;
use crate::summary::{BudgetProgress, BudgetStatus};
use crate::utils::{fmt_inr, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("show", sub)) => show(session, sub, today)?,
        _ => {}
    }
    Ok(())
}

fn set(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let period = sub.get_one::<String>("period").unwrap().parse::<BudgetPeriod>()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    session.set_budget(period, amount)?;
    let label = match period {
        BudgetPeriod::Weekly => "Weekly",
        BudgetPeriod::Monthly => "Monthly",
    };
    println!("{} budget set to {}", label, fmt_inr(&amount));
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub period: BudgetPeriod,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

pub fn budget_rows(session: &Session, today: NaiveDate) -> Vec<BudgetRow> {
    let (weekly, monthly) = session.budget_progress(today);
    vec![
        BudgetRow {
            period: BudgetPeriod::Weekly,
            progress: weekly,
        },
        BudgetRow {
            period: BudgetPeriod::Monthly,
            progress: monthly,
        },
    ]
}

fn show(session: &Session, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = budget_rows(session, today);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                let p = &r.progress;
                let period = match r.period {
                    BudgetPeriod::Weekly => "Weekly",
                    BudgetPeriod::Monthly => "Monthly",
                };
                let status = match p.status {
                    BudgetStatus::OnTrack => "on track",
                    BudgetStatus::Warning => "warning",
                    BudgetStatus::Danger => "danger",
                };
                let note = match p.overspent {
                    Some(over) => format!("You've exceeded your budget by {}.", fmt_inr(&over)),
                    None => String::new(),
                };
                vec![
                    period.to_string(),
                    fmt_inr(&p.spent),
                    fmt_inr(&p.budget),
                    format!("{:.1}%", p.percentage),
                    status.to_string(),
                    note,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Spent", "Limit", "Used", "Status", ""], rows)
        );
    }
    Ok(())
}
