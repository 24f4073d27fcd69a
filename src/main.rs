// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;

use smartspend::config::Config;
use smartspend::db::SqliteStore;
use smartspend::session::Session;
use smartspend::sync::SyncScheduler;
use smartspend::{cli, commands, logging};

fn main() -> Result<()> {
    logging::init();
    let matches = cli::build_cli().get_matches();
    let config = Config::resolve(&matches)?;
    let path = config.db_path()?;
    let mut store = SqliteStore::open(&path)?;
    tracing::debug!(db = %path.display(), "database opened");

    match matches.subcommand() {
        Some(("init", sub)) => {
            commands::init::handle(&mut store, sub)?;
            println!("Database at {}", path.display());
            return Ok(());
        }
        Some(("doctor", _)) => return commands::doctor::handle(&store),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let now = Instant::now();
    let today = chrono::Local::now().date_naive();
    let mut session = Session::load(&store)?;
    let mut scheduler =
        SyncScheduler::loaded(config.debounce, session.sync_interval_minutes(), now);
    let revision = session.revision();

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub, today)?,
        Some(("category", sub)) => commands::categories::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub, today)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub, today)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("sync", sub)) => {
            commands::sync::handle(&mut session, &mut store, &mut scheduler, sub, now)?
        }
        Some(("nudge", _)) => match session.nudge() {
            Some(nudge) => println!("{}", nudge),
            None => println!("No nudges right now."),
        },
        _ => {}
    }

    if matches.subcommand_name() != Some("nudge") {
        if let Some(nudge) = session.fresh_nudge() {
            eprintln!("💡 {}", nudge);
        }
    }

    if session.revision() != revision {
        commands::sync::flush_changes(&mut session, &mut store, &mut scheduler, now)?;
    } else {
        session.persist_fingerprint(&mut store)?;
    }
    Ok(())
}
