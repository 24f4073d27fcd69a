// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use crate::db::SqliteStore;
use crate::session::Session;
use crate::sync::{SyncScheduler, SyncStatus};
use crate::utils::pretty_table;
use anyhow::{bail, Result};

pub fn handle(
    session: &mut Session,
    store: &mut SqliteStore,
    scheduler: &mut SyncScheduler,
    m: &clap::ArgMatches,
    now: Instant,
) -> Result<()> {
    match m.subcommand() {
        Some(("now", _)) => {
            scheduler.request_manual();
            match flush(session, store, scheduler, now)? {
                SyncStatus::Synced => println!("Synced"),
                other => println!("Sync status: {}", other),
            }
        }
        Some(("status", _)) => {
            let interval = match session.sync_interval_minutes() {
                0 => "off".to_string(),
                n => format!("every {} min", n),
            };
            let last = store
                .last_saved_at()?
                .unwrap_or_else(|| "never".to_string());
            let data = vec![
                vec!["Status".to_string(), scheduler.status().to_string()],
                vec!["Auto-sync".to_string(), interval],
                vec!["Last saved".to_string(), last],
            ];
            println!("{}", pretty_table(&["Sync", ""], data));
        }
        Some(("interval", sub)) => {
            let minutes = *sub.get_one::<u32>("minutes").unwrap();
            session.set_sync_interval(minutes);
            scheduler.set_interval(minutes, now);
            if minutes == 0 {
                println!("Auto-sync turned off");
            } else {
                println!("Auto-sync every {} minutes", minutes);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Runs whatever the scheduler says is due, with a snapshot taken now.
/// Persists a pending nudge fingerprint first. A failed save is an error so
/// the binary exits non-zero; the scheduler status says `failed`.
pub fn flush(
    session: &mut Session,
    store: &mut SqliteStore,
    scheduler: &mut SyncScheduler,
    now: Instant,
) -> Result<SyncStatus> {
    session.persist_fingerprint(store)?;
    let Some(trigger) = scheduler.due(now) else {
        return Ok(scheduler.status());
    };
    let status = scheduler.run(trigger, store, session.snapshot(), now);
    if status == SyncStatus::Failed {
        bail!("Sync failed; your latest changes were not saved");
    }
    Ok(status)
}

/// After a mutating command: the change is written right away because the
/// process is about to exit.
pub fn flush_changes(
    session: &mut Session,
    store: &mut SqliteStore,
    scheduler: &mut SyncScheduler,
    now: Instant,
) -> Result<SyncStatus> {
    scheduler.note_change(now);
    scheduler.request_manual();
    flush(session, store, scheduler, now)
}
