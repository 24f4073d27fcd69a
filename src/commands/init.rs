// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Snapshot;
use crate::persistence::SnapshotStore;
use anyhow::Result;

/// Writes the default seed (or the demo seed) unless data already exists.
/// Returns whether anything was written.
pub fn handle<S: SnapshotStore + ?Sized>(store: &mut S, m: &clap::ArgMatches) -> Result<bool> {
    if store.load()?.is_some() {
        println!("Already initialized; existing data left as is");
        return Ok(false);
    }
    let seed = if m.get_flag("demo") {
        Snapshot::demo()
    } else {
        Snapshot::default()
    };
    store.save(&seed)?;
    println!(
        "Initialized with {} categories and {} transactions",
        seed.categories.len(),
        seed.transactions.len()
    );
    Ok(true)
}
