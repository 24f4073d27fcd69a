// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::models::Snapshot;

/// Where a session's state is loaded from and flushed to.
///
/// `load` returns `None` when nothing has been saved yet; callers then start
/// from [`Snapshot::default`]. The nudge fingerprint is kept apart from the
/// snapshot and is written as soon as it changes.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>>;

    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;

    fn load_nudge_fingerprint(&self) -> Result<Option<String>>;

    fn save_nudge_fingerprint(&mut self, fingerprint: &str) -> Result<()>;
}

/// Process-local store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    fingerprint: Option<String>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    /// Make every following `save` fail until reset.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn saved(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves {
            bail!("storage unavailable");
        }
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn load_nudge_fingerprint(&self) -> Result<Option<String>> {
        Ok(self.fingerprint.clone())
    }

    fn save_nudge_fingerprint(&mut self, fingerprint: &str) -> Result<()> {
        self.fingerprint = Some(fingerprint.to_string());
        Ok(())
    }
}
