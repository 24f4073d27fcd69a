// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debounced, periodic and on-demand flushing of snapshots to a
//! [`SnapshotStore`]. The scheduler owns no timers: the caller passes the
//! current `Instant` and asks what is due. At most one sync is in flight.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::Snapshot;
use crate::persistence::SnapshotStore;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Failed,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Syncing => "syncing",
            Self::Synced => "synced",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    Manual,
    Debounced,
    Periodic,
}

#[derive(Debug, Clone)]
pub struct SyncScheduler {
    status: SyncStatus,
    debounce: Duration,
    interval: Option<Duration>,
    change_deadline: Option<Instant>,
    periodic_deadline: Option<Instant>,
    manual_requested: bool,
}

impl SyncScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            status: SyncStatus::Idle,
            debounce,
            interval: None,
            change_deadline: None,
            periodic_deadline: None,
            manual_requested: false,
        }
    }

    /// Scheduler for state that was just read from the store, and so is already synced.
    pub fn loaded(debounce: Duration, interval_minutes: u32, now: Instant) -> Self {
        let mut s = Self::new(debounce);
        s.status = SyncStatus::Synced;
        s.set_interval(interval_minutes, now);
        s
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn has_pending_change(&self) -> bool {
        self.change_deadline.is_some()
    }

    /// Re-arms the debounce deadline; a burst of changes yields one write.
    pub fn note_change(&mut self, now: Instant) {
        self.change_deadline = Some(now + self.debounce);
    }

    /// `0` turns periodic sync off.
    pub fn set_interval(&mut self, minutes: u32, now: Instant) {
        if minutes == 0 {
            self.interval = None;
            self.periodic_deadline = None;
        } else {
            let every = Duration::from_secs(u64::from(minutes) * 60);
            self.interval = Some(every);
            self.periodic_deadline = Some(now + every);
        }
    }

    pub fn request_manual(&mut self) {
        self.manual_requested = true;
    }

    /// What should run now, if anything. Nothing is due while a sync is in flight.
    pub fn due(&self, now: Instant) -> Option<SyncTrigger> {
        if self.status == SyncStatus::Syncing {
            return None;
        }
        if self.manual_requested {
            return Some(SyncTrigger::Manual);
        }
        if self.change_deadline.is_some_and(|d| now >= d) {
            return Some(SyncTrigger::Debounced);
        }
        if self.periodic_deadline.is_some_and(|d| now >= d) {
            return Some(SyncTrigger::Periodic);
        }
        None
    }

    /// Marks a sync as started. Returns `false`, changing nothing, if one is
    /// already running.
    pub fn begin(&mut self, trigger: SyncTrigger, now: Instant) -> bool {
        if self.status == SyncStatus::Syncing {
            return false;
        }
        self.status = SyncStatus::Syncing;
        self.manual_requested = false;
        self.change_deadline = None;
        if trigger == SyncTrigger::Periodic {
            self.periodic_deadline = self.interval.map(|every| now + every);
        }
        true
    }

    pub fn finish(&mut self, outcome: &Result<()>, now: Instant) -> SyncStatus {
        self.status = match outcome {
            Ok(()) => SyncStatus::Synced,
            Err(_) => SyncStatus::Failed,
        };
        self.periodic_deadline = self.interval.map(|every| now + every);
        self.status
    }

    /// Starts a sync for `trigger`, writes `snapshot` and records the outcome.
    /// A call made while another sync is in flight is a no-op and returns
    /// `Syncing`. Failures are reported through the status only.
    pub fn run<S: SnapshotStore + ?Sized>(
        &mut self,
        trigger: SyncTrigger,
        store: &mut S,
        snapshot: Snapshot,
        now: Instant,
    ) -> SyncStatus {
        if !self.begin(trigger, now) {
            return SyncStatus::Syncing;
        }
        let outcome = store.save(&snapshot);
        match &outcome {
            Ok(()) => info!(
                ?trigger,
                transactions = snapshot.transactions.len(),
                "sync complete"
            ),
            Err(e) => warn!(?trigger, error = %e, "sync failed"),
        }
        self.finish(&outcome, now)
    }
}

impl Default for SyncScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
