// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::sync::DEFAULT_DEBOUNCE;

pub const ENV_DB: &str = "SMARTSPEND_DB";
pub const ENV_DEBOUNCE_MS: &str = "SMARTSPEND_DEBOUNCE_MS";
pub const ENV_LOG: &str = "SMARTSPEND_LOG";

/// Runtime settings that are not part of the user's saved data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` means the platform data directory.
    pub db_path: Option<PathBuf>,
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Config {
    /// `--db` wins over `SMARTSPEND_DB`.
    pub fn resolve(matches: &clap::ArgMatches) -> Result<Self> {
        let db_path = matches
            .get_one::<String>("db")
            .cloned()
            .or_else(|| env::var(ENV_DB).ok())
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let debounce = match env::var(ENV_DEBOUNCE_MS) {
            Ok(ms) => Duration::from_millis(
                ms.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid {} '{}'", ENV_DEBOUNCE_MS, ms))?,
            ),
            Err(_) => DEFAULT_DEBOUNCE,
        };
        Ok(Self { db_path, debounce })
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(p) => Ok(p.clone()),
            None => crate::db::db_path(),
        }
    }
}
