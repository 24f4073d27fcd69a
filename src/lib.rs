// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod utils;
pub mod ledger;
pub mod categories;
pub mod period;
pub mod summary;
pub mod views;
pub mod nudge;
pub mod session;
pub mod sync;
pub mod commands;
