// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Snapshot, Transaction};
use crate::persistence::SnapshotStore;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.smartspend", "SmartSpend", "smartspend"));

const KEY_INITIALIZED: &str = "initialized";
const KEY_MONTHLY_BUDGET: &str = "monthly_budget";
const KEY_WEEKLY_BUDGET: &str = "weekly_budget";
const KEY_SYNC_INTERVAL: &str = "sync_interval_minutes";
const KEY_POSITIVE_NUDGE: &str = "positive_nudge";
const KEY_LAST_SAVED_AT: &str = "last_saved_at";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("smartspend.sqlite"))
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        name TEXT PRIMARY KEY,
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        position INTEGER NOT NULL,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        date TEXT NOT NULL,
        description TEXT,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        recurrence TEXT NOT NULL DEFAULT 'monthly',
        budget_scope TEXT NOT NULL DEFAULT 'all'
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

/// [`SnapshotStore`] over a SQLite database. Each save rewrites the full
/// state in one SQLite transaction.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: open_at(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// RFC 3339 time of the last successful save, if any.
    pub fn last_saved_at(&self) -> Result<Option<String>> {
        get_setting(&self.conn, KEY_LAST_SAVED_AT)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, category, type, date, description, is_recurring, recurrence, budget_scope
             FROM transactions ORDER BY position, rowid",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let amount_s: String = r.get(2)?;
            let type_s: String = r.get(4)?;
            let date: NaiveDate = r.get(5)?;
            let recurrence_s: String = r.get(8)?;
            let scope_s: String = r.get(9)?;
            out.push(Transaction {
                title: r.get(1)?,
                amount: amount_s
                    .parse::<Decimal>()
                    .with_context(|| format!("Invalid amount '{}' for transaction {}", amount_s, id))?,
                category: r.get(3)?,
                r#type: type_s.parse()?,
                date,
                description: r.get(6)?,
                is_recurring: r.get(7)?,
                recurrence: recurrence_s.parse()?,
                budget_scope: scope_s.parse()?,
                id,
            });
        }
        Ok(out)
    }
}

impl SnapshotStore for SqliteStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if get_setting(&self.conn, KEY_INITIALIZED)?.is_none() {
            return Ok(None);
        }
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories ORDER BY position, name")?;
        let categories = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let defaults = Snapshot::default();
        let monthly_budget = match get_setting(&self.conn, KEY_MONTHLY_BUDGET)? {
            Some(s) => s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid monthly budget '{}'", s))?,
            None => defaults.monthly_budget,
        };
        let weekly_budget = match get_setting(&self.conn, KEY_WEEKLY_BUDGET)? {
            Some(s) => s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid weekly budget '{}'", s))?,
            None => defaults.weekly_budget,
        };
        let sync_interval_minutes = match get_setting(&self.conn, KEY_SYNC_INTERVAL)? {
            Some(s) => s
                .parse::<u32>()
                .with_context(|| format!("Invalid sync interval '{}'", s))?,
            None => defaults.sync_interval_minutes,
        };

        Ok(Some(Snapshot {
            transactions: self.load_transactions()?,
            categories,
            monthly_budget,
            weekly_budget,
            sync_interval_minutes,
        }))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM categories", [])?;
        {
            let mut ins_cat =
                tx.prepare("INSERT INTO categories(name, position) VALUES (?1, ?2)")?;
            for (i, name) in snapshot.categories.iter().enumerate() {
                ins_cat.execute(params![name, i as i64])?;
            }
            let mut ins_tx = tx.prepare(
                "INSERT INTO transactions(id, position, title, amount, category, type, date, description, is_recurring, recurrence, budget_scope)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for (i, t) in snapshot.transactions.iter().enumerate() {
                ins_tx.execute(params![
                    t.id,
                    i as i64,
                    t.title,
                    t.amount.to_string(),
                    t.category,
                    t.r#type.as_str(),
                    t.date,
                    t.description,
                    t.is_recurring,
                    t.recurrence.as_str(),
                    t.budget_scope.as_str(),
                ])?;
            }
        }
        put_setting(&tx, KEY_MONTHLY_BUDGET, &snapshot.monthly_budget.to_string())?;
        put_setting(&tx, KEY_WEEKLY_BUDGET, &snapshot.weekly_budget.to_string())?;
        put_setting(&tx, KEY_SYNC_INTERVAL, &snapshot.sync_interval_minutes.to_string())?;
        put_setting(&tx, KEY_LAST_SAVED_AT, &chrono::Local::now().to_rfc3339())?;
        put_setting(&tx, KEY_INITIALIZED, "1")?;
        tx.commit().context("Failed to commit snapshot")?;
        Ok(())
    }

    fn load_nudge_fingerprint(&self) -> Result<Option<String>> {
        get_setting(&self.conn, KEY_POSITIVE_NUDGE)
    }

    fn save_nudge_fingerprint(&mut self, fingerprint: &str) -> Result<()> {
        put_setting(&self.conn, KEY_POSITIVE_NUDGE, fingerprint)
    }
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn put_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
