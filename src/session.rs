// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The application session: owner of the transaction store, category
//! registry, budgets and nudge state. Every mutation validates first and
//! either applies fully or returns a [`ValidationError`] with nothing changed.
//! Every read is a fresh derivation from the current state.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::categories::{CategoryRegistry, OTHER};
use crate::error::{ValidationError, ValidationResult};
use crate::ledger::TransactionStore;
use crate::models::{
    BudgetPeriod, Budgets, MAX_AMOUNT, NewTransaction, Snapshot, Transaction, TransactionPatch,
};
use crate::nudge::{Nudge, NudgeAdvisor};
use crate::period::PeriodWindows;
use crate::persistence::SnapshotStore;
use crate::summary::{self, BudgetProgress, CategoryBreakdown, Totals};
use crate::views::{self, TransactionFilter};

#[derive(Debug, Clone)]
pub struct Session {
    store: TransactionStore,
    registry: CategoryRegistry,
    budgets: Budgets,
    sync_interval_minutes: u32,
    advisor: NudgeAdvisor,
    fresh_nudge: bool,
    revision: u64,
    pending_fingerprint: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_snapshot(Snapshot::default(), None)
    }
}

impl Session {
    /// Loads from `store`, or starts from the default seed when it is empty.
    pub fn load<S: SnapshotStore + ?Sized>(store: &S) -> Result<Self> {
        let snapshot = store
            .load()
            .context("Failed to load saved data")?
            .unwrap_or_default();
        let fingerprint = store
            .load_nudge_fingerprint()
            .context("Failed to load nudge state")?;
        Ok(Self::from_snapshot(snapshot, fingerprint))
    }

    /// Builds a session from persisted state, repairing anything that breaks
    /// the store invariants, then runs the nudge rules once.
    pub fn from_snapshot(snapshot: Snapshot, nudge_fingerprint: Option<String>) -> Self {
        let registry = CategoryRegistry::from_names(snapshot.categories);
        let mut transactions = snapshot.transactions;
        for t in transactions.iter_mut() {
            if !registry.contains(&t.category) {
                warn!(id = %t.id, category = %t.category, "unknown category remapped to '{}'", OTHER);
                t.category = OTHER.to_string();
            }
        }
        let defaults = Budgets::default();
        let budgets = Budgets {
            monthly: positive_or(snapshot.monthly_budget, defaults.monthly),
            weekly: positive_or(snapshot.weekly_budget, defaults.weekly),
        };

        let mut session = Self {
            store: TransactionStore::from_transactions(transactions),
            registry,
            budgets,
            sync_interval_minutes: snapshot.sync_interval_minutes,
            advisor: NudgeAdvisor::new(nudge_fingerprint),
            fresh_nudge: false,
            revision: 0,
            pending_fingerprint: None,
        };
        session.run_nudges();
        // Load replays the large-expense rule; only a savings nudge is new here.
        session.fresh_nudge =
            matches!(session.advisor.message(), Some(Nudge::Savings { .. }));
        session
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.store.all().to_vec(),
            categories: self.registry.names().to_vec(),
            monthly_budget: self.budgets.monthly,
            weekly_budget: self.budgets.weekly,
            sync_interval_minutes: self.sync_interval_minutes,
        }
    }

    /// Bumped on every accepted change to persisted state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.all()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.store.get(id)
    }

    pub fn categories(&self) -> &[String] {
        self.registry.names()
    }

    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    pub fn sync_interval_minutes(&self) -> u32 {
        self.sync_interval_minutes
    }

    // ---- transactions -------------------------------------------------

    /// Validates and appends. Returns the id the record was stored under.
    pub fn add_transaction(&mut self, new: NewTransaction) -> ValidationResult<String> {
        let new = self.validate_new(new)?;
        let id = self.store.add(new).id.clone();
        info!(%id, "transaction added");
        self.touch();
        self.run_nudges();
        Ok(id)
    }

    /// Like [`Session::add_transaction`], but first registers the category if
    /// it is not known yet.
    pub fn add_transaction_creating_category(
        &mut self,
        mut new: NewTransaction,
    ) -> ValidationResult<String> {
        let category = new.category.trim().to_string();
        if self.registry.contains(&category) {
            new.category = category;
            return self.add_transaction(new);
        }
        // Check the record before the registry so a rejected write adds nothing.
        let mut probe = self.registry.clone();
        new.category = probe.add(&category)?;
        let new = Self::validate_fields(new, &probe)?;
        self.registry = probe;
        self.add_transaction(new)
    }

    /// Applies `patch` to the record with `id`. Unknown ids are a silent
    /// no-op (`Ok(false)`).
    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> ValidationResult<bool> {
        let Some(current) = self.store.get(id) else {
            return Ok(false);
        };
        let mut candidate = current.clone();
        patch.apply(&mut candidate);
        let checked = Self::validate_fields(
            NewTransaction {
                id: Some(candidate.id.clone()),
                title: candidate.title,
                amount: candidate.amount,
                category: candidate.category,
                r#type: candidate.r#type,
                date: candidate.date,
                description: candidate.description,
                is_recurring: candidate.is_recurring,
                recurrence: candidate.recurrence,
                budget_scope: candidate.budget_scope,
            },
            &self.registry,
        )?;
        let normalized = TransactionPatch {
            title: Some(checked.title),
            amount: Some(checked.amount),
            category: Some(checked.category),
            r#type: Some(checked.r#type),
            date: Some(checked.date),
            description: Some(checked.description),
            is_recurring: Some(checked.is_recurring),
            recurrence: Some(checked.recurrence),
            budget_scope: Some(checked.budget_scope),
        };
        self.store.update(id, normalized);
        info!(%id, "transaction updated");
        self.touch();
        self.run_nudges();
        Ok(true)
    }

    pub fn remove_transaction(&mut self, id: &str) -> bool {
        if !self.store.remove(id) {
            return false;
        }
        info!(%id, "transaction removed");
        self.touch();
        self.run_nudges();
        true
    }

    /// Clears the recurring flag. The record stays in the store.
    pub fn stop_recurring(&mut self, id: &str) -> bool {
        if !self.store.clear_recurring(id) {
            return false;
        }
        info!(%id, "recurring flag cleared");
        self.touch();
        self.run_nudges();
        true
    }

    // ---- categories ---------------------------------------------------

    pub fn add_category(&mut self, name: &str) -> ValidationResult<String> {
        let added = self.registry.add(name)?;
        self.touch();
        Ok(added)
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> ValidationResult<String> {
        let renamed = self.registry.rename(old, new, &mut self.store)?;
        self.touch();
        self.run_nudges();
        Ok(renamed)
    }

    /// Deletes the category; its transactions move to `Other`. Returns how many moved.
    pub fn delete_category(&mut self, name: &str) -> ValidationResult<usize> {
        let moved = self.registry.delete(name, &mut self.store)?;
        self.touch();
        self.run_nudges();
        Ok(moved)
    }

    // ---- settings -----------------------------------------------------

    pub fn set_budget(&mut self, period: BudgetPeriod, amount: Decimal) -> ValidationResult<()> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveBudget(amount));
        }
        match period {
            BudgetPeriod::Monthly => self.budgets.monthly = amount,
            BudgetPeriod::Weekly => self.budgets.weekly = amount,
        }
        info!(?period, %amount, "budget updated");
        self.touch();
        if period == BudgetPeriod::Weekly {
            self.run_nudges();
        }
        Ok(())
    }

    pub fn set_monthly_budget(&mut self, amount: Decimal) -> ValidationResult<()> {
        self.set_budget(BudgetPeriod::Monthly, amount)
    }

    pub fn set_weekly_budget(&mut self, amount: Decimal) -> ValidationResult<()> {
        self.set_budget(BudgetPeriod::Weekly, amount)
    }

    pub fn set_sync_interval(&mut self, minutes: u32) {
        self.sync_interval_minutes = minutes;
        self.touch();
    }

    // ---- derived views ------------------------------------------------

    pub fn totals(&self, today: NaiveDate) -> Totals {
        summary::summarize(self.store.all(), &PeriodWindows::containing(today))
    }

    pub fn budget_progress(&self, today: NaiveDate) -> (BudgetProgress, BudgetProgress) {
        let totals = self.totals(today);
        (
            BudgetProgress::new(self.budgets.weekly, totals.weekly_expense),
            BudgetProgress::new(self.budgets.monthly, totals.monthly_expense),
        )
    }

    pub fn expense_breakdown(&self) -> CategoryBreakdown {
        summary::expense_breakdown(self.store.all())
    }

    pub fn filtered(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        views::filtered(self.store.all(), filter)
    }

    pub fn recurring(&self) -> Vec<&Transaction> {
        views::recurring(self.store.all())
    }

    pub fn nudge(&self) -> Option<&Nudge> {
        self.advisor.message()
    }

    /// The current nudge, but only if it has not been shown before: it fired
    /// during this session, or it is a savings nudge produced on load.
    pub fn fresh_nudge(&self) -> Option<&Nudge> {
        self.advisor.message().filter(|_| self.fresh_nudge)
    }

    pub fn dismiss_nudge(&mut self) {
        self.advisor.dismiss();
        self.fresh_nudge = false;
    }

    /// A new savings fingerprint that has not been persisted yet.
    pub fn take_pending_fingerprint(&mut self) -> Option<String> {
        self.pending_fingerprint.take()
    }

    /// Writes a pending fingerprint through `store` right away.
    pub fn persist_fingerprint<S: SnapshotStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        if let Some(fp) = self.take_pending_fingerprint() {
            if let Err(e) = store.save_nudge_fingerprint(&fp) {
                self.pending_fingerprint = Some(fp);
                return Err(e).context("Failed to save nudge state");
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn run_nudges(&mut self) {
        let before = self.advisor.last_suggestion().map(str::to_string);
        if self
            .advisor
            .evaluate(self.store.all(), self.budgets.weekly)
            .is_some()
        {
            self.fresh_nudge = true;
        }
        let after = self.advisor.last_suggestion();
        if after.is_some() && after != before.as_deref() {
            self.pending_fingerprint = after.map(str::to_string);
        }
    }

    fn validate_new(&self, new: NewTransaction) -> ValidationResult<NewTransaction> {
        Self::validate_fields(new, &self.registry)
    }

    fn validate_fields(
        mut new: NewTransaction,
        registry: &CategoryRegistry,
    ) -> ValidationResult<NewTransaction> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        new.title = title.to_string();
        if new.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(new.amount));
        }
        if new.amount > Decimal::from(MAX_AMOUNT) {
            return Err(ValidationError::AmountTooLarge(new.amount));
        }
        let category = new.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if !registry.contains(category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }
        new.category = category.to_string();
        new.description = new
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(new)
    }
}

fn positive_or(value: Decimal, fallback: Decimal) -> Decimal {
    if value > Decimal::ZERO {
        value
    } else {
        warn!(%value, %fallback, "non-positive budget replaced with default");
        fallback
    }
}
