// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ordered store of transactions. Store order is insertion order; display
//! ordering belongs to the views.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{NewTransaction, Transaction, TransactionPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted records, re-issuing any id already taken.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(transactions.len());
        for mut t in transactions {
            if !seen.insert(t.id.clone()) {
                let fresh = fresh_id(&seen);
                warn!(old = %t.id, new = %fresh, "duplicate transaction id re-issued");
                seen.insert(fresh.clone());
                t.id = fresh;
            }
            out.push(t);
        }
        Self { transactions: out }
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Most recently appended record.
    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Appends a record, assigning a fresh id when none is given or the given one is taken.
    pub fn add(&mut self, new: NewTransaction) -> &Transaction {
        let id = match new.id.as_deref() {
            Some(id) if !id.is_empty() && !self.contains(id) => id.to_string(),
            _ => {
                let taken: HashSet<String> =
                    self.transactions.iter().map(|t| t.id.clone()).collect();
                fresh_id(&taken)
            }
        };
        debug!(%id, "transaction appended");
        self.transactions.push(new.into_transaction(id));
        let last = self.transactions.len() - 1;
        &self.transactions[last]
    }

    /// Patches the record in place. Unknown ids are a silent no-op.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                patch.apply(t);
                true
            }
            None => {
                debug!(%id, "update ignored: unknown id");
                false
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        before != self.transactions.len()
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> usize {
        self.reassign_category(old, new)
    }

    pub fn reassign_category(&mut self, name: &str, replacement: &str) -> usize {
        let mut n = 0;
        for t in self.transactions.iter_mut().filter(|t| t.category == name) {
            t.category = replacement.to_string();
            n += 1;
        }
        n
    }

    /// Clears the recurring flag; the record itself is kept.
    pub fn clear_recurring(&mut self, id: &str) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.is_recurring = false;
                true
            }
            None => false,
        }
    }

    pub fn count_in_category(&self, name: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.category == name)
            .count()
    }

    pub fn into_inner(self) -> Vec<Transaction> {
        self.transactions
    }
}

fn fresh_id(taken: &HashSet<String>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken.contains(&id) {
            return id;
        }
    }
}
