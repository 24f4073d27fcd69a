// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FilterType, Transaction};

/// Criteria for the main transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: FilterType,
    pub search: String,
}

impl TransactionFilter {
    pub fn new(kind: FilterType, search: impl Into<String>) -> Self {
        Self {
            kind,
            search: search.into(),
        }
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        self.kind.matches(t.r#type)
            && t.title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Non-recurring transactions matching `filter`, newest date first. Equal
/// dates keep store order.
pub fn filtered<'a>(transactions: &'a [Transaction], filter: &TransactionFilter) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| !t.is_recurring && filter.matches(t))
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Recurring transactions in store order.
pub fn recurring(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.is_recurring).collect()
}
