// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{info, warn};

use crate::error::{ValidationError, ValidationResult};
use crate::ledger::TransactionStore;

/// Fallback category. Always present, never removable.
pub const OTHER: &str = "Other";

pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Salary",
    "Transport",
    "Shopping",
    "Utilities",
    "Entertainment",
    "Health",
    "Freelance",
    "Investment",
    OTHER,
];

/// Sorted set of category names. Renames and deletes cascade into the
/// [`TransactionStore`] so no transaction is ever left pointing at a missing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from_names(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()))
    }
}

impl CategoryRegistry {
    /// Trims, drops blanks and duplicates, sorts, and guarantees `Other`.
    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let mut out: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        out.push(OTHER.to_string());
        out.sort();
        out.dedup();
        Self { names: out }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Adds a name (exact, case-sensitive duplicate check) and returns the stored form.
    pub fn add(&mut self, name: &str) -> ValidationResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if self.contains(trimmed) {
            return Err(ValidationError::DuplicateCategory(trimmed.to_string()));
        }
        self.names.push(trimmed.to_string());
        self.names.sort();
        info!(category = trimmed, "category added");
        Ok(trimmed.to_string())
    }

    /// Renames `old` and moves every transaction in it to the new name.
    /// Validation happens before anything changes. [`OTHER`] keeps its name.
    pub fn rename(
        &mut self,
        old: &str,
        new: &str,
        store: &mut TransactionStore,
    ) -> ValidationResult<String> {
        if old == OTHER {
            warn!("refused to rename the '{}' category", OTHER);
            return Err(ValidationError::ProtectedCategory(OTHER.to_string()));
        }
        let trimmed = new.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if trimmed == old {
            return Err(ValidationError::UnchangedCategoryName(old.to_string()));
        }
        if self.contains(trimmed) {
            return Err(ValidationError::DuplicateCategory(trimmed.to_string()));
        }
        let Some(pos) = self.names.iter().position(|n| n == old) else {
            return Err(ValidationError::UnknownCategory(old.to_string()));
        };

        self.names[pos] = trimmed.to_string();
        self.names.sort();
        let moved = store.rename_category(old, trimmed);
        info!(from = old, to = trimmed, moved, "category renamed");
        Ok(trimmed.to_string())
    }

    /// Removes `name` and reassigns its transactions to [`OTHER`].
    pub fn delete(&mut self, name: &str, store: &mut TransactionStore) -> ValidationResult<usize> {
        if name == OTHER {
            warn!("refused to delete the '{}' category", OTHER);
            return Err(ValidationError::ProtectedCategory(OTHER.to_string()));
        }
        let Some(pos) = self.names.iter().position(|n| n == name) else {
            return Err(ValidationError::UnknownCategory(name.to_string()));
        };

        self.names.remove(pos);
        let moved = store.reassign_category(name, OTHER);
        info!(category = name, moved, "category deleted");
        Ok(moved)
    }
}
