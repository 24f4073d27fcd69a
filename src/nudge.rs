// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Advisory messages derived from the newest transaction and the running totals.
//!
//! Rules run in priority order and the first match wins:
//! 1. the newest transaction is an expense above half the weekly budget;
//! 2. income exceeds 1.5x all-time expense, and the resulting suggestion text
//!    differs from the last one shown.
//!
//! Only the last savings suggestion is remembered, so the same advice can be
//! shown again after a different suggestion has replaced it.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Transaction, TransactionType};
use crate::utils::fmt_inr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Nudge {
    LargeExpense { title: String },
    Savings { savings: Decimal, suggestion: String },
}

impl fmt::Display for Nudge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeExpense { title } => write!(
                f,
                "Heads up! Your recent transaction for \"{}\" was quite large. Make sure it fits within your budget goals.",
                title
            ),
            Self::Savings { suggestion, .. } => {
                write!(f, "Great job on your savings this period! {}", suggestion)
            }
        }
    }
}

pub fn savings_suggestion(savings: &Decimal) -> String {
    format!(
        "You've saved {} so far. Consider moving some of it to your savings account!",
        fmt_inr(savings)
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NudgeAdvisor {
    message: Option<Nudge>,
    last_suggestion: Option<String>,
}

impl NudgeAdvisor {
    /// `last_suggestion` is the persisted de-duplication key, if any.
    pub fn new(last_suggestion: Option<String>) -> Self {
        Self {
            message: None,
            last_suggestion,
        }
    }

    pub fn message(&self) -> Option<&Nudge> {
        self.message.as_ref()
    }

    pub fn last_suggestion(&self) -> Option<&str> {
        self.last_suggestion.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// Runs the rules once. Returns the nudge that fired on this pass; when
    /// nothing fires the current message is left in place.
    pub fn evaluate(
        &mut self,
        transactions: &[Transaction],
        weekly_budget: Decimal,
    ) -> Option<&Nudge> {
        let latest = transactions.last()?;

        if latest.is_expense() && latest.amount > weekly_budget.saturating_mul(Decimal::new(5, 1)) {
            debug!(id = %latest.id, "large expense nudge");
            self.message = Some(Nudge::LargeExpense {
                title: latest.title.clone(),
            });
            return self.message.as_ref();
        }

        let (income, expense) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(inc, exp), t| match t.r#type {
                TransactionType::Income => (inc.saturating_add(t.amount), exp),
                TransactionType::Expense => (inc, exp.saturating_add(t.amount)),
            },
        );
        if income > expense.saturating_mul(Decimal::new(15, 1)) {
            let savings = income.saturating_sub(expense);
            let suggestion = savings_suggestion(&savings);
            if self.last_suggestion.as_deref() != Some(suggestion.as_str()) {
                debug!(%savings, "savings nudge");
                self.last_suggestion = Some(suggestion.clone());
                self.message = Some(Nudge::Savings {
                    savings,
                    suggestion,
                });
                return self.message.as_ref();
            }
        }
        None
    }
}
