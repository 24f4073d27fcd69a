// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Transaction, TransactionType};
use crate::period::PeriodWindows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_income: Decimal,
    pub all_time_total_expense: Decimal,
    pub balance: Decimal,
    pub weekly_expense: Decimal,
    pub monthly_expense: Decimal,
}

/// Single pass over the list. Income feeds `total_income`; every expense feeds
/// the all-time total and, when its scope and date allow, the week/month totals.
/// Sums saturate at `Decimal::MAX` instead of overflowing.
pub fn summarize(transactions: &[Transaction], windows: &PeriodWindows) -> Totals {
    let mut totals = Totals::default();
    for t in transactions {
        match t.r#type {
            TransactionType::Income => {
                totals.total_income = totals.total_income.saturating_add(t.amount)
            }
            TransactionType::Expense => {
                totals.all_time_total_expense =
                    totals.all_time_total_expense.saturating_add(t.amount);
                let scope = t.budget_scope;
                if scope.counts_toward_month() && windows.month.contains(t.date) {
                    totals.monthly_expense = totals.monthly_expense.saturating_add(t.amount);
                }
                if scope.counts_toward_week() && windows.week.contains(t.date) {
                    totals.weekly_expense = totals.weekly_expense.saturating_add(t.amount);
                }
            }
        }
    }
    totals.balance = totals
        .total_income
        .saturating_sub(totals.all_time_total_expense);
    debug!(?totals, "totals recomputed");
    totals
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryBreakdown {
    pub slices: Vec<CategorySlice>,
    pub total: Decimal,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Share of the grand total, in percent, for one slice.
    pub fn share(&self, slice: &CategorySlice) -> Decimal {
        if self.total.is_zero() {
            Decimal::ZERO
        } else {
            (slice.total / self.total).saturating_mul(Decimal::ONE_HUNDRED)
        }
    }
}

/// All-time expense totals per category, largest first. Equal totals are
/// ordered by name so the output does not depend on input order.
pub fn expense_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    let mut total = Decimal::ZERO;
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let slot = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
        total = total.saturating_add(t.amount);
    }
    let mut slices: Vec<CategorySlice> = agg
        .into_iter()
        .map(|(category, total)| CategorySlice {
            category: category.to_string(),
            total,
        })
        .collect();
    slices.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    CategoryBreakdown { slices, total }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub budget: Decimal,
    pub spent: Decimal,
    /// Unclamped; may exceed 100.
    pub percentage: Decimal,
    pub status: BudgetStatus,
    /// `spent - budget`, only once the budget is exceeded.
    pub overspent: Option<Decimal>,
}

impl BudgetProgress {
    pub fn new(budget: Decimal, spent: Decimal) -> Self {
        let percentage = if budget > Decimal::ZERO {
            spent
                .checked_div(budget)
                .map_or(Decimal::MAX, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
        } else {
            Decimal::ZERO
        };
        let status = if percentage > Decimal::from(90) {
            BudgetStatus::Danger
        } else if percentage > Decimal::from(70) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        };
        let overspent =
            (percentage > Decimal::ONE_HUNDRED).then(|| spent.saturating_sub(budget));
        Self {
            budget,
            spent,
            percentage,
            status,
            overspent,
        }
    }

    /// Percentage clamped to 100 for progress-bar display.
    pub fn bar_percentage(&self) -> Decimal {
        self.percentage.min(Decimal::ONE_HUNDRED)
    }
}
