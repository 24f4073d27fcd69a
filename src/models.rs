// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// Which period totals an expense counts toward. Income ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetScope {
    #[default]
    All,
    Monthly,
    Weekly,
    None,
}

impl BudgetScope {
    pub fn counts_toward_month(&self) -> bool {
        match self {
            Self::All | Self::Monthly => true,
            Self::Weekly | Self::None => false,
        }
    }

    pub fn counts_toward_week(&self) -> bool {
        match self {
            Self::All | Self::Weekly => true,
            Self::Monthly | Self::None => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "none" => Ok(Self::None),
            other => Err(anyhow::anyhow!(
                "Invalid budget scope '{}', expected all|monthly|weekly|none",
                other
            )),
        }
    }
}

/// Cadence tag for recurring items. Informational only: no occurrences are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            other => Err(anyhow::anyhow!(
                "Invalid recurrence '{}', expected monthly",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TransactionType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub budget_scope: BudgetScope,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }
}

/// A transaction as entered, before the store has given it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TransactionType,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub recurrence: Recurrence,
    pub budget_scope: BudgetScope,
}

impl NewTransaction {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        r#type: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            category: category.into(),
            r#type,
            date,
            description: None,
            is_recurring: false,
            recurrence: Recurrence::Monthly,
            budget_scope: BudgetScope::All,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn recurring(mut self, recurrence: Recurrence) -> Self {
        self.is_recurring = true;
        self.recurrence = recurrence;
        self
    }

    pub fn with_scope(mut self, scope: BudgetScope) -> Self {
        self.budget_scope = scope;
        self
    }

    pub(crate) fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            r#type: self.r#type,
            date: self.date,
            description: self.description,
            is_recurring: self.is_recurring,
            recurrence: self.recurrence,
            budget_scope: self.budget_scope,
        }
    }
}

/// Field-wise edit of an existing transaction. `None` leaves a field untouched;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub r#type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
    pub is_recurring: Option<bool>,
    pub recurrence: Option<Recurrence>,
    pub budget_scope: Option<BudgetScope>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, t: &mut Transaction) {
        if let Some(title) = self.title {
            t.title = title;
        }
        if let Some(amount) = self.amount {
            t.amount = amount;
        }
        if let Some(category) = self.category {
            t.category = category;
        }
        if let Some(kind) = self.r#type {
            t.r#type = kind;
        }
        if let Some(date) = self.date {
            t.date = date;
        }
        if let Some(description) = self.description {
            t.description = description;
        }
        if let Some(flag) = self.is_recurring {
            t.is_recurring = flag;
        }
        if let Some(recurrence) = self.recurrence {
            t.recurrence = recurrence;
        }
        if let Some(scope) = self.budget_scope {
            t.budget_scope = scope;
        }
    }
}

/// Type filter used by the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    All,
    Income,
    Expense,
}

impl FilterType {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl FromStr for FilterType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid filter '{}', expected all|income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
}

impl FromStr for BudgetPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(anyhow::anyhow!(
                "Invalid budget period '{}', expected weekly|monthly",
                other
            )),
        }
    }
}

pub const DEFAULT_MONTHLY_BUDGET: i64 = 50_000;
pub const DEFAULT_WEEKLY_BUDGET: i64 = 10_000;
pub const DEFAULT_SYNC_INTERVAL_MINUTES: u32 = 5;
/// Largest amount a single transaction may carry (one lakh crore rupees).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budgets {
    pub monthly: Decimal,
    pub weekly: Decimal,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            monthly: Decimal::from(DEFAULT_MONTHLY_BUDGET),
            weekly: Decimal::from(DEFAULT_WEEKLY_BUDGET),
        }
    }
}

/// Full persisted state, in the shape handed to the persistence port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<String>,
    pub monthly_budget: Decimal,
    pub weekly_budget: Decimal,
    pub sync_interval_minutes: u32,
}

impl Default for Snapshot {
    fn default() -> Self {
        let budgets = Budgets::default();
        Self {
            transactions: Vec::new(),
            categories: crate::categories::DEFAULT_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            monthly_budget: budgets.monthly,
            weekly_budget: budgets.weekly,
            sync_interval_minutes: DEFAULT_SYNC_INTERVAL_MINUTES,
        }
    }
}

impl Snapshot {
    /// Default seed plus a month of sample activity (October 2023).
    pub fn demo() -> Self {
        let d = |day: u32| NaiveDate::from_ymd_opt(2023, 10, day).unwrap_or_default();
        let rows: [(&str, &str, i64, &str, TransactionType, u32, Option<&str>); 9] = [
            ("1", "Monthly Salary", 5000, "Salary", TransactionType::Income, 1, Some("October salary")),
            ("2", "Grocery Shopping", 150, "Food", TransactionType::Expense, 5, Some("Weekly groceries")),
            ("3", "Train Ticket", 45, "Transport", TransactionType::Expense, 6, None),
            ("4", "Freelance Project", 750, "Freelance", TransactionType::Income, 10, None),
            ("5", "Electricity Bill", 80, "Utilities", TransactionType::Expense, 12, None),
            ("6", "Movie Night", 35, "Entertainment", TransactionType::Expense, 15, None),
            ("7", "New Shoes", 120, "Shopping", TransactionType::Expense, 20, None),
            ("8", "Stock Dividend", 200, "Investment", TransactionType::Income, 22, None),
            ("9", "Pharmacy", 25, "Health", TransactionType::Expense, 25, None),
        ];
        let transactions = rows
            .into_iter()
            .map(|(id, title, amount, category, kind, day, description)| Transaction {
                id: id.to_string(),
                title: title.to_string(),
                amount: Decimal::from(amount),
                category: category.to_string(),
                r#type: kind,
                date: d(day),
                description: description.map(str::to_string),
                is_recurring: false,
                recurrence: Recurrence::Monthly,
                budget_scope: BudgetScope::All,
            })
            .collect();
        Self {
            transactions,
            ..Self::default()
        }
    }
}
