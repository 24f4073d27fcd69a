// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a mutation was rejected. A rejected mutation leaves every store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("Amount {0} is above the largest accepted amount")]
    AmountTooLarge(Decimal),

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Please enter a valid category name")]
    EmptyCategoryName,

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Category '{0}' not found")]
    UnknownCategory(String),

    #[error("New name for category '{0}' is unchanged")]
    UnchangedCategoryName(String),

    #[error("The '{0}' category cannot be renamed or deleted")]
    ProtectedCategory(String),

    #[error("Budget must be a positive number (got {0})")]
    NonPositiveBudget(Decimal),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
