// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_NOTES_LEN: usize = 500;

/// Closed category set used for expense grouping. Anything outside the set
/// collapses to `Other`, including unrecognized strings in persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDrink,
    Shopping,
    Groceries,
    BillsAndUtilities,
    Travel,
    Gas,
    HealthAndWellness,
    Automotive,
    Entertainment,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::FoodAndDrink,
        Category::Shopping,
        Category::Groceries,
        Category::BillsAndUtilities,
        Category::Travel,
        Category::Gas,
        Category::HealthAndWellness,
        Category::Automotive,
        Category::Entertainment,
        Category::Income,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDrink => "Food & Drink",
            Category::Shopping => "Shopping",
            Category::Groceries => "Groceries",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Travel => "Travel",
            Category::Gas => "Gas",
            Category::HealthAndWellness => "Health & Wellness",
            Category::Automotive => "Automotive",
            Category::Entertainment => "Entertainment",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }

    /// Map a raw category string to a member of the closed set.
    /// Empty or unrecognized input falls back to `Other`.
    pub fn parse_or_other(s: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse_or_other(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Derived from the sign of the amount: non-negative is income.
    pub fn from_amount(amount: Decimal) -> TransactionType {
        if amount >= Decimal::ZERO {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        })
    }
}

/// Canonical persisted record. `r#type` always agrees with the sign of
/// `amount`; both are recomputed together on every create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub r#type: TransactionType,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied input for creation. Identity, type and timestamps are
/// always system-derived.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub post_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub category: Option<Category>,
}

/// Partial update; `None` leaves the field unchanged. There is deliberately
/// no `type` field here: it is re-derived from the effective amount.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub post_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub category: Option<Category>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description exceeds 200 characters")]
    DescriptionTooLong,
    #[error("notes exceed 500 characters")]
    NotesTooLong,
}

/// Trim and length-check a description.
pub fn clean_description(raw: &str) -> Result<String, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DraftError::EmptyDescription);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DraftError::DescriptionTooLong);
    }
    Ok(trimmed.to_string())
}

/// Trim and length-check optional notes; blank input becomes `None`.
pub fn clean_notes(raw: Option<&str>) -> Result<Option<String>, DraftError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            if trimmed.chars().count() > MAX_NOTES_LEN {
                return Err(DraftError::NotesTooLong);
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}
