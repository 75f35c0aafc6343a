//! Imputation module for handling missing values.
//!
//! An [`ImputationPlan`] is an ordered list of per-column rules; the
//! [`StatisticalImputer`] applies it rule by rule.

mod statistical;

use crate::types::columns;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use statistical::StatisticalImputer;

/// How the missing cells of one column are filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum FillPolicy {
    /// Fill with a fixed literal.
    Constant(String),
    /// Fill with the most frequent non-missing value of the column.
    Mode,
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPolicy::Constant(value) => write!(f, "constant '{}'", value),
            FillPolicy::Mode => write!(f, "mode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationRule {
    pub column: String,
    pub policy: FillPolicy,
}

impl ImputationRule {
    pub fn constant(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            policy: FillPolicy::Constant(value.into()),
        }
    }

    pub fn mode(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            policy: FillPolicy::Mode,
        }
    }
}

/// Ordered imputation rules. Rules run in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationPlan {
    pub rules: Vec<ImputationRule>,
}

impl ImputationPlan {
    pub fn new(rules: Vec<ImputationRule>) -> Self {
        Self { rules }
    }

    /// The fill rules for the streaming catalog dataset.
    pub fn catalog_default() -> Self {
        Self::new(vec![
            ImputationRule::constant(columns::COUNTRY, "Unknown"),
            ImputationRule::constant(columns::DIRECTOR, "No Director Listed"),
            ImputationRule::constant(columns::CAST, "No Cast Listed"),
            ImputationRule::mode(columns::RATING),
            ImputationRule::mode(columns::DURATION),
            ImputationRule::constant(columns::DATE_ADDED, "Missing Date"),
        ])
    }

    /// Columns the plan touches, in rule order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.column.as_str())
    }
}
