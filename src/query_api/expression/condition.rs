// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/expression/condition.rs

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Comparison operators usable in a join or lookup condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Equal,
    NotEqual,
}

impl CompareOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(CompareOperator::LessThan),
            ">" => Some(CompareOperator::GreaterThan),
            "<=" => Some(CompareOperator::LessThanEqual),
            ">=" => Some(CompareOperator::GreaterThanEqual),
            "==" | "=" => Some(CompareOperator::Equal),
            "!=" | "<>" => Some(CompareOperator::NotEqual),
            _ => None,
        }
    }

    pub fn is_equality(self) -> bool {
        matches!(self, CompareOperator::Equal | CompareOperator::NotEqual)
    }

    /// Whether `left op right` holds given `left.cmp(right)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOperator::LessThan => ordering.is_lt(),
            CompareOperator::GreaterThan => ordering.is_gt(),
            CompareOperator::LessThanEqual => ordering.is_le(),
            CompareOperator::GreaterThanEqual => ordering.is_ge(),
            CompareOperator::Equal => ordering.is_eq(),
            CompareOperator::NotEqual => ordering.is_ne(),
        }
    }
}
