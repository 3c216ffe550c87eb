// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/util/collection/mod.rs

pub mod operator;

pub use self::operator::{CollectionOperator, CompiledCondition, MatchingMetaInfoHolder};
