// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/mod.rs
// Definitions and constants produced by the query planner and consumed by core.

pub mod definition;
pub mod expression;

pub use self::definition::{Attribute, AttributeType, StreamDefinition};
