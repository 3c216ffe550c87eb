// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/expression/mod.rs

pub mod condition;
pub mod constant;

pub use self::condition::CompareOperator;
pub use self::constant::TimeUtil as ConstantTimeUtil;
