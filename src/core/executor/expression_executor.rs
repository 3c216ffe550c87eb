// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/expression_executor.rs

use crate::core::event::complex_event::ComplexEvent;
use crate::core::event::value::AttributeValue;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use std::fmt::Debug;

/// Trait for all expression executors which can be executed on an event.
///
/// `execute` takes `Option<&dyn ComplexEvent>` because constants need no
/// event, and returns `None` when the expression has no value for the event
/// (missing attribute, type mismatch).
pub trait ExpressionExecutor: Debug + Send + Sync + 'static {
    fn execute(&self, event: Option<&dyn ComplexEvent>) -> Option<AttributeValue>;

    fn get_return_type(&self) -> ApiAttributeType;

    fn clone_executor(&self) -> Box<dyn ExpressionExecutor>;

    /// True for executors that read an attribute of the event.
    fn is_variable_executor(&self) -> bool {
        false
    }

    /// True for executors whose value does not depend on the event.
    fn is_constant_executor(&self) -> bool {
        false
    }
}

impl Clone for Box<dyn ExpressionExecutor> {
    fn clone(&self) -> Self {
        self.clone_executor()
    }
}
