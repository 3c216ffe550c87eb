// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/condition/compare_expression_executor.rs
// Comparison predicate used by window lookups (`price > 10`, `a.symbol == b.symbol`).

use std::cmp::Ordering;

use crate::core::event::complex_event::ComplexEvent;
use crate::core::event::value::AttributeValue;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use crate::query_api::expression::condition::CompareOperator as ConditionCompareOperator;

/// Boolean comparison of two executors' values with numeric widening.
#[derive(Debug)]
pub struct CompareExpressionExecutor {
    left_executor: Box<dyn ExpressionExecutor>,
    right_executor: Box<dyn ExpressionExecutor>,
    operator: ConditionCompareOperator,
    cmp_type: ComparisonType,
}

/// Domain both operands are widened into before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComparisonType {
    Integral,
    Floating,
    Bool,
    String,
}

impl ComparisonType {
    fn resolve(
        left: ApiAttributeType,
        right: ApiAttributeType,
        op: ConditionCompareOperator,
    ) -> Result<Self, String> {
        use ApiAttributeType::*;
        match (left, right) {
            (STRING, STRING) => Ok(ComparisonType::String),
            (BOOL, BOOL) if op.is_equality() => Ok(ComparisonType::Bool),
            (BOOL, BOOL) => Err(format!("Only == and != supported for BOOL, found {op:?}")),
            (INT | LONG, INT | LONG) => Ok(ComparisonType::Integral),
            (INT | LONG | FLOAT | DOUBLE, INT | LONG | FLOAT | DOUBLE) => {
                Ok(ComparisonType::Floating)
            }
            _ => Err(format!(
                "Cannot compare values of types {left:?} and {right:?}"
            )),
        }
    }

    fn compare(self, left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
        match self {
            ComparisonType::Integral => Some(integral(left)?.cmp(&integral(right)?)),
            ComparisonType::Floating => floating(left)?.partial_cmp(&floating(right)?),
            ComparisonType::Bool => Some(left.as_bool()?.cmp(&right.as_bool()?)),
            ComparisonType::String => Some(left.as_string()?.cmp(right.as_string()?)),
        }
    }
}

fn integral(value: &AttributeValue) -> Option<i64> {
    match value {
        AttributeValue::Int(v) => Some(i64::from(*v)),
        AttributeValue::Long(v) => Some(*v),
        _ => None,
    }
}

fn floating(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Double(v) => Some(*v),
        other => integral(other).map(|v| v as f64),
    }
}

impl CompareExpressionExecutor {
    pub fn new(
        left: Box<dyn ExpressionExecutor>,
        right: Box<dyn ExpressionExecutor>,
        op: ConditionCompareOperator,
    ) -> Result<Self, String> {
        let cmp_type =
            ComparisonType::resolve(left.get_return_type(), right.get_return_type(), op)?;
        Ok(Self {
            left_executor: left,
            right_executor: right,
            operator: op,
            cmp_type,
        })
    }
}

impl ExpressionExecutor for CompareExpressionExecutor {
    fn execute(&self, event: Option<&dyn ComplexEvent>) -> Option<AttributeValue> {
        let left_val = self.left_executor.execute(event)?;
        let right_val = self.right_executor.execute(event)?;

        // Null compares unequal to everything.
        if left_val.is_null() || right_val.is_null() {
            return Some(AttributeValue::Bool(
                self.operator == ConditionCompareOperator::NotEqual,
            ));
        }

        let ordering = self.cmp_type.compare(&left_val, &right_val)?;
        Some(AttributeValue::Bool(self.operator.holds(ordering)))
    }

    fn get_return_type(&self) -> ApiAttributeType {
        ApiAttributeType::BOOL
    }

    fn clone_executor(&self) -> Box<dyn ExpressionExecutor> {
        Box::new(CompareExpressionExecutor {
            left_executor: self.left_executor.clone_executor(),
            right_executor: self.right_executor.clone_executor(),
            operator: self.operator,
            cmp_type: self.cmp_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::stream::StreamEvent;
    use crate::core::executor::constant_expression_executor::ConstantExpressionExecutor;
    use crate::core::executor::variable_expression_executor::VariableExpressionExecutor;

    fn constant(value: AttributeValue) -> Box<dyn ExpressionExecutor> {
        Box::new(ConstantExpressionExecutor::from_value(value))
    }

    #[test]
    fn test_compare_greater_than_int() {
        let cmp = CompareExpressionExecutor::new(
            constant(AttributeValue::Int(20)),
            constant(AttributeValue::Int(10)),
            ConditionCompareOperator::GreaterThan,
        )
        .unwrap();
        assert_eq!(cmp.execute(None), Some(AttributeValue::Bool(true)));
        assert_eq!(cmp.get_return_type(), ApiAttributeType::BOOL);
    }

    #[test]
    fn test_compare_cross_numeric_types() {
        let cmp = CompareExpressionExecutor::new(
            constant(AttributeValue::Double(7.0)),
            constant(AttributeValue::Long(7)),
            ConditionCompareOperator::GreaterThanEqual,
        )
        .unwrap();
        assert_eq!(cmp.execute(None), Some(AttributeValue::Bool(true)));
    }

    #[test]
    fn test_compare_string_against_event() {
        let symbol = Box::new(VariableExpressionExecutor::new_for_stream(
            0,
            ApiAttributeType::STRING,
            "symbol",
        ));
        let cmp = CompareExpressionExecutor::new(
            symbol,
            constant(AttributeValue::String("IBM".into())),
            ConditionCompareOperator::Equal,
        )
        .unwrap();
        let event = StreamEvent::new_with_data(0, vec![AttributeValue::String("IBM".into())]);
        assert_eq!(
            cmp.execute(Some(&event as &dyn ComplexEvent)),
            Some(AttributeValue::Bool(true))
        );
        let cloned = cmp.clone_executor();
        let other = StreamEvent::new_with_data(0, vec![AttributeValue::String("WSO2".into())]);
        assert_eq!(
            cloned.execute(Some(&other as &dyn ComplexEvent)),
            Some(AttributeValue::Bool(false))
        );
    }

    #[test]
    fn test_compare_with_null_operand() {
        let cmp = CompareExpressionExecutor::new(
            constant(AttributeValue::Int(20)),
            Box::new(ConstantExpressionExecutor::new(
                AttributeValue::Null,
                ApiAttributeType::INT,
            )),
            ConditionCompareOperator::GreaterThan,
        )
        .unwrap();
        assert_eq!(cmp.execute(None), Some(AttributeValue::Bool(false)));
    }

    #[test]
    fn test_compare_incompatible_types() {
        let res = CompareExpressionExecutor::new(
            constant(AttributeValue::Int(20)),
            constant(AttributeValue::String("text".into())),
            ConditionCompareOperator::GreaterThan,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_ordering_on_bool_rejected() {
        let res = CompareExpressionExecutor::new(
            constant(AttributeValue::Bool(false)),
            constant(AttributeValue::Bool(true)),
            ConditionCompareOperator::LessThanEqual,
        );
        assert!(res.is_err());
    }
}
