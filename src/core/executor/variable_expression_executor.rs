// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/executor/variable_expression_executor.rs
use crate::core::event::complex_event::ComplexEvent;
use crate::core::event::state::state_event::StateEvent;
use crate::core::event::stream::stream_event::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::core::util::eventflux_constants::{
    BEFORE_WINDOW_DATA_INDEX, STREAM_ATTRIBUTE_INDEX_IN_TYPE, STREAM_ATTRIBUTE_TYPE_INDEX,
    STREAM_EVENT_CHAIN_INDEX, STREAM_EVENT_INDEX_IN_CHAIN,
};
use crate::query_api::definition::attribute::Type as ApiAttributeType;

/// Executor that reads one attribute out of an event.
#[derive(Debug, Clone)]
pub struct VariableExpressionExecutor {
    /// EventFlux position array for locating the attribute within a `ComplexEvent`.
    ///
    /// `position[STREAM_EVENT_CHAIN_INDEX]` - slot of the stream event inside a `StateEvent`.
    /// `position[STREAM_EVENT_INDEX_IN_CHAIN]` - kept for layout compatibility, always 0 here.
    /// `position[STREAM_ATTRIBUTE_TYPE_INDEX]` - which data section to access (before window,
    ///   output, etc.).
    /// `position[STREAM_ATTRIBUTE_INDEX_IN_TYPE]` - attribute index within the selected section.
    pub position: [i32; 4],
    pub return_type: ApiAttributeType,
    pub attribute_name_for_debug: String,
}

impl VariableExpressionExecutor {
    pub fn new(
        position: [i32; 4],
        return_type: ApiAttributeType,
        attribute_name_for_debug: String,
    ) -> Self {
        Self {
            position,
            return_type,
            attribute_name_for_debug,
        }
    }

    /// Variable reading `before_window_data[index]` of the stream in slot 0.
    pub fn new_for_stream(index: usize, return_type: ApiAttributeType, name: &str) -> Self {
        Self::new(
            [0, 0, BEFORE_WINDOW_DATA_INDEX as i32, index as i32],
            return_type,
            name.to_string(),
        )
    }

    pub fn get_position(&self) -> [i32; 4] {
        self.position
    }

    /// Update position information. Accepts a two element array (attribute
    /// type and index) or a full four element array for state events.
    pub fn set_position(&mut self, position: &[i32]) {
        if position.len() == 2 {
            self.position[STREAM_ATTRIBUTE_TYPE_INDEX] = position[0];
            self.position[STREAM_ATTRIBUTE_INDEX_IN_TYPE] = position[1];
        } else if position.len() == 4 {
            self.position[STREAM_EVENT_CHAIN_INDEX] = position[0];
            self.position[STREAM_EVENT_INDEX_IN_CHAIN] = position[1];
            self.position[STREAM_ATTRIBUTE_TYPE_INDEX] = position[2];
            self.position[STREAM_ATTRIBUTE_INDEX_IN_TYPE] = position[3];
        }
    }
}

impl ExpressionExecutor for VariableExpressionExecutor {
    fn execute(&self, event_opt: Option<&dyn ComplexEvent>) -> Option<AttributeValue> {
        let complex_event = event_opt?;

        if let Some(stream_event) = complex_event.as_any().downcast_ref::<StreamEvent>() {
            return stream_event
                .get_attribute_by_position(&self.position)
                .cloned();
        }

        if let Some(state_event) = complex_event.as_any().downcast_ref::<StateEvent>() {
            return state_event.get_attribute(&self.position).cloned();
        }

        complex_event
            .get_output_data()
            .and_then(|d| d.get(self.position[STREAM_ATTRIBUTE_INDEX_IN_TYPE] as usize))
            .cloned()
    }

    fn get_return_type(&self) -> ApiAttributeType {
        self.return_type
    }

    fn clone_executor(&self) -> Box<dyn ExpressionExecutor> {
        Box::new(self.clone())
    }

    fn is_variable_executor(&self) -> bool {
        true
    }
}
