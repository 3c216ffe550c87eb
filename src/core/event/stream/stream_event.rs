// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/stream_event.rs
use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
use crate::core::event::value::AttributeValue;
use crate::core::util::eventflux_constants::{
    BEFORE_WINDOW_DATA_INDEX, ON_AFTER_WINDOW_DATA_INDEX, OUTPUT_DATA_INDEX,
    STREAM_ATTRIBUTE_INDEX_IN_TYPE, STREAM_ATTRIBUTE_TYPE_INDEX,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A single event of one stream as it moves through the processor chain.
///
/// Attribute data is split the same way as the rest of the engine lays it
/// out: values needed before the window, values needed after it, and the
/// projected output row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub timestamp: i64,
    pub output_data: Option<Vec<AttributeValue>>,
    pub event_type: ComplexEventType,

    pub before_window_data: Vec<AttributeValue>,
    pub on_after_window_data: Vec<AttributeValue>,
}

impl StreamEvent {
    pub fn new(
        timestamp: i64,
        before_window_data_size: usize,
        on_after_window_data_size: usize,
        output_data_size: usize,
    ) -> Self {
        StreamEvent {
            timestamp,
            output_data: if output_data_size > 0 {
                Some(vec![AttributeValue::default(); output_data_size])
            } else {
                None
            },
            event_type: ComplexEventType::default(),
            before_window_data: vec![AttributeValue::default(); before_window_data_size],
            on_after_window_data: vec![AttributeValue::default(); on_after_window_data_size],
        }
    }

    /// Create a CURRENT event whose `before_window_data` is `data`.
    pub fn new_with_data(timestamp: i64, data: Vec<AttributeValue>) -> Self {
        StreamEvent {
            timestamp,
            output_data: None,
            event_type: ComplexEventType::Current,
            before_window_data: data,
            on_after_window_data: Vec::new(),
        }
    }

    /// Builder-style variant of [`ComplexEvent::set_event_type`].
    pub fn with_type(mut self, event_type: ComplexEventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Retrieve an attribute using the EventFlux position array convention.
    /// Only `position[STREAM_ATTRIBUTE_TYPE_INDEX]` and
    /// `position[STREAM_ATTRIBUTE_INDEX_IN_TYPE]` are respected.
    pub fn get_attribute_by_position(&self, position: &[i32]) -> Option<&AttributeValue> {
        let attr_index = *position.get(STREAM_ATTRIBUTE_INDEX_IN_TYPE)? as usize;
        match position.get(STREAM_ATTRIBUTE_TYPE_INDEX).copied()? as usize {
            BEFORE_WINDOW_DATA_INDEX => self.before_window_data.get(attr_index),
            OUTPUT_DATA_INDEX => self.output_data.as_ref().and_then(|v| v.get(attr_index)),
            ON_AFTER_WINDOW_DATA_INDEX => self.on_after_window_data.get(attr_index),
            _ => None,
        }
    }
}

impl ComplexEvent for StreamEvent {
    fn get_output_data(&self) -> Option<&[AttributeValue]> {
        self.output_data.as_deref()
    }
    fn set_output_data(&mut self, data: Option<Vec<AttributeValue>>) {
        self.output_data = data;
    }

    fn get_timestamp(&self) -> i64 {
        self.timestamp
    }
    fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    fn get_event_type(&self) -> ComplexEventType {
        self.event_type
    }
    fn set_event_type(&mut self, event_type: ComplexEventType) {
        self.event_type = event_type;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_attribute_by_position() {
        let mut se = StreamEvent::new(10, 2, 1, 0);
        se.before_window_data[1] = AttributeValue::Long(7);
        se.on_after_window_data[0] = AttributeValue::Int(3);

        let before = [0, 0, BEFORE_WINDOW_DATA_INDEX as i32, 1];
        let after = [0, 0, ON_AFTER_WINDOW_DATA_INDEX as i32, 0];
        let output = [0, 0, OUTPUT_DATA_INDEX as i32, 0];
        assert_eq!(
            se.get_attribute_by_position(&before),
            Some(&AttributeValue::Long(7))
        );
        assert_eq!(
            se.get_attribute_by_position(&after),
            Some(&AttributeValue::Int(3))
        );
        assert_eq!(se.get_attribute_by_position(&output), None);
    }

    #[test]
    fn test_set_expired_keeps_timer_type() {
        let mut se = StreamEvent::new(0, 0, 0, 0).with_type(ComplexEventType::Timer);
        se.set_expired(false);
        assert_eq!(se.get_event_type(), ComplexEventType::Timer);
        se.set_expired(true);
        assert!(se.is_expired());
        se.set_expired(false);
        assert_eq!(se.get_event_type(), ComplexEventType::Current);
    }
}
