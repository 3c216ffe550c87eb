// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/stream_event_cloner.rs
// Copies stream events into freshly sized events so retained copies never
// alias data owned upstream or downstream.

use super::stream_event::StreamEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamEventCloner {
    before_window_data_size: usize,
    on_after_window_data_size: usize,
    output_data_size: usize,
}

impl StreamEventCloner {
    /// Create a cloner with explicit section sizes.
    pub fn new_with_sizes(
        before_window_data_size: usize,
        on_after_window_data_size: usize,
        output_data_size: usize,
    ) -> Self {
        Self {
            before_window_data_size,
            on_after_window_data_size,
            output_data_size,
        }
    }

    pub fn from_event(event: &StreamEvent) -> Self {
        Self {
            before_window_data_size: event.before_window_data.len(),
            on_after_window_data_size: event.on_after_window_data.len(),
            output_data_size: event.output_data.as_ref().map_or(0, |v| v.len()),
        }
    }

    /// Copy `stream_event` into a new event of this cloner's shape.
    ///
    /// Values beyond the cloner's sizes are dropped, missing values stay `Null`.
    /// Timestamp and event type are carried over.
    pub fn copy_stream_event(&self, stream_event: &StreamEvent) -> StreamEvent {
        let mut new_event = StreamEvent::new(
            stream_event.timestamp,
            self.before_window_data_size,
            self.on_after_window_data_size,
            self.output_data_size,
        );
        for (dest, src) in new_event
            .before_window_data
            .iter_mut()
            .zip(stream_event.before_window_data.iter())
        {
            *dest = src.clone();
        }
        for (dest, src) in new_event
            .on_after_window_data
            .iter_mut()
            .zip(stream_event.on_after_window_data.iter())
        {
            *dest = src.clone();
        }
        if let (Some(src), Some(dest)) = (
            stream_event.output_data.as_ref(),
            new_event.output_data.as_mut(),
        ) {
            for (d, s) in dest.iter_mut().zip(src.iter()) {
                *d = s.clone();
            }
        }
        new_event.event_type = stream_event.event_type;
        new_event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::complex_event::ComplexEventType;
    use crate::core::event::value::AttributeValue;

    #[test]
    fn test_copy_is_independent_of_source() {
        let mut original = StreamEvent::new_with_data(
            42,
            vec![AttributeValue::Int(5), AttributeValue::String("a".into())],
        );
        original.event_type = ComplexEventType::Expired;
        let cloner = StreamEventCloner::from_event(&original);
        let copy = cloner.copy_stream_event(&original);

        original.before_window_data[0] = AttributeValue::Int(99);
        assert_eq!(copy.before_window_data[0], AttributeValue::Int(5));
        assert_eq!(copy.timestamp, 42);
        assert_eq!(copy.event_type, ComplexEventType::Expired);
    }

    #[test]
    fn test_copy_resizes_to_cloner_shape() {
        let original = StreamEvent::new_with_data(1, vec![AttributeValue::Long(1)]);
        let cloner = StreamEventCloner::new_with_sizes(2, 0, 1);
        let copy = cloner.copy_stream_event(&original);
        assert_eq!(
            copy.before_window_data,
            vec![AttributeValue::Long(1), AttributeValue::Null]
        );
        assert_eq!(copy.output_data, Some(vec![AttributeValue::Null]));
    }
}
