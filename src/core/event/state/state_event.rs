// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/state/state_event.rs
// Composite event carrying one stream event per matching position. A window's
// find() receives one of these as the probe side of a join or table lookup.
use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
use crate::core::event::stream::StreamEvent;
use crate::core::event::value::AttributeValue;
use crate::core::util::eventflux_constants::{
    STATE_OUTPUT_DATA_INDEX, STREAM_ATTRIBUTE_INDEX_IN_TYPE, STREAM_ATTRIBUTE_TYPE_INDEX,
    STREAM_EVENT_CHAIN_INDEX,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STATE_EVENT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    pub stream_events: Vec<Option<StreamEvent>>,
    pub timestamp: i64,
    pub event_type: ComplexEventType,
    pub output_data: Option<Vec<AttributeValue>>,
    pub id: u64,
}

impl StateEvent {
    pub fn new(stream_events_size: usize, output_size: usize) -> Self {
        Self {
            stream_events: vec![None; stream_events_size],
            timestamp: -1,
            event_type: ComplexEventType::default(),
            output_data: if output_size > 0 {
                Some(vec![AttributeValue::default(); output_size])
            } else {
                None
            },
            id: NEXT_STATE_EVENT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn get_stream_event(&self, position: usize) -> Option<&StreamEvent> {
        self.stream_events.get(position)?.as_ref()
    }

    /// Place `event` at `position`. Out-of-range positions are ignored;
    /// call [`StateEvent::expand_to_size`] first when the layout can grow.
    pub fn set_event(&mut self, position: usize, event: StreamEvent) {
        if let Some(slot) = self.stream_events.get_mut(position) {
            *slot = Some(event);
        }
    }

    pub fn expand_to_size(&mut self, min_size: usize) {
        if self.stream_events.len() < min_size {
            self.stream_events.resize(min_size, None);
        }
    }

    /// Resolve an attribute through a full position array: chain index picks
    /// the stream event, type and index-in-type pick the value inside it.
    /// A type index of `STATE_OUTPUT_DATA_INDEX` reads this event's own output.
    pub fn get_attribute(&self, position: &[i32]) -> Option<&AttributeValue> {
        if *position.get(STREAM_ATTRIBUTE_TYPE_INDEX)? as usize == STATE_OUTPUT_DATA_INDEX {
            let idx = *position.get(STREAM_ATTRIBUTE_INDEX_IN_TYPE)? as usize;
            return self.output_data.as_ref()?.get(idx);
        }
        let chain = *position.get(STREAM_EVENT_CHAIN_INDEX)? as usize;
        self.get_stream_event(chain)?
            .get_attribute_by_position(position)
    }
}

impl ComplexEvent for StateEvent {
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
    use crate::core::util::eventflux_constants::BEFORE_WINDOW_DATA_INDEX;

    #[test]
    fn test_set_event_and_lookup() {
        let mut state = StateEvent::new(1, 0);
        state.set_event(3, StreamEvent::new(0, 1, 0, 0));
        assert!(state.get_stream_event(0).is_none());

        state.expand_to_size(2);
        state.set_event(
            1,
            StreamEvent::new_with_data(5, vec![AttributeValue::String("x".into())]),
        );
        let pos = [1, 0, BEFORE_WINDOW_DATA_INDEX as i32, 0];
        assert_eq!(
            state.get_attribute(&pos),
            Some(&AttributeValue::String("x".into()))
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let a = StateEvent::new(1, 0);
        let b = StateEvent::new(1, 0);
        assert_ne!(a.id, b.id);
    }
}
