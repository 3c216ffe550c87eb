// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/util/collection/operator.rs
// Lookup predicates evaluated against a window's retained events.

use crate::core::event::complex_event::ComplexEvent;
use crate::core::event::state::StateEvent;
use crate::core::event::stream::{SnapshotableStreamEventQueue, StreamEvent, StreamEventCloner};
use crate::core::event::value::AttributeValue;
use crate::core::executor::expression_executor::ExpressionExecutor;
use crate::query_api::definition::StreamDefinition;
use std::fmt::Debug;
use std::sync::Arc;

/// A condition compiled against a store, ready to be probed with matching events.
pub trait CompiledCondition: Debug + Send + Sync {
    /// Return a copy of the first stored event satisfying the condition for
    /// `matching_event`, produced with `cloner`.
    fn find(
        &self,
        matching_event: &StateEvent,
        store: &SnapshotableStreamEventQueue,
        cloner: &StreamEventCloner,
    ) -> Option<StreamEvent>;
}

/// Where the probing stream and the store sit inside the `StateEvent` a
/// condition is evaluated on.
#[derive(Debug, Clone)]
pub struct MatchingMetaInfoHolder {
    pub matching_stream_event_index: usize,
    pub store_event_index: usize,
    pub store_definition: Arc<StreamDefinition>,
}

impl MatchingMetaInfoHolder {
    pub fn new(
        matching_stream_event_index: usize,
        store_event_index: usize,
        store_definition: Arc<StreamDefinition>,
    ) -> Self {
        Self {
            matching_stream_event_index,
            store_event_index,
            store_definition,
        }
    }

    /// Number of slots a probe `StateEvent` needs.
    pub fn state_size(&self) -> usize {
        self.matching_stream_event_index.max(self.store_event_index) + 1
    }
}

/// Linear scan operator: places each stored event in the store slot of the
/// probe and keeps the first one for which the condition yields `true`.
#[derive(Debug)]
pub struct CollectionOperator {
    expression: Box<dyn ExpressionExecutor>,
    store_event_index: usize,
    state_size: usize,
}

impl CollectionOperator {
    pub fn new(expression: Box<dyn ExpressionExecutor>, meta: &MatchingMetaInfoHolder) -> Self {
        Self {
            expression,
            store_event_index: meta.store_event_index,
            state_size: meta.state_size(),
        }
    }
}

impl CompiledCondition for CollectionOperator {
    fn find(
        &self,
        matching_event: &StateEvent,
        store: &SnapshotableStreamEventQueue,
        cloner: &StreamEventCloner,
    ) -> Option<StreamEvent> {
        let mut probe = matching_event.clone();
        probe.expand_to_size(self.state_size);
        for candidate in store.iter() {
            probe.set_event(self.store_event_index, candidate.clone());
            if let Some(AttributeValue::Bool(true)) =
                self.expression.execute(Some(&probe as &dyn ComplexEvent))
            {
                return Some(cloner.copy_stream_event(candidate));
            }
        }
        None
    }
}
