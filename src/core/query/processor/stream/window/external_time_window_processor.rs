// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/processor/stream/window/external_time_window_processor.rs

//! Sliding window driven by a timestamp carried inside each event.
//!
//! Every CURRENT arrival is retained as an EXPIRED-tagged copy. When a later
//! arrival's timestamp moves past `retained + window`, the copy is removed,
//! re-stamped with the arrival's time and spliced into the batch directly in
//! front of that arrival. Timestamps are expected to be non-decreasing; the
//! eviction scan stops at the first retained event still inside the window.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::event::complex_event::{ComplexEvent, ComplexEventType};
use crate::core::event::state::StateEvent;
use crate::core::event::stream::{
    ComplexEventChunk, SnapshotableStreamEventQueue, StreamEvent, StreamEventCloner,
};
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::ExpressionExecutor;
use crate::core::persistence::state_holder::{CompressionType, StateError};
use crate::core::persistence::{StateBundle, EXPIRED_EVENT_QUEUE_KEY};
use crate::core::query::processor::{CommonProcessorMeta, ProcessingMode, Processor};
use crate::core::util::collection::{CollectionOperator, CompiledCondition, MatchingMetaInfoHolder};
use crate::query_api::definition::attribute::Type as ApiAttributeType;

use super::external_time_window_state_holder::ExternalTimeWindowStateHolder;
use super::{FindableProcessor, WindowProcessor};

const WINDOW_NAME: &str = "externalTime";
const WINDOW_SIGNATURE: &str = "<long> timestamp, <int|long|time> windowTime";

/// Retained events plus the window length, guarded as one unit.
#[derive(Debug, Default)]
pub struct ExternalTimeWindowState {
    time_to_keep: i64,
    queue: SnapshotableStreamEventQueue,
}

impl ExternalTimeWindowState {
    pub fn new(time_to_keep: i64) -> Self {
        Self {
            time_to_keep,
            queue: SnapshotableStreamEventQueue::new(),
        }
    }

    pub fn time_to_keep(&self) -> i64 {
        self.time_to_keep
    }

    pub fn queue(&self) -> &SnapshotableStreamEventQueue {
        &self.queue
    }

    pub fn to_bundle(&self) -> StateBundle {
        let mut bundle = StateBundle::new();
        bundle.insert(EXPIRED_EVENT_QUEUE_KEY.to_string(), self.queue.snapshot());
        bundle
    }

    /// Replace the queue with the bundle's contents. The bundle is checked
    /// before anything is cleared.
    pub fn restore_from_bundle(&mut self, bundle: &StateBundle) -> Result<(), StateError> {
        let snapshot =
            bundle
                .get(EXPIRED_EVENT_QUEUE_KEY)
                .ok_or_else(|| StateError::MissingStateEntry {
                    key: EXPIRED_EVENT_QUEUE_KEY.to_string(),
                })?;
        self.queue.clear();
        self.queue.restore(snapshot);
        Ok(())
    }
}

/// Whether an event at `retained_time` is still inside the window at
/// `current_time`. Widened so extreme timestamps cannot overflow.
fn in_window(retained_time: i64, current_time: i64, time_to_keep: i64) -> bool {
    i128::from(retained_time) + i128::from(time_to_keep) > i128::from(current_time)
}

pub(super) fn lock_state(
    state: &Mutex<ExternalTimeWindowState>,
) -> MutexGuard<'_, ExternalTimeWindowState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub struct ExternalTimeWindowProcessor {
    meta: CommonProcessorMeta,
    timestamp_executor: Box<dyn ExpressionExecutor>,
    window_time_executor: Box<dyn ExpressionExecutor>,
    cloner: StreamEventCloner,
    state: Arc<Mutex<ExternalTimeWindowState>>,
    compression: CompressionType,
}

impl ExternalTimeWindowProcessor {
    /// Build the window from its two parameters: a LONG timestamp attribute
    /// and a constant INT or LONG window length in milliseconds.
    pub fn new(
        parameters: Vec<Box<dyn ExpressionExecutor>>,
        cloner: StreamEventCloner,
        query_name: impl Into<String>,
    ) -> EventFluxResult<Self> {
        let [timestamp_executor, window_time_executor]: [Box<dyn ExpressionExecutor>; 2] =
            parameters.try_into().map_err(
                |found: Vec<Box<dyn ExpressionExecutor>>| EventFluxError::InvalidParameterCount {
                    window: WINDOW_NAME.to_string(),
                    signature: WINDOW_SIGNATURE.to_string(),
                    expected: 2,
                    found: found.len(),
                },
            )?;

        if !timestamp_executor.is_variable_executor() {
            return Err(EventFluxError::InvalidParameter {
                message: format!(
                    "{WINDOW_NAME} window's 1st parameter timestamp should be a variable, but found a {:?}",
                    timestamp_executor
                ),
            });
        }
        let timestamp_type = timestamp_executor.get_return_type();
        if timestamp_type != ApiAttributeType::LONG {
            return Err(EventFluxError::invalid_parameter_type(
                WINDOW_NAME,
                "timestamp",
                "type LONG",
                timestamp_type,
            ));
        }

        let time_to_keep = Self::resolve_window_time(window_time_executor.as_ref())?;
        let meta = CommonProcessorMeta::new(query_name);
        log::debug!(
            "[{}] {} window created, keeping {} ms",
            meta.query_name,
            WINDOW_NAME,
            time_to_keep
        );

        Ok(Self {
            meta,
            timestamp_executor,
            window_time_executor,
            cloner,
            state: Arc::new(Mutex::new(ExternalTimeWindowState::new(time_to_keep))),
            compression: CompressionType::None,
        })
    }

    fn resolve_window_time(executor: &dyn ExpressionExecutor) -> EventFluxResult<i64> {
        if !executor.is_constant_executor() {
            return Err(EventFluxError::InvalidParameter {
                message: format!(
                    "{WINDOW_NAME} window's 2nd parameter windowTime should be a constant, but found a {:?}",
                    executor
                ),
            });
        }
        let value = executor.execute(None);
        let time_to_keep = match executor.get_return_type() {
            ApiAttributeType::INT => value.as_ref().and_then(|v| v.as_i32()).map(i64::from),
            ApiAttributeType::LONG => value.as_ref().and_then(|v| v.as_i64()),
            other => {
                return Err(EventFluxError::invalid_parameter_type(
                    WINDOW_NAME,
                    "windowTime",
                    "type INT or LONG",
                    other,
                ))
            }
        };
        match time_to_keep {
            Some(ms) if ms > 0 => Ok(ms),
            Some(ms) => Err(EventFluxError::InvalidParameter {
                message: format!("{WINDOW_NAME} window's windowTime must be positive, got {ms}"),
            }),
            None => Err(EventFluxError::InvalidParameter {
                message: format!(
                    "{WINDOW_NAME} window's windowTime has no value: {:?}",
                    value
                ),
            }),
        }
    }

    /// Compression applied by [`Self::state_holder`] snapshots.
    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    pub fn time_to_keep(&self) -> i64 {
        self.lock_state().time_to_keep
    }

    pub fn retained_len(&self) -> usize {
        self.lock_state().queue.len()
    }

    /// Copies of the retained events, oldest first.
    pub fn retained_events(&self) -> Vec<StreamEvent> {
        self.lock_state().queue.iter().cloned().collect()
    }

    /// Persistence view over this window's state. It shares the window's lock.
    pub fn state_holder(&self) -> ExternalTimeWindowStateHolder {
        ExternalTimeWindowStateHolder::new(
            Arc::clone(&self.state),
            format!("{}::{}", self.meta.query_name, WINDOW_NAME),
            self.compression,
        )
    }

    fn lock_state(&self) -> MutexGuard<'_, ExternalTimeWindowState> {
        lock_state(&self.state)
    }

    fn extract_time(&self, event: &StreamEvent) -> Option<i64> {
        self.timestamp_executor
            .execute(Some(event as &dyn ComplexEvent))
            .and_then(|value| value.as_i64())
    }

    /// Evict every retained event that `current_time` has pushed out of the
    /// window, splicing each one into `chunk` before its current event.
    fn evict_expired(
        &self,
        state: &mut ExternalTimeWindowState,
        current_time: i64,
        chunk: &mut ComplexEventChunk<StreamEvent>,
    ) {
        let time_to_keep = state.time_to_keep;
        state.queue.reset();
        while let Some(retained) = state.queue.next() {
            match self.extract_time(retained) {
                Some(retained_time) if in_window(retained_time, current_time, time_to_keep) => break,
                Some(_) => {}
                None => log::warn!(
                    "[{}] retained event at {} has no LONG timestamp, evicting it",
                    self.meta.query_name,
                    retained.timestamp
                ),
            }
            if let Some(mut expired) = state.queue.remove() {
                log::trace!(
                    "[{}] expiring event retained at {} on arrival at {}",
                    self.meta.query_name,
                    expired.timestamp,
                    current_time
                );
                expired.timestamp = current_time;
                chunk.insert_before_current(expired);
            }
        }
    }
}

impl Processor for ExternalTimeWindowProcessor {
    fn process(&self, mut complex_event_chunk: ComplexEventChunk<StreamEvent>) {
        {
            let mut state = self.lock_state();
            loop {
                let (current_time, retained_copy) = match complex_event_chunk.next() {
                    None => break,
                    Some(event) => {
                        let Some(current_time) = self.extract_time(event) else {
                            log::warn!(
                                "[{}] event at {} has no LONG timestamp, forwarding it unwindowed",
                                self.meta.query_name,
                                event.timestamp
                            );
                            continue;
                        };
                        let retained_copy = (event.event_type == ComplexEventType::Current)
                            .then(|| {
                                self.cloner
                                    .copy_stream_event(event)
                                    .with_type(ComplexEventType::Expired)
                            });
                        (current_time, retained_copy)
                    }
                };

                self.evict_expired(&mut state, current_time, &mut complex_event_chunk);

                if let Some(copy) = retained_copy {
                    state.queue.add(copy);
                }
            }
        }
        self.meta.forward(complex_event_chunk);
    }

    fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>> {
        self.meta.next_processor.as_ref().map(Arc::clone)
    }

    fn set_next_processor(&mut self, next_processor: Option<Arc<Mutex<dyn Processor>>>) {
        self.meta.next_processor = next_processor;
    }

    fn clone_processor(&self) -> Box<dyn Processor> {
        Box::new(Self {
            meta: CommonProcessorMeta::new(self.meta.query_name.clone()),
            timestamp_executor: self.timestamp_executor.clone_executor(),
            window_time_executor: self.window_time_executor.clone_executor(),
            cloner: self.cloner,
            state: Arc::new(Mutex::new(ExternalTimeWindowState::new(
                self.time_to_keep(),
            ))),
            compression: self.compression,
        })
    }

    fn get_query_name(&self) -> &str {
        &self.meta.query_name
    }

    fn get_processing_mode(&self) -> ProcessingMode {
        ProcessingMode::SLIDE
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

impl WindowProcessor for ExternalTimeWindowProcessor {
    fn current_state(&self) -> Result<StateBundle, StateError> {
        Ok(self.lock_state().to_bundle())
    }

    fn restore_state(&self, state: &StateBundle) -> Result<(), StateError> {
        let mut guard = self.lock_state();
        guard.restore_from_bundle(state)?;
        log::info!(
            "[{}] {} window restored with {} retained event(s)",
            self.meta.query_name,
            WINDOW_NAME,
            guard.queue.len()
        );
        Ok(())
    }
}

impl FindableProcessor for ExternalTimeWindowProcessor {
    fn find(
        &self,
        matching_event: &StateEvent,
        condition: &dyn CompiledCondition,
    ) -> Option<StreamEvent> {
        let state = self.lock_state();
        condition.find(matching_event, &state.queue, &self.cloner)
    }

    fn compile_condition(
        &self,
        condition: Box<dyn ExpressionExecutor>,
        meta: MatchingMetaInfoHolder,
    ) -> Box<dyn CompiledCondition> {
        Box::new(CollectionOperator::new(condition, &meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::value::AttributeValue;
    use crate::core::executor::{ConstantExpressionExecutor, VariableExpressionExecutor};

    #[derive(Debug, Default)]
    struct Recorder {
        batches: Arc<Mutex<Vec<Vec<StreamEvent>>>>,
    }

    impl Processor for Recorder {
        fn process(&self, chunk: ComplexEventChunk<StreamEvent>) {
            self.batches.lock().unwrap().push(chunk.into_events());
        }
        fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>> {
            None
        }
        fn set_next_processor(&mut self, _next: Option<Arc<Mutex<dyn Processor>>>) {}
        fn clone_processor(&self) -> Box<dyn Processor> {
            Box::new(Recorder::default())
        }
        fn get_query_name(&self) -> &str {
            "recorder"
        }
        fn get_processing_mode(&self) -> ProcessingMode {
            ProcessingMode::DEFAULT
        }
        fn is_stateful(&self) -> bool {
            false
        }
    }

    fn params(window_ms: i64) -> Vec<Box<dyn ExpressionExecutor>> {
        vec![
            Box::new(VariableExpressionExecutor::new_for_stream(
                0,
                ApiAttributeType::LONG,
                "ts",
            )),
            Box::new(ConstantExpressionExecutor::new(
                AttributeValue::Long(window_ms),
                ApiAttributeType::LONG,
            )),
        ]
    }

    fn window(window_ms: i64) -> ExternalTimeWindowProcessor {
        ExternalTimeWindowProcessor::new(
            params(window_ms),
            StreamEventCloner::new_with_sizes(1, 0, 0),
            "test",
        )
        .unwrap()
    }

    fn event(ts: i64) -> StreamEvent {
        StreamEvent::new_with_data(ts, vec![AttributeValue::Long(ts)])
    }

    fn retained_times(window: &ExternalTimeWindowProcessor) -> Vec<i64> {
        window.retained_events().iter().map(|e| e.timestamp).collect()
    }

    #[test]
    fn test_retains_expired_copies_in_order() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100), event(500)]));
        assert_eq!(retained_times(&w), vec![100, 500]);
        assert!(w.retained_events().iter().all(|e| e.is_expired()));
    }

    #[test]
    fn test_eviction_boundary_is_inclusive() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100)]));
        w.process(ComplexEventChunk::from(vec![event(1099)]));
        assert_eq!(retained_times(&w), vec![100, 1099]);
        w.process(ComplexEventChunk::from(vec![event(1100)]));
        assert_eq!(retained_times(&w), vec![1099, 1100]);
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(-5_000_000_000_000_000_000)]));
        w.process(ComplexEventChunk::from(vec![event(5_000_000_000_000_000_000)]));
        assert_eq!(retained_times(&w), vec![5_000_000_000_000_000_000]);

        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(i64::MAX - 10)]));
        w.process(ComplexEventChunk::from(vec![event(i64::MAX)]));
        assert_eq!(retained_times(&w), vec![i64::MAX - 10, i64::MAX]);

        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(i64::MIN)]));
        w.process(ComplexEventChunk::from(vec![event(i64::MIN + 999)]));
        assert_eq!(w.retained_len(), 2);
        w.process(ComplexEventChunk::from(vec![event(i64::MIN + 1000)]));
        assert_eq!(retained_times(&w), vec![i64::MIN + 999, i64::MIN + 1000]);
    }

    #[test]
    fn test_expired_input_is_not_retained() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100)]));
        w.process(ComplexEventChunk::from(vec![
            event(1500).with_type(ComplexEventType::Expired)
        ]));
        assert_eq!(w.retained_len(), 0);
    }

    #[test]
    fn test_missing_timestamp_passes_through() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100)]));
        let no_ts = StreamEvent::new_with_data(5000, vec![AttributeValue::Null]);
        w.process(ComplexEventChunk::from(vec![no_ts]));
        assert_eq!(retained_times(&w), vec![100]);
    }

    #[test]
    fn test_forwards_once_with_expiries_spliced() {
        let mut w = window(1000);
        let batches = Arc::new(Mutex::new(Vec::new()));
        w.set_next_processor(Some(Arc::new(Mutex::new(Recorder {
            batches: Arc::clone(&batches),
        }))));

        w.process(ComplexEventChunk::from(vec![event(100), event(1200)]));

        let batches = batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        let shape: Vec<(ComplexEventType, i64)> =
            batch.iter().map(|e| (e.event_type, e.timestamp)).collect();
        assert_eq!(
            shape,
            vec![
                (ComplexEventType::Current, 100),
                (ComplexEventType::Expired, 1200),
                (ComplexEventType::Current, 1200),
            ]
        );
        assert_eq!(batch[1].before_window_data, vec![AttributeValue::Long(100)]);
    }

    #[test]
    fn test_int_window_time_is_accepted() {
        let params: Vec<Box<dyn ExpressionExecutor>> = vec![
            Box::new(VariableExpressionExecutor::new_for_stream(
                0,
                ApiAttributeType::LONG,
                "ts",
            )),
            Box::new(ConstantExpressionExecutor::new(
                AttributeValue::Int(250),
                ApiAttributeType::INT,
            )),
        ];
        let w = ExternalTimeWindowProcessor::new(
            params,
            StreamEventCloner::new_with_sizes(1, 0, 0),
            "q",
        )
        .unwrap();
        assert_eq!(w.time_to_keep(), 250);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let cloner = StreamEventCloner::new_with_sizes(1, 0, 0);

        let mut one = params(1000);
        one.pop();
        let err = ExternalTimeWindowProcessor::new(one, cloner, "q").unwrap_err();
        assert!(matches!(
            err,
            EventFluxError::InvalidParameterCount {
                expected: 2,
                found: 1,
                ..
            }
        ));

        let int_ts: Vec<Box<dyn ExpressionExecutor>> = vec![
            Box::new(VariableExpressionExecutor::new_for_stream(
                0,
                ApiAttributeType::INT,
                "ts",
            )),
            Box::new(ConstantExpressionExecutor::from_value(AttributeValue::Long(1))),
        ];
        let err = ExternalTimeWindowProcessor::new(int_ts, cloner, "q").unwrap_err();
        assert!(matches!(err, EventFluxError::InvalidParameterType { .. }));

        let constant_ts: Vec<Box<dyn ExpressionExecutor>> = vec![
            Box::new(ConstantExpressionExecutor::from_value(AttributeValue::Long(1))),
            Box::new(ConstantExpressionExecutor::from_value(AttributeValue::Long(1))),
        ];
        assert!(ExternalTimeWindowProcessor::new(constant_ts, cloner, "q")
            .unwrap_err()
            .is_validation_error());

        let string_time: Vec<Box<dyn ExpressionExecutor>> = vec![
            Box::new(VariableExpressionExecutor::new_for_stream(
                0,
                ApiAttributeType::LONG,
                "ts",
            )),
            Box::new(ConstantExpressionExecutor::from_value(AttributeValue::String(
                "1 sec".to_string(),
            ))),
        ];
        assert!(matches!(
            ExternalTimeWindowProcessor::new(string_time, cloner, "q").unwrap_err(),
            EventFluxError::InvalidParameterType { .. }
        ));

        let err = ExternalTimeWindowProcessor::new(params(0), cloner, "q").unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_restore_requires_queue_entry() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100)]));
        let err = w.restore_state(&StateBundle::new()).unwrap_err();
        assert!(matches!(err, StateError::MissingStateEntry { .. }));
        assert_eq!(retained_times(&w), vec![100]);
    }

    #[test]
    fn test_clone_processor_starts_empty() {
        let w = window(1000);
        w.process(ComplexEventChunk::from(vec![event(100)]));
        let copy = w.clone_processor();
        assert_eq!(copy.get_query_name(), "test");
        assert_eq!(copy.get_processing_mode(), ProcessingMode::SLIDE);
        assert_eq!(w.retained_len(), 1);
    }
}
