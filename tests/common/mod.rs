// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use eventflux_window::core::event::complex_event::ComplexEventType;
use eventflux_window::core::event::stream::{ComplexEventChunk, StreamEvent, StreamEventCloner};
use eventflux_window::core::event::value::AttributeValue;
use eventflux_window::core::executor::{
    ConstantExpressionExecutor, ExpressionExecutor, VariableExpressionExecutor,
};
use eventflux_window::core::query::processor::stream::window::ExternalTimeWindowProcessor;
use eventflux_window::core::query::processor::{ProcessingMode, Processor};
use eventflux_window::query_api::definition::attribute::Type as AttrType;
use std::sync::{Arc, Mutex};

/// Downstream processor that records every batch it is handed.
#[derive(Debug, Default, Clone)]
pub struct CollectingProcessor {
    pub batches: Arc<Mutex<Vec<Vec<StreamEvent>>>>,
}

impl CollectingProcessor {
    pub fn batches(&self) -> Vec<Vec<StreamEvent>> {
        self.batches.lock().unwrap().clone()
    }

    /// `(type, timestamp)` of each event, one vector per batch.
    pub fn shapes(&self) -> Vec<Vec<(ComplexEventType, i64)>> {
        self.batches()
            .iter()
            .map(|batch| batch.iter().map(|e| (e.event_type, e.timestamp)).collect())
            .collect()
    }
}

impl Processor for CollectingProcessor {
    fn process(&self, complex_event_chunk: ComplexEventChunk<StreamEvent>) {
        self.batches
            .lock()
            .unwrap()
            .push(complex_event_chunk.into_events());
    }

    fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>> {
        None
    }

    fn set_next_processor(&mut self, _next: Option<Arc<Mutex<dyn Processor>>>) {}

    fn clone_processor(&self) -> Box<dyn Processor> {
        Box::new(CollectingProcessor::default())
    }

    fn get_query_name(&self) -> &str {
        "collector"
    }

    fn get_processing_mode(&self) -> ProcessingMode {
        ProcessingMode::DEFAULT
    }

    fn is_stateful(&self) -> bool {
        false
    }
}

/// Event on a `(ts long, symbol string)` stream.
pub fn trade(ts: i64, symbol: &str) -> StreamEvent {
    StreamEvent::new_with_data(
        ts,
        vec![
            AttributeValue::Long(ts),
            AttributeValue::String(symbol.to_string()),
        ],
    )
}

pub fn expired_trade(ts: i64, symbol: &str) -> StreamEvent {
    trade(ts, symbol).with_type(ComplexEventType::Expired)
}

pub fn window_parameters(window_ms: i64) -> Vec<Box<dyn ExpressionExecutor>> {
    vec![
        Box::new(VariableExpressionExecutor::new_for_stream(
            0,
            AttrType::LONG,
            "ts",
        )),
        Box::new(ConstantExpressionExecutor::new(
            AttributeValue::Long(window_ms),
            AttrType::LONG,
        )),
    ]
}

/// Window over `(ts long, symbol string)` with a collector attached.
pub fn window_with_collector(window_ms: i64) -> (ExternalTimeWindowProcessor, CollectingProcessor) {
    let mut window = ExternalTimeWindowProcessor::new(
        window_parameters(window_ms),
        StreamEventCloner::new_with_sizes(2, 0, 0),
        "test-query",
    )
    .unwrap();
    let collector = CollectingProcessor::default();
    window.set_next_processor(Some(Arc::new(Mutex::new(collector.clone()))));
    (window, collector)
}

pub fn send(window: &ExternalTimeWindowProcessor, events: Vec<StreamEvent>) {
    window.process(ComplexEventChunk::from(events));
}

pub fn retained_times(window: &ExternalTimeWindowProcessor) -> Vec<i64> {
    window
        .retained_events()
        .iter()
        .map(|e| e.before_window_data[0].as_i64().unwrap())
        .collect()
}
