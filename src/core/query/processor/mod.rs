// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/processor/mod.rs

use crate::core::event::stream::{ComplexEventChunk, StreamEvent};

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingMode {
    #[default]
    DEFAULT,
    SLIDE,
    BATCH,
}

/// Common metadata for Processors.
#[derive(Debug, Clone)]
pub struct CommonProcessorMeta {
    pub query_name: String,
    pub next_processor: Option<Arc<Mutex<dyn Processor>>>,
}

impl CommonProcessorMeta {
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            next_processor: None,
        }
    }

    /// Hand `chunk` to the next processor, if one is attached.
    pub fn forward(&self, chunk: ComplexEventChunk<StreamEvent>) {
        match &self.next_processor {
            Some(next) => lock_processor(next).process(chunk),
            None => log::trace!(
                "[{}] no next processor, dropping {} event(s)",
                self.query_name,
                chunk.len()
            ),
        }
    }
}

/// Lock a shared processor, recovering the guard if a previous holder panicked.
pub fn lock_processor(
    processor: &Arc<Mutex<dyn Processor>>,
) -> MutexGuard<'_, dyn Processor + 'static> {
    processor.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Trait for stream processors that process event chunks.
pub trait Processor: Debug + Send + Sync {
    fn process(&self, complex_event_chunk: ComplexEventChunk<StreamEvent>);
    fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>>;
    fn set_next_processor(&mut self, next_processor: Option<Arc<Mutex<dyn Processor>>>);
    /// Fresh processor with the same configuration and empty state.
    fn clone_processor(&self) -> Box<dyn Processor>;
    fn get_query_name(&self) -> &str;
    fn get_processing_mode(&self) -> ProcessingMode;
    fn is_stateful(&self) -> bool;
}

pub mod stream;

pub use self::stream::window::{FindableProcessor, WindowProcessor};

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Default)]
    struct Counter {
        events: Arc<Mutex<usize>>,
    }

    impl Processor for Counter {
        fn process(&self, chunk: ComplexEventChunk<StreamEvent>) {
            *self.events.lock().unwrap() += chunk.len();
        }
        fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>> {
            None
        }
        fn set_next_processor(&mut self, _next: Option<Arc<Mutex<dyn Processor>>>) {}
        fn clone_processor(&self) -> Box<dyn Processor> {
            Box::new(Counter::default())
        }
        fn get_query_name(&self) -> &str {
            "counter"
        }
        fn get_processing_mode(&self) -> ProcessingMode {
            ProcessingMode::DEFAULT
        }
        fn is_stateful(&self) -> bool {
            false
        }
    }

    fn chunk(len: usize) -> ComplexEventChunk<StreamEvent> {
        (0..len as i64)
            .map(|ts| StreamEvent::new_with_data(ts, Vec::new()))
            .collect()
    }

    #[test]
    fn test_forward_reaches_next_processor() {
        let events = Arc::new(Mutex::new(0));
        let mut meta = CommonProcessorMeta::new("q");
        meta.forward(chunk(2));

        meta.next_processor = Some(Arc::new(Mutex::new(Counter {
            events: Arc::clone(&events),
        })));
        meta.forward(chunk(3));
        assert_eq!(*events.lock().unwrap(), 3);
    }

    #[test]
    fn test_forward_recovers_poisoned_next_processor() {
        let events = Arc::new(Mutex::new(0));
        let next: Arc<Mutex<dyn Processor>> = Arc::new(Mutex::new(Counter {
            events: Arc::clone(&events),
        }));
        let poisoner = Arc::clone(&next);
        let _ = thread::spawn(move || {
            let _guard = lock_processor(&poisoner);
            panic!("poison the lock");
        })
        .join();
        assert!(next.is_poisoned());

        let mut meta = CommonProcessorMeta::new("q");
        meta.next_processor = Some(next);
        meta.forward(chunk(4));
        assert_eq!(*events.lock().unwrap(), 4);
    }
}
