// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/persistence/snapshot_state.rs

use crate::core::event::stream::StreamEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bundle key under which a window stores its retained queue.
pub const EXPIRED_EVENT_QUEUE_KEY: &str = "ExpiredEventQueue";

/// Point-in-time copy of an ordered event queue.
///
/// Owns its events, so later changes to the queue never show through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStateList {
    events: Vec<StreamEvent>,
}

impl SnapshotStateList {
    pub fn new(events: Vec<StreamEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[StreamEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<StreamEvent> {
        self.events
    }
}

/// Named snapshot entries produced by `WindowProcessor::current_state`.
pub type StateBundle = HashMap<String, SnapshotStateList>;
