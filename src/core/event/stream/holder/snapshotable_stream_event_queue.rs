// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/holder/snapshotable_stream_event_queue.rs
// Ordered event buffer with an index cursor that survives in-place removal.
// Not synchronised; the owning window serialises every access.

use crate::core::event::stream::StreamEvent;
use crate::core::persistence::SnapshotStateList;
use std::collections::VecDeque;

#[derive(Debug, Default, Clone)]
pub struct SnapshotableStreamEventQueue {
    events: VecDeque<StreamEvent>,
    /// Index of the element the next `next()` returns.
    cursor: usize,
    /// Index of the element last returned by `next()`, cleared by `remove()`.
    last_returned: Option<usize>,
}

impl SnapshotableStreamEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub fn add(&mut self, event: StreamEvent) {
        self.events.push_back(event);
    }

    /// Rewind the cursor to before the head.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.last_returned = None;
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.events.len()
    }

    pub fn next(&mut self) -> Option<&mut StreamEvent> {
        if !self.has_next() {
            self.last_returned = None;
            return None;
        }
        let idx = self.cursor;
        self.cursor += 1;
        self.last_returned = Some(idx);
        self.events.get_mut(idx)
    }

    /// Remove the element last returned by `next()`. Iteration continues with
    /// the element that followed it. Returns `None` outside an iteration or
    /// when the current element was already removed.
    pub fn remove(&mut self) -> Option<StreamEvent> {
        let idx = self.last_returned.take()?;
        let removed = self.events.remove(idx)?;
        self.cursor = idx;
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.reset();
    }

    pub fn snapshot(&self) -> SnapshotStateList {
        SnapshotStateList::new(self.events.iter().cloned().collect())
    }

    /// Replace the contents with `snapshot`, preserving its order.
    pub fn restore(&mut self, snapshot: &SnapshotStateList) {
        self.events = snapshot.events().iter().cloned().collect();
        self.reset();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&StreamEvent> {
        self.events.front()
    }

    /// Iterate without touching the cursor.
    pub fn iter(&self) -> impl Iterator<Item = &StreamEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::value::AttributeValue;

    fn ev(ts: i64) -> StreamEvent {
        StreamEvent::new_with_data(ts, vec![AttributeValue::Long(ts)])
    }

    fn timestamps(queue: &SnapshotableStreamEventQueue) -> Vec<i64> {
        queue.iter().map(|e| e.timestamp).collect()
    }

    #[test]
    fn test_remove_during_iteration_keeps_cursor() {
        let mut queue = SnapshotableStreamEventQueue::new();
        for ts in [1, 2, 3, 4] {
            queue.add(ev(ts));
        }
        queue.reset();
        while let Some(event) = queue.next() {
            if event.timestamp % 2 == 0 {
                continue;
            }
            assert!(queue.remove().is_some());
        }
        assert_eq!(timestamps(&queue), vec![2, 4]);
    }

    #[test]
    fn test_remove_head_then_continue() {
        let mut queue = SnapshotableStreamEventQueue::new();
        queue.add(ev(10));
        queue.add(ev(20));
        queue.reset();
        queue.next();
        assert_eq!(queue.remove().map(|e| e.timestamp), Some(10));
        assert_eq!(queue.remove(), None);
        assert_eq!(queue.next().map(|e| e.timestamp), Some(20));
        assert!(!queue.has_next());
    }

    #[test]
    fn test_remove_without_next_is_none() {
        let mut queue = SnapshotableStreamEventQueue::new();
        queue.add(ev(1));
        assert_eq!(queue.remove(), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_next_allows_in_place_update() {
        let mut queue = SnapshotableStreamEventQueue::new();
        queue.add(ev(5));
        queue.reset();
        if let Some(event) = queue.next() {
            event.timestamp = 50;
        }
        assert_eq!(queue.first().map(|e| e.timestamp), Some(50));
    }

    #[test]
    fn test_snapshot_is_point_in_time() {
        let mut queue = SnapshotableStreamEventQueue::new();
        queue.add(ev(1));
        queue.add(ev(2));
        let snapshot = queue.snapshot();

        queue.add(ev(3));
        queue.reset();
        queue.next();
        queue.remove();
        assert_eq!(snapshot.len(), 2);

        let mut restored = SnapshotableStreamEventQueue::new();
        restored.add(ev(99));
        restored.restore(&snapshot);
        assert_eq!(timestamps(&restored), vec![1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut queue = SnapshotableStreamEventQueue::new();
        queue.add(ev(1));
        queue.reset();
        queue.next();
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.next().is_none());
        assert!(queue.remove().is_none());
    }
}
