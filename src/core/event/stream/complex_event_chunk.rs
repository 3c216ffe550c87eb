// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/complex_event_chunk.rs
// Ordered batch of events with a single iteration cursor.
//
// Layout: `processed` holds everything before the cursor, `current` is the
// event last returned by `next()`, `pending` holds the rest. Inserting before
// the cursor is a push onto `processed`, so a window can splice many expired
// events into a long batch without shifting it.

use super::stream_event::StreamEvent;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexEventChunk<E = StreamEvent> {
    processed: Vec<E>,
    current: Option<E>,
    pending: VecDeque<E>,
}

impl<E> Default for ComplexEventChunk<E> {
    fn default() -> Self {
        Self {
            processed: Vec::new(),
            current: None,
            pending: VecDeque::new(),
        }
    }
}

impl<E> ComplexEventChunk<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end of the chunk, after any pending events.
    pub fn add(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Advance the cursor and return the new current event.
    pub fn next(&mut self) -> Option<&E> {
        self.advance();
        self.current.as_ref()
    }

    pub fn next_mut(&mut self) -> Option<&mut E> {
        self.advance();
        self.current.as_mut()
    }

    pub fn has_next(&self) -> bool {
        !self.pending.is_empty()
    }

    fn advance(&mut self) {
        if let Some(cur) = self.current.take() {
            self.processed.push(cur);
        }
        self.current = self.pending.pop_front();
    }

    /// Insert `event` immediately before the current event. Repeated calls
    /// keep insertion order. Without a current event the insert lands after
    /// everything already iterated.
    pub fn insert_before_current(&mut self, event: E) {
        self.processed.push(event);
    }

    /// Take the current event out of the chunk. The cursor then sits between
    /// its former neighbours and the next `next()` continues with the event
    /// that followed it.
    pub fn remove(&mut self) -> Option<E> {
        self.current.take()
    }

    /// Move the cursor back before the first event.
    pub fn reset(&mut self) {
        if let Some(cur) = self.current.take() {
            self.processed.push(cur);
        }
        if self.processed.is_empty() {
            return;
        }
        let mut front = std::mem::take(&mut self.processed);
        front.extend(self.pending.drain(..));
        self.pending = front.into();
    }

    pub fn len(&self) -> usize {
        self.processed.len() + usize::from(self.current.is_some()) + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&E> {
        self.iter().next()
    }

    /// Iterate in chunk order without moving the cursor.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.processed
            .iter()
            .chain(self.current.iter())
            .chain(self.pending.iter())
    }

    pub fn clear(&mut self) {
        self.processed.clear();
        self.current = None;
        self.pending.clear();
    }

    pub fn into_events(self) -> Vec<E> {
        let mut events = self.processed;
        events.extend(self.current);
        events.extend(self.pending);
        events
    }
}

impl<E> From<Vec<E>> for ComplexEventChunk<E> {
    fn from(events: Vec<E>) -> Self {
        Self {
            processed: Vec::new(),
            current: None,
            pending: events.into(),
        }
    }
}

impl<E> FromIterator<E> for ComplexEventChunk<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            processed: Vec::new(),
            current: None,
            pending: iter.into_iter().collect(),
        }
    }
}

impl<E> IntoIterator for ComplexEventChunk<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_events().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(chunk: &ComplexEventChunk<i32>) -> Vec<i32> {
        chunk.iter().copied().collect()
    }

    #[test]
    fn test_iteration_order() {
        let mut chunk: ComplexEventChunk<i32> = vec![1, 2, 3].into();
        assert_eq!(chunk.next(), Some(&1));
        assert_eq!(chunk.next(), Some(&2));
        assert!(chunk.has_next());
        assert_eq!(chunk.next(), Some(&3));
        assert_eq!(chunk.next(), None);
        assert_eq!(collect(&chunk), vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_before_current_keeps_order() {
        let mut chunk: ComplexEventChunk<i32> = vec![1, 2, 3].into();
        chunk.next();
        chunk.next();
        chunk.insert_before_current(10);
        chunk.insert_before_current(11);
        assert_eq!(collect(&chunk), vec![1, 10, 11, 2, 3]);
        assert_eq!(chunk.next(), Some(&3));
    }

    #[test]
    fn test_remove_current() {
        let mut chunk: ComplexEventChunk<i32> = vec![1, 2, 3].into();
        chunk.next();
        chunk.next();
        assert_eq!(chunk.remove(), Some(2));
        assert_eq!(chunk.remove(), None);
        assert_eq!(chunk.next(), Some(&3));
        assert_eq!(chunk.into_events(), vec![1, 3]);
    }

    #[test]
    fn test_reset_restarts_iteration() {
        let mut chunk: ComplexEventChunk<i32> = vec![1, 2].into();
        chunk.next();
        chunk.insert_before_current(0);
        chunk.reset();
        assert_eq!(chunk.next(), Some(&0));
        assert_eq!(chunk.next(), Some(&1));
        assert_eq!(chunk.len(), 3);
    }

    #[test]
    fn test_next_mut_edits_in_place() {
        let mut chunk: ComplexEventChunk<i32> = vec![1, 2].into();
        while let Some(value) = chunk.next_mut() {
            *value *= 10;
        }
        assert!(!chunk.has_next());
        assert_eq!(chunk.into_events(), vec![10, 20]);
    }

    #[test]
    fn test_add_appends_after_pending() {
        let mut chunk = ComplexEventChunk::new();
        assert!(chunk.is_empty());
        chunk.add(1);
        chunk.next();
        chunk.add(2);
        assert_eq!(chunk.first(), Some(&1));
        assert_eq!(chunk.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
