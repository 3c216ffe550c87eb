// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/holder/mod.rs

pub mod snapshotable_stream_event_queue;

pub use self::snapshotable_stream_event_queue::SnapshotableStreamEventQueue;
