// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/stream/mod.rs

pub mod complex_event_chunk;
pub mod holder;
pub mod stream_event;
pub mod stream_event_cloner;

pub use self::complex_event_chunk::ComplexEventChunk;
pub use self::holder::SnapshotableStreamEventQueue;
pub use self::stream_event::StreamEvent;
pub use self::stream_event_cloner::StreamEventCloner;
