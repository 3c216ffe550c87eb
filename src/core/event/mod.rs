// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/mod.rs

pub mod complex_event;
pub mod state;
pub mod stream;
pub mod value;

pub use self::complex_event::{ComplexEvent, ComplexEventType};
pub use self::state::StateEvent;
pub use self::stream::{ComplexEventChunk, StreamEvent, StreamEventCloner};
pub use self::value::AttributeValue;
