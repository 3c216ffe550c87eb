// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/state/mod.rs

pub mod state_event;

pub use self::state_event::StateEvent;
