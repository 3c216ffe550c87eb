// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/persistence/mod.rs

pub mod snapshot_state;
pub mod state_holder;

pub use self::snapshot_state::{SnapshotStateList, StateBundle, EXPIRED_EVENT_QUEUE_KEY};
pub use self::state_holder::{
    AccessPattern, CheckpointId, ComponentId, CompressionType, SchemaVersion, SerializationHints,
    StateError, StateHolder, StateMetadata, StateSize, StateSnapshot,
};
