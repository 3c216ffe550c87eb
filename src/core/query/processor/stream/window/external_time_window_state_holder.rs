// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/processor/stream/window/external_time_window_state_holder.rs

//! StateHolder implementation for ExternalTimeWindowProcessor
//!
//! Serializes the window's state bundle with bincode, optionally Snappy
//! compressed. The holder shares the processor's lock, so a snapshot never
//! interleaves with `process` or `find`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::persistence::state_holder::{
    AccessPattern, CompressionType, SchemaVersion, SerializationHints, StateError, StateHolder,
    StateMetadata, StateSize, StateSnapshot,
};
use crate::core::persistence::{StateBundle, EXPIRED_EVENT_QUEUE_KEY};
use crate::core::util::compression::{CompressionEngine, GLOBAL_COMPRESSION_ENGINE};
use crate::core::util::{from_bytes, to_bytes};

use super::external_time_window_processor::{lock_state, ExternalTimeWindowState};

/// Rough per-event footprint used for size estimates.
const ESTIMATED_EVENT_BYTES: usize = 96;

#[derive(Debug, Clone)]
pub struct ExternalTimeWindowStateHolder {
    state: Arc<Mutex<ExternalTimeWindowState>>,
    component_id: String,
    compression: CompressionType,
}

/// Serialized form of the window state.
#[derive(Debug, Serialize, Deserialize)]
struct ExternalTimeWindowStateData {
    time_to_keep: i64,
    bundle: StateBundle,
}

impl ExternalTimeWindowStateHolder {
    pub fn new(
        state: Arc<Mutex<ExternalTimeWindowState>>,
        component_id: String,
        compression: CompressionType,
    ) -> Self {
        Self {
            state,
            component_id,
            compression,
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }
}

impl StateHolder for ExternalTimeWindowStateHolder {
    fn schema_version(&self) -> SchemaVersion {
        SchemaVersion::new(1, 0, 0)
    }

    fn serialize_state(&self, hints: &SerializationHints) -> Result<StateSnapshot, StateError> {
        let state_data = {
            let state = lock_state(&self.state);
            ExternalTimeWindowStateData {
                time_to_keep: state.time_to_keep(),
                bundle: state.to_bundle(),
            }
        };

        let raw = to_bytes(&state_data)?;
        let compression = hints.prefer_compression.unwrap_or(self.compression);
        let data = GLOBAL_COMPRESSION_ENGINE.compress(&raw, compression)?;

        log::debug!(
            "[{}] serialized {} bytes ({} raw, {:?})",
            self.component_id,
            data.len(),
            raw.len(),
            compression
        );

        Ok(StateSnapshot::seal(
            self.schema_version(),
            hints.checkpoint_id,
            data,
            compression,
            self.component_metadata(),
        ))
    }

    fn deserialize_state(&self, snapshot: &StateSnapshot) -> Result<(), StateError> {
        if !snapshot.verify_integrity() {
            return Err(StateError::ChecksumMismatch);
        }
        if !self.can_migrate_from(&snapshot.version) {
            return Err(StateError::IncompatibleVersion {
                current: self.schema_version(),
                required: snapshot.version,
            });
        }

        let raw = GLOBAL_COMPRESSION_ENGINE.decompress(&snapshot.data, snapshot.compression)?;
        let state_data: ExternalTimeWindowStateData = from_bytes(&raw)?;

        let mut state = lock_state(&self.state);
        if state_data.time_to_keep != state.time_to_keep() {
            log::warn!(
                "[{}] snapshot was taken with a {} ms window, restoring into {} ms",
                self.component_id,
                state_data.time_to_keep,
                state.time_to_keep()
            );
        }
        state.restore_from_bundle(&state_data.bundle)?;
        log::info!(
            "[{}] restored checkpoint {} with {} retained event(s)",
            self.component_id,
            snapshot.checkpoint_id,
            state.queue().len()
        );
        Ok(())
    }

    fn estimate_size(&self) -> StateSize {
        let entries = lock_state(&self.state).queue().len();
        StateSize {
            bytes: entries * ESTIMATED_EVENT_BYTES,
            entries,
        }
    }

    fn access_pattern(&self) -> AccessPattern {
        AccessPattern::Sequential
    }

    fn component_metadata(&self) -> StateMetadata {
        let time_to_keep = lock_state(&self.state).time_to_keep();
        let mut metadata = StateMetadata::new(
            self.component_id.clone(),
            "ExternalTimeWindowProcessor".to_string(),
        );
        metadata.access_pattern = self.access_pattern();
        metadata.size_estimation = self.estimate_size();
        metadata.custom_metadata = HashMap::from([
            ("window_type".to_string(), "externalTime".to_string()),
            ("window_duration_ms".to_string(), time_to_keep.to_string()),
            ("state_key".to_string(), EXPIRED_EVENT_QUEUE_KEY.to_string()),
        ]);
        metadata
    }
}
