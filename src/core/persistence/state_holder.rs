// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/persistence/state_holder.rs

//! Versioned state capture for stateful operators.
//!
//! A [`StateHolder`] turns an operator's in-memory state into a
//! [`StateSnapshot`]: bincode bytes, optionally Snappy-compressed, guarded by
//! a checksum and described by [`StateMetadata`]. Restoring goes the other
//! way and must leave the operator untouched when the snapshot is rejected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a checkpoint
pub type CheckpointId = u64;

/// Unique identifier for a state component
pub type ComponentId = String;

/// Current version of state schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Major version must match, minor version can be higher.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major && self.minor >= other.minor
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Estimated footprint of a component's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSize {
    pub bytes: usize,
    pub entries: usize,
}

/// How a component touches its state, reported in [`StateMetadata`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessPattern {
    /// Read and written at arbitrary positions
    #[default]
    Random,
    /// Appended at the tail, drained from the head
    Sequential,
}

/// Compression applied to `StateSnapshot::data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionType {
    #[default]
    None,
    Snappy,
}

impl std::str::FromStr for CompressionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CompressionType::None),
            "snappy" => Ok(CompressionType::Snappy),
            other => Err(format!(
                "Unknown compression '{other}', expected 'none' or 'snappy'"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SerializationHints {
    pub prefer_compression: Option<CompressionType>,
    pub checkpoint_id: CheckpointId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMetadata {
    pub component_id: ComponentId,
    pub component_type: String,
    pub created_at: u64, // Unix timestamp
    pub access_pattern: AccessPattern,
    pub size_estimation: StateSize,
    pub custom_metadata: HashMap<String, String>,
}

impl StateMetadata {
    pub fn new(component_id: ComponentId, component_type: String) -> Self {
        Self {
            component_id,
            component_type,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            access_pattern: AccessPattern::default(),
            size_estimation: StateSize::default(),
            custom_metadata: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: SchemaVersion,
    pub checkpoint_id: CheckpointId,
    pub data: Vec<u8>,
    pub compression: CompressionType,
    pub checksum: u64,
    pub metadata: StateMetadata,
}

impl StateSnapshot {
    /// Checksum over the stored (possibly compressed) bytes.
    pub fn calculate_checksum(data: &[u8]) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        hasher.finish()
    }

    /// Build a snapshot over already encoded `data`, computing its checksum.
    pub fn seal(
        version: SchemaVersion,
        checkpoint_id: CheckpointId,
        data: Vec<u8>,
        compression: CompressionType,
        metadata: StateMetadata,
    ) -> Self {
        let checksum = Self::calculate_checksum(&data);
        Self {
            version,
            checkpoint_id,
            data,
            compression,
            checksum,
            metadata,
        }
    }

    pub fn verify_integrity(&self) -> bool {
        Self::calculate_checksum(&self.data) == self.checksum
    }
}

pub trait StateHolder: Send + Sync {
    fn schema_version(&self) -> SchemaVersion;

    fn serialize_state(&self, hints: &SerializationHints) -> Result<StateSnapshot, StateError>;

    /// Restore from `snapshot`. On error the holder's state is unchanged.
    fn deserialize_state(&self, snapshot: &StateSnapshot) -> Result<(), StateError>;

    fn estimate_size(&self) -> StateSize;

    fn access_pattern(&self) -> AccessPattern;

    fn component_metadata(&self) -> StateMetadata;

    fn can_migrate_from(&self, version: &SchemaVersion) -> bool {
        self.schema_version().is_compatible_with(version)
    }
}

/// State management errors
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Incompatible schema version: current {current}, required {required}")]
    IncompatibleVersion {
        current: SchemaVersion,
        required: SchemaVersion,
    },

    #[error("State bundle has no entry named '{key}'")]
    MissingStateEntry { key: String },

    #[error("Compression failed: {message}")]
    CompressionError { message: String },

    #[error("Checksum verification failed")]
    ChecksumMismatch,
}
