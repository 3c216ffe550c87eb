// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/util/mod.rs

pub mod collection;
pub mod compression;
pub mod eventflux_constants;
pub mod serialization;

pub use self::collection::{CollectionOperator, CompiledCondition, MatchingMetaInfoHolder};
pub use self::compression::{CompressionEngine, GLOBAL_COMPRESSION_ENGINE};
pub use self::serialization::{from_bytes, to_bytes};
