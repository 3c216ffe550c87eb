// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared compression for state snapshots.
//!
//! State holders compress through [`GLOBAL_COMPRESSION_ENGINE`] so byte
//! counters are kept in one place.
//!
//! ```rust
//! use eventflux_window::core::util::compression::{CompressionEngine, GLOBAL_COMPRESSION_ENGINE};
//! use eventflux_window::core::persistence::state_holder::CompressionType;
//!
//! let data = b"some data to compress, some data to compress";
//! let compressed = GLOBAL_COMPRESSION_ENGINE.compress(data, CompressionType::Snappy)?;
//! let decompressed = GLOBAL_COMPRESSION_ENGINE.decompress(&compressed, CompressionType::Snappy)?;
//! assert_eq!(data, decompressed.as_slice());
//! # Ok::<(), eventflux_window::core::persistence::state_holder::StateError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;

use crate::core::persistence::state_holder::{CompressionType, StateError};

/// Global compression engine singleton
pub static GLOBAL_COMPRESSION_ENGINE: Lazy<SnappyCompressionEngine> =
    Lazy::new(SnappyCompressionEngine::new);

pub trait CompressionEngine: Send + Sync {
    fn compress(&self, data: &[u8], algorithm: CompressionType) -> Result<Vec<u8>, StateError>;

    fn decompress(&self, data: &[u8], algorithm: CompressionType) -> Result<Vec<u8>, StateError>;

    fn get_metrics(&self) -> CompressionMetrics;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionMetrics {
    pub total_compressions: u64,
    pub total_decompressions: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl CompressionMetrics {
    /// Output size relative to input size, 1.0 when nothing was compressed.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            1.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}

/// Snappy-backed engine. `CompressionType::None` is a plain copy.
#[derive(Debug, Default)]
pub struct SnappyCompressionEngine {
    compressions: AtomicU64,
    decompressions: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
}

impl SnappyCompressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn compress_snappy(&self, data: &[u8]) -> Result<Vec<u8>, StateError> {
        snap::raw::Encoder::new()
            .compress_vec(data)
            .map_err(|e| StateError::CompressionError {
                message: format!("Snappy compression failed: {e}"),
            })
    }

    fn decompress_snappy(&self, data: &[u8]) -> Result<Vec<u8>, StateError> {
        snap::raw::Decoder::new()
            .decompress_vec(data)
            .map_err(|e| StateError::CompressionError {
                message: format!("Snappy decompression failed: {e}"),
            })
    }
}

impl CompressionEngine for SnappyCompressionEngine {
    fn compress(&self, data: &[u8], algorithm: CompressionType) -> Result<Vec<u8>, StateError> {
        let compressed = match algorithm {
            CompressionType::None => data.to_vec(),
            CompressionType::Snappy => self.compress_snappy(data)?,
        };
        self.compressions.fetch_add(1, Ordering::Relaxed);
        self.bytes_in.fetch_add(data.len() as u64, Ordering::Relaxed);
        self.bytes_out
            .fetch_add(compressed.len() as u64, Ordering::Relaxed);
        Ok(compressed)
    }

    fn decompress(&self, data: &[u8], algorithm: CompressionType) -> Result<Vec<u8>, StateError> {
        let result = match algorithm {
            CompressionType::None => Ok(data.to_vec()),
            CompressionType::Snappy => self.decompress_snappy(data),
        };
        self.decompressions.fetch_add(1, Ordering::Relaxed);
        result
    }

    fn get_metrics(&self) -> CompressionMetrics {
        CompressionMetrics {
            total_compressions: self.compressions.load(Ordering::Relaxed),
            total_decompressions: self.decompressions.load(Ordering::Relaxed),
            bytes_in: self.bytes_in.load(Ordering::Relaxed),
            bytes_out: self.bytes_out.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snappy_shrinks_repetitive_data() {
        let engine = SnappyCompressionEngine::new();
        let data = vec![7u8; 4096];
        let compressed = engine.compress(&data, CompressionType::Snappy).unwrap();
        assert!(compressed.len() < data.len());
        let restored = engine
            .decompress(&compressed, CompressionType::Snappy)
            .unwrap();
        assert_eq!(restored, data);

        let metrics = engine.get_metrics();
        assert_eq!(metrics.total_compressions, 1);
        assert_eq!(metrics.total_decompressions, 1);
        assert!(metrics.ratio() < 1.0);
    }

    #[test]
    fn test_none_is_identity() {
        let engine = SnappyCompressionEngine::new();
        let data = b"abc";
        assert_eq!(engine.compress(data, CompressionType::None).unwrap(), data);
    }

    #[test]
    fn test_corrupt_snappy_input_is_an_error() {
        let engine = SnappyCompressionEngine::new();
        let err = engine
            .decompress(&[0xff, 0xff, 0xff, 0xff, 0x0f], CompressionType::Snappy)
            .unwrap_err();
        assert!(matches!(err, StateError::CompressionError { .. }));
    }
}
