// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/config/window_config.rs
// Typed view over a window's FlatConfig.

use crate::core::config::stream_config::FlatConfig;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::persistence::state_holder::CompressionType;
use crate::query_api::expression::constant::TimeUtil;

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const WINDOW_TIME_KEY: &str = "window.time";
pub const STATE_COMPRESSION_KEY: &str = "state.compression";
pub const WINDOW_TYPE_KEY: &str = "type";

/// Settings for an `externalTime` window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalTimeWindowConfig {
    /// Name of the LONG attribute carrying event time.
    pub timestamp_attribute: String,
    /// Window length in milliseconds.
    pub window_time_ms: i64,
    pub compression: CompressionType,
}

impl ExternalTimeWindowConfig {
    pub fn new(timestamp_attribute: impl Into<String>, window_time_ms: i64) -> Self {
        Self {
            timestamp_attribute: timestamp_attribute.into(),
            window_time_ms,
            compression: CompressionType::None,
        }
    }

    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Read `timestamp`, `window.time` and `state.compression`.
    ///
    /// `window.time` accepts a bare millisecond count or a time literal such
    /// as `"20 sec"` or `"1 min 30 sec"`.
    pub fn from_flat_config(config: &FlatConfig) -> EventFluxResult<Self> {
        let timestamp_attribute = config
            .get(TIMESTAMP_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                EventFluxError::configuration(format!(
                    "externalTime window requires '{TIMESTAMP_KEY}'"
                ))
            })?;

        let raw_time = config.get(WINDOW_TIME_KEY).ok_or_else(|| {
            EventFluxError::configuration(format!(
                "externalTime window requires '{WINDOW_TIME_KEY}'"
            ))
        })?;
        let window_time_ms = TimeUtil::parse_time_literal(raw_time).map_err(|e| {
            EventFluxError::configuration(format!("Invalid '{WINDOW_TIME_KEY}': {e}"))
        })?;

        let compression = match config.get(STATE_COMPRESSION_KEY) {
            Some(raw) => raw
                .parse::<CompressionType>()
                .map_err(EventFluxError::configuration)?,
            None => CompressionType::None,
        };

        Ok(Self {
            timestamp_attribute,
            window_time_ms,
            compression,
        })
    }
}
