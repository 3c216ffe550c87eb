// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/config/mod.rs

pub mod stream_config;
pub mod toml_config;
pub mod window_config;

pub use self::stream_config::{FlatConfig, PropertySource};
pub use self::toml_config::{load_toml_config, parse_toml_config, LoadedConfig, TomlConfig};
pub use self::window_config::ExternalTimeWindowConfig;
