// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Flat Configuration
//!
//! Dot-keyed properties with source tracking. A value set from a higher
//! priority source is never replaced by a lower priority one.
//!
//! ## Configuration Sources (Priority: Low to High)
//!
//! 1. **RustDefault** - Built-in Rust defaults
//! 2. **TomlApplication** - `[application]` section of the TOML file
//! 3. **TomlWindow** - `[windows.<name>]` section of the TOML file
//! 4. **Programmatic** - values set by the embedding code or the command line
//!
//! ## Example Usage
//!
//! ```rust
//! use eventflux_window::core::config::stream_config::{FlatConfig, PropertySource};
//!
//! let mut config = FlatConfig::new();
//! config.set("window.time", "1 sec", PropertySource::TomlWindow);
//! config.set("window.time", "500", PropertySource::RustDefault);
//! assert_eq!(config.get("window.time"), Some(&"1 sec".to_string()));
//! ```

use std::collections::BTreeMap;

/// Property source identifier with priority ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertySource {
    RustDefault,
    /// TOML `[application]` section
    TomlApplication,
    /// TOML `[windows.<name>]` section
    TomlWindow,
    /// Set in code or on the command line
    Programmatic,
}

impl PropertySource {
    /// Numeric priority, higher wins.
    #[inline]
    pub const fn priority(&self) -> u8 {
        match self {
            PropertySource::RustDefault => 0,
            PropertySource::TomlApplication => 1,
            PropertySource::TomlWindow => 2,
            PropertySource::Programmatic => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Property {
    value: String,
    source: PropertySource,
}

/// Flat key-value configuration with source tracking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatConfig {
    properties: BTreeMap<String, Property>,
}

impl FlatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property unless an existing value came from a strictly higher
    /// priority source. Equal priority overwrites.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        source: PropertySource,
    ) {
        let key = key.into();
        if matches!(self.properties.get(&key), Some(existing) if existing.source.priority() > source.priority())
        {
            log::trace!("ignoring {key} from {source:?}, already set by a higher priority source");
            return;
        }
        self.properties.insert(
            key,
            Property {
                value: value.into(),
                source,
            },
        );
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.properties.get(key).map(|p| &p.value)
    }

    pub fn get_with_source(&self, key: &str) -> Option<(&String, PropertySource)> {
        self.properties.get(key).map(|p| (&p.value, p.source))
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }

    /// Merge another configuration into this one (respects priorities)
    pub fn merge(&mut self, other: &FlatConfig) {
        for (key, property) in &other.properties {
            self.set(key.clone(), property.value.clone(), property.source);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
