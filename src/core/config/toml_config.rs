// SPDX-License-Identifier: MIT OR Apache-2.0

//! # TOML Configuration Module
//!
//! Loads window configuration from TOML and flattens it into one
//! [`FlatConfig`] per named window.
//!
//! ## Features
//!
//! - **Environment Variable Substitution**: Eager, with `${VAR}` or `${VAR:default}` syntax
//! - **Configuration Merging**: `[application]` values act as defaults under every window
//! - **Validation**: per-window keys are rejected in `[application]`
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! [application]
//! state.compression = "snappy"
//!
//! [windows.RecentTrades]
//! type = "externalTime"
//! timestamp = "tradeTime"
//! window.time = "${TRADE_WINDOW:20 sec}"
//! ```

use crate::core::config::stream_config::{FlatConfig, PropertySource};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Keys that only make sense for a single window.
const WINDOW_ONLY_KEYS: [&str; 2] = ["type", "timestamp"];

/// Top-level TOML configuration structure
#[derive(Deserialize, Debug, Clone)]
pub struct TomlConfig {
    pub application: Option<ApplicationSection>,
    pub windows: Option<HashMap<String, TomlWindowConfig>>,
}

/// Application-level configuration section
///
/// All properties in this section apply as defaults to all windows.
#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSection {
    #[serde(flatten)]
    pub properties: HashMap<String, toml::Value>,
}

/// Window-specific configuration from TOML
#[derive(Deserialize, Debug, Clone)]
pub struct TomlWindowConfig {
    #[serde(flatten)]
    pub properties: HashMap<String, toml::Value>,
}

/// Flatten nested TOML structures into dot-separated keys
///
/// `[windows.W.window] time = "1 sec"` and `[windows.W] window.time = "1 sec"`
/// both produce `window.time = "1 sec"`. Arrays become comma separated strings.
pub fn flatten_toml_value(
    prefix: &str,
    value: &toml::Value,
    config: &mut FlatConfig,
    source: PropertySource,
) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml_value(&new_prefix, val, config, source);
            }
        }
        toml::Value::String(s) => {
            config.set(prefix, s.clone(), source);
        }
        toml::Value::Integer(i) => {
            config.set(prefix, i.to_string(), source);
        }
        toml::Value::Float(f) => {
            config.set(prefix, f.to_string(), source);
        }
        toml::Value::Boolean(b) => {
            config.set(prefix, b.to_string(), source);
        }
        toml::Value::Array(arr) => {
            let str_values: Vec<String> = arr
                .iter()
                .filter_map(|v| match v {
                    toml::Value::String(s) => Some(s.clone()),
                    toml::Value::Integer(i) => Some(i.to_string()),
                    toml::Value::Float(f) => Some(f.to_string()),
                    toml::Value::Boolean(b) => Some(b.to_string()),
                    _ => {
                        log::warn!("Unsupported array element type under '{prefix}', skipping");
                        None
                    }
                })
                .collect();
            config.set(prefix, str_values.join(","), source);
        }
        toml::Value::Datetime(_) => {
            config.set(prefix, value.to_string(), source);
        }
    }
}

/// Compiled once; the pattern is a literal so this only fails if the regex crate changes syntax.
static ENV_VAR_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}"));

/// Substitute environment variables in a string value
///
/// - `${VAR_NAME}` - Required variable (fails if missing)
/// - `${VAR_NAME:default}` - Optional variable with default value
///
/// ```
/// use eventflux_window::core::config::toml_config::substitute_env_vars;
///
/// std::env::set_var("DOC_WINDOW_TIME", "5 sec");
/// assert_eq!(substitute_env_vars("${DOC_WINDOW_TIME}").unwrap(), "5 sec");
/// assert_eq!(substitute_env_vars("${DOC_MISSING:1000}").unwrap(), "1000");
/// assert!(substitute_env_vars("${DOC_MISSING}").is_err());
/// ```
pub fn substitute_env_vars(value: &str) -> Result<String, String> {
    let regex = ENV_VAR_REGEX
        .as_ref()
        .map_err(|e| format!("Environment variable pattern failed to compile: {e}"))?;
    let mut result = value.to_string();
    let mut missing_vars = Vec::new();

    for cap in regex.captures_iter(value) {
        let var_name = &cap[1];
        let default_value = cap.get(2).map(|m| m.as_str());
        let placeholder = &cap[0];

        match env::var(var_name) {
            Ok(env_value) => {
                result = result.replace(placeholder, &env_value);
            }
            Err(_) => {
                if let Some(default) = default_value {
                    result = result.replace(placeholder, default);
                } else {
                    missing_vars.push(var_name.to_string());
                }
            }
        }
    }

    if !missing_vars.is_empty() {
        return Err(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        ));
    }

    Ok(result)
}

/// Recursively substitute environment variables in every string of a TOML value
pub fn substitute_toml_env_vars(value: &mut toml::Value) -> Result<(), String> {
    match value {
        toml::Value::String(s) => {
            *s = substitute_env_vars(s)?;
        }
        toml::Value::Table(table) => {
            for (_, val) in table.iter_mut() {
                substitute_toml_env_vars(val)?;
            }
        }
        toml::Value::Array(arr) => {
            for val in arr.iter_mut() {
                substitute_toml_env_vars(val)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl ApplicationSection {
    /// Reject keys that identify a single window's input.
    pub fn validate(&self) -> Result<(), String> {
        for key in &WINDOW_ONLY_KEYS {
            if self.properties.contains_key(*key) {
                return Err(format!(
                    "[application] defines '{}', but '{}' is window specific and \
                    must be set under [windows.<name>]",
                    key, key
                ));
            }
        }
        Ok(())
    }

    pub fn to_flat_config(&self) -> FlatConfig {
        let mut config = FlatConfig::new();
        for (key, value) in &self.properties {
            flatten_toml_value(key, value, &mut config, PropertySource::TomlApplication);
        }
        config
    }
}

impl TomlWindowConfig {
    pub fn to_flat_config(&self, source: PropertySource) -> FlatConfig {
        let mut config = FlatConfig::new();
        for (key, value) in &self.properties {
            flatten_toml_value(key, value, &mut config, source);
        }
        config
    }
}

/// Per-window flat configurations, application defaults already merged in.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub windows: HashMap<String, FlatConfig>,
}

impl LoadedConfig {
    pub fn window(&self, name: &str) -> Option<&FlatConfig> {
        self.windows.get(name)
    }
}

/// Load a TOML file and build one [`FlatConfig`] per `[windows.*]` section.
///
/// Merge order (lowest to highest priority): Rust defaults, `[application]`,
/// `[windows.Name]`. Programmatic overrides are merged later by the caller.
pub fn load_toml_config(toml_path: impl AsRef<Path>) -> Result<LoadedConfig, String> {
    let toml_path = toml_path.as_ref();
    let toml_str = std::fs::read_to_string(toml_path)
        .map_err(|e| format!("Failed to read TOML file '{}': {}", toml_path.display(), e))?;
    parse_toml_config(&toml_str)
        .map_err(|e| format!("Invalid TOML file '{}': {}", toml_path.display(), e))
}

/// Same as [`load_toml_config`] for an in-memory document.
pub fn parse_toml_config(toml_str: &str) -> Result<LoadedConfig, String> {
    let mut toml_config: TomlConfig =
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;

    if let Some(ref mut app) = toml_config.application {
        for (_, value) in app.properties.iter_mut() {
            substitute_toml_env_vars(value)?;
        }
    }
    if let Some(ref mut windows) = toml_config.windows {
        for (_, window_config) in windows.iter_mut() {
            for (_, value) in window_config.properties.iter_mut() {
                substitute_toml_env_vars(value)?;
            }
        }
    }

    let app_defaults = match toml_config.application {
        Some(app) => {
            app.validate()?;
            app.to_flat_config()
        }
        None => FlatConfig::new(),
    };

    let mut window_configs = HashMap::new();
    for (window_name, window_config) in toml_config.windows.unwrap_or_default() {
        let mut flat_config = app_defaults.clone();
        flat_config.merge(&window_config.to_flat_config(PropertySource::TomlWindow));
        log::debug!(
            "Loaded configuration for window '{}' ({} properties)",
            window_name,
            flat_config.len()
        );
        window_configs.insert(window_name, flat_config);
    }

    Ok(LoadedConfig {
        windows: window_configs,
    })
}
