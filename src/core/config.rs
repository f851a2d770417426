//! Logger configuration structures
//!
//! The facade consumes configuration that an external collaborator has
//! already loaded and decoded into JSON values; the [`Configurer`]
//! capability is the only thing the core asks of it.

use super::error::{LoggerError, Result};
use super::handler::HandlerOptions;
use super::level::Level;
use super::value::{Attr, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration key the facade reads its own settings from.
pub const CONFIG_KEY: &str = "log";

/// Per-channel logger settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When true, handlers append a `("source", "file:line")` attribute
    /// with the source position of the log statement. Off by default to
    /// skip the cost of capturing it.
    pub add_source: bool,

    /// Minimum enabled logging level. Unknown values fall back to `info`.
    pub level: String,

    /// Encoding selector: `json`, `text` or `console`. Anything else is
    /// treated as `json`.
    pub encoding: String,

    /// File paths or the well-known names `stdout`/`stderr` to write to.
    /// Empty means `stderr`.
    pub output_paths: Vec<String>,

    /// Static attributes merged into every record of this channel.
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Config {
    pub fn min_level(&self) -> Level {
        Level::from_config(&self.level)
    }

    pub fn handler_options(&self) -> HandlerOptions {
        HandlerOptions {
            add_source: self.add_source,
            level: Some(self.min_level()),
        }
    }

    /// Static attribute table lifted into the canonical model.
    pub fn attrs(&self) -> Vec<Attr> {
        self.attributes
            .iter()
            .map(|(key, value)| Attr::new(key.clone(), Value::from_json(value.clone())))
            .collect()
    }
}

/// Dedicated per-channel configurations. Channels without an entry are
/// realized as named views over the base logger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub channels: HashMap<String, Config>,
}

/// Decoded-configuration capability supplied by the surrounding process.
pub trait Configurer {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn version(&self) -> &str;
}

pub fn new_config(cfg: &dyn Configurer, key: &str) -> Result<Config> {
    if !cfg.has(key) {
        return Ok(Config::default());
    }
    match cfg.get(key) {
        Some(value) => {
            serde_json::from_value(value).map_err(|e| LoggerError::config_decode(key, e))
        }
        None => Ok(Config::default()),
    }
}

pub fn new_channel_config(cfg: &dyn Configurer, key: &str) -> Result<ChannelConfig> {
    if !cfg.has(key) {
        return Ok(ChannelConfig::default());
    }
    match cfg.get(key) {
        Some(value) => {
            serde_json::from_value(value).map_err(|e| LoggerError::config_decode(key, e))
        }
        None => Ok(ChannelConfig::default()),
    }
}
