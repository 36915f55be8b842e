// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration of the validation layer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a [`DebugLayerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read debug layer config '{path}': {source}")]
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid RON for this structure.
    #[error("failed to parse debug layer config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Tunables of the validation layer.
///
/// Every field has a default, so a RON document only needs to list the values it
/// overrides:
///
/// ```ron
/// (validate: true, timer_queries_per_heap: 128)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugLayerConfig {
    /// Number of timestamp queries in each query heap of the timer pool.
    pub timer_queries_per_heap: u32,
    /// How often a timer query result is polled before it is given up.
    pub max_query_poll_attempts: u32,
    /// Largest data size accepted by `update_buffer`, in bytes.
    pub max_update_buffer_size: u64,
    /// Runs validation when a debugger is attached. When `false`, the layer only forwards.
    pub validate: bool,
    /// Emits a trace log line for every forwarded command.
    pub log_forwarding: bool,
}

impl Default for DebugLayerConfig {
    fn default() -> Self {
        Self {
            timer_queries_per_heap: 64,
            max_query_poll_attempts: 64,
            max_update_buffer_size: 65536,
            validate: true,
            log_forwarding: false,
        }
    }
}

impl DebugLayerConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads a configuration from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded debug layer config from '{}'", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = DebugLayerConfig::from_ron_str("(timer_queries_per_heap: 8)").unwrap();
        assert_eq!(config.timer_queries_per_heap, 8);
        assert_eq!(config.max_update_buffer_size, 65536);
        assert!(config.validate);
    }

    #[test]
    fn invalid_ron_is_a_parse_error() {
        let err = DebugLayerConfig::from_ron_str("(validate: 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DebugLayerConfig::load("/nonexistent/debug_layer.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/debug_layer.ron"));
    }

    #[test]
    fn round_trips_through_ron() {
        let config = DebugLayerConfig {
            log_forwarding: true,
            ..Default::default()
        };
        let text = ron::to_string(&config).unwrap();
        assert_eq!(DebugLayerConfig::from_ron_str(&text).unwrap(), config);
    }
}
