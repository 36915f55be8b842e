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

//! Logging setup and a debugger that writes findings to the log.

use parking_lot::Mutex;
use sentinel_core::{Debugger, ErrorType, WarningType};

/// Initializes `env_logger` with an `info` default filter.
///
/// `RUST_LOG` overrides the default. Returns `false` if a logger was already
/// installed, which makes it safe to call from every test.
pub fn init_logging() -> bool {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
}

/// A [`Debugger`] that forwards errors to `log::error!` and warnings to `log::warn!`.
#[derive(Debug, Default)]
pub struct LogDebugger {
    source: Mutex<String>,
}

impl LogDebugger {
    /// Creates a log debugger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Debugger for LogDebugger {
    fn set_source(&self, source: &str) {
        *self.source.lock() = source.to_owned();
    }

    fn post_error(&self, error_type: ErrorType, message: &str) {
        log::error!("[{}] {error_type}: {message}", self.source.lock());
    }

    fn post_warning(&self, warning_type: WarningType, message: &str) {
        log::warn!("[{}] {warning_type}: {message}", self.source.lock());
    }
}
