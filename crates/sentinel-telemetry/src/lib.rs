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

//! # Sentinel Telemetry
//!
//! Concrete sinks for the validation layer: debuggers that collect, forward or
//! log validation findings, and a profiler that accumulates frame profiles.

#![warn(missing_docs)]

pub mod channel;
pub mod logging;
pub mod profiler;
pub mod report;

pub use channel::ChannelDebugger;
pub use logging::{init_logging, LogDebugger};
pub use profiler::{FrameProfiler, TelemetryError};
pub use report::{Report, ReportEntry, ReportKind, ReportLog};
