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

//! # Sentinel Debug
//!
//! A validation and instrumentation layer that decorates a native
//! [`RenderDevice`](sentinel_core::RenderDevice).
//!
//! Every resource creation and every recorded command is checked against the
//! device capabilities and the creation-time descriptors of the resources
//! involved. Findings are posted to an optional [`Debugger`](sentinel_core::Debugger);
//! the call is then forwarded unchanged to the native backend. With no debugger
//! attached, the layer only tracks the state it needs and forwards every call.
//!
//! ```ignore
//! let device = DebugRenderDevice::builder(native_device)
//!     .with_debugger(report_log.clone())
//!     .with_profiler(frame_profiler.clone())
//!     .build();
//! let queue = device.command_queue();
//! let mut cmd = device.create_command_buffer(&CommandBufferDescriptor::default())?;
//! cmd.begin();
//! // ... record ...
//! cmd.end();
//! queue.submit(&mut cmd);
//! ```

#![warn(missing_docs)]

mod checks;
pub mod command;
pub mod config;
pub mod context;
pub mod device;
pub mod queue;
pub mod report;
pub mod timer;
pub mod wrappers;

pub use command::DebugCommandBuffer;
pub use config::{ConfigError, DebugLayerConfig};
pub use context::DebugContext;
pub use device::{DebugRenderDevice, DebugRenderDeviceBuilder};
pub use queue::DebugCommandQueue;
pub use report::Reporter;
pub use timer::QueryTimerPool;
