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

//! Defines the core architectural traits for the rendering subsystem.
//!
//! This module contains the contracts that decouple application code and the
//! validation layer from any specific graphics backend.
//!
//! - [`RenderDevice`]: Creates and releases GPU resources.
//! - [`CommandBuffer`]: Records GPU commands.
//! - [`CommandQueue`]: Submits command buffers and retrieves query results.
//! - [`Debugger`]: Receives validation errors and warnings.
//! - [`ProfilerSink`]: Receives per-frame performance profiles.

mod command_buffer;
mod command_queue;
mod debugger;
mod profiler;
mod render_device;

pub use self::command_buffer::CommandBuffer;
pub use self::command_queue::CommandQueue;
pub use self::debugger::*;
pub use self::profiler::ProfilerSink;
pub use self::render_device::RenderDevice;
