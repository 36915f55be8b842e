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

//! The device context shared by every object of the validation layer.

use crate::config::DebugLayerConfig;
use crate::report::Reporter;
use crate::wrappers::ResourceRegistry;
use parking_lot::Mutex;
use sentinel_core::renderer::{
    CommandQueueRecord, GraphicsBackendType, RenderingCapabilities, RenderingFeatures,
    RenderingLimits,
};
use sentinel_core::{CommandQueue, Debugger, ProfilerSink, RenderDevice};
use std::fmt;
use std::sync::Arc;

/// State shared by a [`DebugRenderDevice`](crate::DebugRenderDevice) and every command
/// buffer and queue created from it.
///
/// The capability table and backend type are snapshots taken once at construction.
pub struct DebugContext {
    native: Arc<dyn RenderDevice>,
    native_queue: Arc<dyn CommandQueue>,
    capabilities: RenderingCapabilities,
    backend: GraphicsBackendType,
    debugger: Option<Arc<dyn Debugger>>,
    profiler: Option<Arc<dyn ProfilerSink>>,
    config: DebugLayerConfig,
    pub(crate) registry: Mutex<ResourceRegistry>,
    pub(crate) queue_record: Mutex<CommandQueueRecord>,
}

impl DebugContext {
    pub(crate) fn new(
        native: Arc<dyn RenderDevice>,
        debugger: Option<Arc<dyn Debugger>>,
        profiler: Option<Arc<dyn ProfilerSink>>,
        config: DebugLayerConfig,
    ) -> Self {
        let native_queue = native.command_queue();
        Self {
            capabilities: native.capabilities(),
            backend: native.backend(),
            native,
            native_queue,
            debugger,
            profiler,
            config,
            registry: Mutex::new(ResourceRegistry::default()),
            queue_record: Mutex::new(CommandQueueRecord::default()),
        }
    }

    /// Returns the decorated native device.
    pub fn native(&self) -> &dyn RenderDevice {
        self.native.as_ref()
    }

    /// Returns the command queue of the native device.
    pub fn native_queue(&self) -> &dyn CommandQueue {
        self.native_queue.as_ref()
    }

    /// Returns the capability snapshot.
    pub fn capabilities(&self) -> &RenderingCapabilities {
        &self.capabilities
    }

    /// Shorthand for the optional features of the capability snapshot.
    pub fn features(&self) -> &RenderingFeatures {
        &self.capabilities.features
    }

    /// Shorthand for the numeric limits of the capability snapshot.
    pub fn limits(&self) -> &RenderingLimits {
        &self.capabilities.limits
    }

    /// Returns the backend type of the native device.
    pub fn backend(&self) -> GraphicsBackendType {
        self.backend
    }

    /// Returns the attached debugger, if any.
    pub fn debugger(&self) -> Option<&Arc<dyn Debugger>> {
        self.debugger.as_ref()
    }

    /// Returns the attached profiler, if any.
    pub fn profiler(&self) -> Option<&Arc<dyn ProfilerSink>> {
        self.profiler.as_ref()
    }

    /// Returns the layer configuration.
    pub fn config(&self) -> &DebugLayerConfig {
        &self.config
    }

    /// Returns a reporter for the public call named `source`.
    ///
    /// Returns `None` when no debugger is attached or validation is disabled, in
    /// which case the caller skips all of its checks.
    pub fn reporter(&self, source: &str) -> Option<Reporter> {
        if !self.config.validate {
            return None;
        }
        self.debugger
            .as_ref()
            .map(|debugger| Reporter::new(Arc::clone(debugger), source))
    }

    /// Takes the queue-level counters accumulated since the last call.
    pub fn take_queue_record(&self) -> CommandQueueRecord {
        std::mem::take(&mut *self.queue_record.lock())
    }

    pub(crate) fn log_forwarding(&self, owner: &str, command: &str) {
        if self.config.log_forwarding {
            log::trace!("{owner}: Forwarding '{command}' to native backend");
        }
    }
}

impl fmt::Debug for DebugContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("native", &self.native)
            .field("backend", &self.backend)
            .field("debugger", &self.debugger.is_some())
            .field("profiler", &self.profiler.is_some())
            .field("config", &self.config)
            .finish()
    }
}
