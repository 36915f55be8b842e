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

//! The device-level validator.
//!
//! [`DebugRenderDevice`] mirrors every operation of a native
//! [`RenderDevice`]. Each creation call validates its descriptor, forwards it,
//! and registers a wrapper under the ID the native backend returned. An ID that
//! is unknown to the layer is treated as a null handle: it is reported and the
//! native call is skipped.

mod buffer;
mod pipeline;
mod query;
mod render_target;
mod resource_heap;
mod texture;

use crate::command::DebugCommandBuffer;
use crate::config::DebugLayerConfig;
use crate::context::DebugContext;
use crate::queue::DebugCommandQueue;
use crate::wrappers::{DebugFence, DebugSampler, ResourceRegistry};
use sentinel_core::renderer::{
    CommandBufferDescriptor, CommandBufferFlags, FenceId, GraphicsBackendType, ObjectId,
    RenderingCapabilities, ResourceError, SamplerDescriptor, SamplerId,
};
use sentinel_core::{Debugger, ErrorType, ProfilerSink, RenderDevice};
use std::fmt::Debug;
use std::sync::Arc;

/// Builds a [`DebugRenderDevice`] around a native device.
pub struct DebugRenderDeviceBuilder {
    native: Arc<dyn RenderDevice>,
    debugger: Option<Arc<dyn Debugger>>,
    profiler: Option<Arc<dyn ProfilerSink>>,
    config: DebugLayerConfig,
}

impl DebugRenderDeviceBuilder {
    /// Attaches a debugger. Without one, the layer performs no validation.
    pub fn with_debugger(mut self, debugger: Arc<dyn Debugger>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    /// Attaches a profiler sink that receives a frame profile on every submission.
    pub fn with_profiler(mut self, profiler: Arc<dyn ProfilerSink>) -> Self {
        self.profiler = Some(profiler);
        self
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: DebugLayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the device.
    pub fn build(self) -> DebugRenderDevice {
        let ctx = DebugContext::new(self.native, self.debugger, self.profiler, self.config);
        log::info!(
            "DebugRenderDevice: Validation layer active on {} backend (debugger: {}, profiler: {})",
            ctx.backend(),
            ctx.debugger().is_some(),
            ctx.profiler().is_some()
        );
        DebugRenderDevice { ctx: Arc::new(ctx) }
    }
}

/// A validating decorator over a native [`RenderDevice`].
#[derive(Debug, Clone)]
pub struct DebugRenderDevice {
    ctx: Arc<DebugContext>,
}

impl DebugRenderDevice {
    /// Starts building a debug device around `native`.
    pub fn builder(native: Arc<dyn RenderDevice>) -> DebugRenderDeviceBuilder {
        DebugRenderDeviceBuilder {
            native,
            debugger: None,
            profiler: None,
            config: DebugLayerConfig::default(),
        }
    }

    /// Returns the shared context.
    pub fn context(&self) -> &Arc<DebugContext> {
        &self.ctx
    }

    /// Returns the decorated native device.
    pub fn native(&self) -> &dyn RenderDevice {
        self.ctx.native()
    }

    /// Returns the backend type of the native device.
    pub fn backend(&self) -> GraphicsBackendType {
        self.ctx.backend()
    }

    /// Returns the capability snapshot taken at construction.
    pub fn capabilities(&self) -> RenderingCapabilities {
        *self.ctx.capabilities()
    }

    /// Returns a validating queue over the native command queue.
    pub fn command_queue(&self) -> DebugCommandQueue {
        DebugCommandQueue::new(Arc::clone(&self.ctx))
    }

    /// Creates a validating command buffer.
    pub fn create_command_buffer(
        &self,
        desc: &CommandBufferDescriptor,
    ) -> Result<DebugCommandBuffer, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_command_buffer") {
            if desc
                .flags
                .contains(CommandBufferFlags::SECONDARY | CommandBufferFlags::IMMEDIATE_SUBMIT)
            {
                r.error(
                    ErrorType::InvalidArgument,
                    "secondary command buffers cannot be submitted immediately",
                );
            }
        }
        let native = self.ctx.native().create_command_buffer(desc)?;
        log::debug!("DebugRenderDevice: Created command buffer {:?}", desc.label);
        Ok(DebugCommandBuffer::new(Arc::clone(&self.ctx), native, desc.clone()))
    }

    // --- Samplers ---

    /// Validates and creates a sampler.
    pub fn create_sampler(&self, desc: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_sampler") {
            let max_anisotropy = self.ctx.limits().max_anisotropy;
            if desc.max_anisotropy == 0 || desc.max_anisotropy > max_anisotropy {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "sampler anisotropy {} out of range [1, {max_anisotropy}]",
                        desc.max_anisotropy
                    ),
                );
            }
            if desc.min_lod > desc.max_lod {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "sampler minimum LOD ({}) is greater than maximum LOD ({})",
                        desc.min_lod, desc.max_lod
                    ),
                );
            }
        }
        let id = self.ctx.native().create_sampler(desc)?;
        log::debug!("DebugRenderDevice: Created sampler with ID: {id:?}");
        self.ctx
            .registry
            .lock()
            .samplers
            .insert(id, DebugSampler::new(id, desc.clone()));
        Ok(id)
    }

    /// Releases a sampler.
    pub fn release_sampler(&self, id: SamplerId) -> Result<(), ResourceError> {
        self.release_object(
            "release_sampler",
            "sampler",
            id,
            |registry| registry.samplers.remove(&id).is_some(),
            |native| native.release_sampler(id),
        )
    }

    // --- Fences ---

    /// Creates a fence.
    pub fn create_fence(&self) -> Result<FenceId, ResourceError> {
        let id = self.ctx.native().create_fence()?;
        log::debug!("DebugRenderDevice: Created fence with ID: {id:?}");
        self.ctx
            .registry
            .lock()
            .fences
            .insert(id, DebugFence { id, label: None });
        Ok(id)
    }

    /// Releases a fence.
    pub fn release_fence(&self, id: FenceId) -> Result<(), ResourceError> {
        self.release_object(
            "release_fence",
            "fence",
            id,
            |registry| registry.fences.remove(&id).is_some(),
            |native| native.release_fence(id),
        )
    }

    // --- Labels ---

    /// Sets the debug label of any object and forwards it to the native object.
    pub fn set_name(&self, object: ObjectId, name: &str) {
        let known = self.ctx.registry.lock().set_label(object, name);
        if !known {
            if let Some(r) = self.ctx.reporter("set_name") {
                r.null_handle("object", object);
            }
            return;
        }
        self.ctx.native().set_name(object, name);
    }

    /// Removes a wrapper and releases the native object. An unknown ID is
    /// reported and yields [`ResourceError::InvalidHandle`] without a native call.
    fn release_object(
        &self,
        source: &str,
        kind: &str,
        id: impl Debug + Copy,
        remove: impl FnOnce(&mut ResourceRegistry) -> bool,
        release: impl FnOnce(&dyn RenderDevice) -> Result<(), ResourceError>,
    ) -> Result<(), ResourceError> {
        let removed = remove(&mut self.ctx.registry.lock());
        if !removed {
            if let Some(r) = self.ctx.reporter(source) {
                r.null_handle(kind, id);
            }
            return Err(ResourceError::InvalidHandle);
        }
        release(self.ctx.native())?;
        log::debug!("DebugRenderDevice: Released {kind} with ID: {id:?}");
        Ok(())
    }
}
