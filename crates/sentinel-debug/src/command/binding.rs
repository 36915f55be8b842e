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

//! Validation of binding commands: viewports, vertex and index buffers,
//! resources, pipeline states and uniforms.

use super::DebugCommandBuffer;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugObject};
use sentinel_core::renderer::{
    BindFlags, BufferId, CommandBufferRecord, Format, PipelineStateId, PrimitiveTopology,
    ResourceHeapId, ResourceId, Scissor, Viewport,
};
use sentinel_core::{ErrorType, WarningType};

/// The profile counter a `set_resource` call contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ResourceBindingKind {
    ConstantBuffer,
    SampledBuffer,
    StorageBuffer,
    SampledTexture,
    StorageTexture,
    Sampler,
}

impl ResourceBindingKind {
    /// Classifies a binding by resource kind and the bind flags it is used with.
    fn classify(resource: ResourceId, flags: BindFlags) -> Self {
        match resource {
            ResourceId::Buffer(_) if flags.contains(BindFlags::STORAGE) => Self::StorageBuffer,
            ResourceId::Buffer(_) if flags.contains(BindFlags::SAMPLED) => Self::SampledBuffer,
            ResourceId::Buffer(_) => Self::ConstantBuffer,
            ResourceId::Texture(_) if flags.contains(BindFlags::STORAGE) => Self::StorageTexture,
            ResourceId::Texture(_) => Self::SampledTexture,
            ResourceId::Sampler(_) => Self::Sampler,
        }
    }

    pub(super) fn count(self, record: &mut CommandBufferRecord) {
        let counter = match self {
            Self::ConstantBuffer => &mut record.constant_buffer_bindings,
            Self::SampledBuffer => &mut record.sampled_buffer_bindings,
            Self::StorageBuffer => &mut record.storage_buffer_bindings,
            Self::SampledTexture => &mut record.sampled_texture_bindings,
            Self::StorageTexture => &mut record.storage_texture_bindings,
            Self::Sampler => &mut record.sampler_bindings,
        };
        *counter += 1;
    }
}

impl DebugCommandBuffer {
    pub(super) fn validate_viewports(&self, r: &Reporter, viewports: &[Viewport]) {
        self.assert_recording(r);
        if viewports.is_empty() {
            r.warning(WarningType::PointlessOperation, "no viewports are specified");
            return;
        }
        checks::viewports(r, self.ctx.capabilities(), viewports);
    }

    pub(super) fn validate_scissors(&self, r: &Reporter, scissors: &[Scissor]) {
        self.assert_recording(r);
        if scissors.is_empty() {
            r.warning(WarningType::PointlessOperation, "no scissor rectangles are specified");
            return;
        }
        checks::scissors(r, self.ctx.capabilities(), scissors);
    }

    /// Returns whether any of the buffers declares a vertex layout, or `None`
    /// if one of them is unknown.
    pub(super) fn validate_vertex_buffers(&self, source: &str, buffers: &[BufferId]) -> Option<bool> {
        let reporter = self.ctx.reporter(source);
        let registry = self.ctx.registry.lock();
        let mut wrappers = Vec::with_capacity(buffers.len());
        for &id in buffers {
            wrappers.push(lookup(&registry.buffers, id, "vertex buffer", reporter.as_ref()));
        }
        let wrappers: Option<Vec<_>> = wrappers.into_iter().collect();
        let wrappers = wrappers?;

        if let Some(r) = &reporter {
            self.assert_recording(r);
            if wrappers.is_empty() {
                r.warning(WarningType::PointlessOperation, "no vertex buffers are specified");
            }
            for buffer in &wrappers {
                checks::required_bind_flags(
                    r,
                    "vertex buffer",
                    &buffer.name(),
                    buffer.desc.bind_flags,
                    BindFlags::VERTEX_BUFFER,
                );
            }
        }
        Some(wrappers.iter().any(|buffer| !buffer.desc.vertex_attribs.is_empty()))
    }

    pub(super) fn validate_index_buffer(&self, buffer: BufferId, format: Format, offset: u64) -> bool {
        let reporter = self.ctx.reporter("set_index_buffer");
        let registry = self.ctx.registry.lock();
        let Some(buffer) = lookup(&registry.buffers, buffer, "index buffer", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_recording(r);
            checks::required_bind_flags(
                r,
                "index buffer",
                &buffer.name(),
                buffer.desc.bind_flags,
                BindFlags::INDEX_BUFFER,
            );
            if !format.is_index_format() {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("invalid index buffer format: {format:?} (must be R16UInt or R32UInt)"),
                );
            }
            if offset >= buffer.size() && offset > 0 {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "index buffer offset {offset} out of bounds for buffer {} ({} bytes)",
                        buffer.name(),
                        buffer.size()
                    ),
                );
            }
        }
        true
    }

    pub(super) fn validate_resource_heap(&self, heap: ResourceHeapId, descriptor_set: u32) -> bool {
        let reporter = self.ctx.reporter("set_resource_heap");
        let registry = self.ctx.registry.lock();
        let Some(heap) = lookup(&registry.resource_heaps, heap, "resource heap", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_recording(r);
            let num_sets = heap.num_descriptor_sets();
            if descriptor_set >= num_sets {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "descriptor set {descriptor_set} out of range for resource heap {} with {num_sets} set(s)",
                        heap.name()
                    ),
                );
            }
        }
        true
    }

    pub(super) fn validate_resource(&self, descriptor: u32, resource: ResourceId) -> Option<ResourceBindingKind> {
        let reporter = self.ctx.reporter("set_resource");
        let registry = self.ctx.registry.lock();
        let (name, resource_flags) = match resource {
            ResourceId::Buffer(id) => lookup(&registry.buffers, id, "buffer", reporter.as_ref())
                .map(|b| (b.name(), b.desc.bind_flags))?,
            ResourceId::Texture(id) => lookup(&registry.textures, id, "texture", reporter.as_ref())
                .map(|t| (t.name(), t.desc.bind_flags))?,
            ResourceId::Sampler(id) => lookup(&registry.samplers, id, "sampler", reporter.as_ref())
                .map(|s| (s.name(), BindFlags::empty()))?,
        };

        let pipeline = self
            .bindings
            .pipeline_state
            .and_then(|id| registry.pipeline_states.get(&id));
        let binding = pipeline
            .and_then(|pso| pso.layout.as_ref())
            .and_then(|layout| layout.bindings.get(descriptor as usize));

        if let Some(r) = &reporter {
            self.assert_recording(r);
            if !self.ctx.features().has_direct_resource_binding {
                r.error(
                    ErrorType::UnsupportedFeature,
                    "direct resource binding not supported",
                );
            }
            match pipeline {
                None => r.error(
                    ErrorType::InvalidState,
                    "cannot bind individual resource without a pipeline state",
                ),
                Some(pso) => match &pso.layout {
                    None => r.error(
                        ErrorType::InvalidState,
                        format!("pipeline state {} has no pipeline layout", pso.name()),
                    ),
                    Some(layout) if binding.is_none() => r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "descriptor index {descriptor} out of range ({} binding(s) in pipeline layout)",
                            layout.bindings.len()
                        ),
                    ),
                    Some(_) => {}
                },
            }
            if let Some(binding) = binding {
                let resource_type = resource.resource_type();
                if binding.resource_type != resource_type {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "cannot bind {resource_type} {name} to binding '{}' of type {}",
                            binding.name, binding.resource_type
                        ),
                    );
                } else {
                    validate_binding_flags(r, resource, &name, resource_flags, binding.bind_flags, &binding.name);
                }
            }
        }

        let flags = binding.map_or(resource_flags, |binding| binding.bind_flags);
        Some(ResourceBindingKind::classify(resource, flags))
    }

    /// Returns whether the pipeline is a graphics pipeline and its topology.
    pub(super) fn validate_pipeline_state(
        &self,
        id: PipelineStateId,
    ) -> Option<(bool, Option<PrimitiveTopology>)> {
        let reporter = self.ctx.reporter("set_pipeline_state");
        let registry = self.ctx.registry.lock();
        let pso = lookup(&registry.pipeline_states, id, "pipeline state", reporter.as_ref())?;
        if let Some(r) = &reporter {
            self.assert_recording(r);
        }
        Some((pso.is_graphics(), pso.primitive_topology()))
    }

    pub(super) fn validate_uniforms(&self, r: &Reporter, first: u32, data: &[u8]) {
        self.assert_recording(r);
        if data.is_empty() {
            r.warning(WarningType::PointlessOperation, "set_uniforms with empty data");
        }
        let registry = self.ctx.registry.lock();
        let Some(pso) = self
            .bindings
            .pipeline_state
            .and_then(|id| registry.pipeline_states.get(&id))
        else {
            r.error(
                ErrorType::InvalidState,
                "cannot set uniforms without a pipeline state",
            );
            return;
        };
        let uniforms = pso.layout.as_ref().map_or(&[][..], |layout| layout.uniforms.as_slice());
        let Some(remaining) = uniforms.get(first as usize..) else {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "uniform index {first} out of range ({} uniform(s) in pipeline layout)",
                    pso.num_uniforms()
                ),
            );
            return;
        };
        let available: u64 = remaining.iter().map(|u| u64::from(u.size)).sum();
        let size = data.len() as u64;
        if size > available {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "uniform data size {size} exceeds the {available} byte(s) of uniforms starting at index {first}"
                ),
            );
        }
    }
}

fn validate_binding_flags(
    r: &Reporter,
    resource: ResourceId,
    name: &str,
    resource_flags: BindFlags,
    binding_flags: BindFlags,
    binding_name: &str,
) {
    let (allowed, what, kinds) = match resource {
        ResourceId::Buffer(_) => (
            BindFlags::CONSTANT_BUFFER | BindFlags::SAMPLED | BindFlags::STORAGE,
            "buffer",
            "CONSTANT_BUFFER, SAMPLED or STORAGE",
        ),
        ResourceId::Texture(_) => (
            BindFlags::SAMPLED | BindFlags::STORAGE | BindFlags::COMBINED_SAMPLER,
            "texture",
            "SAMPLED, STORAGE or COMBINED_SAMPLER",
        ),
        ResourceId::Sampler(_) => {
            if !binding_flags.is_empty() {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("sampler binding '{binding_name}' must not have bind flags, but {binding_flags:?} specified"),
                );
            }
            return;
        }
    };
    if !binding_flags.intersects(allowed) {
        r.error(
            ErrorType::InvalidArgument,
            format!("{what} binding '{binding_name}' requires one of the bind flags {kinds}"),
        );
        return;
    }
    let required = binding_flags & (allowed - BindFlags::COMBINED_SAMPLER);
    checks::required_bind_flags(r, what, name, resource_flags, required);
}
