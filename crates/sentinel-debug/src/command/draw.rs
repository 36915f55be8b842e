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

//! Validation of draw and dispatch commands.

use super::DebugCommandBuffer;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugBuffer, DebugObject, DebugPipelineState, ResourceRegistry};
use sentinel_core::renderer::{
    BindFlags, BufferId, DispatchIndirectArguments, DrawIndexedIndirectArguments,
    DrawIndirectArguments, PipelineStateDescriptor, SystemValue,
};
use sentinel_core::{ErrorType, WarningType};
use std::ops::Range;

impl DebugCommandBuffer {
    pub(super) fn validate_draw(&self, r: &Reporter, vertices: &Range<u32>, instances: &Range<u32>) {
        let registry = self.ctx.registry.lock();
        let pso = self.validate_draw_bindings(r, &registry);
        let count = range_count(r, vertices, "vertex");
        if pso.is_some() {
            if let Some(topology) = self.bindings.primitive_topology {
                checks::primitive_count(r, topology, count, "vertex");
            }
        }
        self.validate_instances(r, instances);
        self.validate_vertex_capacity(r, &registry, vertices, instances);
        if let Some(pso) = pso {
            if vertices.start != 0 && pso.uses_vertex_id {
                r.warning(
                    WarningType::VaryingBehavior,
                    format!(
                        "non-zero first vertex ({}) in combination with vertex ID system value results in varying behavior across backends",
                        vertices.start
                    ),
                );
            }
            self.validate_first_instance(r, pso, instances);
        }
    }

    pub(super) fn validate_draw_indexed(
        &self,
        r: &Reporter,
        indices: &Range<u32>,
        base_vertex: i32,
        instances: &Range<u32>,
    ) {
        let registry = self.ctx.registry.lock();
        let pso = self.validate_draw_bindings(r, &registry);
        let count = range_count(r, indices, "index");
        if pso.is_some() {
            if let Some(topology) = self.bindings.primitive_topology {
                checks::primitive_count(r, topology, count, "index");
            }
        }
        if let Some(available) = self.validate_index_binding(r, &registry) {
            if u64::from(indices.end) > available {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "index range out of bounds: [{}, {}) exceeds the {available} index(es) of the bound index buffer",
                        indices.start, indices.end
                    ),
                );
            }
        }
        self.validate_instances(r, instances);
        self.validate_vertex_capacity(r, &registry, &(0..0), instances);
        if let Some(pso) = pso {
            if base_vertex != 0 && pso.uses_vertex_id {
                r.warning(
                    WarningType::VaryingBehavior,
                    format!(
                        "non-zero base vertex ({base_vertex}) in combination with vertex ID system value results in varying behavior across backends"
                    ),
                );
            }
            self.validate_first_instance(r, pso, instances);
        }
    }

    pub(super) fn validate_draw_indirect(
        &self,
        source: &str,
        buffer: BufferId,
        offset: u64,
        num_commands: u32,
        stride: u32,
        indexed: bool,
    ) -> bool {
        let reporter = self.ctx.reporter(source);
        let registry = self.ctx.registry.lock();
        let Some(arguments) = lookup(&registry.buffers, buffer, "indirect argument buffer", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.validate_draw_bindings(r, &registry);
            let argument_size = if indexed {
                self.validate_index_binding(r, &registry);
                DrawIndexedIndirectArguments::SIZE
            } else {
                DrawIndirectArguments::SIZE
            };
            self.validate_indirect_buffer(r, arguments, offset, num_commands, stride, argument_size);
        }
        true
    }

    pub(super) fn validate_dispatch(&self, r: &Reporter, work_groups: [u32; 3]) {
        self.assert_outside_render_pass(r);
        let registry = self.ctx.registry.lock();
        self.bound_pipeline(r, &registry, false);

        let limits = self.ctx.limits().max_compute_shader_work_groups;
        for (axis, (&n, &max)) in ["X", "Y", "Z"].iter().zip(work_groups.iter().zip(limits.iter())) {
            if n > max {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("number of work groups exceeds limit on {axis} axis ({n} specified, but limit is {max})"),
                );
            }
        }
        if work_groups.contains(&0) {
            r.warning(
                WarningType::PointlessOperation,
                format!(
                    "dispatch with zero work groups has no effect ({} x {} x {})",
                    work_groups[0], work_groups[1], work_groups[2]
                ),
            );
        }
    }

    pub(super) fn validate_dispatch_indirect(&self, buffer: BufferId, offset: u64) -> bool {
        let reporter = self.ctx.reporter("dispatch_indirect");
        let registry = self.ctx.registry.lock();
        let Some(arguments) = lookup(&registry.buffers, buffer, "indirect argument buffer", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            self.bound_pipeline(r, &registry, false);
            self.validate_indirect_buffer(r, arguments, offset, 1, 0, DispatchIndirectArguments::SIZE);
        }
        true
    }

    /// Reports a missing pipeline state or one of the wrong kind.
    fn bound_pipeline<'a>(
        &self,
        r: &Reporter,
        registry: &'a ResourceRegistry,
        graphics: bool,
    ) -> Option<&'a DebugPipelineState> {
        let (expected, other) = if graphics {
            ("graphics", "compute")
        } else {
            ("compute", "graphics")
        };
        let Some(id) = self.bindings.pipeline_state else {
            r.error(
                ErrorType::InvalidState,
                format!("no {expected} pipeline state is bound"),
            );
            return None;
        };
        let pso = lookup(&registry.pipeline_states, id, "pipeline state", Some(r))?;
        if pso.is_graphics() != graphics {
            r.error(
                ErrorType::InvalidState,
                format!(
                    "{expected} pipeline state required, but {other} pipeline state {} is bound",
                    pso.name()
                ),
            );
            return None;
        }
        Some(pso)
    }

    /// Checks everything a draw command needs besides its arguments: the render
    /// pass, the graphics pipeline, its dynamic states and the vertex buffers.
    fn validate_draw_bindings<'a>(
        &self,
        r: &Reporter,
        registry: &'a ResourceRegistry,
    ) -> Option<&'a DebugPipelineState> {
        self.assert_inside_render_pass(r);
        let pso = self.bound_pipeline(r, registry, true);

        if self.bindings.vertex_buffers.is_empty() {
            r.error(ErrorType::InvalidState, "no vertex buffer is bound");
        }
        for &id in &self.bindings.vertex_buffers {
            if let Some(buffer) = lookup(&registry.buffers, id, "vertex buffer", Some(r)) {
                validate_source_buffer(r, "vertex buffer", buffer);
            }
        }

        if let Some(pso) = pso {
            if let PipelineStateDescriptor::Graphics(desc) = &pso.desc {
                if desc.blend.blend_factor_dynamic
                    && desc.blend.uses_blend_factor()
                    && !self.bindings.blend_factor_set
                {
                    r.error(
                        ErrorType::InvalidState,
                        format!(
                            "pipeline state {} uses a dynamic blend factor, but set_blend_factor was not called",
                            pso.name()
                        ),
                    );
                }
                if desc.stencil.test_enabled
                    && desc.stencil.reference_dynamic
                    && !self.bindings.stencil_ref_set
                {
                    r.error(
                        ErrorType::InvalidState,
                        format!(
                            "pipeline state {} uses a dynamic stencil reference, but set_stencil_reference was not called",
                            pso.name()
                        ),
                    );
                }
            }
            self.validate_vertex_layout(r, registry, pso);
        }
        pso
    }

    /// Walks the vertex inputs of the shader in lock-step with the attributes
    /// of the bound vertex buffers.
    fn validate_vertex_layout(&self, r: &Reporter, registry: &ResourceRegistry, pso: &DebugPipelineState) {
        if !self.bindings.any_non_empty_vertex_buffer {
            return;
        }
        let mut expected = pso
            .vertex_layout
            .iter()
            .filter(|attrib| attrib.system_value == SystemValue::Undefined)
            .peekable();
        if expected.peek().is_none() {
            r.error(
                ErrorType::InvalidState,
                format!(
                    "vertex buffers with a vertex layout are bound, but pipeline state {} has no vertex shader inputs",
                    pso.name()
                ),
            );
            return;
        }
        'buffers: for id in &self.bindings.vertex_buffers {
            let Some(buffer) = registry.buffers.get(id) else {
                continue;
            };
            for attrib in &buffer.desc.vertex_attribs {
                let Some(shader_attrib) = expected.next() else {
                    break 'buffers;
                };
                if shader_attrib != attrib {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "vertex layout mismatch between shader attribute '{}' (format {:?}, location {}, stride {}) and attribute '{}' of vertex buffer {} (format {:?}, location {}, stride {})",
                            shader_attrib.name,
                            shader_attrib.format,
                            shader_attrib.location,
                            shader_attrib.stride,
                            attrib.name,
                            buffer.name(),
                            attrib.format,
                            attrib.location,
                            attrib.stride
                        ),
                    );
                }
            }
        }
        for missing in expected {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "vertex shader attribute '{}' is not provided by any bound vertex buffer",
                    missing.name
                ),
            );
        }
    }

    /// Returns the number of indices available in the bound index buffer.
    fn validate_index_binding(&self, r: &Reporter, registry: &ResourceRegistry) -> Option<u64> {
        let Some(id) = self.bindings.index_buffer else {
            r.error(ErrorType::InvalidState, "no index buffer is bound");
            return None;
        };
        let buffer = lookup(&registry.buffers, id, "index buffer", Some(r))?;
        validate_source_buffer(r, "index buffer", buffer);
        match self.bindings.index_format_size {
            0 => None,
            size => Some(buffer.size().saturating_sub(self.bindings.index_offset) / u64::from(size)),
        }
    }

    fn validate_instances(&self, r: &Reporter, instances: &Range<u32>) {
        let features = self.ctx.features();
        if instances.start > instances.end {
            r.error(
                ErrorType::InvalidArgument,
                format!("invalid instance range [{}, {})", instances.start, instances.end),
            );
            return;
        }
        if instances.is_empty() {
            r.warning(
                WarningType::PointlessOperation,
                "draw command with zero instances has no effect",
            );
            return;
        }
        if *instances != (0..1) && !features.has_instancing {
            r.error(ErrorType::UnsupportedFeature, "instancing not supported");
        }
        if instances.start != 0 && !features.has_offset_instancing {
            r.error(
                ErrorType::UnsupportedFeature,
                format!("offset instancing not supported (first instance is {})", instances.start),
            );
        }
    }

    fn validate_first_instance(&self, r: &Reporter, pso: &DebugPipelineState, instances: &Range<u32>) {
        if instances.start != 0 && pso.uses_instance_id {
            r.warning(
                WarningType::VaryingBehavior,
                format!(
                    "non-zero first instance ({}) in combination with instance ID system value results in varying behavior across backends",
                    instances.start
                ),
            );
        }
    }

    /// Checks the vertex and instance ranges against the element capacity of
    /// every bound vertex buffer with a known stride.
    fn validate_vertex_capacity(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        vertices: &Range<u32>,
        instances: &Range<u32>,
    ) {
        for id in &self.bindings.vertex_buffers {
            let Some(buffer) = registry.buffers.get(id) else {
                continue;
            };
            if buffer.elements == 0 {
                continue;
            }
            let (required, what) = match buffer.instance_divisor() {
                Some(divisor) => (
                    u64::from(instances.end).div_ceil(u64::from(divisor)),
                    "instance",
                ),
                None => (u64::from(vertices.end), "vertex"),
            };
            if required > buffer.elements {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "{what} range out of bounds: {required} element(s) required, but vertex buffer {} has {}",
                        buffer.name(),
                        buffer.elements
                    ),
                );
            }
        }
    }

    fn validate_indirect_buffer(
        &self,
        r: &Reporter,
        buffer: &DebugBuffer,
        offset: u64,
        num_commands: u32,
        stride: u32,
        argument_size: u64,
    ) {
        if !self.ctx.features().has_indirect_drawing {
            r.error(ErrorType::UnsupportedFeature, "indirect drawing not supported");
        }
        checks::required_bind_flags(
            r,
            "indirect argument buffer",
            &buffer.name(),
            buffer.desc.bind_flags,
            BindFlags::INDIRECT_BUFFER,
        );
        if offset % 4 != 0 {
            r.error(
                ErrorType::InvalidArgument,
                format!("indirect argument offset must be a multiple of 4, but is {offset}"),
            );
        }
        if stride % 4 != 0 {
            r.error(
                ErrorType::InvalidArgument,
                format!("indirect argument stride must be a multiple of 4, but is {stride}"),
            );
        }
        if num_commands == 0 {
            r.warning(WarningType::PointlessOperation, "indirect command with zero commands has no effect");
            return;
        }
        if num_commands > 1 && u64::from(stride) < argument_size {
            r.error(
                ErrorType::InvalidArgument,
                format!("indirect argument stride {stride} is smaller than the argument size {argument_size}"),
            );
        }
        let size = u64::from(num_commands - 1) * u64::from(stride) + argument_size;
        checks::buffer_range(r, buffer, offset, size);
        if !buffer.initialized {
            r.error(
                ErrorType::UndefinedBehavior,
                format!("indirect argument buffer {} is uninitialized", buffer.name()),
            );
        }
    }
}

/// Reports a source buffer that is uninitialized or mapped.
fn validate_source_buffer(r: &Reporter, what: &str, buffer: &DebugBuffer) {
    if !buffer.initialized {
        r.error(
            ErrorType::UndefinedBehavior,
            format!("uninitialized {what} {} is bound", buffer.name()),
        );
    }
    if buffer.mapped {
        r.error(
            ErrorType::InvalidState,
            format!("{what} {} is bound while it is mapped", buffer.name()),
        );
    }
}

/// Returns the length of a range, reporting a reversed one.
fn range_count(r: &Reporter, range: &Range<u32>, what: &str) -> u32 {
    if range.start > range.end {
        r.error(
            ErrorType::InvalidArgument,
            format!("invalid {what} range [{}, {})", range.start, range.end),
        );
        return 0;
    }
    range.end - range.start
}
