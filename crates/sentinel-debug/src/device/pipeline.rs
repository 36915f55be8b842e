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

use super::DebugRenderDevice;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{
    DebugObject, DebugPipelineLayout, DebugPipelineState, DebugShader, ResourceRegistry,
};
use sentinel_core::renderer::{
    BindFlags, BindingDescriptor, ColorMask, ComputePipelineDescriptor,
    GraphicsPipelineDescriptor, LogicOp, PipelineLayoutDescriptor, PipelineLayoutId,
    PipelineStateDescriptor, PipelineStateId, PrimitiveTopology, ResourceError, ResourceType,
    ShaderDescriptor, ShaderId, ShaderSource, ShaderType,
};
use sentinel_core::{ErrorType, WarningType};
use std::collections::HashSet;

impl DebugRenderDevice {
    // --- Shaders ---

    /// Validates and creates a shader.
    pub fn create_shader(&self, desc: &ShaderDescriptor) -> Result<ShaderId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_shader") {
            self.validate_shader_desc(&r, desc);
        }
        let id = self.ctx.native().create_shader(desc)?;
        log::debug!(
            "DebugRenderDevice: Created {} shader with ID: {id:?}",
            desc.shader_type
        );
        self.ctx
            .registry
            .lock()
            .shaders
            .insert(id, DebugShader::new(id, desc.clone()));
        Ok(id)
    }

    /// Releases a shader.
    pub fn release_shader(&self, id: ShaderId) -> Result<(), ResourceError> {
        self.release_object(
            "release_shader",
            "shader",
            id,
            |registry| registry.shaders.remove(&id).is_some(),
            |native| native.release_shader(id),
        )
    }

    fn validate_shader_desc(&self, r: &Reporter, desc: &ShaderDescriptor) {
        let features = self.ctx.features();
        match desc.shader_type {
            ShaderType::Undefined => {
                r.error(ErrorType::InvalidArgument, "undefined shader type");
            }
            ShaderType::TessControl | ShaderType::TessEvaluation if !features.has_tessellation_shaders => {
                r.error(ErrorType::UnsupportedFeature, "tessellation shaders not supported");
            }
            ShaderType::Geometry if !features.has_geometry_shaders => {
                r.error(ErrorType::UnsupportedFeature, "geometry shaders not supported");
            }
            ShaderType::Compute => {
                if !features.has_compute_shaders {
                    r.error(ErrorType::UnsupportedFeature, "compute shaders not supported");
                }
                let limit = self.ctx.limits().max_compute_shader_work_group_size;
                let size = desc.compute.work_group_size;
                for (axis, (&n, &max)) in ["X", "Y", "Z"].iter().zip(size.iter().zip(limit.iter())) {
                    if n > max {
                        r.error(
                            ErrorType::InvalidArgument,
                            format!("compute shader work group size exceeds limit on {axis} axis ({n} specified, but limit is {max})"),
                        );
                    }
                }
            }
            _ => {}
        }
        let empty = match &desc.source {
            ShaderSource::Code(code) => code.trim().is_empty(),
            ShaderSource::Binary(bytes) => bytes.is_empty(),
        };
        if empty {
            r.error(ErrorType::InvalidArgument, "shader source must not be empty");
        }
        if desc.shader_type != ShaderType::Vertex && !desc.vertex.input_attribs.is_empty() {
            r.warning(
                WarningType::PointlessOperation,
                format!("vertex input attributes are ignored for {} shader", desc.shader_type),
            );
        }
    }

    // --- Pipeline layouts ---

    /// Validates and creates a pipeline layout.
    pub fn create_pipeline_layout(
        &self,
        desc: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_pipeline_layout") {
            validate_bindings(&r, "heap binding", &desc.heap_bindings);
            validate_bindings(&r, "binding", &desc.bindings);
            for uniform in desc.uniforms.iter().filter(|u| u.size == 0) {
                r.warning(
                    WarningType::ImproperArgument,
                    format!("uniform '{}' has zero size", uniform.name),
                );
            }
        }
        let id = self.ctx.native().create_pipeline_layout(desc)?;
        log::debug!("DebugRenderDevice: Created pipeline layout with ID: {id:?}");
        self.ctx
            .registry
            .lock()
            .pipeline_layouts
            .insert(id, DebugPipelineLayout::new(id, desc.clone()));
        Ok(id)
    }

    /// Releases a pipeline layout.
    pub fn release_pipeline_layout(&self, id: PipelineLayoutId) -> Result<(), ResourceError> {
        self.release_object(
            "release_pipeline_layout",
            "pipeline layout",
            id,
            |registry| registry.pipeline_layouts.remove(&id).is_some(),
            |native| native.release_pipeline_layout(id),
        )
    }

    // --- Pipeline states ---

    /// Validates and creates a graphics or compute pipeline state.
    pub fn create_pipeline_state(
        &self,
        desc: &PipelineStateDescriptor,
    ) -> Result<PipelineStateId, ResourceError> {
        let (vertex_shader, layout) = {
            let reporter = self.ctx.reporter("create_pipeline_state");
            let registry = self.ctx.registry.lock();
            if !referenced_objects_known(reporter.as_ref(), &registry, desc) {
                return Err(ResourceError::InvalidHandle);
            }
            if let Some(r) = &reporter {
                match desc {
                    PipelineStateDescriptor::Graphics(graphics) => {
                        self.validate_graphics_pipeline(r, &registry, graphics)
                    }
                    PipelineStateDescriptor::Compute(compute) => {
                        self.validate_compute_pipeline(r, &registry, compute)
                    }
                }
            }
            let vertex_shader = match desc {
                PipelineStateDescriptor::Graphics(graphics) => graphics
                    .vertex_shader
                    .and_then(|id| registry.shaders.get(&id))
                    .cloned(),
                PipelineStateDescriptor::Compute(_) => None,
            };
            let layout = desc
                .pipeline_layout()
                .and_then(|id| registry.pipeline_layouts.get(&id))
                .cloned();
            (vertex_shader, layout)
        };

        let id = self.ctx.native().create_pipeline_state(desc)?;
        log::debug!(
            "DebugRenderDevice: Created {} pipeline state with ID: {id:?}",
            if desc.is_graphics() { "graphics" } else { "compute" }
        );
        self.ctx.registry.lock().pipeline_states.insert(
            id,
            DebugPipelineState::new(id, desc.clone(), vertex_shader.as_ref(), layout.as_ref()),
        );
        Ok(id)
    }

    /// Releases a pipeline state.
    pub fn release_pipeline_state(&self, id: PipelineStateId) -> Result<(), ResourceError> {
        self.release_object(
            "release_pipeline_state",
            "pipeline state",
            id,
            |registry| registry.pipeline_states.remove(&id).is_some(),
            |native| native.release_pipeline_state(id),
        )
    }

    fn validate_graphics_pipeline(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        desc: &GraphicsPipelineDescriptor,
    ) {
        let features = self.ctx.features();
        let caps = self.ctx.capabilities();

        if desc.vertex_shader.is_none() {
            r.error(
                ErrorType::InvalidArgument,
                "graphics pipeline requires a vertex shader",
            );
        }
        let stages = [
            (desc.vertex_shader, ShaderType::Vertex),
            (desc.tess_control_shader, ShaderType::TessControl),
            (desc.tess_evaluation_shader, ShaderType::TessEvaluation),
            (desc.geometry_shader, ShaderType::Geometry),
            (desc.fragment_shader, ShaderType::Fragment),
        ];
        for (id, expected) in stages {
            let Some(shader) = id.and_then(|id| registry.shaders.get(&id)) else {
                continue;
            };
            if shader.shader_type() != expected {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "shader {} of type {} cannot be attached as {expected} shader",
                        shader.name(),
                        shader.shader_type()
                    ),
                );
            }
        }

        let has_tessellation = desc.tess_control_shader.is_some() || desc.tess_evaluation_shader.is_some();
        if desc.tess_control_shader.is_some() != desc.tess_evaluation_shader.is_some() {
            r.error(
                ErrorType::InvalidArgument,
                "tessellation control and evaluation shaders must be attached together",
            );
        }
        if has_tessellation && !features.has_tessellation_shaders {
            r.error(ErrorType::UnsupportedFeature, "tessellation shaders not supported");
        }
        if desc.geometry_shader.is_some() && !features.has_geometry_shaders {
            r.error(ErrorType::UnsupportedFeature, "geometry shaders not supported");
        }

        checks::primitive_topology(r, caps, self.ctx.backend(), desc.primitive_topology);
        let is_patches = matches!(desc.primitive_topology, PrimitiveTopology::Patches(_));
        if has_tessellation && !is_patches {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "tessellation shaders require patch primitive topology, but {} was specified",
                    desc.primitive_topology
                ),
            );
        } else if is_patches && !has_tessellation {
            r.error(
                ErrorType::InvalidArgument,
                "patch primitive topology requires tessellation shaders",
            );
        }

        if !desc.viewports.is_empty() {
            checks::viewports(r, caps, &desc.viewports);
        }
        if !desc.scissors.is_empty() {
            checks::scissors(r, caps, &desc.scissors);
        }

        if desc.rasterizer.conservative_rasterization && !features.has_conservative_rasterization {
            r.error(ErrorType::UnsupportedFeature, "conservative rasterization not supported");
        }
        let [min_width, max_width] = caps.limits.line_width_range;
        let line_width = desc.rasterizer.line_width;
        if line_width < min_width || line_width > max_width {
            r.warning(
                WarningType::ImproperArgument,
                format!("line width {line_width} out of range [{min_width}, {max_width}]"),
            );
        }

        let blend = &desc.blend;
        if blend.logic_op != LogicOp::Disabled {
            if !features.has_logic_op {
                r.error(ErrorType::UnsupportedFeature, "logic fragment operations not supported");
            }
            if blend.independent_blend_enabled {
                r.error(
                    ErrorType::InvalidArgument,
                    "logic fragment operations cannot be used in combination with independent blending",
                );
            }
            if blend.active_targets().iter().any(|target| target.blend_enabled) {
                r.error(
                    ErrorType::InvalidArgument,
                    "logic fragment operations cannot be used in combination with color and alpha blending",
                );
            }
        }

        if desc.fragment_shader.is_none() {
            for (i, target) in blend.active_targets().iter().enumerate() {
                if target.color_mask != ColorMask::empty() {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "color write mask of blend target [{i}] must be disabled when no fragment shader is attached (mask is {:?})",
                            target.color_mask
                        ),
                    );
                }
            }
        }
    }

    fn validate_compute_pipeline(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        desc: &ComputePipelineDescriptor,
    ) {
        if !self.ctx.features().has_compute_shaders {
            r.error(ErrorType::UnsupportedFeature, "compute shaders not supported");
        }
        match desc.compute_shader.and_then(|id| registry.shaders.get(&id)) {
            None => r.error(
                ErrorType::InvalidArgument,
                "compute pipeline requires a compute shader",
            ),
            Some(shader) if shader.shader_type() != ShaderType::Compute => r.error(
                ErrorType::InvalidArgument,
                format!(
                    "shader {} of type {} cannot be attached as compute shader",
                    shader.name(),
                    shader.shader_type()
                ),
            ),
            Some(_) => {}
        }
    }
}

/// Reports shaders and layouts referenced by a pipeline descriptor that are not live.
fn referenced_objects_known(
    reporter: Option<&Reporter>,
    registry: &ResourceRegistry,
    desc: &PipelineStateDescriptor,
) -> bool {
    let shaders: Vec<ShaderId> = match desc {
        PipelineStateDescriptor::Graphics(g) => [
            g.vertex_shader,
            g.tess_control_shader,
            g.tess_evaluation_shader,
            g.geometry_shader,
            g.fragment_shader,
        ]
        .into_iter()
        .flatten()
        .collect(),
        PipelineStateDescriptor::Compute(c) => c.compute_shader.into_iter().collect(),
    };
    let mut known = true;
    for id in shaders {
        if !registry.shaders.contains_key(&id) {
            if let Some(r) = reporter {
                r.null_handle("shader", id);
            }
            known = false;
        }
    }
    if let Some(id) = desc.pipeline_layout() {
        if !registry.pipeline_layouts.contains_key(&id) {
            if let Some(r) = reporter {
                r.null_handle("pipeline layout", id);
            }
            known = false;
        }
    }
    known
}

fn validate_bindings(r: &Reporter, what: &str, bindings: &[BindingDescriptor]) {
    let mut slots = HashSet::new();
    for binding in bindings {
        let name = &binding.name;
        match binding.resource_type {
            ResourceType::Undefined => r.error(
                ErrorType::InvalidArgument,
                format!("{what} '{name}' has undefined resource type"),
            ),
            ResourceType::Sampler if !binding.bind_flags.is_empty() => r.error(
                ErrorType::InvalidArgument,
                format!(
                    "sampler {what} '{name}' must not have bind flags, but {:?} specified",
                    binding.bind_flags
                ),
            ),
            ResourceType::Buffer if binding.bind_flags.intersects(BindFlags::TEXTURE_ONLY) => r.error(
                ErrorType::InvalidArgument,
                format!("buffer {what} '{name}' has texture-only bind flags"),
            ),
            ResourceType::Texture if binding.bind_flags.intersects(BindFlags::BUFFER_ONLY) => r.error(
                ErrorType::InvalidArgument,
                format!("texture {what} '{name}' has buffer-only bind flags"),
            ),
            _ => {}
        }
        if binding.stage_flags.is_empty() {
            r.warning(
                WarningType::PointlessOperation,
                format!("{what} '{name}' is not visible to any shader stage"),
            );
        }
        if !slots.insert(binding.slot) {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "duplicate {what} slot (index {}, set {}) used by '{name}'",
                    binding.slot.index, binding.slot.set
                ),
            );
        }
    }
}
