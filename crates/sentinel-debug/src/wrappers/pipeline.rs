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

use super::impl_debug_object;
use sentinel_core::renderer::{
    PipelineLayoutDescriptor, PipelineLayoutId, PipelineStateDescriptor, PipelineStateId,
    PrimitiveTopology, ShaderDescriptor, ShaderId, ShaderType, SystemValue, VertexAttribute,
};

/// Wrapper of a shader.
#[derive(Debug, Clone)]
pub struct DebugShader {
    /// Native ID.
    pub id: ShaderId,
    /// Creation descriptor.
    pub desc: ShaderDescriptor,
    /// Debug label.
    pub label: Option<String>,
}

impl DebugShader {
    /// Wraps a freshly created shader.
    pub fn new(id: ShaderId, desc: ShaderDescriptor) -> Self {
        let label = desc.label.clone();
        Self { id, desc, label }
    }

    /// The shader stage.
    pub fn shader_type(&self) -> ShaderType {
        self.desc.shader_type
    }
}

impl_debug_object!(DebugShader, ShaderId, ShaderDescriptor);

/// Wrapper of a pipeline layout.
#[derive(Debug, Clone)]
pub struct DebugPipelineLayout {
    /// Native ID.
    pub id: PipelineLayoutId,
    /// Creation descriptor.
    pub desc: PipelineLayoutDescriptor,
    /// Debug label.
    pub label: Option<String>,
}

impl DebugPipelineLayout {
    /// Wraps a freshly created pipeline layout.
    pub fn new(id: PipelineLayoutId, desc: PipelineLayoutDescriptor) -> Self {
        let label = desc.label.clone();
        Self { id, desc, label }
    }
}

impl_debug_object!(DebugPipelineLayout, PipelineLayoutId, PipelineLayoutDescriptor);

/// Wrapper of a graphics or compute pipeline state.
///
/// Besides the exact creation descriptor, the wrapper keeps what draw-time
/// validation needs from the attached shaders and layout, so that a draw never
/// has to resolve them again.
#[derive(Debug, Clone)]
pub struct DebugPipelineState {
    /// Native ID.
    pub id: PipelineStateId,
    /// Creation descriptor.
    pub desc: PipelineStateDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// Vertex inputs declared by the vertex shader.
    pub vertex_layout: Vec<VertexAttribute>,
    /// The vertex shader reads the vertex ID system value.
    pub uses_vertex_id: bool,
    /// The vertex shader reads the instance ID system value.
    pub uses_instance_id: bool,
    /// Snapshot of the pipeline layout, if one was attached.
    pub layout: Option<PipelineLayoutDescriptor>,
}

impl DebugPipelineState {
    /// Wraps a freshly created pipeline state.
    ///
    /// `vertex_shader` and `layout` are the wrappers resolved from the descriptor.
    pub fn new(
        id: PipelineStateId,
        desc: PipelineStateDescriptor,
        vertex_shader: Option<&DebugShader>,
        layout: Option<&DebugPipelineLayout>,
    ) -> Self {
        let vertex_layout = vertex_shader
            .map(|shader| shader.desc.vertex.input_attribs.clone())
            .unwrap_or_default();
        let uses = |value: SystemValue| vertex_layout.iter().any(|a| a.system_value == value);
        let uses_vertex_id = uses(SystemValue::VertexId);
        let uses_instance_id = uses(SystemValue::InstanceId);
        Self {
            id,
            label: desc.label().map(str::to_owned),
            desc,
            uses_vertex_id,
            uses_instance_id,
            vertex_layout,
            layout: layout.map(|layout| layout.desc.clone()),
        }
    }

    /// Returns `true` for graphics pipelines.
    pub fn is_graphics(&self) -> bool {
        self.desc.is_graphics()
    }

    /// The primitive topology of a graphics pipeline.
    pub fn primitive_topology(&self) -> Option<PrimitiveTopology> {
        match &self.desc {
            PipelineStateDescriptor::Graphics(desc) => Some(desc.primitive_topology),
            PipelineStateDescriptor::Compute(_) => None,
        }
    }

    /// Number of uniforms declared by the layout.
    pub fn num_uniforms(&self) -> usize {
        self.layout.as_ref().map_or(0, |layout| layout.uniforms.len())
    }
}

impl_debug_object!(DebugPipelineState, PipelineStateId, PipelineStateDescriptor);

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::renderer::{
        ComputePipelineDescriptor, Format, GraphicsPipelineDescriptor, UniformDescriptor,
    };

    #[test]
    fn system_values_are_detected_from_vertex_inputs() {
        let mut shader_desc = ShaderDescriptor {
            shader_type: ShaderType::Vertex,
            ..Default::default()
        };
        shader_desc.vertex.input_attribs = vec![
            VertexAttribute::new("position", Format::RGB32Float, 0, 12),
            VertexAttribute::default().with_system_value(SystemValue::InstanceId),
        ];
        let shader = DebugShader::new(ShaderId(1), shader_desc);
        let pso = DebugPipelineState::new(
            PipelineStateId(2),
            GraphicsPipelineDescriptor::default().into(),
            Some(&shader),
            None,
        );

        assert!(pso.is_graphics());
        assert!(pso.uses_instance_id);
        assert!(!pso.uses_vertex_id);
        assert_eq!(pso.vertex_layout.len(), 2);
        assert_eq!(pso.primitive_topology(), Some(PrimitiveTopology::TriangleList));
    }

    #[test]
    fn uniform_count_comes_from_layout_snapshot() {
        let layout = DebugPipelineLayout::new(
            PipelineLayoutId(3),
            PipelineLayoutDescriptor {
                uniforms: vec![UniformDescriptor {
                    name: "time".into(),
                    size: 4,
                }],
                ..Default::default()
            },
        );
        let pso = DebugPipelineState::new(
            PipelineStateId(4),
            ComputePipelineDescriptor::default().into(),
            None,
            Some(&layout),
        );
        assert!(!pso.is_graphics());
        assert_eq!(pso.num_uniforms(), 1);
        assert_eq!(pso.primitive_topology(), None);
    }
}
