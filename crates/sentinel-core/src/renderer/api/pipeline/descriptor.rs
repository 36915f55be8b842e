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

//! Pipeline state descriptors.

use super::enums::PrimitiveTopology;
use super::layout::PipelineLayoutId;
use super::shader::ShaderId;
use super::state::{BlendDescriptor, DepthDescriptor, RasterizerDescriptor, StencilDescriptor};
use crate::renderer::api::command::{Scissor, Viewport};

/// An opaque handle to a graphics or compute pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineStateId(pub usize);

/// Describes a graphics pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphicsPipelineDescriptor {
    /// An optional debug label for the pipeline.
    pub label: Option<String>,
    /// The layout of resources the shaders access.
    pub pipeline_layout: Option<PipelineLayoutId>,
    /// Vertex shader. Required.
    pub vertex_shader: Option<ShaderId>,
    /// Tessellation-control shader.
    pub tess_control_shader: Option<ShaderId>,
    /// Tessellation-evaluation shader.
    pub tess_evaluation_shader: Option<ShaderId>,
    /// Geometry shader.
    pub geometry_shader: Option<ShaderId>,
    /// Fragment shader. Without it, no color output may be written.
    pub fragment_shader: Option<ShaderId>,
    /// Primitive topology.
    pub primitive_topology: PrimitiveTopology,
    /// Static viewports. Empty when viewports are set dynamically.
    pub viewports: Vec<Viewport>,
    /// Static scissors. Empty when scissors are set dynamically.
    pub scissors: Vec<Scissor>,
    /// Depth state.
    pub depth: DepthDescriptor,
    /// Stencil state.
    pub stencil: StencilDescriptor,
    /// Rasterizer state.
    pub rasterizer: RasterizerDescriptor,
    /// Blend state.
    pub blend: BlendDescriptor,
}

/// Describes a compute pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputePipelineDescriptor {
    /// An optional debug label for the pipeline.
    pub label: Option<String>,
    /// The layout of resources the shader accesses.
    pub pipeline_layout: Option<PipelineLayoutId>,
    /// Compute shader. Required.
    pub compute_shader: Option<ShaderId>,
}

/// A descriptor used to create a [`PipelineStateId`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStateDescriptor {
    /// A graphics pipeline.
    Graphics(GraphicsPipelineDescriptor),
    /// A compute pipeline.
    Compute(ComputePipelineDescriptor),
}

impl PipelineStateDescriptor {
    /// Returns the debug label of either variant.
    pub fn label(&self) -> Option<&str> {
        match self {
            PipelineStateDescriptor::Graphics(desc) => desc.label.as_deref(),
            PipelineStateDescriptor::Compute(desc) => desc.label.as_deref(),
        }
    }

    /// Returns the pipeline layout of either variant.
    pub fn pipeline_layout(&self) -> Option<PipelineLayoutId> {
        match self {
            PipelineStateDescriptor::Graphics(desc) => desc.pipeline_layout,
            PipelineStateDescriptor::Compute(desc) => desc.pipeline_layout,
        }
    }

    /// Returns `true` for graphics pipelines.
    pub fn is_graphics(&self) -> bool {
        matches!(self, PipelineStateDescriptor::Graphics(_))
    }
}

impl From<GraphicsPipelineDescriptor> for PipelineStateDescriptor {
    fn from(desc: GraphicsPipelineDescriptor) -> Self {
        PipelineStateDescriptor::Graphics(desc)
    }
}

impl From<ComputePipelineDescriptor> for PipelineStateDescriptor {
    fn from(desc: ComputePipelineDescriptor) -> Self {
        PipelineStateDescriptor::Compute(desc)
    }
}
