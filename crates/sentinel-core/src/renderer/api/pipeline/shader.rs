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

//! Shader descriptors and reflection data consumed by validation.

use super::vertex::VertexAttribute;
use crate::renderer::api::util::StageFlags;

/// An opaque handle to a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub usize);

/// The pipeline stage a shader runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderType {
    /// Unknown stage.
    #[default]
    Undefined,
    /// Vertex shader.
    Vertex,
    /// Tessellation-control (hull) shader.
    TessControl,
    /// Tessellation-evaluation (domain) shader.
    TessEvaluation,
    /// Geometry shader.
    Geometry,
    /// Fragment (pixel) shader.
    Fragment,
    /// Compute shader.
    Compute,
}

impl ShaderType {
    /// Returns the stage flag matching this shader type.
    pub fn stage_flags(&self) -> StageFlags {
        match self {
            ShaderType::Undefined => StageFlags::empty(),
            ShaderType::Vertex => StageFlags::VERTEX,
            ShaderType::TessControl => StageFlags::TESS_CONTROL,
            ShaderType::TessEvaluation => StageFlags::TESS_EVALUATION,
            ShaderType::Geometry => StageFlags::GEOMETRY,
            ShaderType::Fragment => StageFlags::FRAGMENT,
            ShaderType::Compute => StageFlags::COMPUTE,
        }
    }
}

impl std::fmt::Display for ShaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShaderType::Undefined => "undefined",
            ShaderType::Vertex => "vertex",
            ShaderType::TessControl => "tessellation-control",
            ShaderType::TessEvaluation => "tessellation-evaluation",
            ShaderType::Geometry => "geometry",
            ShaderType::Fragment => "fragment",
            ShaderType::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// The source of a shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// High-level or assembly source code.
    Code(String),
    /// A pre-compiled binary blob.
    Binary(Vec<u8>),
}

impl Default for ShaderSource {
    fn default() -> Self {
        ShaderSource::Code(String::new())
    }
}

/// Vertex inputs and outputs declared by a vertex shader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexShaderAttributes {
    /// Vertex attributes read from vertex buffers.
    pub input_attribs: Vec<VertexAttribute>,
    /// Vertex attributes written, e.g. for stream-output.
    pub output_attribs: Vec<VertexAttribute>,
}

/// Properties declared by a compute shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputeShaderAttributes {
    /// Number of threads per work group, per axis.
    pub work_group_size: [u32; 3],
}

/// A descriptor used to create a [`ShaderId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderDescriptor {
    /// An optional debug label for the shader.
    pub label: Option<String>,
    /// Shader stage.
    pub shader_type: ShaderType,
    /// Shader source.
    pub source: ShaderSource,
    /// Entry point name.
    pub entry_point: String,
    /// Vertex input layout, for vertex shaders.
    pub vertex: VertexShaderAttributes,
    /// Work-group size, for compute shaders.
    pub compute: ComputeShaderAttributes,
}
