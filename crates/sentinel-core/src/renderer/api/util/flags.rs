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

//! Flag sets shared by buffers, textures and pipeline bindings.

use bitflags::bitflags;

bitflags! {
    /// A set of flags describing the allowed usages of a buffer or texture.
    ///
    /// These flags are crucial for validation: a resource can only be bound or
    /// copied in the ways it was declared to support at creation time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        /// The buffer can be bound as a vertex buffer.
        const VERTEX_BUFFER = 1 << 0;
        /// The buffer can be bound as an index buffer.
        const INDEX_BUFFER = 1 << 1;
        /// The buffer can be bound as a constant (uniform) buffer.
        const CONSTANT_BUFFER = 1 << 2;
        /// The buffer can be bound as a stream-output target.
        const STREAM_OUTPUT_BUFFER = 1 << 3;
        /// The buffer can be used as the argument source of indirect commands.
        const INDIRECT_BUFFER = 1 << 4;
        /// The resource can be bound for read-only access in a shader.
        const SAMPLED = 1 << 5;
        /// The resource can be bound for read/write access in a shader.
        const STORAGE = 1 << 6;
        /// The texture can be used as a color attachment of a render target.
        const COLOR_ATTACHMENT = 1 << 7;
        /// The texture can be used as the depth-stencil attachment of a render target.
        const DEPTH_STENCIL_ATTACHMENT = 1 << 8;
        /// The texture can be bound as a combined texture-sampler.
        const COMBINED_SAMPLER = 1 << 9;
        /// The resource can be the source of a copy operation.
        const COPY_SRC = 1 << 10;
        /// The resource can be the destination of a copy operation.
        const COPY_DST = 1 << 11;
    }
}

impl BindFlags {
    /// Flags that only make sense for buffers.
    pub const BUFFER_ONLY: Self = Self::VERTEX_BUFFER
        .union(Self::INDEX_BUFFER)
        .union(Self::CONSTANT_BUFFER)
        .union(Self::STREAM_OUTPUT_BUFFER)
        .union(Self::INDIRECT_BUFFER);

    /// Flags that only make sense for textures.
    pub const TEXTURE_ONLY: Self = Self::COLOR_ATTACHMENT
        .union(Self::DEPTH_STENCIL_ATTACHMENT)
        .union(Self::COMBINED_SAMPLER);

    /// Both attachment flags; a resource may carry at most one of them.
    pub const ATTACHMENTS: Self = Self::COLOR_ATTACHMENT.union(Self::DEPTH_STENCIL_ATTACHMENT);
}

impl Default for BindFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// CPU access rights requested for a resource at creation time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlags: u32 {
        /// The CPU may read the resource through a mapping.
        const READ = 1 << 0;
        /// The CPU may write the resource through a mapping.
        const WRITE = 1 << 1;
    }
}

impl CpuAccessFlags {
    /// Both read and write access.
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

impl Default for CpuAccessFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Miscellaneous creation hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MiscFlags: u32 {
        /// The resource is updated frequently from the CPU.
        const DYNAMIC_USAGE = 1 << 0;
        /// Multisample textures use fixed sample locations.
        const FIXED_SAMPLES = 1 << 1;
        /// The full MIP chain is generated from the initial image.
        const GENERATE_MIPS = 1 << 2;
        /// The resource content is left undefined when no initial data is supplied.
        const NO_INITIAL_DATA = 1 << 3;
        /// The storage buffer is an append/consume buffer.
        const APPEND = 1 << 4;
        /// The storage buffer carries a hidden counter.
        const COUNTER = 1 << 5;
    }
}

impl MiscFlags {
    /// Misc flags that are valid for buffers.
    pub const BUFFER_FLAGS: Self = Self::DYNAMIC_USAGE
        .union(Self::NO_INITIAL_DATA)
        .union(Self::APPEND)
        .union(Self::COUNTER);

    /// Misc flags that are valid for textures.
    pub const TEXTURE_FLAGS: Self = Self::DYNAMIC_USAGE
        .union(Self::FIXED_SAMPLES)
        .union(Self::GENERATE_MIPS)
        .union(Self::NO_INITIAL_DATA);
}

impl Default for MiscFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Shader stages a binding is visible to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageFlags: u32 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Tessellation-control shader stage.
        const TESS_CONTROL = 1 << 1;
        /// Tessellation-evaluation shader stage.
        const TESS_EVALUATION = 1 << 2;
        /// Geometry shader stage.
        const GEOMETRY = 1 << 3;
        /// Fragment shader stage.
        const FRAGMENT = 1 << 4;
        /// Compute shader stage.
        const COMPUTE = 1 << 5;
    }
}

impl StageFlags {
    /// All graphics stages.
    pub const ALL_GRAPHICS: Self = Self::VERTEX
        .union(Self::TESS_CONTROL)
        .union(Self::TESS_EVALUATION)
        .union(Self::GEOMETRY)
        .union(Self::FRAGMENT);
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::empty()
    }
}
