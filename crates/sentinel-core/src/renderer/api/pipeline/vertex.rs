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

//! Vertex attributes shared by vertex buffers and vertex shaders.
//!
//! The same attribute type describes both sides of the vertex input: the layout
//! stored in a vertex buffer and the inputs declared by a vertex shader. Two
//! layouts match when their attributes compare equal element by element.

use crate::renderer::api::util::Format;

/// A system-generated shader value an attribute may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SystemValue {
    /// A regular, buffer-sourced attribute.
    #[default]
    Undefined,
    /// The index of the current vertex. Affected by the first vertex of a draw.
    VertexId,
    /// The index of the current instance. Affected by the first instance of a draw.
    InstanceId,
    /// The clip-space position output.
    Position,
    /// The index of the current primitive.
    PrimitiveId,
    /// The viewport array index.
    ViewportIndex,
    /// The render-target array index.
    RenderTargetIndex,
    /// A fragment color output.
    Color,
    /// The fragment depth output.
    Depth,
}

/// A single vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexAttribute {
    /// Semantic name of the attribute, e.g. `"position"`.
    pub name: String,
    /// Data format of the attribute.
    pub format: Format,
    /// Shader input location.
    pub location: u32,
    /// Semantic index for repeated names (`TEXCOORD0`, `TEXCOORD1`, ...).
    pub semantic_index: u32,
    /// System value this attribute is bound to, if any.
    pub system_value: SystemValue,
    /// Vertex buffer slot the attribute is read from.
    pub slot: u32,
    /// Byte offset of the attribute inside one vertex.
    pub offset: u32,
    /// Byte distance between two consecutive vertices.
    pub stride: u32,
    /// Instance divisor. Zero for per-vertex data.
    pub instance_divisor: u32,
}

impl VertexAttribute {
    /// Creates a per-vertex attribute at offset zero of slot zero.
    pub fn new(name: impl Into<String>, format: Format, location: u32, stride: u32) -> Self {
        Self {
            name: name.into(),
            format,
            location,
            stride,
            ..Default::default()
        }
    }

    /// Sets the byte offset inside one vertex.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the vertex buffer slot.
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the instance divisor, turning the attribute into per-instance data.
    pub fn with_instance_divisor(mut self, divisor: u32) -> Self {
        self.instance_divisor = divisor;
        self
    }

    /// Binds the attribute to a system value.
    pub fn with_system_value(mut self, system_value: SystemValue) -> Self {
        self.system_value = system_value;
        self
    }

    /// Returns the size in bytes of the attribute data.
    pub fn size(&self) -> u32 {
        self.format.bytes_per_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_set_fields() {
        let attrib = VertexAttribute::new("normal", Format::RGB32Float, 1, 24)
            .with_offset(12)
            .with_slot(2)
            .with_instance_divisor(1);
        assert_eq!(attrib.offset, 12);
        assert_eq!(attrib.slot, 2);
        assert_eq!(attrib.instance_divisor, 1);
        assert_eq!(attrib.size(), 12);
    }

    #[test]
    fn attributes_with_different_offsets_do_not_match() {
        let a = VertexAttribute::new("uv", Format::RG32Float, 2, 20).with_offset(12);
        let b = VertexAttribute::new("uv", Format::RG32Float, 2, 20).with_offset(8);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
