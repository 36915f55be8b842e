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

//! Defines data structures related to GPU buffer resources.

use crate::renderer::api::pipeline::VertexAttribute;
use crate::renderer::api::util::{BindFlags, CpuAccessFlags, Format, MiscFlags};
use std::ptr::NonNull;

/// An opaque handle to a GPU buffer resource.
///
/// This ID is returned by [`RenderDevice::create_buffer`](crate::RenderDevice::create_buffer)
/// and is used to reference the buffer in all subsequent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// A descriptor used to create a [`BufferId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferDescriptor {
    /// An optional debug label for the buffer.
    pub label: Option<String>,
    /// The total size of the buffer in bytes.
    pub size: u64,
    /// The size of one element in bytes for structured buffers, or zero.
    pub stride: u32,
    /// The element format for typed and index buffers, or `Format::Undefined`.
    pub format: Format,
    /// A bitmask of [`BindFlags`] describing how the buffer will be bound.
    pub bind_flags: BindFlags,
    /// CPU access rights for mapping.
    pub cpu_access_flags: CpuAccessFlags,
    /// Miscellaneous creation hints.
    pub misc_flags: MiscFlags,
    /// Vertex attributes stored in this buffer when it is a vertex buffer.
    pub vertex_attribs: Vec<VertexAttribute>,
}

impl BufferDescriptor {
    /// Returns the size of one element in bytes.
    ///
    /// The explicit stride wins, then the stride of the first vertex attribute,
    /// then the size of the element format. Zero if none of them is set.
    pub fn element_stride(&self) -> u32 {
        if self.stride > 0 {
            self.stride
        } else if let Some(attrib) = self.vertex_attribs.first() {
            attrib.stride
        } else {
            self.format.bytes_per_element()
        }
    }

    /// Returns the number of whole elements that fit into the buffer.
    pub fn element_count(&self) -> u64 {
        match self.element_stride() {
            0 => 0,
            stride => self.size / u64::from(stride),
        }
    }
}

/// The access mode requested when mapping a buffer into CPU memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuAccess {
    /// The mapping is only read.
    ReadOnly,
    /// The mapping is only written.
    WriteOnly,
    /// The mapping is only written and the previous content is discarded.
    WriteDiscard,
    /// The mapping is read and written.
    ReadWrite,
}

impl CpuAccess {
    /// Returns the creation-time [`CpuAccessFlags`] this access mode requires.
    pub fn required_flags(&self) -> CpuAccessFlags {
        match self {
            CpuAccess::ReadOnly => CpuAccessFlags::READ,
            CpuAccess::WriteOnly | CpuAccess::WriteDiscard => CpuAccessFlags::WRITE,
            CpuAccess::ReadWrite => CpuAccessFlags::READ_WRITE,
        }
    }
}

/// A region of buffer memory mapped into the CPU address space.
///
/// The pointer stays valid until the buffer is unmapped or released.
#[derive(Debug)]
pub struct BufferMapping {
    /// Start of the mapped range.
    pub ptr: NonNull<u8>,
    /// Length of the mapped range in bytes.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_stride_prefers_explicit_stride() {
        let desc = BufferDescriptor {
            size: 64,
            stride: 16,
            format: Format::R32UInt,
            ..Default::default()
        };
        assert_eq!(desc.element_stride(), 16);
        assert_eq!(desc.element_count(), 4);
    }

    #[test]
    fn element_stride_falls_back_to_vertex_attribs_then_format() {
        let desc = BufferDescriptor {
            size: 48,
            vertex_attribs: vec![VertexAttribute::new("position", Format::RGB32Float, 0, 12)],
            ..Default::default()
        };
        assert_eq!(desc.element_count(), 4);

        let index = BufferDescriptor {
            size: 10,
            format: Format::R16UInt,
            ..Default::default()
        };
        assert_eq!(index.element_count(), 5);
    }

    #[test]
    fn untyped_buffers_have_no_elements() {
        let desc = BufferDescriptor {
            size: 256,
            ..Default::default()
        };
        assert_eq!(desc.element_count(), 0);
    }

    #[test]
    fn cpu_access_required_flags() {
        assert_eq!(CpuAccess::ReadOnly.required_flags(), CpuAccessFlags::READ);
        assert_eq!(
            CpuAccess::WriteDiscard.required_flags(),
            CpuAccessFlags::WRITE
        );
        assert_eq!(
            CpuAccess::ReadWrite.required_flags(),
            CpuAccessFlags::READ_WRITE
        );
    }
}
