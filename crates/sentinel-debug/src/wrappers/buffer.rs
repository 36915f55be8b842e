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
use sentinel_core::renderer::{BufferDescriptor, BufferId};

/// Wrapper of a buffer.
#[derive(Debug, Clone)]
pub struct DebugBuffer {
    /// Native ID.
    pub id: BufferId,
    /// Creation descriptor.
    pub desc: BufferDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// Number of elements, derived from the size and the element stride.
    pub elements: u64,
    /// Set once the buffer holds defined data.
    pub initialized: bool,
    /// Set while the buffer is mapped into CPU memory.
    pub mapped: bool,
}

impl DebugBuffer {
    /// Wraps a freshly created buffer.
    pub fn new(id: BufferId, desc: BufferDescriptor, initialized: bool) -> Self {
        Self {
            id,
            label: desc.label.clone(),
            elements: desc.element_count(),
            initialized,
            mapped: false,
            desc,
        }
    }

    /// The buffer size in bytes.
    pub fn size(&self) -> u64 {
        self.desc.size
    }

    /// The instance divisor of a buffer whose vertex attributes are fetched per
    /// instance, or `None` for per-vertex data.
    pub fn instance_divisor(&self) -> Option<u32> {
        self.desc
            .vertex_attribs
            .first()
            .map(|attrib| attrib.instance_divisor)
            .filter(|&divisor| divisor > 0)
    }
}

impl_debug_object!(DebugBuffer, BufferId, BufferDescriptor);

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::renderer::{BindFlags, Format, VertexAttribute};

    #[test]
    fn element_count_follows_vertex_stride() {
        let desc = BufferDescriptor {
            size: 48,
            bind_flags: BindFlags::VERTEX_BUFFER,
            vertex_attribs: vec![VertexAttribute::new("position", Format::RGB32Float, 0, 12)],
            ..Default::default()
        };
        let buffer = DebugBuffer::new(BufferId(0), desc, true);
        assert_eq!(buffer.elements, 4);
        assert_eq!(buffer.instance_divisor(), None);
        assert!(!buffer.mapped);
    }

    #[test]
    fn per_instance_attributes_report_their_divisor() {
        let mut attrib = VertexAttribute::new("offset", Format::RGBA32Float, 0, 16);
        attrib.instance_divisor = 2;
        let desc = BufferDescriptor {
            size: 64,
            bind_flags: BindFlags::VERTEX_BUFFER,
            vertex_attribs: vec![attrib],
            ..Default::default()
        };
        let buffer = DebugBuffer::new(BufferId(1), desc, false);
        assert_eq!(buffer.instance_divisor(), Some(2));
    }
}
