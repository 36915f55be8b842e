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

//! Defines resource heaps: arrays of resource views bound as a whole.

use super::{ResourceId, TextureViewDescriptor};
use crate::renderer::api::pipeline::PipelineLayoutId;
use crate::renderer::api::util::Format;

/// An opaque handle to a resource heap (descriptor set array).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHeapId(pub usize);

/// Describes a typed sub-range of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferViewDescriptor {
    /// Element format of the view.
    pub format: Format,
    /// Byte offset of the view.
    pub offset: u64,
    /// Byte size of the view.
    pub size: u64,
}

/// One entry of a resource heap.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceViewDescriptor {
    /// The viewed resource.
    pub resource: ResourceId,
    /// Optional subresource view when `resource` is a texture.
    pub texture_view: Option<TextureViewDescriptor>,
    /// Optional sub-range view when `resource` is a buffer.
    pub buffer_view: Option<BufferViewDescriptor>,
}

impl ResourceViewDescriptor {
    /// Creates a view over the whole resource.
    pub fn new(resource: impl Into<ResourceId>) -> Self {
        Self {
            resource: resource.into(),
            texture_view: None,
            buffer_view: None,
        }
    }
}

/// A descriptor used to create a [`ResourceHeapId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceHeapDescriptor {
    /// An optional debug label for the heap.
    pub label: Option<String>,
    /// The layout whose heap bindings describe one descriptor set.
    pub pipeline_layout: Option<PipelineLayoutId>,
    /// Total number of resource views. Zero takes the count from the initial views.
    pub num_resource_views: u32,
}
