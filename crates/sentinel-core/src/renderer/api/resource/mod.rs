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

//! GPU resource handles and their creation descriptors.

pub mod buffer;
pub mod query;
pub mod render_target;
pub mod resource_heap;
pub mod sampler;
pub mod texture;

pub use self::buffer::*;
pub use self::query::*;
pub use self::render_target::*;
pub use self::resource_heap::*;
pub use self::sampler::*;
pub use self::texture::*;

use crate::renderer::api::pipeline::{PipelineLayoutId, PipelineStateId, ShaderId};

/// An opaque handle to a GPU fence used for CPU/GPU synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceId(pub usize);

/// The kind of a bindable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    /// Unspecified resource kind.
    #[default]
    Undefined,
    /// A GPU buffer.
    Buffer,
    /// A GPU texture or texture view.
    Texture,
    /// A sampler state.
    Sampler,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Undefined => "undefined",
            ResourceType::Buffer => "buffer",
            ResourceType::Texture => "texture",
            ResourceType::Sampler => "sampler",
        };
        f.write_str(name)
    }
}

/// A handle to any resource that can be bound to a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// A buffer handle.
    Buffer(BufferId),
    /// A texture handle.
    Texture(TextureId),
    /// A sampler handle.
    Sampler(SamplerId),
}

impl ResourceId {
    /// Returns the kind of resource this handle refers to.
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceId::Buffer(_) => ResourceType::Buffer,
            ResourceId::Texture(_) => ResourceType::Texture,
            ResourceId::Sampler(_) => ResourceType::Sampler,
        }
    }
}

impl From<BufferId> for ResourceId {
    fn from(id: BufferId) -> Self {
        ResourceId::Buffer(id)
    }
}

impl From<TextureId> for ResourceId {
    fn from(id: TextureId) -> Self {
        ResourceId::Texture(id)
    }
}

impl From<SamplerId> for ResourceId {
    fn from(id: SamplerId) -> Self {
        ResourceId::Sampler(id)
    }
}

/// A handle to any device object that can carry a debug name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectId {
    /// A buffer.
    Buffer(BufferId),
    /// A texture or texture view.
    Texture(TextureId),
    /// A sampler.
    Sampler(SamplerId),
    /// A resource heap.
    ResourceHeap(ResourceHeapId),
    /// A render target.
    RenderTarget(RenderTargetId),
    /// A shader.
    Shader(ShaderId),
    /// A pipeline layout.
    PipelineLayout(PipelineLayoutId),
    /// A graphics or compute pipeline state.
    PipelineState(PipelineStateId),
    /// A query heap.
    QueryHeap(QueryHeapId),
    /// A fence.
    Fence(FenceId),
}

impl From<ResourceId> for ObjectId {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Buffer(id) => ObjectId::Buffer(id),
            ResourceId::Texture(id) => ObjectId::Texture(id),
            ResourceId::Sampler(id) => ObjectId::Sampler(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_reports_its_kind() {
        assert_eq!(
            ResourceId::from(BufferId(3)).resource_type(),
            ResourceType::Buffer
        );
        assert_eq!(
            ResourceId::from(SamplerId(1)).resource_type(),
            ResourceType::Sampler
        );
    }

    #[test]
    fn resource_id_converts_to_object_id() {
        let object: ObjectId = ResourceId::Texture(TextureId(7)).into();
        assert_eq!(object, ObjectId::Texture(TextureId(7)));
    }
}
