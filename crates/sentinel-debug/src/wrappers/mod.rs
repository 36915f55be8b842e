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

//! Debug wrapper objects and the registry that owns them.
//!
//! The validation layer never hands wrappers to the application. Every resource
//! is referenced by the ID the native backend returned, and the layer keeps one
//! arena per resource kind so that commands can look up the creation descriptor
//! and the derived metadata of any resource they receive.

mod buffer;
mod pipeline;
mod query_heap;
mod render_target;
mod resource_heap;
mod texture;

pub use self::buffer::DebugBuffer;
pub use self::pipeline::{DebugPipelineLayout, DebugPipelineState, DebugShader};
pub use self::query_heap::{DebugQueryHeap, QueryState};
pub use self::render_target::DebugRenderTarget;
pub use self::resource_heap::DebugResourceHeap;
pub use self::texture::DebugTexture;

use crate::report::Reporter;
use sentinel_core::renderer::{
    BufferId, FenceId, ObjectId, PipelineLayoutId, PipelineStateId, QueryHeapId,
    RenderTargetId, ResourceHeapId, ResourceId, SamplerDescriptor, SamplerId, ShaderId,
    TextureId,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The capability shared by every wrapper object.
pub trait DebugObject {
    /// The ID type of the wrapped resource.
    type Id: Copy + Debug;
    /// The creation descriptor kept by the wrapper.
    type Descriptor;

    /// Returns the ID of the wrapped native object.
    fn id(&self) -> Self::Id;

    /// Returns the debug label, if any.
    fn label(&self) -> Option<&str>;

    /// Replaces the debug label.
    fn set_label(&mut self, label: &str);

    /// Returns the creation descriptor.
    fn descriptor(&self) -> &Self::Descriptor;

    /// A human-readable name for report messages: the quoted label, or the ID.
    fn name(&self) -> String {
        match self.label() {
            Some(label) => format!("'{label}'"),
            None => format!("{:?}", self.id()),
        }
    }
}

macro_rules! impl_debug_object {
    ($wrapper:ty, $id:ty, $desc:ty) => {
        impl $crate::wrappers::DebugObject for $wrapper {
            type Id = $id;
            type Descriptor = $desc;

            fn id(&self) -> $id {
                self.id
            }

            fn label(&self) -> Option<&str> {
                self.label.as_deref()
            }

            fn set_label(&mut self, label: &str) {
                self.label = Some(label.to_owned());
            }

            fn descriptor(&self) -> &$desc {
                &self.desc
            }
        }
    };
}
pub(crate) use impl_debug_object;

/// Wrapper of a sampler state.
#[derive(Debug, Clone)]
pub struct DebugSampler {
    /// Native ID.
    pub id: SamplerId,
    /// Creation descriptor.
    pub desc: SamplerDescriptor,
    /// Debug label.
    pub label: Option<String>,
}

impl DebugSampler {
    /// Wraps a freshly created sampler.
    pub fn new(id: SamplerId, desc: SamplerDescriptor) -> Self {
        let label = desc.label.clone();
        Self { id, desc, label }
    }
}

impl_debug_object!(DebugSampler, SamplerId, SamplerDescriptor);

/// Wrapper of a fence. Fences have no descriptor.
#[derive(Debug, Clone)]
pub struct DebugFence {
    /// Native ID.
    pub id: FenceId,
    /// Debug label.
    pub label: Option<String>,
}

impl DebugObject for DebugFence {
    type Id = FenceId;
    type Descriptor = ();

    fn id(&self) -> FenceId {
        self.id
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_owned());
    }

    fn descriptor(&self) -> &() {
        &()
    }
}

/// One arena per resource kind, keyed by native ID.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    /// Live buffers.
    pub buffers: HashMap<BufferId, DebugBuffer>,
    /// Live textures and texture views.
    pub textures: HashMap<TextureId, DebugTexture>,
    /// Live samplers.
    pub samplers: HashMap<SamplerId, DebugSampler>,
    /// Live resource heaps.
    pub resource_heaps: HashMap<ResourceHeapId, DebugResourceHeap>,
    /// Live render targets.
    pub render_targets: HashMap<RenderTargetId, DebugRenderTarget>,
    /// Live shaders.
    pub shaders: HashMap<ShaderId, DebugShader>,
    /// Live pipeline layouts.
    pub pipeline_layouts: HashMap<PipelineLayoutId, DebugPipelineLayout>,
    /// Live pipeline states.
    pub pipeline_states: HashMap<PipelineStateId, DebugPipelineState>,
    /// Live query heaps.
    pub query_heaps: HashMap<QueryHeapId, DebugQueryHeap>,
    /// Live fences.
    pub fences: HashMap<FenceId, DebugFence>,
}

fn relabel<K: Hash + Eq, W: DebugObject>(map: &mut HashMap<K, W>, id: &K, label: &str) -> bool {
    match map.get_mut(id) {
        Some(wrapper) => {
            wrapper.set_label(label);
            true
        }
        None => false,
    }
}

impl ResourceRegistry {
    /// Updates the label of any live object. Returns `false` if the ID is unknown.
    pub fn set_label(&mut self, object: ObjectId, label: &str) -> bool {
        match object {
            ObjectId::Buffer(id) => relabel(&mut self.buffers, &id, label),
            ObjectId::Texture(id) => relabel(&mut self.textures, &id, label),
            ObjectId::Sampler(id) => relabel(&mut self.samplers, &id, label),
            ObjectId::ResourceHeap(id) => relabel(&mut self.resource_heaps, &id, label),
            ObjectId::RenderTarget(id) => relabel(&mut self.render_targets, &id, label),
            ObjectId::Shader(id) => relabel(&mut self.shaders, &id, label),
            ObjectId::PipelineLayout(id) => relabel(&mut self.pipeline_layouts, &id, label),
            ObjectId::PipelineState(id) => relabel(&mut self.pipeline_states, &id, label),
            ObjectId::QueryHeap(id) => relabel(&mut self.query_heaps, &id, label),
            ObjectId::Fence(id) => relabel(&mut self.fences, &id, label),
        }
    }

    /// Returns `true` if the resource is live.
    pub fn contains_resource(&self, resource: ResourceId) -> bool {
        match resource {
            ResourceId::Buffer(id) => self.buffers.contains_key(&id),
            ResourceId::Texture(id) => self.textures.contains_key(&id),
            ResourceId::Sampler(id) => self.samplers.contains_key(&id),
        }
    }

    /// Marks a buffer as holding defined data.
    pub fn mark_initialized(&mut self, id: BufferId) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.initialized = true;
        }
    }
}

/// Looks up a wrapper and reports an unknown ID as a null handle.
pub(crate) fn lookup<'a, K, W>(
    map: &'a HashMap<K, W>,
    id: K,
    kind: &str,
    reporter: Option<&Reporter>,
) -> Option<&'a W>
where
    K: Hash + Eq + Debug,
{
    let wrapper = map.get(&id);
    if wrapper.is_none() {
        if let Some(r) = reporter {
            r.null_handle(kind, &id);
        }
    }
    wrapper
}
