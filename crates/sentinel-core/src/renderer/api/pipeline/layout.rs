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

//! Pipeline layouts: the binding table shared by pipelines and resource heaps.

use crate::renderer::api::resource::ResourceType;
use crate::renderer::api::util::{BindFlags, StageFlags};

/// An opaque handle to a pipeline layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineLayoutId(pub usize);

/// A binding location: an index inside a descriptor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BindingSlot {
    /// Binding index.
    pub index: u32,
    /// Descriptor set.
    pub set: u32,
}

impl BindingSlot {
    /// Creates a binding slot in descriptor set zero.
    pub const fn new(index: u32) -> Self {
        Self { index, set: 0 }
    }
}

/// One binding of a pipeline layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BindingDescriptor {
    /// Name of the binding in the shader.
    pub name: String,
    /// Kind of resource bound here.
    pub resource_type: ResourceType,
    /// Usage the bound resource must have been created with.
    pub bind_flags: BindFlags,
    /// Shader stages the binding is visible to.
    pub stage_flags: StageFlags,
    /// Binding location.
    pub slot: BindingSlot,
    /// Number of array elements. Zero and one both mean a single element.
    pub array_size: u32,
}

impl BindingDescriptor {
    /// Creates a single-element binding.
    pub fn new(
        name: impl Into<String>,
        resource_type: ResourceType,
        bind_flags: BindFlags,
        stage_flags: StageFlags,
        slot: BindingSlot,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type,
            bind_flags,
            stage_flags,
            slot,
            array_size: 0,
        }
    }
}

/// A uniform (push-constant) value declared by a pipeline layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UniformDescriptor {
    /// Name of the uniform in the shader.
    pub name: String,
    /// Size in bytes.
    pub size: u32,
}

/// A descriptor used to create a [`PipelineLayoutId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineLayoutDescriptor {
    /// An optional debug label for the layout.
    pub label: Option<String>,
    /// Bindings fed from resource heaps. One heap descriptor set covers all of them.
    pub heap_bindings: Vec<BindingDescriptor>,
    /// Bindings set individually with `set_resource`.
    pub bindings: Vec<BindingDescriptor>,
    /// Uniform values set with `set_uniforms`.
    pub uniforms: Vec<UniformDescriptor>,
}

impl PipelineLayoutDescriptor {
    /// Returns the total size in bytes of all declared uniforms.
    pub fn uniforms_size(&self) -> u64 {
        self.uniforms.iter().map(|u| u64::from(u.size)).sum()
    }
}
