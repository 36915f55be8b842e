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
use sentinel_core::renderer::{PipelineLayoutId, ResourceHeapDescriptor, ResourceHeapId};

/// Wrapper of a resource heap.
#[derive(Debug, Clone)]
pub struct DebugResourceHeap {
    /// Native ID.
    pub id: ResourceHeapId,
    /// Creation descriptor.
    pub desc: ResourceHeapDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// The layout the heap was created for.
    pub pipeline_layout: Option<PipelineLayoutId>,
    /// Number of heap bindings per descriptor set, from the pipeline layout.
    pub bindings_per_set: u32,
    /// Total number of resource views in the heap.
    pub num_resource_views: u32,
}

impl DebugResourceHeap {
    /// Wraps a freshly created resource heap.
    pub fn new(
        id: ResourceHeapId,
        desc: ResourceHeapDescriptor,
        bindings_per_set: u32,
        num_resource_views: u32,
    ) -> Self {
        Self {
            id,
            label: desc.label.clone(),
            pipeline_layout: desc.pipeline_layout,
            bindings_per_set,
            num_resource_views,
            desc,
        }
    }

    /// Number of descriptor sets the heap holds.
    pub fn num_descriptor_sets(&self) -> u32 {
        self.num_resource_views
            .checked_div(self.bindings_per_set)
            .unwrap_or(0)
    }
}

impl_debug_object!(DebugResourceHeap, ResourceHeapId, ResourceHeapDescriptor);
