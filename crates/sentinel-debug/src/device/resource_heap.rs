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

use super::DebugRenderDevice;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugObject, DebugResourceHeap, ResourceRegistry};
use sentinel_core::renderer::{
    BindingDescriptor, ResourceError, ResourceHeapDescriptor, ResourceHeapId, ResourceId,
    ResourceType, ResourceViewDescriptor,
};
use sentinel_core::ErrorType;

impl DebugRenderDevice {
    /// Validates and creates a resource heap.
    ///
    /// When `desc.num_resource_views` is zero, the heap size is the number of
    /// initial views.
    pub fn create_resource_heap(
        &self,
        desc: &ResourceHeapDescriptor,
        initial_views: &[ResourceViewDescriptor],
    ) -> Result<ResourceHeapId, ResourceError> {
        let num_views = match desc.num_resource_views {
            0 => initial_views.len() as u32,
            n => n,
        };
        let bindings_per_set = {
            let reporter = self.ctx.reporter("create_resource_heap");
            let registry = self.ctx.registry.lock();

            let layout = match desc.pipeline_layout {
                Some(id) => Some(
                    lookup(&registry.pipeline_layouts, id, "pipeline layout", reporter.as_ref())
                        .ok_or(ResourceError::InvalidHandle)?,
                ),
                None => None,
            };
            let all_known = initial_views
                .iter()
                .all(|view| registry.contains_resource(view.resource));
            if !all_known {
                if let Some(r) = &reporter {
                    for view in initial_views {
                        if !registry.contains_resource(view.resource) {
                            r.null_handle("resource", view.resource);
                        }
                    }
                }
                return Err(ResourceError::InvalidHandle);
            }

            let heap_bindings = layout.map_or(&[][..], |layout| layout.desc.heap_bindings.as_slice());
            if let Some(r) = &reporter {
                match layout {
                    None => r.error(
                        ErrorType::InvalidArgument,
                        "pipeline layout must not be null for resource heap",
                    ),
                    Some(layout) if heap_bindings.is_empty() => r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "cannot create resource heap with pipeline layout {} that has no heap bindings",
                            layout.name()
                        ),
                    ),
                    Some(_) => self.validate_heap_views(r, &registry, heap_bindings, num_views, initial_views),
                }
            }
            heap_bindings.len() as u32
        };

        let id = self.ctx.native().create_resource_heap(desc, initial_views)?;
        log::debug!(
            "DebugRenderDevice: Created resource heap with ID: {id:?} ({num_views} views)"
        );
        self.ctx.registry.lock().resource_heaps.insert(
            id,
            DebugResourceHeap::new(id, desc.clone(), bindings_per_set, num_views),
        );
        Ok(id)
    }

    /// Releases a resource heap.
    pub fn release_resource_heap(&self, id: ResourceHeapId) -> Result<(), ResourceError> {
        self.release_object(
            "release_resource_heap",
            "resource heap",
            id,
            |registry| registry.resource_heaps.remove(&id).is_some(),
            |native| native.release_resource_heap(id),
        )
    }

    fn validate_heap_views(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        heap_bindings: &[BindingDescriptor],
        num_views: u32,
        initial_views: &[ResourceViewDescriptor],
    ) {
        let num_bindings = heap_bindings.len() as u32;
        if num_views == 0 {
            r.error(
                ErrorType::InvalidArgument,
                "cannot create resource heap without resource views",
            );
        } else if num_views % num_bindings != 0 {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "cannot create resource heap with {num_views} resource view(s): not a multiple of the {num_bindings} binding(s) in the pipeline layout"
                ),
            );
        }
        if initial_views.len() as u32 > num_views {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "too many initial resource views ({} specified, but heap holds {num_views})",
                    initial_views.len()
                ),
            );
        }
        for (i, (view, binding)) in initial_views
            .iter()
            .zip(heap_bindings.iter().cycle())
            .enumerate()
        {
            self.validate_resource_view(r, registry, i, view, binding);
        }
    }

    fn validate_resource_view(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        index: usize,
        view: &ResourceViewDescriptor,
        binding: &BindingDescriptor,
    ) {
        let resource_type = view.resource.resource_type();
        if resource_type != binding.resource_type {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "resource view [{index}] is a {resource_type}, but binding '{}' expects a {}",
                    binding.name, binding.resource_type
                ),
            );
            return;
        }
        let what = format!("resource view [{index}] for binding '{}':", binding.name);
        match view.resource {
            ResourceId::Buffer(id) => {
                let Some(buffer) = registry.buffers.get(&id) else { return };
                checks::required_bind_flags(r, &what, &buffer.name(), buffer.desc.bind_flags, binding.bind_flags);
                if let Some(range) = &view.buffer_view {
                    checks::buffer_range(r, buffer, range.offset, range.size);
                }
            }
            ResourceId::Texture(id) => {
                let Some(texture) = registry.textures.get(&id) else { return };
                checks::required_bind_flags(r, &what, &texture.name(), texture.desc.bind_flags, binding.bind_flags);
                if let Some(texture_view) = &view.texture_view {
                    checks::texture_view(r, self.ctx.capabilities(), texture, texture_view);
                }
            }
            ResourceId::Sampler(_) => {
                if binding.resource_type == ResourceType::Sampler && !binding.bind_flags.is_empty() {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!("sampler binding '{}' must not have bind flags", binding.name),
                    );
                }
            }
        }
    }
}
