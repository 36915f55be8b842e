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

use crate::renderer::api::command::CommandBufferDescriptor;
use crate::renderer::api::core::{GraphicsBackendType, RenderingCapabilities};
use crate::renderer::api::pipeline::{
    PipelineLayoutDescriptor, PipelineLayoutId, PipelineStateDescriptor, PipelineStateId,
    ShaderDescriptor, ShaderId,
};
use crate::renderer::api::resource::{
    BufferDescriptor, BufferId, BufferMapping, CpuAccess, FenceId, ImageView, MutableImageView,
    ObjectId, QueryHeapDescriptor, QueryHeapId, RenderTargetDescriptor, RenderTargetId,
    ResourceHeapDescriptor, ResourceHeapId, ResourceViewDescriptor, SamplerDescriptor, SamplerId,
    TextureDescriptor, TextureId, TextureRegion, TextureViewDescriptor,
};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::{CommandBuffer, CommandQueue};
use std::fmt::Debug;
use std::ops::Range;
use std::sync::Arc;

/// The main interface for creating and managing GPU resources.
///
/// Every resource is referenced by a `Copy` handle. Handles stay valid until the
/// matching `release_*` call.
pub trait RenderDevice: Send + Sync + Debug + 'static {
    /// Returns the graphics API this device runs on.
    fn backend(&self) -> GraphicsBackendType;

    /// Returns the features and limits of the device.
    fn capabilities(&self) -> RenderingCapabilities;

    /// Returns the device's command queue.
    fn command_queue(&self) -> Arc<dyn CommandQueue>;

    /// Creates a new GPU buffer, optionally initialized with `initial_data`.
    /// ## Arguments
    /// * `descriptor` - The buffer configuration.
    /// * `initial_data` - Initial content. Must not exceed `descriptor.size`.
    /// ## Returns
    /// A `Result` containing the ID of the created buffer or an error if the creation fails.
    fn create_buffer(
        &self,
        descriptor: &BufferDescriptor,
        initial_data: Option<&[u8]>,
    ) -> Result<BufferId, ResourceError>;

    /// Releases a GPU buffer.
    fn release_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    /// Writes data to a GPU buffer at `offset`.
    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError>;

    /// Reads `out.len()` bytes of a GPU buffer starting at `offset`.
    fn read_buffer(&self, id: BufferId, offset: u64, out: &mut [u8]) -> Result<(), ResourceError>;

    /// Maps a byte range of a buffer into CPU memory.
    /// ## Arguments
    /// * `id` - The buffer to map.
    /// * `access` - How the mapping will be accessed.
    /// * `range` - The byte range to map.
    /// ## Returns
    /// The mapped memory. It stays valid until [`unmap_buffer`](RenderDevice::unmap_buffer).
    fn map_buffer(
        &self,
        id: BufferId,
        access: CpuAccess,
        range: Range<u64>,
    ) -> Result<BufferMapping, ResourceError>;

    /// Unmaps a previously mapped buffer.
    fn unmap_buffer(&self, id: BufferId);

    /// Creates a new GPU texture, optionally initialized with `initial_image`.
    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        initial_image: Option<&ImageView<'_>>,
    ) -> Result<TextureId, ResourceError>;

    /// Creates a view onto a subresource of `shared_texture`.
    fn create_texture_view(
        &self,
        shared_texture: TextureId,
        descriptor: &TextureViewDescriptor,
    ) -> Result<TextureId, ResourceError>;

    /// Releases a texture or texture view.
    fn release_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Writes image data into a texture region.
    fn write_texture(
        &self,
        id: TextureId,
        region: &TextureRegion,
        image: &ImageView<'_>,
    ) -> Result<(), ResourceError>;

    /// Reads a texture region into CPU memory.
    fn read_texture(
        &self,
        id: TextureId,
        region: &TextureRegion,
        image: &mut MutableImageView<'_>,
    ) -> Result<(), ResourceError>;

    /// Creates a sampler state.
    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError>;

    /// Releases a sampler state.
    fn release_sampler(&self, id: SamplerId) -> Result<(), ResourceError>;

    /// Creates a resource heap, optionally filled with `initial_views`.
    fn create_resource_heap(
        &self,
        descriptor: &ResourceHeapDescriptor,
        initial_views: &[ResourceViewDescriptor],
    ) -> Result<ResourceHeapId, ResourceError>;

    /// Releases a resource heap.
    fn release_resource_heap(&self, id: ResourceHeapId) -> Result<(), ResourceError>;

    /// Creates a render target.
    fn create_render_target(
        &self,
        descriptor: &RenderTargetDescriptor,
    ) -> Result<RenderTargetId, ResourceError>;

    /// Releases a render target.
    fn release_render_target(&self, id: RenderTargetId) -> Result<(), ResourceError>;

    /// Creates a shader.
    fn create_shader(&self, descriptor: &ShaderDescriptor) -> Result<ShaderId, ResourceError>;

    /// Releases a shader.
    fn release_shader(&self, id: ShaderId) -> Result<(), ResourceError>;

    /// Creates a pipeline layout.
    fn create_pipeline_layout(
        &self,
        descriptor: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError>;

    /// Releases a pipeline layout.
    fn release_pipeline_layout(&self, id: PipelineLayoutId) -> Result<(), ResourceError>;

    /// Creates a graphics or compute pipeline state.
    fn create_pipeline_state(
        &self,
        descriptor: &PipelineStateDescriptor,
    ) -> Result<PipelineStateId, ResourceError>;

    /// Releases a pipeline state.
    fn release_pipeline_state(&self, id: PipelineStateId) -> Result<(), ResourceError>;

    /// Creates a query heap.
    fn create_query_heap(
        &self,
        descriptor: &QueryHeapDescriptor,
    ) -> Result<QueryHeapId, ResourceError>;

    /// Releases a query heap.
    fn release_query_heap(&self, id: QueryHeapId) -> Result<(), ResourceError>;

    /// Creates a fence.
    fn create_fence(&self) -> Result<FenceId, ResourceError>;

    /// Releases a fence.
    fn release_fence(&self, id: FenceId) -> Result<(), ResourceError>;

    /// Creates a new command buffer to record GPU commands.
    fn create_command_buffer(
        &self,
        descriptor: &CommandBufferDescriptor,
    ) -> Result<Box<dyn CommandBuffer>, ResourceError>;

    /// Assigns a debug name to a device object.
    fn set_name(&self, object: ObjectId, name: &str);
}
