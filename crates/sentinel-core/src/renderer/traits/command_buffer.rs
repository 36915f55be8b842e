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

use crate::renderer::api::command::{AttachmentClear, ClearFlags, ClearValue, Scissor, Viewport};
use crate::renderer::api::pipeline::{PipelineStateId, StencilFace};
use crate::renderer::api::resource::{
    BufferId, QueryHeapId, RenderConditionMode, RenderTargetId, ResourceHeapId, ResourceId,
    TextureId, TextureLocation, TextureRegion,
};
use crate::renderer::api::util::{Extent3D, Format};
use std::ops::Range;

/// A trait for an object that records a sequence of GPU commands.
///
/// Commands are only valid between [`begin`](CommandBuffer::begin) and
/// [`end`](CommandBuffer::end). Draw and clear commands additionally need an
/// active render pass. A finished command buffer is submitted through a
/// [`CommandQueue`](super::CommandQueue).
pub trait CommandBuffer: Send {
    /// Starts recording. Clears all previously bound state.
    fn begin(&mut self);

    /// Finishes recording.
    fn end(&mut self);

    // --- Buffer commands ---

    /// Writes `data` into `dst` at `dst_offset`.
    fn update_buffer(&mut self, dst: BufferId, dst_offset: u64, data: &[u8]);

    /// Copies `size` bytes from `src` to `dst`.
    fn copy_buffer(
        &mut self,
        dst: BufferId,
        dst_offset: u64,
        src: BufferId,
        src_offset: u64,
        size: u64,
    );

    /// Copies a texture region into a buffer.
    ///
    /// `row_stride` and `layer_stride` describe the buffer layout in bytes; zero
    /// selects a tightly packed layout.
    fn copy_buffer_from_texture(
        &mut self,
        dst: BufferId,
        dst_offset: u64,
        src: TextureId,
        src_region: &TextureRegion,
        row_stride: u32,
        layer_stride: u32,
    );

    /// Fills `size` bytes of `dst` with a repeated 32-bit value.
    /// `size` may be [`WHOLE_SIZE`](crate::renderer::api::command::WHOLE_SIZE).
    fn fill_buffer(&mut self, dst: BufferId, dst_offset: u64, value: u32, size: u64);

    // --- Texture commands ---

    /// Copies a region of `extent` texels between two textures.
    fn copy_texture(
        &mut self,
        dst: TextureId,
        dst_location: &TextureLocation,
        src: TextureId,
        src_location: &TextureLocation,
        extent: Extent3D,
    );

    /// Copies buffer data into a texture region.
    fn copy_texture_from_buffer(
        &mut self,
        dst: TextureId,
        dst_region: &TextureRegion,
        src: BufferId,
        src_offset: u64,
        row_stride: u32,
        layer_stride: u32,
    );

    /// Generates all MIP levels of a texture from its first level.
    fn generate_mips(&mut self, texture: TextureId);

    // --- Viewports and scissors ---

    /// Sets the viewports.
    fn set_viewports(&mut self, viewports: &[Viewport]);

    /// Sets the scissor rectangles.
    fn set_scissors(&mut self, scissors: &[Scissor]);

    // --- Input assembly ---

    /// Binds a single vertex buffer.
    fn set_vertex_buffer(&mut self, buffer: BufferId);

    /// Binds several vertex buffers to consecutive slots.
    fn set_vertex_buffers(&mut self, buffers: &[BufferId]);

    /// Binds an index buffer.
    ///
    /// `format` overrides the buffer's own format; `offset` is a byte offset.
    fn set_index_buffer(&mut self, buffer: BufferId, format: Format, offset: u64);

    // --- Resources ---

    /// Binds one descriptor set of a resource heap.
    fn set_resource_heap(&mut self, heap: ResourceHeapId, descriptor_set: u32);

    /// Binds a single resource to the given binding of the current pipeline layout.
    fn set_resource(&mut self, descriptor: u32, resource: ResourceId);

    // --- Pipeline state ---

    /// Binds a graphics or compute pipeline state.
    fn set_pipeline_state(&mut self, pipeline_state: PipelineStateId);

    /// Sets the dynamic blend factor.
    fn set_blend_factor(&mut self, color: [f32; 4]);

    /// Sets the dynamic stencil reference.
    fn set_stencil_reference(&mut self, reference: u32, face: StencilFace);

    /// Sets uniform values, starting at the uniform with index `first`.
    fn set_uniforms(&mut self, first: u32, data: &[u8]);

    // --- Queries ---

    /// Begins a query.
    fn begin_query(&mut self, heap: QueryHeapId, query: u32);

    /// Ends a query.
    fn end_query(&mut self, heap: QueryHeapId, query: u32);

    /// Begins conditional rendering on the result of an occlusion query.
    fn begin_render_condition(&mut self, heap: QueryHeapId, query: u32, mode: RenderConditionMode);

    /// Ends conditional rendering.
    fn end_render_condition(&mut self);

    // --- Stream output ---

    /// Begins stream-output into the given buffers.
    fn begin_stream_output(&mut self, buffers: &[BufferId]);

    /// Ends stream-output.
    fn end_stream_output(&mut self);

    // --- Render passes ---

    /// Begins a render pass on a render target, clearing attachments with `clear_values`.
    fn begin_render_pass(&mut self, render_target: RenderTargetId, clear_values: &[ClearValue]);

    /// Ends the current render pass.
    fn end_render_pass(&mut self);

    /// Clears the attachments selected by `flags` of the bound render target.
    fn clear(&mut self, flags: ClearFlags, clear_value: &ClearValue);

    /// Clears individual attachments of the bound render target.
    fn clear_attachments(&mut self, attachments: &[AttachmentClear]);

    // --- Drawing ---

    /// Draws non-indexed primitives.
    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);

    /// Draws indexed primitives.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>);

    /// Draws with arguments read from `buffer`.
    fn draw_indirect(&mut self, buffer: BufferId, offset: u64, num_commands: u32, stride: u32);

    /// Draws indexed primitives with arguments read from `buffer`.
    fn draw_indexed_indirect(
        &mut self,
        buffer: BufferId,
        offset: u64,
        num_commands: u32,
        stride: u32,
    );

    // --- Compute ---

    /// Dispatches compute work groups.
    fn dispatch(&mut self, work_groups_x: u32, work_groups_y: u32, work_groups_z: u32);

    /// Dispatches compute work groups with arguments read from `buffer`.
    fn dispatch_indirect(&mut self, buffer: BufferId, offset: u64);

    // --- Debugging ---

    /// Opens a named debug group.
    fn push_debug_group(&mut self, name: &str);

    /// Closes the innermost debug group.
    fn pop_debug_group(&mut self);
}
