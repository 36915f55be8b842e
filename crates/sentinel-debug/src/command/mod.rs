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

//! The command-buffer validator.
//!
//! [`DebugCommandBuffer`] decorates a native [`CommandBuffer`]. Every command
//! follows the same shape: validate the preconditions against the recording
//! state and the wrappers of the resources involved, forward the call to the
//! native recorder, then update the binding state and the profile counters.
//!
//! Validation failures never stop a command from being forwarded. The only
//! exception are IDs the layer does not know: those are reported as null
//! handles and the command is dropped.

mod binding;
mod draw;
mod pass;
mod query;
mod transfer;

use crate::context::DebugContext;
use crate::report::Reporter;
use crate::timer::QueryTimerPool;
use crate::wrappers::QueryState;
use sentinel_core::renderer::{
    AttachmentClear, BufferId, ClearFlags, ClearValue, CommandBufferDescriptor,
    CommandBufferRecord, Extent3D, Format, PipelineStateId, PrimitiveTopology, QueryHeapId,
    RenderConditionMode, RenderTargetId, ResourceHeapId, ResourceId, Scissor, StencilFace,
    TextureId, TextureLocation, TextureRegion, TimeRecord, Viewport,
};
use sentinel_core::{CommandBuffer, ErrorType};
use std::ops::Range;
use std::sync::Arc;

/// Recording state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingState {
    /// Between `begin` and `end`.
    pub recording: bool,
    /// Between `begin_render_pass` and `end_render_pass`.
    pub inside_render_pass: bool,
    /// Between `begin_stream_output` and `end_stream_output`.
    pub stream_output_busy: bool,
    /// Between `begin_render_condition` and `end_render_condition`.
    pub render_condition_active: bool,
    /// Number of open debug groups.
    pub debug_group_depth: u32,
}

/// Resources bound during the current recording session. Cleared on `begin`.
#[derive(Debug, Clone, Default)]
pub(crate) struct BindingState {
    pub vertex_buffers: Vec<BufferId>,
    pub any_non_empty_vertex_buffer: bool,
    pub index_buffer: Option<BufferId>,
    pub index_format_size: u32,
    pub index_offset: u64,
    pub pipeline_state: Option<PipelineStateId>,
    pub resource_heap: Option<ResourceHeapId>,
    pub render_target: Option<RenderTargetId>,
    pub stream_outputs: Vec<BufferId>,
    pub primitive_topology: Option<PrimitiveTopology>,
    pub blend_factor_set: bool,
    pub stencil_ref_set: bool,
}

/// A validating decorator over a native [`CommandBuffer`].
pub struct DebugCommandBuffer {
    ctx: Arc<DebugContext>,
    native: Box<dyn CommandBuffer>,
    desc: CommandBufferDescriptor,
    state: RecordingState,
    bindings: BindingState,
    record: CommandBufferRecord,
    timer: QueryTimerPool,
    timing_enabled: bool,
}

impl DebugCommandBuffer {
    pub(crate) fn new(
        ctx: Arc<DebugContext>,
        native: Box<dyn CommandBuffer>,
        desc: CommandBufferDescriptor,
    ) -> Self {
        let config = ctx.config();
        let timer = QueryTimerPool::new(config.timer_queries_per_heap, config.max_query_poll_attempts);
        Self {
            ctx,
            native,
            desc,
            state: RecordingState::default(),
            bindings: BindingState::default(),
            record: CommandBufferRecord::default(),
            timer,
            timing_enabled: false,
        }
    }

    /// Returns the decorated native command buffer.
    pub fn native(&self) -> &dyn CommandBuffer {
        self.native.as_ref()
    }

    /// Returns the descriptor the command buffer was created with.
    pub fn descriptor(&self) -> &CommandBufferDescriptor {
        &self.desc
    }

    /// Returns `true` between `begin` and `end`.
    pub fn is_recording(&self) -> bool {
        self.state.recording
    }

    /// Returns `true` inside a render pass.
    pub fn is_inside_render_pass(&self) -> bool {
        self.state.inside_render_pass
    }

    /// Returns a copy of the recording state flags.
    pub fn recording_state(&self) -> RecordingState {
        self.state
    }

    /// Returns the counters of the current recording session.
    pub fn record(&self) -> &CommandBufferRecord {
        &self.record
    }

    /// Takes the counters of the current recording session, leaving them zeroed.
    pub fn take_record(&mut self) -> CommandBufferRecord {
        std::mem::take(&mut self.record)
    }

    /// Resolves and takes the GPU time records of the current recording session.
    pub fn take_time_records(&mut self) -> Vec<TimeRecord> {
        self.timer.take_records(self.ctx.native_queue())
    }

    /// Forwards a command to the native recorder, bracketed by a timer query
    /// when timing is enabled.
    fn timed(&mut self, name: &str, command: impl FnOnce(&mut dyn CommandBuffer)) {
        self.ctx.log_forwarding("DebugCommandBuffer", name);
        if self.timing_enabled {
            self.timer.start(self.ctx.native(), self.native.as_mut(), name);
            command(self.native.as_mut());
            self.timer.stop(self.native.as_mut());
        } else {
            command(self.native.as_mut());
        }
    }

    /// Forwards a command that is never timed.
    fn forward(&mut self, name: &str, command: impl FnOnce(&mut dyn CommandBuffer)) {
        self.ctx.log_forwarding("DebugCommandBuffer", name);
        command(self.native.as_mut());
    }

    fn assert_recording(&self, r: &Reporter) {
        if !self.state.recording {
            r.error(
                ErrorType::InvalidState,
                "command buffer must be in recording state",
            );
        }
    }

    fn assert_inside_render_pass(&self, r: &Reporter) {
        self.assert_recording(r);
        if !self.state.inside_render_pass {
            r.error(
                ErrorType::InvalidState,
                "operation is not allowed outside a render pass",
            );
        }
    }

    fn assert_outside_render_pass(&self, r: &Reporter) {
        self.assert_recording(r);
        if self.state.inside_render_pass {
            r.error(
                ErrorType::InvalidState,
                "operation is not allowed inside a render pass",
            );
        }
    }
}

impl std::fmt::Debug for DebugCommandBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugCommandBuffer")
            .field("label", &self.desc.label)
            .field("state", &self.state)
            .field("record", &self.record)
            .field("timing_enabled", &self.timing_enabled)
            .finish()
    }
}

impl Drop for DebugCommandBuffer {
    fn drop(&mut self) {
        self.timer.release(self.ctx.native());
    }
}

impl CommandBuffer for DebugCommandBuffer {
    fn begin(&mut self) {
        if let Some(r) = self.ctx.reporter("begin") {
            if self.state.recording {
                r.error(
                    ErrorType::InvalidState,
                    "cannot begin command buffer while it is already recording",
                );
            }
        }
        self.forward("begin", |native| native.begin());

        self.state = RecordingState {
            recording: true,
            ..Default::default()
        };
        self.bindings = BindingState::default();
        self.record = CommandBufferRecord::default();
        self.timer.reset();
        self.timing_enabled = self
            .ctx
            .profiler()
            .is_some_and(|profiler| profiler.is_timing_enabled());
    }

    fn end(&mut self) {
        if let Some(r) = self.ctx.reporter("end") {
            self.validate_end(&r);
        }
        self.forward("end", |native| native.end());
        self.state.recording = false;
        self.record.encodings += 1;
    }

    fn update_buffer(&mut self, dst: BufferId, dst_offset: u64, data: &[u8]) {
        if !self.validate_update_buffer(dst, dst_offset, data) {
            return;
        }
        self.timed("update_buffer", |native| native.update_buffer(dst, dst_offset, data));
        self.ctx.registry.lock().mark_initialized(dst);
        self.record.buffer_updates += 1;
    }

    fn copy_buffer(&mut self, dst: BufferId, dst_offset: u64, src: BufferId, src_offset: u64, size: u64) {
        if !self.validate_copy_buffer(dst, dst_offset, src, src_offset, size) {
            return;
        }
        self.timed("copy_buffer", |native| {
            native.copy_buffer(dst, dst_offset, src, src_offset, size)
        });
        self.ctx.registry.lock().mark_initialized(dst);
        self.record.buffer_copies += 1;
    }

    fn copy_buffer_from_texture(
        &mut self,
        dst: BufferId,
        dst_offset: u64,
        src: TextureId,
        src_region: &TextureRegion,
        row_stride: u32,
        layer_stride: u32,
    ) {
        if !self.validate_copy_buffer_from_texture(dst, dst_offset, src, src_region, row_stride, layer_stride) {
            return;
        }
        self.timed("copy_buffer_from_texture", |native| {
            native.copy_buffer_from_texture(dst, dst_offset, src, src_region, row_stride, layer_stride)
        });
        self.ctx.registry.lock().mark_initialized(dst);
        self.record.buffer_copies += 1;
    }

    fn fill_buffer(&mut self, dst: BufferId, dst_offset: u64, value: u32, size: u64) {
        if !self.validate_fill_buffer(dst, dst_offset, size) {
            return;
        }
        self.timed("fill_buffer", |native| native.fill_buffer(dst, dst_offset, value, size));
        self.ctx.registry.lock().mark_initialized(dst);
        self.record.buffer_fills += 1;
    }

    fn copy_texture(
        &mut self,
        dst: TextureId,
        dst_location: &TextureLocation,
        src: TextureId,
        src_location: &TextureLocation,
        extent: Extent3D,
    ) {
        if !self.validate_copy_texture(dst, dst_location, src, src_location, extent) {
            return;
        }
        self.timed("copy_texture", |native| {
            native.copy_texture(dst, dst_location, src, src_location, extent)
        });
        self.record.texture_copies += 1;
    }

    fn copy_texture_from_buffer(
        &mut self,
        dst: TextureId,
        dst_region: &TextureRegion,
        src: BufferId,
        src_offset: u64,
        row_stride: u32,
        layer_stride: u32,
    ) {
        if !self.validate_copy_texture_from_buffer(dst, dst_region, src, src_offset, row_stride, layer_stride) {
            return;
        }
        self.timed("copy_texture_from_buffer", |native| {
            native.copy_texture_from_buffer(dst, dst_region, src, src_offset, row_stride, layer_stride)
        });
        self.record.texture_copies += 1;
    }

    fn generate_mips(&mut self, texture: TextureId) {
        if !self.validate_generate_mips(texture) {
            return;
        }
        self.timed("generate_mips", |native| native.generate_mips(texture));
        self.record.mip_maps_generations += 1;
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) {
        if let Some(r) = self.ctx.reporter("set_viewports") {
            self.validate_viewports(&r, viewports);
        }
        self.forward("set_viewports", |native| native.set_viewports(viewports));
    }

    fn set_scissors(&mut self, scissors: &[Scissor]) {
        if let Some(r) = self.ctx.reporter("set_scissors") {
            self.validate_scissors(&r, scissors);
        }
        self.forward("set_scissors", |native| native.set_scissors(scissors));
    }

    fn set_vertex_buffer(&mut self, buffer: BufferId) {
        let Some(non_empty) = self.validate_vertex_buffers("set_vertex_buffer", &[buffer]) else {
            return;
        };
        self.forward("set_vertex_buffer", |native| native.set_vertex_buffer(buffer));
        self.bindings.vertex_buffers = vec![buffer];
        self.bindings.any_non_empty_vertex_buffer = non_empty;
        self.record.vertex_buffer_bindings += 1;
    }

    fn set_vertex_buffers(&mut self, buffers: &[BufferId]) {
        let Some(non_empty) = self.validate_vertex_buffers("set_vertex_buffers", buffers) else {
            return;
        };
        self.forward("set_vertex_buffers", |native| native.set_vertex_buffers(buffers));
        self.bindings.vertex_buffers = buffers.to_vec();
        self.bindings.any_non_empty_vertex_buffer = non_empty;
        self.record.vertex_buffer_bindings += 1;
    }

    fn set_index_buffer(&mut self, buffer: BufferId, format: Format, offset: u64) {
        if !self.validate_index_buffer(buffer, format, offset) {
            return;
        }
        self.forward("set_index_buffer", |native| {
            native.set_index_buffer(buffer, format, offset)
        });
        self.bindings.index_buffer = Some(buffer);
        self.bindings.index_format_size = format.bytes_per_element();
        self.bindings.index_offset = offset;
        self.record.index_buffer_bindings += 1;
    }

    fn set_resource_heap(&mut self, heap: ResourceHeapId, descriptor_set: u32) {
        if !self.validate_resource_heap(heap, descriptor_set) {
            return;
        }
        self.forward("set_resource_heap", |native| {
            native.set_resource_heap(heap, descriptor_set)
        });
        self.bindings.resource_heap = Some(heap);
        self.record.resource_heap_bindings += 1;
    }

    fn set_resource(&mut self, descriptor: u32, resource: ResourceId) {
        let Some(kind) = self.validate_resource(descriptor, resource) else {
            return;
        };
        self.forward("set_resource", |native| native.set_resource(descriptor, resource));
        kind.count(&mut self.record);
    }

    fn set_pipeline_state(&mut self, pipeline_state: PipelineStateId) {
        let Some((is_graphics, topology)) = self.validate_pipeline_state(pipeline_state) else {
            return;
        };
        self.forward("set_pipeline_state", |native| {
            native.set_pipeline_state(pipeline_state)
        });
        self.bindings.pipeline_state = Some(pipeline_state);
        self.bindings.primitive_topology = topology;
        if is_graphics {
            self.record.graphics_pipeline_bindings += 1;
        } else {
            self.record.compute_pipeline_bindings += 1;
        }
    }

    fn set_blend_factor(&mut self, color: [f32; 4]) {
        if let Some(r) = self.ctx.reporter("set_blend_factor") {
            self.assert_recording(&r);
        }
        self.forward("set_blend_factor", |native| native.set_blend_factor(color));
        self.bindings.blend_factor_set = true;
    }

    fn set_stencil_reference(&mut self, reference: u32, face: StencilFace) {
        if let Some(r) = self.ctx.reporter("set_stencil_reference") {
            self.assert_recording(&r);
        }
        self.forward("set_stencil_reference", |native| {
            native.set_stencil_reference(reference, face)
        });
        self.bindings.stencil_ref_set = true;
    }

    fn set_uniforms(&mut self, first: u32, data: &[u8]) {
        if let Some(r) = self.ctx.reporter("set_uniforms") {
            self.validate_uniforms(&r, first, data);
        }
        self.forward("set_uniforms", |native| native.set_uniforms(first, data));
    }

    fn begin_query(&mut self, heap: QueryHeapId, query: u32) {
        if !self.validate_begin_query(heap, query) {
            return;
        }
        self.forward("begin_query", |native| native.begin_query(heap, query));
        self.set_query_state(heap, query, QueryState::Busy);
        self.record.query_sections += 1;
    }

    fn end_query(&mut self, heap: QueryHeapId, query: u32) {
        if !self.validate_end_query(heap, query) {
            return;
        }
        self.forward("end_query", |native| native.end_query(heap, query));
        self.set_query_state(heap, query, QueryState::Ready);
    }

    fn begin_render_condition(&mut self, heap: QueryHeapId, query: u32, mode: RenderConditionMode) {
        if !self.validate_begin_render_condition(heap, query) {
            return;
        }
        self.forward("begin_render_condition", |native| {
            native.begin_render_condition(heap, query, mode)
        });
        self.state.render_condition_active = true;
        self.record.render_condition_sections += 1;
    }

    fn end_render_condition(&mut self) {
        if let Some(r) = self.ctx.reporter("end_render_condition") {
            self.assert_recording(&r);
            if !self.state.render_condition_active {
                r.error(
                    ErrorType::InvalidState,
                    "cannot end render condition that was not begun",
                );
            }
        }
        self.forward("end_render_condition", |native| native.end_render_condition());
        self.state.render_condition_active = false;
    }

    fn begin_stream_output(&mut self, buffers: &[BufferId]) {
        if !self.validate_begin_stream_output(buffers) {
            return;
        }
        self.forward("begin_stream_output", |native| native.begin_stream_output(buffers));
        {
            let mut registry = self.ctx.registry.lock();
            for &buffer in buffers {
                registry.mark_initialized(buffer);
            }
        }
        self.state.stream_output_busy = true;
        self.bindings.stream_outputs = buffers.to_vec();
        self.record.stream_output_sections += 1;
    }

    fn end_stream_output(&mut self) {
        if let Some(r) = self.ctx.reporter("end_stream_output") {
            self.assert_recording(&r);
            if !self.state.stream_output_busy {
                r.error(
                    ErrorType::InvalidState,
                    "cannot end stream-output that was not begun",
                );
            }
        }
        self.forward("end_stream_output", |native| native.end_stream_output());
        self.state.stream_output_busy = false;
        self.bindings.stream_outputs.clear();
    }

    fn begin_render_pass(&mut self, render_target: RenderTargetId, clear_values: &[ClearValue]) {
        let Some(nested) = self.validate_begin_render_pass(render_target, clear_values) else {
            return;
        };
        self.forward("begin_render_pass", |native| {
            native.begin_render_pass(render_target, clear_values)
        });
        if !nested {
            self.state.inside_render_pass = true;
            self.bindings.render_target = Some(render_target);
            self.record.render_pass_sections += 1;
        }
    }

    fn end_render_pass(&mut self) {
        if let Some(r) = self.ctx.reporter("end_render_pass") {
            self.assert_recording(&r);
            if !self.state.inside_render_pass {
                r.error(
                    ErrorType::InvalidState,
                    "cannot end render pass that was not begun",
                );
            }
        }
        self.forward("end_render_pass", |native| native.end_render_pass());
        self.state.inside_render_pass = false;
        self.bindings.render_target = None;
    }

    fn clear(&mut self, flags: ClearFlags, clear_value: &ClearValue) {
        if let Some(r) = self.ctx.reporter("clear") {
            self.validate_clear(&r, flags);
        }
        self.timed("clear", |native| native.clear(flags, clear_value));
        self.record.attachment_clears += 1;
    }

    fn clear_attachments(&mut self, attachments: &[AttachmentClear]) {
        if let Some(r) = self.ctx.reporter("clear_attachments") {
            self.validate_clear_attachments(&r, attachments);
        }
        self.timed("clear_attachments", |native| native.clear_attachments(attachments));
        self.record.attachment_clears += attachments.len() as u32;
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        if let Some(r) = self.ctx.reporter("draw") {
            self.validate_draw(&r, &vertices, &instances);
        }
        self.timed("draw", |native| native.draw(vertices, instances));
        self.record.draw_commands += 1;
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        if let Some(r) = self.ctx.reporter("draw_indexed") {
            self.validate_draw_indexed(&r, &indices, base_vertex, &instances);
        }
        self.timed("draw_indexed", |native| {
            native.draw_indexed(indices, base_vertex, instances)
        });
        self.record.draw_commands += 1;
    }

    fn draw_indirect(&mut self, buffer: BufferId, offset: u64, num_commands: u32, stride: u32) {
        if !self.validate_draw_indirect("draw_indirect", buffer, offset, num_commands, stride, false) {
            return;
        }
        self.timed("draw_indirect", |native| {
            native.draw_indirect(buffer, offset, num_commands, stride)
        });
        self.record.draw_commands += 1;
    }

    fn draw_indexed_indirect(&mut self, buffer: BufferId, offset: u64, num_commands: u32, stride: u32) {
        if !self.validate_draw_indirect("draw_indexed_indirect", buffer, offset, num_commands, stride, true) {
            return;
        }
        self.timed("draw_indexed_indirect", |native| {
            native.draw_indexed_indirect(buffer, offset, num_commands, stride)
        });
        self.record.draw_commands += 1;
    }

    fn dispatch(&mut self, work_groups_x: u32, work_groups_y: u32, work_groups_z: u32) {
        if let Some(r) = self.ctx.reporter("dispatch") {
            self.validate_dispatch(&r, [work_groups_x, work_groups_y, work_groups_z]);
        }
        self.timed("dispatch", |native| {
            native.dispatch(work_groups_x, work_groups_y, work_groups_z)
        });
        self.record.dispatch_commands += 1;
    }

    fn dispatch_indirect(&mut self, buffer: BufferId, offset: u64) {
        if !self.validate_dispatch_indirect(buffer, offset) {
            return;
        }
        self.timed("dispatch_indirect", |native| native.dispatch_indirect(buffer, offset));
        self.record.dispatch_commands += 1;
    }

    fn push_debug_group(&mut self, name: &str) {
        if let Some(r) = self.ctx.reporter("push_debug_group") {
            self.assert_recording(&r);
        }
        self.forward("push_debug_group", |native| native.push_debug_group(name));
        self.state.debug_group_depth += 1;
    }

    fn pop_debug_group(&mut self) {
        if let Some(r) = self.ctx.reporter("pop_debug_group") {
            self.assert_recording(&r);
            if self.state.debug_group_depth == 0 {
                r.error(
                    ErrorType::InvalidState,
                    "cannot pop debug group: no debug group was pushed",
                );
            }
        }
        self.forward("pop_debug_group", |native| native.pop_debug_group());
        self.state.debug_group_depth = self.state.debug_group_depth.saturating_sub(1);
    }
}
