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

//! A recording native backend and fixtures shared by the integration tests.
//!
//! [`MockDevice`] accepts every call, hands out sequential IDs and appends a
//! [`NativeCall`] to a shared log, so tests can assert exactly what the debug
//! layer forwarded.

#![allow(dead_code)]

use parking_lot::Mutex;
use sentinel_core::renderer::{
    AttachmentClear, AttachmentDescriptor, BindFlags, BufferDescriptor, BufferId, BufferMapping,
    ClearFlags, ClearValue, CommandBufferDescriptor, ComputePipelineDescriptor, CpuAccess,
    CpuAccessFlags, Extent2D, Extent3D, FenceId, Format, GraphicsBackendType,
    GraphicsPipelineDescriptor, ImageView, MutableImageView, ObjectId, PipelineLayoutDescriptor,
    PipelineLayoutId, PipelineStateDescriptor, PipelineStateId, PrimitiveTopology,
    QueryHeapDescriptor, QueryHeapId, RenderConditionMode, RenderTargetDescriptor,
    RenderTargetId, RenderingCapabilities, ResourceError, ResourceHeapDescriptor, ResourceHeapId,
    ResourceId, ResourceViewDescriptor, SamplerDescriptor, SamplerId, Scissor, ShaderDescriptor,
    ShaderId, ShaderSource, ShaderType, StencilFace, TextureDescriptor, TextureId,
    TextureLocation, TextureRegion, TextureViewDescriptor, VertexAttribute,
    VertexShaderAttributes, Viewport,
};
use sentinel_core::{CommandBuffer, CommandQueue, RenderDevice};
use sentinel_debug::{DebugLayerConfig, DebugRenderDevice};
use sentinel_telemetry::{FrameProfiler, ReportLog};
use std::ops::Range;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// A call that reached the native backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    /// A device-level call, e.g. `"create_buffer"`.
    Device(&'static str),
    /// A recorded command other than a query, e.g. `"draw"`.
    Command(&'static str),
    /// A `begin_query` command.
    BeginQuery(QueryHeapId, u32),
    /// An `end_query` command.
    EndQuery(QueryHeapId, u32),
    /// A queue-level call, e.g. `"submit"`.
    Queue(&'static str),
}

/// The call log shared by the mock device, its queue and its command buffers.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<NativeCall>>>);

impl CallLog {
    pub fn push(&self, call: NativeCall) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    pub fn count(&self, call: &NativeCall) -> usize {
        self.0.lock().iter().filter(|c| *c == call).count()
    }

    /// Names of the recorded commands, queries excluded.
    pub fn commands(&self) -> Vec<&'static str> {
        self.0
            .lock()
            .iter()
            .filter_map(|call| match call {
                NativeCall::Command(name) => Some(*name),
                _ => None,
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock backend
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MockQueue {
    log: CallLog,
    results_ready: AtomicBool,
    elapsed_time: AtomicU64,
}

impl MockQueue {
    /// Controls whether `query_result` succeeds.
    pub fn set_results_ready(&self, ready: bool) {
        self.results_ready.store(ready, Ordering::SeqCst);
    }

    /// The value written into every 8-byte query result.
    pub fn set_elapsed_time(&self, nanoseconds: u64) {
        self.elapsed_time.store(nanoseconds, Ordering::SeqCst);
    }
}

impl CommandQueue for MockQueue {
    fn submit(&self, _command_buffer: &dyn CommandBuffer) {
        self.log.push(NativeCall::Queue("submit"));
    }

    fn submit_fence(&self, _fence: FenceId) {
        self.log.push(NativeCall::Queue("submit_fence"));
    }

    fn wait_fence(&self, _fence: FenceId, _timeout: u64) -> bool {
        self.log.push(NativeCall::Queue("wait_fence"));
        true
    }

    fn wait_idle(&self) {
        self.log.push(NativeCall::Queue("wait_idle"));
    }

    fn query_result(&self, _heap: QueryHeapId, _first_query: u32, _num_queries: u32, out: &mut [u8]) -> bool {
        self.log.push(NativeCall::Queue("query_result"));
        if !self.results_ready.load(Ordering::SeqCst) {
            return false;
        }
        let value = self.elapsed_time.load(Ordering::SeqCst).to_ne_bytes();
        for chunk in out.chunks_mut(8) {
            chunk.copy_from_slice(&value[..chunk.len()]);
        }
        true
    }
}

pub struct MockCommandBuffer {
    log: CallLog,
}

impl MockCommandBuffer {
    fn command(&self, name: &'static str) {
        self.log.push(NativeCall::Command(name));
    }
}

impl CommandBuffer for MockCommandBuffer {
    fn begin(&mut self) {
        self.command("begin");
    }
    fn end(&mut self) {
        self.command("end");
    }
    fn update_buffer(&mut self, _dst: BufferId, _dst_offset: u64, _data: &[u8]) {
        self.command("update_buffer");
    }
    fn copy_buffer(&mut self, _dst: BufferId, _dst_offset: u64, _src: BufferId, _src_offset: u64, _size: u64) {
        self.command("copy_buffer");
    }
    fn copy_buffer_from_texture(
        &mut self,
        _dst: BufferId,
        _dst_offset: u64,
        _src: TextureId,
        _src_region: &TextureRegion,
        _row_stride: u32,
        _layer_stride: u32,
    ) {
        self.command("copy_buffer_from_texture");
    }
    fn fill_buffer(&mut self, _dst: BufferId, _dst_offset: u64, _value: u32, _size: u64) {
        self.command("fill_buffer");
    }
    fn copy_texture(
        &mut self,
        _dst: TextureId,
        _dst_location: &TextureLocation,
        _src: TextureId,
        _src_location: &TextureLocation,
        _extent: Extent3D,
    ) {
        self.command("copy_texture");
    }
    fn copy_texture_from_buffer(
        &mut self,
        _dst: TextureId,
        _dst_region: &TextureRegion,
        _src: BufferId,
        _src_offset: u64,
        _row_stride: u32,
        _layer_stride: u32,
    ) {
        self.command("copy_texture_from_buffer");
    }
    fn generate_mips(&mut self, _texture: TextureId) {
        self.command("generate_mips");
    }
    fn set_viewports(&mut self, _viewports: &[Viewport]) {
        self.command("set_viewports");
    }
    fn set_scissors(&mut self, _scissors: &[Scissor]) {
        self.command("set_scissors");
    }
    fn set_vertex_buffer(&mut self, _buffer: BufferId) {
        self.command("set_vertex_buffer");
    }
    fn set_vertex_buffers(&mut self, _buffers: &[BufferId]) {
        self.command("set_vertex_buffers");
    }
    fn set_index_buffer(&mut self, _buffer: BufferId, _format: Format, _offset: u64) {
        self.command("set_index_buffer");
    }
    fn set_resource_heap(&mut self, _heap: ResourceHeapId, _descriptor_set: u32) {
        self.command("set_resource_heap");
    }
    fn set_resource(&mut self, _descriptor: u32, _resource: ResourceId) {
        self.command("set_resource");
    }
    fn set_pipeline_state(&mut self, _pipeline_state: PipelineStateId) {
        self.command("set_pipeline_state");
    }
    fn set_blend_factor(&mut self, _color: [f32; 4]) {
        self.command("set_blend_factor");
    }
    fn set_stencil_reference(&mut self, _reference: u32, _face: StencilFace) {
        self.command("set_stencil_reference");
    }
    fn set_uniforms(&mut self, _first: u32, _data: &[u8]) {
        self.command("set_uniforms");
    }
    fn begin_query(&mut self, heap: QueryHeapId, query: u32) {
        self.log.push(NativeCall::BeginQuery(heap, query));
    }
    fn end_query(&mut self, heap: QueryHeapId, query: u32) {
        self.log.push(NativeCall::EndQuery(heap, query));
    }
    fn begin_render_condition(&mut self, _heap: QueryHeapId, _query: u32, _mode: RenderConditionMode) {
        self.command("begin_render_condition");
    }
    fn end_render_condition(&mut self) {
        self.command("end_render_condition");
    }
    fn begin_stream_output(&mut self, _buffers: &[BufferId]) {
        self.command("begin_stream_output");
    }
    fn end_stream_output(&mut self) {
        self.command("end_stream_output");
    }
    fn begin_render_pass(&mut self, _render_target: RenderTargetId, _clear_values: &[ClearValue]) {
        self.command("begin_render_pass");
    }
    fn end_render_pass(&mut self) {
        self.command("end_render_pass");
    }
    fn clear(&mut self, _flags: ClearFlags, _clear_value: &ClearValue) {
        self.command("clear");
    }
    fn clear_attachments(&mut self, _attachments: &[AttachmentClear]) {
        self.command("clear_attachments");
    }
    fn draw(&mut self, _vertices: Range<u32>, _instances: Range<u32>) {
        self.command("draw");
    }
    fn draw_indexed(&mut self, _indices: Range<u32>, _base_vertex: i32, _instances: Range<u32>) {
        self.command("draw_indexed");
    }
    fn draw_indirect(&mut self, _buffer: BufferId, _offset: u64, _num_commands: u32, _stride: u32) {
        self.command("draw_indirect");
    }
    fn draw_indexed_indirect(&mut self, _buffer: BufferId, _offset: u64, _num_commands: u32, _stride: u32) {
        self.command("draw_indexed_indirect");
    }
    fn dispatch(&mut self, _x: u32, _y: u32, _z: u32) {
        self.command("dispatch");
    }
    fn dispatch_indirect(&mut self, _buffer: BufferId, _offset: u64) {
        self.command("dispatch_indirect");
    }
    fn push_debug_group(&mut self, _name: &str) {
        self.command("push_debug_group");
    }
    fn pop_debug_group(&mut self) {
        self.command("pop_debug_group");
    }
}

/// A native device that accepts everything and records what it receives.
#[derive(Debug)]
pub struct MockDevice {
    log: CallLog,
    capabilities: RenderingCapabilities,
    queue: Arc<MockQueue>,
    next_id: AtomicUsize,
    mappings: Mutex<Vec<Box<[u8]>>>,
    query_heap_labels: Mutex<Vec<Option<String>>>,
}

impl MockDevice {
    pub fn new(capabilities: RenderingCapabilities) -> Self {
        let log = CallLog::default();
        Self {
            queue: Arc::new(MockQueue {
                log: log.clone(),
                results_ready: AtomicBool::new(true),
                elapsed_time: AtomicU64::new(1000),
            }),
            log,
            capabilities,
            next_id: AtomicUsize::new(1),
            mappings: Mutex::new(Vec::new()),
            query_heap_labels: Mutex::new(Vec::new()),
        }
    }

    /// Labels of every query heap created so far, in creation order.
    pub fn query_heap_labels(&self) -> Vec<Option<String>> {
        self.query_heap_labels.lock().clone()
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    pub fn queue(&self) -> &MockQueue {
        &self.queue
    }

    fn next(&self, name: &'static str) -> usize {
        self.log.push(NativeCall::Device(name));
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn call(&self, name: &'static str) -> Result<(), ResourceError> {
        self.log.push(NativeCall::Device(name));
        Ok(())
    }
}

impl RenderDevice for MockDevice {
    fn backend(&self) -> GraphicsBackendType {
        GraphicsBackendType::Null
    }

    fn capabilities(&self) -> RenderingCapabilities {
        self.capabilities
    }

    fn command_queue(&self) -> Arc<dyn CommandQueue> {
        self.queue.clone()
    }

    fn create_buffer(&self, _descriptor: &BufferDescriptor, _initial_data: Option<&[u8]>) -> Result<BufferId, ResourceError> {
        Ok(BufferId(self.next("create_buffer")))
    }

    fn release_buffer(&self, _id: BufferId) -> Result<(), ResourceError> {
        self.call("release_buffer")
    }

    fn write_buffer(&self, _id: BufferId, _offset: u64, _data: &[u8]) -> Result<(), ResourceError> {
        self.call("write_buffer")
    }

    fn read_buffer(&self, _id: BufferId, _offset: u64, _out: &mut [u8]) -> Result<(), ResourceError> {
        self.call("read_buffer")
    }

    fn map_buffer(&self, _id: BufferId, _access: CpuAccess, range: Range<u64>) -> Result<BufferMapping, ResourceError> {
        self.log.push(NativeCall::Device("map_buffer"));
        let len = range.end.saturating_sub(range.start) as usize;
        let mut memory = vec![0u8; len].into_boxed_slice();
        let ptr = NonNull::from(&mut memory[..]).cast::<u8>();
        self.mappings.lock().push(memory);
        Ok(BufferMapping { ptr, len })
    }

    fn unmap_buffer(&self, _id: BufferId) {
        self.log.push(NativeCall::Device("unmap_buffer"));
    }

    fn create_texture(&self, _descriptor: &TextureDescriptor, _initial_image: Option<&ImageView<'_>>) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next("create_texture")))
    }

    fn create_texture_view(&self, _shared_texture: TextureId, _descriptor: &TextureViewDescriptor) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next("create_texture_view")))
    }

    fn release_texture(&self, _id: TextureId) -> Result<(), ResourceError> {
        self.call("release_texture")
    }

    fn write_texture(&self, _id: TextureId, _region: &TextureRegion, _image: &ImageView<'_>) -> Result<(), ResourceError> {
        self.call("write_texture")
    }

    fn read_texture(&self, _id: TextureId, _region: &TextureRegion, _image: &mut MutableImageView<'_>) -> Result<(), ResourceError> {
        self.call("read_texture")
    }

    fn create_sampler(&self, _descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        Ok(SamplerId(self.next("create_sampler")))
    }

    fn release_sampler(&self, _id: SamplerId) -> Result<(), ResourceError> {
        self.call("release_sampler")
    }

    fn create_resource_heap(&self, _descriptor: &ResourceHeapDescriptor, _initial_views: &[ResourceViewDescriptor]) -> Result<ResourceHeapId, ResourceError> {
        Ok(ResourceHeapId(self.next("create_resource_heap")))
    }

    fn release_resource_heap(&self, _id: ResourceHeapId) -> Result<(), ResourceError> {
        self.call("release_resource_heap")
    }

    fn create_render_target(&self, _descriptor: &RenderTargetDescriptor) -> Result<RenderTargetId, ResourceError> {
        Ok(RenderTargetId(self.next("create_render_target")))
    }

    fn release_render_target(&self, _id: RenderTargetId) -> Result<(), ResourceError> {
        self.call("release_render_target")
    }

    fn create_shader(&self, _descriptor: &ShaderDescriptor) -> Result<ShaderId, ResourceError> {
        Ok(ShaderId(self.next("create_shader")))
    }

    fn release_shader(&self, _id: ShaderId) -> Result<(), ResourceError> {
        self.call("release_shader")
    }

    fn create_pipeline_layout(&self, _descriptor: &PipelineLayoutDescriptor) -> Result<PipelineLayoutId, ResourceError> {
        Ok(PipelineLayoutId(self.next("create_pipeline_layout")))
    }

    fn release_pipeline_layout(&self, _id: PipelineLayoutId) -> Result<(), ResourceError> {
        self.call("release_pipeline_layout")
    }

    fn create_pipeline_state(&self, _descriptor: &PipelineStateDescriptor) -> Result<PipelineStateId, ResourceError> {
        Ok(PipelineStateId(self.next("create_pipeline_state")))
    }

    fn release_pipeline_state(&self, _id: PipelineStateId) -> Result<(), ResourceError> {
        self.call("release_pipeline_state")
    }

    fn create_query_heap(&self, descriptor: &QueryHeapDescriptor) -> Result<QueryHeapId, ResourceError> {
        self.query_heap_labels.lock().push(descriptor.label.clone());
        Ok(QueryHeapId(self.next("create_query_heap")))
    }

    fn release_query_heap(&self, _id: QueryHeapId) -> Result<(), ResourceError> {
        self.call("release_query_heap")
    }

    fn create_fence(&self) -> Result<FenceId, ResourceError> {
        Ok(FenceId(self.next("create_fence")))
    }

    fn release_fence(&self, _id: FenceId) -> Result<(), ResourceError> {
        self.call("release_fence")
    }

    fn create_command_buffer(&self, _descriptor: &CommandBufferDescriptor) -> Result<Box<dyn CommandBuffer>, ResourceError> {
        self.log.push(NativeCall::Device("create_command_buffer"));
        Ok(Box::new(MockCommandBuffer {
            log: self.log.clone(),
        }))
    }

    fn set_name(&self, _object: ObjectId, _name: &str) {
        self.log.push(NativeCall::Device("set_name"));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

/// A debug device over a [`MockDevice`], with a report log and a profiler attached.
pub struct Harness {
    pub device: DebugRenderDevice,
    pub native: Arc<MockDevice>,
    pub report: Arc<ReportLog>,
    pub profiler: Arc<FrameProfiler>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_capabilities(RenderingCapabilities::default())
    }

    pub fn with_capabilities(capabilities: RenderingCapabilities) -> Self {
        Self::build(capabilities, DebugLayerConfig::default(), true)
    }

    /// A harness without a debugger: the layer only forwards.
    pub fn without_debugger() -> Self {
        Self::build(RenderingCapabilities::default(), DebugLayerConfig::default(), false)
    }

    pub fn with_config(config: DebugLayerConfig) -> Self {
        Self::build(RenderingCapabilities::default(), config, true)
    }

    fn build(capabilities: RenderingCapabilities, config: DebugLayerConfig, attach_debugger: bool) -> Self {
        sentinel_telemetry::init_logging();
        let native = Arc::new(MockDevice::new(capabilities));
        let report = Arc::new(ReportLog::new());
        let profiler = Arc::new(FrameProfiler::new());
        let mut builder = DebugRenderDevice::builder(native.clone())
            .with_profiler(profiler.clone())
            .with_config(config);
        if attach_debugger {
            builder = builder.with_debugger(report.clone());
        }
        Self {
            device: builder.build(),
            native,
            report,
            profiler,
        }
    }

    pub fn log(&self) -> &CallLog {
        self.native.log()
    }

    /// Asserts that nothing was reported, printing the report otherwise.
    pub fn assert_clean(&self) {
        let report = self.report.report();
        assert!(report.is_empty(), "unexpected report:\n{report}");
    }

    pub fn assert_reported(&self, needle: &str) {
        let report = self.report.report();
        assert!(
            report.contains(needle),
            "expected a report containing '{needle}', got:\n{report}"
        );
    }

    // --- Fixtures ---

    /// A 48-byte vertex buffer of four `position` vertices, initialized at creation.
    pub fn vertex_buffer(&self) -> BufferId {
        let desc = BufferDescriptor {
            label: Some("vertices".to_string()),
            size: 48,
            bind_flags: BindFlags::VERTEX_BUFFER | BindFlags::COPY_DST,
            vertex_attribs: vec![position_attrib()],
            ..Default::default()
        };
        self.device
            .create_buffer(&desc, Some(&[0u8; 48]))
            .expect("vertex buffer")
    }

    /// A 64-byte buffer with the given bind flags and no initial data.
    pub fn buffer(&self, bind_flags: BindFlags) -> BufferId {
        let desc = BufferDescriptor {
            size: 64,
            bind_flags,
            cpu_access_flags: CpuAccessFlags::READ_WRITE,
            ..Default::default()
        };
        self.device.create_buffer(&desc, None).expect("buffer")
    }

    /// An initialized 64-byte buffer of 32 `R16UInt` indices.
    pub fn index_buffer(&self) -> BufferId {
        let desc = BufferDescriptor {
            size: 64,
            format: Format::R16UInt,
            bind_flags: BindFlags::INDEX_BUFFER,
            ..Default::default()
        };
        self.device
            .create_buffer(&desc, Some(&[0u8; 64]))
            .expect("index buffer")
    }

    pub fn texture(&self, desc: &TextureDescriptor) -> TextureId {
        self.device.create_texture(desc, None).expect("texture")
    }

    pub fn render_target(&self) -> RenderTargetId {
        let desc = RenderTargetDescriptor {
            resolution: Extent2D {
                width: 64,
                height: 64,
            },
            samples: 1,
            color_attachments: vec![AttachmentDescriptor {
                format: Format::RGBA8UNorm,
                ..Default::default()
            }],
            ..Default::default()
        };
        self.device.create_render_target(&desc).expect("render target")
    }

    pub fn shader(&self, shader_type: ShaderType, vertex: VertexShaderAttributes) -> ShaderId {
        let desc = ShaderDescriptor {
            shader_type,
            source: ShaderSource::Code("void main() {}".to_string()),
            entry_point: "main".to_string(),
            vertex,
            ..Default::default()
        };
        self.device.create_shader(&desc).expect("shader")
    }

    /// A graphics pipeline whose vertex shader reads the `position` attribute.
    pub fn graphics_pipeline(&self, topology: PrimitiveTopology) -> PipelineStateId {
        let vertex_shader = self.shader(
            ShaderType::Vertex,
            VertexShaderAttributes {
                input_attribs: vec![position_attrib()],
                output_attribs: Vec::new(),
            },
        );
        let fragment_shader = self.shader(ShaderType::Fragment, VertexShaderAttributes::default());
        let desc = GraphicsPipelineDescriptor {
            vertex_shader: Some(vertex_shader),
            fragment_shader: Some(fragment_shader),
            primitive_topology: topology,
            ..Default::default()
        };
        self.device
            .create_pipeline_state(&desc.into())
            .expect("graphics pipeline")
    }

    pub fn compute_pipeline(&self) -> PipelineStateId {
        let compute_shader = self.shader(ShaderType::Compute, VertexShaderAttributes::default());
        let desc = ComputePipelineDescriptor {
            compute_shader: Some(compute_shader),
            ..Default::default()
        };
        self.device
            .create_pipeline_state(&desc.into())
            .expect("compute pipeline")
    }

    pub fn query_heap(&self, desc: &QueryHeapDescriptor) -> QueryHeapId {
        self.device.create_query_heap(desc).expect("query heap")
    }
}

pub fn position_attrib() -> VertexAttribute {
    VertexAttribute::new("position", Format::RGB32Float, 0, 12)
}
