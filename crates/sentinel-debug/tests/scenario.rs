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

//! End-to-end frames through the debug layer, with the telemetry sinks attached.

mod common;

use common::{Harness, MockDevice, NativeCall};
use parking_lot::Mutex;
use sentinel_core::renderer::{
    BindFlags, BufferId, ClearValue, CommandBufferDescriptor, FenceId, Format, PrimitiveTopology,
    RenderingCapabilities,
};
use sentinel_core::{CommandBuffer, Debugger, ErrorType, WarningType};
use sentinel_debug::{DebugCommandQueue, DebugLayerConfig, DebugRenderDevice};
use sentinel_telemetry::{ChannelDebugger, ReportKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_full_frame_is_clean_and_profiled() {
    let h = Harness::new();
    h.profiler.set_timing_enabled(true);
    let vertices = h.vertex_buffer();
    let indices = h.index_buffer();
    let constants = h.buffer(BindFlags::CONSTANT_BUFFER | BindFlags::COPY_DST);
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let target = h.render_target();
    let fence = h.device.create_fence().unwrap();
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor {
            label: Some("frame".to_string()),
            ..Default::default()
        })
        .unwrap();

    cmd.begin();
    cmd.push_debug_group("upload");
    cmd.update_buffer(vertices, 0, &[0u8; 12]);
    cmd.fill_buffer(constants, 0, 0, 64);
    cmd.pop_debug_group();
    cmd.begin_render_pass(target, &[ClearValue::default()]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd.set_index_buffer(indices, Format::R16UInt, 0);
    cmd.draw(0..3, 0..1);
    cmd.draw_indexed(0..6, 0, 0..2);
    cmd.end_render_pass();
    cmd.end();
    queue.submit(&mut cmd);
    queue.submit_fence(fence);
    assert!(queue.wait_fence(fence, u64::MAX));

    h.assert_clean();
    let profile = h.profiler.snapshot();
    let record = &profile.command_buffer_record;
    assert_eq!(record.encodings, 1);
    assert_eq!(record.buffer_updates, 1);
    assert_eq!(record.buffer_fills, 1);
    assert_eq!(record.render_pass_sections, 1);
    assert_eq!(record.draw_commands, 2);
    assert_eq!(profile.command_queue_record.command_buffer_submissions, 1);
    assert_eq!(profile.time_records.len(), 4);

    // The fence is counted in the queue record of the next submission.
    cmd.begin();
    cmd.end();
    queue.submit(&mut cmd);
    assert_eq!(h.profiler.snapshot().command_queue_record.fence_submissions, 1);

    let json = h.profiler.to_json().unwrap();
    assert!(json.contains("draw_commands"));
    assert!(json.contains("time_records"));
}

#[test]
fn test_unknown_fence_is_dropped() {
    let h = Harness::new();
    let queue = h.device.command_queue();

    queue.submit_fence(FenceId(42));
    assert!(!queue.wait_fence(FenceId(42), 0));

    h.assert_reported("fence FenceId(42) is null or has already been released");
    assert_eq!(h.log().count(&NativeCall::Queue("submit_fence")), 0);
    assert_eq!(h.log().count(&NativeCall::Queue("wait_fence")), 0);
}

#[test]
fn test_forwarded_call_order_matches_the_recording() {
    let h = Harness::new();
    let vertices = h.vertex_buffer();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleStrip);
    let target = h.render_target();
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();
    h.log().clear();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd.draw(0..4, 0..1);
    cmd.end_render_pass();
    cmd.end();
    queue.submit(&mut cmd);
    queue.wait_idle();

    assert_eq!(
        h.log().calls(),
        vec![
            NativeCall::Command("begin"),
            NativeCall::Command("begin_render_pass"),
            NativeCall::Command("set_pipeline_state"),
            NativeCall::Command("set_vertex_buffer"),
            NativeCall::Command("draw"),
            NativeCall::Command("end_render_pass"),
            NativeCall::Command("end"),
            NativeCall::Queue("submit"),
            NativeCall::Queue("wait_idle"),
        ]
    );
}

#[test]
fn test_channel_debugger_receives_findings_with_their_source() {
    let (debugger, receiver) = ChannelDebugger::new();
    let device = DebugRenderDevice::builder(Arc::new(MockDevice::new(RenderingCapabilities::default())))
        .with_debugger(Arc::new(debugger))
        .build();
    let mut cmd = device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.draw(0..3, 0..1);
    cmd.end();

    let entries: Vec<_> = receiver.try_iter().collect();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|entry| entry.source == "draw"));
    assert!(entries
        .iter()
        .any(|entry| entry.kind == ReportKind::Error(ErrorType::InvalidState)));
}

#[test]
fn test_channel_debugger_feeds_another_thread() {
    let (debugger, receiver) = ChannelDebugger::new();
    let collector = thread::spawn(move || receiver.iter().map(|entry| entry.message).collect::<Vec<_>>());

    {
        let device = DebugRenderDevice::builder(Arc::new(MockDevice::new(RenderingCapabilities::default())))
            .with_debugger(Arc::new(debugger))
            .with_config(DebugLayerConfig::default())
            .build();
        let mut cmd = device
            .create_command_buffer(&CommandBufferDescriptor::default())
            .unwrap();
        cmd.begin();
        cmd.end_render_pass();
        cmd.end();
    }

    // Dropping the device and its command buffer closes the channel.
    let messages = collector.join().unwrap();
    assert_eq!(messages, vec!["cannot end render pass that was not begun".to_string()]);
}

#[test]
fn test_config_loaded_from_ron_controls_the_layer() {
    let config = DebugLayerConfig::from_ron_str("(validate: false, timer_queries_per_heap: 8)").unwrap();
    assert_eq!(config.timer_queries_per_heap, 8);
    let h = Harness::with_config(config);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.draw(0..3, 0..1);

    h.assert_clean();
    assert_eq!(cmd.record().draw_commands, 1);
}

/// Queries the device from inside its first error callback.
#[derive(Default)]
struct ReentrantDebugger {
    queue: Mutex<Option<DebugCommandQueue>>,
    reentered: AtomicBool,
    messages: Mutex<Vec<String>>,
}

impl Debugger for ReentrantDebugger {
    fn set_source(&self, _source: &str) {}

    fn post_error(&self, _error_type: ErrorType, message: &str) {
        self.messages.lock().push(message.to_owned());
        if self.reentered.swap(true, Ordering::SeqCst) {
            return;
        }
        let queue = self.queue.lock().clone();
        if let Some(queue) = queue {
            queue.wait_fence(FenceId(77), 0);
        }
    }

    fn post_warning(&self, _warning_type: WarningType, _message: &str) {}
}

#[test]
fn test_debugger_can_call_back_into_the_device() {
    let debugger = Arc::new(ReentrantDebugger::default());
    let device = DebugRenderDevice::builder(Arc::new(MockDevice::new(RenderingCapabilities::default())))
        .with_debugger(debugger.clone())
        .build();
    *debugger.queue.lock() = Some(device.command_queue());
    let mut cmd = device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.set_vertex_buffer(BufferId(404));

    let messages = debugger.messages.lock();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("BufferId(404) is null or has already been released"));
    assert_eq!(messages[1], "fence FenceId(77) is null or has already been released");
}
