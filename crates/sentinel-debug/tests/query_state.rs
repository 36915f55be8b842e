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

//! Integration tests for query slot tracking, render conditions, stream-output
//! sections and query result retrieval through the queue.

mod common;

use common::{Harness, NativeCall};
use sentinel_core::renderer::{
    BindFlags, CommandBufferDescriptor, QueryHeapDescriptor, QueryHeapId, QueryType,
    RenderConditionMode, RenderingCapabilities,
};
use sentinel_core::{CommandBuffer, ErrorType};

fn occlusion_heap(h: &Harness, render_condition: bool) -> QueryHeapId {
    h.query_heap(&QueryHeapDescriptor {
        label: Some("occlusion".to_string()),
        query_type: QueryType::SamplesPassed,
        num_queries: 4,
        render_condition,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Query sections
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_begin_end_query_is_clean() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 0);
    cmd.end_query(heap, 0);
    cmd.end();

    h.assert_clean();
    assert_eq!(cmd.record().query_sections, 1);
    assert_eq!(h.log().count(&NativeCall::BeginQuery(heap, 0)), 1);
    assert_eq!(h.log().count(&NativeCall::EndQuery(heap, 0)), 1);
}

#[test]
fn test_begin_query_twice_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 1);
    cmd.begin_query(heap, 1);

    h.assert_reported("query 1 of heap 'occlusion' is already in progress");
    assert_eq!(h.report.error_count(ErrorType::InvalidState), 1);
}

#[test]
fn test_end_query_without_begin_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.end_query(heap, 2);

    h.assert_reported("query 2 of heap 'occlusion' has not been begun");
}

#[test]
fn test_query_index_out_of_bounds_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 4);

    h.assert_reported("query index out of bounds (4 specified, but query heap 'occlusion' has 4 queries)");
}

#[test]
fn test_unknown_query_heap_is_dropped() {
    let h = Harness::new();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(QueryHeapId(555), 0);

    h.assert_reported("query heap QueryHeapId(555) is null");
    assert_eq!(h.log().count(&NativeCall::BeginQuery(QueryHeapId(555), 0)), 0);
    assert_eq!(cmd.record().query_sections, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Query results
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_result_after_end_is_clean() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 0);
    cmd.end_query(heap, 0);
    cmd.end();
    queue.submit(&mut cmd);

    let mut out = [0u8; 8];
    assert!(queue.query_result(heap, 0, 1, &mut out));
    assert_eq!(u64::from_ne_bytes(out), 1000);
    h.assert_clean();
}

#[test]
fn test_every_slot_of_a_heap_can_be_recorded_and_read_back() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    for query in 0..4 {
        cmd.begin_query(heap, query);
        cmd.end_query(heap, query);
    }
    cmd.end();
    queue.submit(&mut cmd);

    let mut out = [0u8; 32];
    assert!(queue.query_result(heap, 0, 4, &mut out));
    h.assert_clean();
    assert_eq!(cmd.record().query_sections, 0);
    assert_eq!(h.profiler.snapshot().command_buffer_record.query_sections, 4);
}

#[test]
fn test_busy_query_cannot_be_begun_or_read_back() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 3);
    cmd.begin_query(heap, 3);
    let mut out = [0u8; 8];
    queue.query_result(heap, 3, 1, &mut out);

    h.assert_reported("query 3 of heap 'occlusion' is already in progress");
    h.assert_reported("requested before the query has ended");
    assert_eq!(h.report.error_count(ErrorType::InvalidState), 2);
}

#[test]
fn test_query_result_before_end_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 0);

    let mut out = [0u8; 8];
    queue.query_result(heap, 0, 1, &mut out);

    h.assert_reported("requested before the query has ended");
}

#[test]
fn test_query_result_of_unrecorded_query_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();

    let mut out = [0u8; 16];
    queue.query_result(heap, 2, 2, &mut out);

    h.assert_reported("query result for query 2 of heap 'occlusion' requested, but the query was never recorded");
    h.assert_reported("query 3 of heap 'occlusion'");
}

#[test]
fn test_query_result_into_small_buffer_is_not_forwarded() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();

    let mut out = [0u8; 12];
    assert!(!queue.query_result(heap, 0, 2, &mut out));

    h.assert_reported("query result buffer too small: 12 byte(s) provided, but 16 required");
    assert_eq!(h.log().count(&NativeCall::Queue("query_result")), 0);
}

#[test]
fn test_query_result_range_out_of_bounds_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let queue = h.device.command_queue();

    let mut out = [0u8; 24];
    queue.query_result(heap, 2, 3, &mut out);

    h.assert_reported("query range [2, 5) out of bounds");
}

// ─────────────────────────────────────────────────────────────────────────────
// Render conditions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_render_condition_on_completed_query_is_clean() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, true);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 0);
    cmd.end_query(heap, 0);
    cmd.begin_render_condition(heap, 0, RenderConditionMode::Wait);
    cmd.end_render_condition();
    cmd.end();

    h.assert_clean();
    assert_eq!(cmd.record().render_condition_sections, 1);
}

#[test]
fn test_render_condition_on_plain_heap_is_reported() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, false);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_condition(heap, 0, RenderConditionMode::NoWait);

    h.assert_reported("it was not created with render condition enabled");
    h.assert_reported("query 0 of heap 'occlusion' has not completed");
}

#[test]
fn test_render_condition_left_open_is_reported_at_end() {
    let h = Harness::new();
    let heap = occlusion_heap(&h, true);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_query(heap, 0);
    cmd.end_query(heap, 0);
    cmd.begin_render_condition(heap, 0, RenderConditionMode::Wait);
    cmd.begin_render_condition(heap, 0, RenderConditionMode::Wait);
    cmd.end();

    h.assert_reported("render condition is already active");
    h.assert_reported("cannot end command buffer while a render condition is active");
}

#[test]
fn test_end_render_condition_without_begin_is_reported() {
    let h = Harness::new();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.end_render_condition();

    h.assert_reported("cannot end render condition that was not begun");
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stream_output_section_is_tracked() {
    let h = Harness::new();
    let target = h.buffer(BindFlags::STREAM_OUTPUT_BUFFER);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_stream_output(&[target]);
    assert!(cmd.recording_state().stream_output_busy);
    cmd.begin_stream_output(&[target]);
    cmd.end_stream_output();
    cmd.end();

    h.assert_reported("stream-output is already active");
    assert_eq!(h.report.report().len(), 1);
    assert_eq!(cmd.record().stream_output_sections, 2);
}

#[test]
fn test_stream_output_without_feature_and_flag_is_reported() {
    let mut caps = RenderingCapabilities::default();
    caps.features.has_stream_outputs = false;
    let h = Harness::with_capabilities(caps);
    let plain = h.buffer(BindFlags::VERTEX_BUFFER);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_stream_output(&[plain]);
    cmd.end();

    h.assert_reported("stream-outputs not supported");
    h.assert_reported("was not created with the required bind flags");
    h.assert_reported("cannot end command buffer while stream-output is active");
}

#[test]
fn test_stream_output_limit_is_checked() {
    let h = Harness::new();
    let buffers: Vec<_> = (0..5)
        .map(|_| h.buffer(BindFlags::STREAM_OUTPUT_BUFFER))
        .collect();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_stream_output(&buffers);

    h.assert_reported("number of stream-output buffers exceeds limit (5 specified, but limit is 4)");
}

// ─────────────────────────────────────────────────────────────────────────────
// Query heap creation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_heap_creation_checks() {
    let mut caps = RenderingCapabilities::default();
    caps.features.has_pipeline_statistics = false;
    let h = Harness::with_capabilities(caps);

    h.query_heap(&QueryHeapDescriptor {
        query_type: QueryType::TimeElapsed,
        num_queries: 0,
        render_condition: true,
        ..Default::default()
    });
    h.query_heap(&QueryHeapDescriptor {
        query_type: QueryType::PipelineStatistics,
        num_queries: 1,
        ..Default::default()
    });

    h.assert_reported("cannot create query heap with zero queries");
    h.assert_reported("with render condition (only occlusion queries)");
    h.assert_reported("pipeline statistics queries not supported");
}
