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

//! Integration tests for per-command GPU timing through the query timer pool.

mod common;

use common::{Harness, NativeCall};
use sentinel_core::renderer::{
    BindFlags, ClearFlags, ClearValue, CommandBufferDescriptor, PrimitiveTopology, Viewport,
};
use sentinel_core::CommandBuffer;
use sentinel_debug::{DebugCommandBuffer, DebugLayerConfig};

fn timed_harness(config: DebugLayerConfig) -> Harness {
    let h = Harness::with_config(config);
    h.profiler.set_timing_enabled(true);
    h
}

fn command_buffer(h: &Harness) -> DebugCommandBuffer {
    h.device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap()
}

fn timer_queries(h: &Harness) -> (usize, usize) {
    let calls = h.log().calls();
    let begins = calls
        .iter()
        .filter(|call| matches!(call, NativeCall::BeginQuery(..)))
        .count();
    let ends = calls
        .iter()
        .filter(|call| matches!(call, NativeCall::EndQuery(..)))
        .count();
    (begins, ends)
}

#[test]
fn test_timed_commands_produce_time_records_in_order() {
    let h = timed_harness(DebugLayerConfig::default());
    let staging = h.buffer(BindFlags::COPY_DST);
    let vertices = h.vertex_buffer();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let target = h.render_target();
    let queue = h.device.command_queue();
    let mut cmd = command_buffer(&h);

    cmd.begin();
    cmd.fill_buffer(staging, 0, 0, 64);
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd.clear(ClearFlags::COLOR, &ClearValue::default());
    cmd.draw(0..3, 0..1);
    cmd.end_render_pass();
    cmd.end();
    queue.submit(&mut cmd);

    assert_eq!(timer_queries(&h), (3, 3));
    let profile = h.profiler.snapshot();
    let annotations: Vec<&str> = profile
        .time_records
        .iter()
        .map(|record| record.annotation.as_str())
        .collect();
    assert_eq!(annotations, vec!["fill_buffer", "clear", "draw"]);
    assert!(profile.time_records.iter().all(|record| record.elapsed_time == 1000));
}

#[test]
fn test_timer_query_brackets_the_command() {
    let h = timed_harness(DebugLayerConfig::default());
    let buffer = h.buffer(BindFlags::COPY_DST);
    let mut cmd = command_buffer(&h);

    cmd.begin();
    h.log().clear();
    cmd.fill_buffer(buffer, 0, 0, 16);

    let calls = h.log().calls();
    assert_eq!(calls.len(), 4);
    assert!(matches!(calls[0], NativeCall::Device("create_query_heap")));
    let NativeCall::BeginQuery(heap, 0) = calls[1] else {
        panic!("expected a begin-query, got {:?}", calls[1]);
    };
    assert_eq!(calls[2], NativeCall::Command("fill_buffer"));
    assert_eq!(calls[3], NativeCall::EndQuery(heap, 0));
}

#[test]
fn test_unresolved_queries_yield_zero_elapsed_time() {
    let h = timed_harness(DebugLayerConfig {
        max_query_poll_attempts: 3,
        ..Default::default()
    });
    h.native.queue().set_results_ready(false);
    let buffer = h.buffer(BindFlags::COPY_DST);
    let queue = h.device.command_queue();
    let mut cmd = command_buffer(&h);

    cmd.begin();
    cmd.fill_buffer(buffer, 0, 0, 16);
    cmd.end();
    queue.submit(&mut cmd);

    let profile = h.profiler.snapshot();
    assert_eq!(profile.time_records.len(), 1);
    assert_eq!(profile.time_records[0].elapsed_time, 0);
    assert_eq!(h.log().count(&NativeCall::Queue("query_result")), 3);
}

#[test]
fn test_pool_grows_by_whole_heaps_and_reuses_them() {
    let h = timed_harness(DebugLayerConfig {
        timer_queries_per_heap: 2,
        ..Default::default()
    });
    let buffer = h.buffer(BindFlags::COPY_DST);
    let queue = h.device.command_queue();
    let mut cmd = command_buffer(&h);

    for _ in 0..2 {
        cmd.begin();
        for _ in 0..5 {
            cmd.fill_buffer(buffer, 0, 0, 16);
        }
        cmd.end();
        queue.submit(&mut cmd);
    }

    assert_eq!(h.log().count(&NativeCall::Device("create_query_heap")), 3);
    assert_eq!(
        h.native.query_heap_labels(),
        ["sentinel.timer[0]", "sentinel.timer[1]", "sentinel.timer[2]"].map(|l| Some(l.to_string()))
    );
    assert_eq!(h.profiler.snapshot().time_records.len(), 10);

    drop(cmd);
    assert_eq!(h.log().count(&NativeCall::Device("release_query_heap")), 3);
}

#[test]
fn test_binding_commands_are_not_timed() {
    let h = timed_harness(DebugLayerConfig::default());
    let vertices = h.vertex_buffer();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let mut cmd = command_buffer(&h);

    cmd.begin();
    cmd.set_viewports(&[Viewport::new(0.0, 0.0, 64.0, 64.0)]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd.push_debug_group("bindings");
    cmd.pop_debug_group();
    cmd.end();

    assert_eq!(timer_queries(&h), (0, 0));
    assert_eq!(h.log().count(&NativeCall::Device("create_query_heap")), 0);
    assert!(cmd.take_time_records().is_empty());
}

#[test]
fn test_timing_disabled_issues_no_queries() {
    let h = Harness::new();
    let buffer = h.buffer(BindFlags::COPY_DST);
    let queue = h.device.command_queue();
    let mut cmd = command_buffer(&h);

    cmd.begin();
    cmd.fill_buffer(buffer, 0, 0, 16);
    cmd.update_buffer(buffer, 0, &[0u8; 16]);
    cmd.end();
    queue.submit(&mut cmd);

    assert_eq!(timer_queries(&h), (0, 0));
    assert!(h.profiler.snapshot().time_records.is_empty());
}

#[test]
fn test_timing_switch_takes_effect_at_begin() {
    let h = Harness::new();
    let buffer = h.buffer(BindFlags::COPY_DST);
    let mut cmd = command_buffer(&h);

    cmd.begin();
    h.profiler.set_timing_enabled(true);
    cmd.fill_buffer(buffer, 0, 0, 16);
    cmd.end();
    assert_eq!(timer_queries(&h), (0, 0));

    cmd.begin();
    cmd.fill_buffer(buffer, 0, 0, 16);
    cmd.end();
    assert_eq!(timer_queries(&h), (1, 1));
}
