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

//! Integration tests for draw and dispatch validation.

mod common;

use common::{position_attrib, Harness, NativeCall};
use sentinel_core::renderer::{
    BindFlags, BlendOp, BufferDescriptor, BufferId, CommandBufferDescriptor, Format,
    GraphicsPipelineDescriptor, PipelineLayoutDescriptor, PrimitiveTopology, RenderingCapabilities,
    ShaderType, UniformDescriptor, VertexAttribute, VertexShaderAttributes, Viewport,
};
use sentinel_core::{CommandBuffer, ErrorType, WarningType};
use sentinel_debug::DebugCommandBuffer;

/// Begins recording, opens a render pass and binds a triangle-strip pipeline
/// together with the four-vertex buffer of the harness.
fn ready_to_draw(h: &Harness, topology: PrimitiveTopology) -> DebugCommandBuffer {
    let vertices = h.vertex_buffer();
    let pso = h.graphics_pipeline(topology);
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();
    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_valid_draw_is_clean() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw(0..4, 0..1);
    cmd.end_render_pass();
    cmd.end();

    h.assert_clean();
    assert_eq!(cmd.record().draw_commands, 1);
    assert!(h.log().commands().contains(&"draw"));
}

#[test]
fn test_draw_without_pipeline_is_reported() {
    let h = Harness::new();
    let vertices = h.vertex_buffer();
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_vertex_buffer(vertices);
    cmd.draw(0..3, 0..1);

    h.assert_reported("no graphics pipeline state is bound");
}

#[test]
fn test_draw_without_vertex_buffer_is_reported() {
    let h = Harness::new();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.draw(0..3, 0..1);

    h.assert_reported("no vertex buffer is bound");
    assert_eq!(h.report.error_count(ErrorType::InvalidState), 1);
}

#[test]
fn test_draw_beyond_vertex_buffer_is_reported() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw(0..6, 0..1);

    h.assert_reported("vertex range out of bounds: 6 element(s) required");
}

#[test]
fn test_vertex_count_not_matching_topology_is_a_warning() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleList);

    cmd.draw(0..4, 0..1);

    h.assert_reported("vertex count is not a multiple of 3");
    assert!(!h.report.has_errors());
    assert_eq!(h.report.warning_count(WarningType::ImproperArgument), 1);
}

#[test]
fn test_zero_instances_is_a_warning() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw(0..4, 0..0);

    h.assert_reported("draw command with zero instances has no effect");
}

#[test]
fn test_instancing_without_feature_is_reported() {
    let mut caps = RenderingCapabilities::default();
    caps.features.has_instancing = false;
    caps.features.has_offset_instancing = false;
    let h = Harness::with_capabilities(caps);
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw(0..4, 1..3);

    h.assert_reported("instancing not supported");
    h.assert_reported("offset instancing not supported (first instance is 1)");
    assert_eq!(h.report.error_count(ErrorType::UnsupportedFeature), 2);
}

#[test]
fn test_vertex_layout_mismatch_is_reported() {
    let h = Harness::new();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleStrip);
    let target = h.render_target();
    let uv_buffer = h
        .device
        .create_buffer(
            &BufferDescriptor {
                size: 32,
                bind_flags: BindFlags::VERTEX_BUFFER,
                vertex_attribs: vec![VertexAttribute::new("uv", Format::RG32Float, 0, 8)],
                ..Default::default()
            },
            Some(&[0u8; 32]),
        )
        .unwrap();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(uv_buffer);
    cmd.draw(0..4, 0..1);

    h.assert_reported("vertex layout mismatch between shader attribute 'position'");
}

#[test]
fn test_uninitialized_vertex_buffer_is_undefined_behavior() {
    let h = Harness::new();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleStrip);
    let target = h.render_target();
    let empty = h
        .device
        .create_buffer(
            &BufferDescriptor {
                size: 48,
                bind_flags: BindFlags::VERTEX_BUFFER,
                vertex_attribs: vec![position_attrib()],
                ..Default::default()
            },
            None,
        )
        .unwrap();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(empty);
    cmd.draw(0..4, 0..1);

    assert_eq!(h.report.error_count(ErrorType::UndefinedBehavior), 1);
    h.assert_reported("is bound");
}

#[test]
fn test_dynamic_blend_factor_must_be_set_before_draw() {
    let h = Harness::new();
    let vertices = h.vertex_buffer();
    let target = h.render_target();
    let vertex_shader = h.shader(
        ShaderType::Vertex,
        VertexShaderAttributes {
            input_attribs: vec![position_attrib()],
            output_attribs: Vec::new(),
        },
    );
    let fragment_shader = h.shader(ShaderType::Fragment, VertexShaderAttributes::default());
    let mut desc = GraphicsPipelineDescriptor {
        vertex_shader: Some(vertex_shader),
        fragment_shader: Some(fragment_shader),
        primitive_topology: PrimitiveTopology::TriangleStrip,
        ..Default::default()
    };
    desc.blend.blend_factor_dynamic = true;
    desc.blend.targets[0].blend_enabled = true;
    desc.blend.targets[0].src_color = BlendOp::BlendFactor;
    let pso = h.device.create_pipeline_state(&desc.into()).unwrap();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);
    cmd.draw(0..4, 0..1);
    h.assert_reported("uses a dynamic blend factor, but set_blend_factor was not called");

    h.report.clear();
    cmd.set_blend_factor([0.5; 4]);
    cmd.draw(0..4, 0..1);
    h.assert_clean();
}

// ─────────────────────────────────────────────────────────────────────────────
// Indexed and indirect draws
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_draw_indexed_without_index_buffer_is_reported() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw_indexed(0..6, 0, 0..1);

    h.assert_reported("no index buffer is bound");
}

#[test]
fn test_draw_indexed_beyond_index_buffer_is_reported() {
    let h = Harness::new();
    let indices = h.index_buffer();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.set_index_buffer(indices, Format::R16UInt, 0);
    cmd.draw_indexed(0..32, 0, 0..1);
    h.assert_clean();

    cmd.draw_indexed(0..36, 0, 0..1);
    h.assert_reported("index range out of bounds: [0, 36) exceeds the 32 index(es)");
}

#[test]
fn test_invalid_index_format_is_reported() {
    let h = Harness::new();
    let indices = h.index_buffer();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.set_index_buffer(indices, Format::RGBA8UNorm, 0);

    h.assert_reported("invalid index buffer format");
}

#[test]
fn test_indirect_draw_arguments_are_checked() {
    let h = Harness::new();
    let arguments = h.buffer(BindFlags::INDIRECT_BUFFER);
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw_indirect(arguments, 2, 1, 16);

    h.assert_reported("indirect argument offset must be a multiple of 4, but is 2");
    h.assert_reported("is uninitialized");
    assert_eq!(cmd.record().draw_commands, 1);
}

#[test]
fn test_indirect_draw_requires_indirect_flag() {
    let h = Harness::new();
    let arguments = h.buffer(BindFlags::VERTEX_BUFFER);
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);

    cmd.draw_indirect(arguments, 0, 0, 16);

    h.assert_reported("was not created with the required bind flags");
    h.assert_reported("indirect command with zero commands has no effect");
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_dispatch_with_compute_pipeline_is_clean() {
    let h = Harness::new();
    let pso = h.compute_pipeline();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.set_pipeline_state(pso);
    cmd.dispatch(8, 8, 1);
    cmd.end();

    h.assert_clean();
    assert_eq!(cmd.record().compute_pipeline_bindings, 1);
    assert_eq!(cmd.record().dispatch_commands, 1);
}

#[test]
fn test_dispatch_with_graphics_pipeline_is_reported() {
    let h = Harness::new();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.set_pipeline_state(pso);
    cmd.dispatch(1, 1, 1);

    h.assert_reported("compute pipeline state required, but graphics pipeline state");
}

#[test]
fn test_dispatch_limits_and_empty_dispatch() {
    let h = Harness::new();
    let pso = h.compute_pipeline();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.set_pipeline_state(pso);
    cmd.dispatch(70_000, 1, 1);
    cmd.dispatch(0, 1, 1);

    h.assert_reported("number of work groups exceeds limit on X axis (70000 specified, but limit is 65535)");
    h.assert_reported("dispatch with zero work groups has no effect");
    assert_eq!(cmd.record().dispatch_commands, 2);
}

#[test]
fn test_dispatch_inside_render_pass_is_reported() {
    let h = Harness::new();
    let pso = h.compute_pipeline();
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.dispatch(1, 1, 1);

    h.assert_reported("operation is not allowed inside a render pass");
}

// ─────────────────────────────────────────────────────────────────────────────
// Repeated draws and vertex capacity
// ─────────────────────────────────────────────────────────────────────────────

/// An initialized vertex buffer of `count` `position` vertices.
fn vertex_buffer_of(h: &Harness, count: u64) -> BufferId {
    let size = count * 12;
    let desc = BufferDescriptor {
        size,
        bind_flags: BindFlags::VERTEX_BUFFER,
        vertex_attribs: vec![position_attrib()],
        ..Default::default()
    };
    h.device
        .create_buffer(&desc, Some(&vec![0u8; size as usize]))
        .unwrap()
}

#[test]
fn test_triangle_list_vertex_count_remainder() {
    let h = Harness::new();
    let vertices = vertex_buffer_of(&h, 8);
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();
    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_vertex_buffer(vertices);

    cmd.draw(0..6, 0..1);
    h.assert_clean();

    cmd.draw(0..7, 0..1);
    h.assert_reported("7 % 3 != 0, 1 unused");
    assert_eq!(h.report.warning_count(WarningType::ImproperArgument), 1);
    assert!(!h.report.has_errors());
}

#[test]
fn test_each_draw_without_vertex_buffer_is_reported_and_forwarded() {
    let h = Harness::new();
    let pso = h.graphics_pipeline(PrimitiveTopology::TriangleList);
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();
    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);

    for _ in 0..3 {
        cmd.draw(0..3, 0..1);
    }

    assert_eq!(h.report.error_count(ErrorType::InvalidState), 3);
    assert_eq!(h.log().count(&NativeCall::Command("draw")), 3);
    assert_eq!(cmd.record().draw_commands, 3);
}

#[test]
fn test_per_instance_buffer_bounds_the_instance_range() {
    let h = Harness::new();
    let mut cmd = ready_to_draw(&h, PrimitiveTopology::TriangleStrip);
    let vertices = h.vertex_buffer();
    let offsets = h
        .device
        .create_buffer(
            &BufferDescriptor {
                size: 24,
                bind_flags: BindFlags::VERTEX_BUFFER,
                vertex_attribs: vec![VertexAttribute::new("offset", Format::RGB32Float, 1, 12)
                    .with_slot(1)
                    .with_instance_divisor(1)],
                ..Default::default()
            },
            Some(&[0u8; 24]),
        )
        .unwrap();
    cmd.set_vertex_buffers(&[vertices, offsets]);

    cmd.draw(0..4, 0..3);

    h.assert_reported("instance range out of bounds: 3 element(s) required");
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewports
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_viewport_with_nan_size_is_reported() {
    let h = Harness::new();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.set_viewports(&[Viewport::new(0.0, 0.0, f32::NAN, 64.0)]);

    h.assert_reported("viewport[0] has an undefined size");
    assert_eq!(h.report.error_count(ErrorType::InvalidArgument), 1);
}

#[test]
fn test_uniform_index_is_bounded_by_the_pipeline_layout() {
    let h = Harness::new();
    let uniform = |name: &str| UniformDescriptor {
        name: name.to_string(),
        size: 16,
    };
    let layout = h
        .device
        .create_pipeline_layout(&PipelineLayoutDescriptor {
            uniforms: vec![uniform("model"), uniform("tint")],
            ..Default::default()
        })
        .unwrap();
    let vertex_shader = h.shader(
        ShaderType::Vertex,
        VertexShaderAttributes {
            input_attribs: vec![position_attrib()],
            output_attribs: Vec::new(),
        },
    );
    let pso = h
        .device
        .create_pipeline_state(
            &GraphicsPipelineDescriptor {
                pipeline_layout: Some(layout),
                vertex_shader: Some(vertex_shader),
                fragment_shader: Some(h.shader(ShaderType::Fragment, VertexShaderAttributes::default())),
                ..Default::default()
            }
            .into(),
        )
        .unwrap();
    let target = h.render_target();
    let mut cmd = h
        .device
        .create_command_buffer(&CommandBufferDescriptor::default())
        .unwrap();

    cmd.begin();
    cmd.begin_render_pass(target, &[]);
    cmd.set_pipeline_state(pso);
    cmd.set_uniforms(1, &[0; 16]);
    h.assert_clean();

    cmd.set_uniforms(2, &[0; 4]);
    assert_eq!(h.report.error_count(ErrorType::InvalidArgument), 1);
    h.assert_reported("uniform index 2 out of range (2 uniform(s) in pipeline layout)");
}
