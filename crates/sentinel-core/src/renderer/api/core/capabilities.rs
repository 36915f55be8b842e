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

//! Device capabilities: optional features and numeric limits.
//!
//! Both validators of the debug layer consult a snapshot of this table taken when
//! the layer is constructed.

/// Optional features a device may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderingFeatures {
    /// Render targets (offscreen framebuffers) are supported.
    pub has_render_targets: bool,
    /// 3D textures are supported.
    pub has_3d_textures: bool,
    /// Cube textures are supported.
    pub has_cube_textures: bool,
    /// 1D and 2D array textures are supported.
    pub has_array_textures: bool,
    /// Cube array textures are supported.
    pub has_cube_array_textures: bool,
    /// Multisample textures are supported.
    pub has_multi_sample_textures: bool,
    /// Texture views are supported.
    pub has_texture_views: bool,
    /// Texture views with a non-identity component swizzle are supported.
    pub has_texture_view_swizzle: bool,
    /// Constant buffers are supported.
    pub has_constant_buffers: bool,
    /// Storage buffers are supported.
    pub has_storage_buffers: bool,
    /// Geometry shaders are supported.
    pub has_geometry_shaders: bool,
    /// Tessellation shaders are supported.
    pub has_tessellation_shaders: bool,
    /// Compute shaders are supported.
    pub has_compute_shaders: bool,
    /// Instanced drawing is supported.
    pub has_instancing: bool,
    /// Instanced drawing with a non-zero first instance is supported.
    pub has_offset_instancing: bool,
    /// Indirect draw and dispatch commands are supported.
    pub has_indirect_drawing: bool,
    /// Multiple viewports can be bound at once.
    pub has_viewport_arrays: bool,
    /// Conservative rasterization is supported.
    pub has_conservative_rasterization: bool,
    /// Stream-output (transform feedback) is supported.
    pub has_stream_outputs: bool,
    /// Logic fragment operations are supported.
    pub has_logic_op: bool,
    /// Pipeline-statistics queries are supported.
    pub has_pipeline_statistics: bool,
    /// Conditional rendering is supported.
    pub has_render_condition: bool,
    /// Resources can be bound individually without a resource heap.
    pub has_direct_resource_binding: bool,
}

impl Default for RenderingFeatures {
    fn default() -> Self {
        Self {
            has_render_targets: true,
            has_3d_textures: true,
            has_cube_textures: true,
            has_array_textures: true,
            has_cube_array_textures: true,
            has_multi_sample_textures: true,
            has_texture_views: true,
            has_texture_view_swizzle: true,
            has_constant_buffers: true,
            has_storage_buffers: true,
            has_geometry_shaders: true,
            has_tessellation_shaders: true,
            has_compute_shaders: true,
            has_instancing: true,
            has_offset_instancing: true,
            has_indirect_drawing: true,
            has_viewport_arrays: true,
            has_conservative_rasterization: false,
            has_stream_outputs: true,
            has_logic_op: true,
            has_pipeline_statistics: true,
            has_render_condition: true,
            has_direct_resource_binding: true,
        }
    }
}

/// Numeric device limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderingLimits {
    /// Range of supported line widths `[min, max]`.
    pub line_width_range: [f32; 2],
    /// Maximum number of array layers in an array texture.
    pub max_texture_array_layers: u32,
    /// Maximum number of color attachments in a render target.
    pub max_color_attachments: u32,
    /// Maximum number of control points per patch.
    pub max_patch_vertices: u32,
    /// Maximum width of a 1D texture.
    pub max_1d_texture_size: u32,
    /// Maximum width and height of a 2D texture.
    pub max_2d_texture_size: u32,
    /// Maximum width, height and depth of a 3D texture.
    pub max_3d_texture_size: u32,
    /// Maximum width and height of a cube texture face.
    pub max_cube_texture_size: u32,
    /// Maximum sampler anisotropy.
    pub max_anisotropy: u32,
    /// Maximum number of samples of a multisample texture.
    pub max_samples: u32,
    /// Maximum number of work groups per dispatch, per axis.
    pub max_compute_shader_work_groups: [u32; 3],
    /// Maximum work-group size declared by a compute shader, per axis.
    pub max_compute_shader_work_group_size: [u32; 3],
    /// Maximum number of simultaneously bound viewports.
    pub max_viewports: u32,
    /// Maximum viewport width and height.
    pub max_viewport_size: [u32; 2],
    /// Maximum size of any buffer in bytes.
    pub max_buffer_size: u64,
    /// Maximum size of a constant buffer in bytes.
    pub max_constant_buffer_size: u64,
    /// Maximum number of simultaneously bound stream-output buffers.
    pub max_stream_outputs: u32,
}

impl Default for RenderingLimits {
    fn default() -> Self {
        Self {
            line_width_range: [1.0, 1.0],
            max_texture_array_layers: 2048,
            max_color_attachments: 8,
            max_patch_vertices: 32,
            max_1d_texture_size: 16384,
            max_2d_texture_size: 16384,
            max_3d_texture_size: 2048,
            max_cube_texture_size: 16384,
            max_anisotropy: 16,
            max_samples: 8,
            max_compute_shader_work_groups: [65535, 65535, 65535],
            max_compute_shader_work_group_size: [1024, 1024, 64],
            max_viewports: 16,
            max_viewport_size: [16384, 16384],
            max_buffer_size: u64::from(u32::MAX),
            max_constant_buffer_size: 65536,
            max_stream_outputs: 4,
        }
    }
}

/// The complete capability table reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderingCapabilities {
    /// Optional features.
    pub features: RenderingFeatures,
    /// Numeric limits.
    pub limits: RenderingLimits,
}
