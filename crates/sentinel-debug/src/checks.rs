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

//! Checks shared by the device-level and the command-level validators.

use crate::report::Reporter;
use crate::wrappers::{DebugBuffer, DebugObject, DebugTexture};
use sentinel_core::renderer::{
    BindFlags, Extent3D, GraphicsBackendType, Offset3D, PrimitiveTopology, RenderingCapabilities,
    RenderingLimits, ResourceType, Scissor, TextureLocation, TextureRegion, TextureType,
    TextureViewDescriptor, Viewport,
};
use sentinel_core::{ErrorType, WarningType};

/// Reports bind flags that are illegal for the given resource type.
pub(crate) fn bind_flags_for(r: &Reporter, flags: BindFlags, resource_type: ResourceType) {
    if !BindFlags::all().contains(flags) {
        r.error(
            ErrorType::InvalidArgument,
            format!("unknown bind flags: {:#x}", flags.bits()),
        );
    }
    let (illegal, kind) = match resource_type {
        ResourceType::Buffer => (flags & BindFlags::TEXTURE_ONLY, "texture-only"),
        ResourceType::Texture => (flags & BindFlags::BUFFER_ONLY, "buffer-only"),
        ResourceType::Sampler => (flags, "any"),
        ResourceType::Undefined => (BindFlags::empty(), ""),
    };
    if !illegal.is_empty() {
        r.error(
            ErrorType::InvalidArgument,
            format!("cannot create {resource_type} with {kind} bind flags: {illegal:?}"),
        );
    }
    if flags.contains(BindFlags::ATTACHMENTS) {
        r.error(
            ErrorType::InvalidArgument,
            "cannot combine color and depth-stencil attachment bind flags",
        );
    }
}

/// Reports `required` bind flags missing from a resource. Returns `true` when none are missing.
pub(crate) fn required_bind_flags(
    r: &Reporter,
    what: &str,
    name: &str,
    actual: BindFlags,
    required: BindFlags,
) -> bool {
    let missing = required - actual;
    if missing.is_empty() {
        return true;
    }
    r.error(
        ErrorType::InvalidArgument,
        format!("{what} {name} was not created with the required bind flags {missing:?}"),
    );
    false
}

/// Reports a byte range exceeding the buffer size. The upper bound is inclusive.
pub(crate) fn buffer_range(r: &Reporter, buffer: &DebugBuffer, offset: u64, size: u64) -> bool {
    match offset.checked_add(size) {
        Some(end) if end <= buffer.size() => true,
        _ => {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "buffer range out of bounds: offset {offset} + size {size} exceeds size of buffer {} ({})",
                    buffer.name(),
                    buffer.size()
                ),
            );
            false
        }
    }
}

/// Reports a MIP/layer range outside the texture.
pub(crate) fn texture_subresource(
    r: &Reporter,
    texture: &DebugTexture,
    base_mip_level: u32,
    num_mip_levels: u32,
    base_array_layer: u32,
    num_array_layers: u32,
) -> bool {
    let mut valid = true;
    if num_mip_levels == 0 || num_array_layers == 0 {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "empty subresource range for texture {}: {num_mip_levels} MIP level(s), {num_array_layers} array layer(s)",
                texture.name()
            ),
        );
        valid = false;
    }
    if u64::from(base_mip_level) + u64::from(num_mip_levels) > u64::from(texture.mip_levels) {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "MIP level range [{base_mip_level}, +{num_mip_levels}) out of bounds for texture {} with {} MIP level(s)",
                texture.name(),
                texture.mip_levels
            ),
        );
        valid = false;
    }
    let layers = texture.array_layers();
    if u64::from(base_array_layer) + u64::from(num_array_layers) > u64::from(layers) {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "array layer range [{base_array_layer}, +{num_array_layers}) out of bounds for texture {} with {layers} layer(s)",
                texture.name()
            ),
        );
        valid = false;
    }
    valid
}

fn texel_box(r: &Reporter, texture: &DebugTexture, mip_level: u32, offset: Offset3D, extent: Extent3D) -> bool {
    let Some(mip) = texture.mip_extent(mip_level) else {
        // Already reported by the subresource check.
        return false;
    };
    if offset.x < 0 || offset.y < 0 || offset.z < 0 {
        r.error(
            ErrorType::InvalidArgument,
            format!("negative texture offset {offset:?} for texture {}", texture.name()),
        );
        return false;
    }
    let fits = |offset: i32, size: u32, limit: u32| u64::from(offset as u32) + u64::from(size) <= u64::from(limit);
    if !(fits(offset.x, extent.width, mip.width)
        && fits(offset.y, extent.height, mip.height)
        && fits(offset.z, extent.depth, mip.depth))
    {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "texture region (offset {offset:?}, extent {extent:?}) exceeds MIP level {mip_level} of texture {} ({mip:?})",
                texture.name()
            ),
        );
        return false;
    }
    true
}

/// Reports a texture region outside the texture.
pub(crate) fn texture_region(r: &Reporter, texture: &DebugTexture, region: &TextureRegion) -> bool {
    let sub = &region.subresource;
    let in_range = texture_subresource(
        r,
        texture,
        sub.base_mip_level,
        sub.num_mip_levels,
        sub.base_array_layer,
        sub.num_array_layers,
    );
    in_range && texel_box(r, texture, sub.base_mip_level, region.offset, region.extent)
}

/// Reports a texture location plus extent outside the texture.
pub(crate) fn texture_location(
    r: &Reporter,
    texture: &DebugTexture,
    location: &TextureLocation,
    extent: Extent3D,
) -> bool {
    let in_range = texture_subresource(r, texture, location.mip_level, 1, location.array_layer, 1);
    in_range && texel_box(r, texture, location.mip_level, location.offset, extent)
}

/// Size in bytes of the image data covering `region` of `texture`.
///
/// A zero row or layer stride means tightly packed rows or layers.
pub(crate) fn region_data_size(
    texture: &DebugTexture,
    region: &TextureRegion,
    row_stride: u32,
    layer_stride: u32,
) -> u64 {
    let bytes_per_texel = u64::from(texture.desc.format.bytes_per_element());
    let row = match row_stride {
        0 => u64::from(region.extent.width) * bytes_per_texel,
        stride => u64::from(stride),
    };
    let layer = match layer_stride {
        0 => row * u64::from(region.extent.height),
        stride => u64::from(stride),
    };
    layer * u64::from(region.extent.depth) * u64::from(region.subresource.num_array_layers)
}

/// Returns `true` if a view of type `view` may be created from a texture of type `shared`.
pub(crate) fn is_view_type_compatible(shared: TextureType, view: TextureType) -> bool {
    use TextureType::*;
    match shared {
        Texture1D | Texture1DArray => matches!(view, Texture1D | Texture1DArray),
        Texture2D | Texture2DArray => matches!(view, Texture2D | Texture2DArray),
        Texture3D => matches!(view, Texture3D),
        TextureCube | TextureCubeArray => {
            matches!(view, Texture2D | Texture2DArray | TextureCube | TextureCubeArray)
        }
        Texture2DMS | Texture2DMSArray => matches!(view, Texture2DMS | Texture2DMSArray),
    }
}

/// Validates a texture view of `shared`, as used by `create_texture_view` and resource heaps.
pub(crate) fn texture_view(
    r: &Reporter,
    caps: &RenderingCapabilities,
    shared: &DebugTexture,
    view: &TextureViewDescriptor,
) {
    if !caps.features.has_texture_views {
        r.error(ErrorType::UnsupportedFeature, "texture views not supported");
    }
    if !view.swizzle.is_identity() && !caps.features.has_texture_view_swizzle {
        r.error(
            ErrorType::UnsupportedFeature,
            "texture view swizzle not supported, but mapping is not equal to identity",
        );
    }
    if shared.is_view() {
        r.error(
            ErrorType::InvalidArgument,
            format!("cannot create texture view of another texture view {}", shared.name()),
        );
    }
    if !is_view_type_compatible(shared.desc.texture_type, view.texture_type) {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "cannot create texture view of type {:?} from texture {} of type {:?}",
                view.texture_type,
                shared.name(),
                shared.desc.texture_type
            ),
        );
    }
    let sub = &view.subresource;
    texture_subresource(
        r,
        shared,
        sub.base_mip_level,
        sub.num_mip_levels,
        sub.base_array_layer,
        sub.num_array_layers,
    );
    let shared_format = shared.desc.format;
    if view.format.bytes_per_element() != shared_format.bytes_per_element()
        || view.format.is_depth_stencil() != shared_format.is_depth_stencil()
    {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "texture view format {:?} is incompatible with format {shared_format:?} of texture {}",
                view.format,
                shared.name()
            ),
        );
    }
}

/// Reports topologies the backend cannot draw.
pub(crate) fn primitive_topology(
    r: &Reporter,
    caps: &RenderingCapabilities,
    backend: GraphicsBackendType,
    topology: PrimitiveTopology,
) {
    let unsupported_on = |reason: &str| {
        r.error(
            ErrorType::UnsupportedFeature,
            format!("primitive topology {topology} {reason} (backend is {backend})"),
        );
    };
    match topology {
        PrimitiveTopology::LineLoop if backend != GraphicsBackendType::OpenGL => {
            unsupported_on("is only supported by OpenGL")
        }
        PrimitiveTopology::TriangleFan
            if backend == GraphicsBackendType::Metal || backend.is_direct3d() =>
        {
            unsupported_on("is not supported by Metal or Direct3D")
        }
        t if t.is_adjacency() && backend == GraphicsBackendType::Metal => {
            unsupported_on("is not supported by Metal")
        }
        PrimitiveTopology::Patches(n) => {
            if !caps.features.has_tessellation_shaders {
                r.error(
                    ErrorType::UnsupportedFeature,
                    format!("primitive topology {topology} requires tessellation shaders"),
                );
            }
            if n == 0 || n > caps.limits.max_patch_vertices {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "invalid number of patch control points: {n} (must be in [1, {}])",
                        caps.limits.max_patch_vertices
                    ),
                );
            }
        }
        _ => {}
    }
}

/// Warns when a vertex or index count does not fit the topology.
///
/// `what` is `"vertex"` or `"index"`.
pub(crate) fn primitive_count(r: &Reporter, topology: PrimitiveTopology, count: u32, what: &str) {
    if count == 0 {
        r.warning(
            WarningType::PointlessOperation,
            format!("draw command with zero {what} count has no effect"),
        );
        return;
    }
    let multiple_of = |n: u32| {
        let remainder = count % n;
        if remainder != 0 {
            r.warning(
                WarningType::ImproperArgument,
                format!(
                    "{what} count is not a multiple of {n} for topology {topology} ({count} % {n} != 0, {remainder} unused)"
                ),
            );
        }
    };
    let at_least = |n: u32| {
        if count < n {
            r.warning(
                WarningType::ImproperArgument,
                format!(
                    "not enough vertices for topology {topology} ({what} count {count} < {n}, {count} unused)"
                ),
            );
        }
    };
    match topology {
        PrimitiveTopology::PointList => {}
        PrimitiveTopology::LineList => multiple_of(2),
        PrimitiveTopology::LineStrip | PrimitiveTopology::LineLoop => at_least(2),
        PrimitiveTopology::LineListAdjacency => multiple_of(4),
        PrimitiveTopology::LineStripAdjacency => at_least(4),
        PrimitiveTopology::TriangleList => multiple_of(3),
        PrimitiveTopology::TriangleStrip | PrimitiveTopology::TriangleFan => at_least(3),
        PrimitiveTopology::TriangleListAdjacency => multiple_of(6),
        PrimitiveTopology::TriangleStripAdjacency => at_least(6),
        PrimitiveTopology::Patches(n) if n > 0 => multiple_of(n),
        PrimitiveTopology::Patches(_) => {}
    }
}

/// Validates a viewport array against the device limits.
pub(crate) fn viewports(r: &Reporter, caps: &RenderingCapabilities, viewports: &[Viewport]) {
    viewport_count(r, caps, viewports.len(), "viewport");
    let RenderingLimits {
        max_viewport_size: [max_width, max_height],
        ..
    } = caps.limits;
    for (i, viewport) in viewports.iter().enumerate() {
        let (width, height) = (viewport.width, viewport.height);
        if width.is_nan() || height.is_nan() {
            r.error(
                ErrorType::InvalidArgument,
                format!("viewport[{i}] has an undefined size ({width} x {height})"),
            );
        } else if width < 0.0 || height < 0.0 {
            r.error(
                ErrorType::InvalidArgument,
                format!("viewport[{i}] has negative size ({width} x {height})"),
            );
        } else if width == 0.0 || height == 0.0 {
            r.warning(
                WarningType::ImproperArgument,
                format!("viewport[{i}] has zero size ({width} x {height})"),
            );
        }
        if width > max_width as f32 || height > max_height as f32 {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "viewport[{i}] size ({width} x {height}) exceeds limit ({max_width} x {max_height})"
                ),
            );
        }
    }
}

/// Validates a scissor array against the device limits.
pub(crate) fn scissors(r: &Reporter, caps: &RenderingCapabilities, scissors: &[Scissor]) {
    viewport_count(r, caps, scissors.len(), "scissor");
    for (i, scissor) in scissors.iter().enumerate() {
        if scissor.width < 0 || scissor.height < 0 {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "scissor[{i}] has negative size ({} x {})",
                    scissor.width, scissor.height
                ),
            );
        }
    }
}

fn viewport_count(r: &Reporter, caps: &RenderingCapabilities, count: usize, what: &str) {
    let max = caps.limits.max_viewports as usize;
    if count > max {
        r.error(
            ErrorType::InvalidArgument,
            format!("{what} array exceeds limit ({count} specified, but limit is {max})"),
        );
    }
    if count > 1 && !caps.features.has_viewport_arrays {
        r.error(
            ErrorType::UnsupportedFeature,
            format!("{what} arrays not supported ({count} specified)"),
        );
    }
}
