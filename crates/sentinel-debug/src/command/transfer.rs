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

//! Validation of buffer and texture transfer commands.

use super::DebugCommandBuffer;
use crate::checks;
use crate::wrappers::{lookup, DebugObject};
use sentinel_core::renderer::{
    BindFlags, BufferId, Extent3D, MiscFlags, TextureId, TextureLocation, TextureRegion,
    WHOLE_SIZE,
};
use sentinel_core::{ErrorType, WarningType};

impl DebugCommandBuffer {
    pub(super) fn validate_update_buffer(&self, dst: BufferId, dst_offset: u64, data: &[u8]) -> bool {
        let reporter = self.ctx.reporter("update_buffer");
        let registry = self.ctx.registry.lock();
        let Some(buffer) = lookup(&registry.buffers, dst, "buffer", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "buffer", &buffer.name(), buffer.desc.bind_flags, BindFlags::COPY_DST);
            let size = data.len() as u64;
            checks::buffer_range(r, buffer, dst_offset, size);
            let max_size = self.ctx.config().max_update_buffer_size;
            if size > max_size {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("update_buffer data size {size} exceeds limit of {max_size} bytes"),
                );
            }
            if size == 0 {
                r.warning(WarningType::PointlessOperation, "update_buffer with empty data");
            }
            if dst_offset % 4 != 0 || size % 4 != 0 {
                r.warning(
                    WarningType::ImproperArgument,
                    format!("update_buffer offset ({dst_offset}) and size ({size}) should be multiples of 4"),
                );
            }
        }
        true
    }

    pub(super) fn validate_copy_buffer(
        &self,
        dst: BufferId,
        dst_offset: u64,
        src: BufferId,
        src_offset: u64,
        size: u64,
    ) -> bool {
        let reporter = self.ctx.reporter("copy_buffer");
        let registry = self.ctx.registry.lock();
        let dst_buffer = lookup(&registry.buffers, dst, "destination buffer", reporter.as_ref());
        let src_buffer = lookup(&registry.buffers, src, "source buffer", reporter.as_ref());
        let (Some(dst_buffer), Some(src_buffer)) = (dst_buffer, src_buffer) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "destination buffer", &dst_buffer.name(), dst_buffer.desc.bind_flags, BindFlags::COPY_DST);
            checks::required_bind_flags(r, "source buffer", &src_buffer.name(), src_buffer.desc.bind_flags, BindFlags::COPY_SRC);
            checks::buffer_range(r, dst_buffer, dst_offset, size);
            checks::buffer_range(r, src_buffer, src_offset, size);
            if size == 0 {
                r.warning(WarningType::PointlessOperation, "copy_buffer with zero size");
            }
            if !src_buffer.initialized {
                r.error(
                    ErrorType::UndefinedBehavior,
                    format!("copying from uninitialized buffer {}", src_buffer.name()),
                );
            }
            let overlaps = src_offset < dst_offset.saturating_add(size) && dst_offset < src_offset.saturating_add(size);
            if dst == src && size > 0 && overlaps {
                r.error(
                    ErrorType::UndefinedBehavior,
                    format!(
                        "overlapping copy within buffer {}: source [{src_offset}, +{size}) and destination [{dst_offset}, +{size})",
                        dst_buffer.name()
                    ),
                );
            }
        }
        true
    }

    pub(super) fn validate_copy_buffer_from_texture(
        &self,
        dst: BufferId,
        dst_offset: u64,
        src: TextureId,
        src_region: &TextureRegion,
        row_stride: u32,
        layer_stride: u32,
    ) -> bool {
        let reporter = self.ctx.reporter("copy_buffer_from_texture");
        let registry = self.ctx.registry.lock();
        let buffer = lookup(&registry.buffers, dst, "destination buffer", reporter.as_ref());
        let texture = lookup(&registry.textures, src, "source texture", reporter.as_ref());
        let (Some(buffer), Some(texture)) = (buffer, texture) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "destination buffer", &buffer.name(), buffer.desc.bind_flags, BindFlags::COPY_DST);
            checks::required_bind_flags(r, "source texture", &texture.name(), texture.desc.bind_flags, BindFlags::COPY_SRC);
            if checks::texture_region(r, texture, src_region) {
                let size = checks::region_data_size(texture, src_region, row_stride, layer_stride);
                checks::buffer_range(r, buffer, dst_offset, size);
            }
        }
        true
    }

    pub(super) fn validate_fill_buffer(&self, dst: BufferId, dst_offset: u64, size: u64) -> bool {
        let reporter = self.ctx.reporter("fill_buffer");
        let registry = self.ctx.registry.lock();
        let Some(buffer) = lookup(&registry.buffers, dst, "buffer", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "buffer", &buffer.name(), buffer.desc.bind_flags, BindFlags::COPY_DST);
            if dst_offset % 4 != 0 {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("fill_buffer offset must be a multiple of 4, but is {dst_offset}"),
                );
            }
            if size == WHOLE_SIZE {
                if dst_offset > buffer.size() {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "fill_buffer offset {dst_offset} exceeds size of buffer {} ({})",
                            buffer.name(),
                            buffer.size()
                        ),
                    );
                }
            } else {
                if size % 4 != 0 {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!("fill_buffer size must be a multiple of 4, but is {size}"),
                    );
                }
                if size == 0 {
                    r.warning(WarningType::PointlessOperation, "fill_buffer with zero size");
                }
                checks::buffer_range(r, buffer, dst_offset, size);
            }
        }
        true
    }

    pub(super) fn validate_copy_texture(
        &self,
        dst: TextureId,
        dst_location: &TextureLocation,
        src: TextureId,
        src_location: &TextureLocation,
        extent: Extent3D,
    ) -> bool {
        let reporter = self.ctx.reporter("copy_texture");
        let registry = self.ctx.registry.lock();
        let dst_texture = lookup(&registry.textures, dst, "destination texture", reporter.as_ref());
        let src_texture = lookup(&registry.textures, src, "source texture", reporter.as_ref());
        let (Some(dst_texture), Some(src_texture)) = (dst_texture, src_texture) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "destination texture", &dst_texture.name(), dst_texture.desc.bind_flags, BindFlags::COPY_DST);
            checks::required_bind_flags(r, "source texture", &src_texture.name(), src_texture.desc.bind_flags, BindFlags::COPY_SRC);
            checks::texture_location(r, dst_texture, dst_location, extent);
            checks::texture_location(r, src_texture, src_location, extent);
            let (dst_format, src_format) = (dst_texture.desc.format, src_texture.desc.format);
            if dst_format.bytes_per_element() != src_format.bytes_per_element() {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("cannot copy texture of format {src_format:?} into texture of format {dst_format:?}"),
                );
            }
            if extent.width == 0 || extent.height == 0 || extent.depth == 0 {
                r.warning(WarningType::PointlessOperation, "copy_texture with empty extent");
            }
        }
        true
    }

    pub(super) fn validate_copy_texture_from_buffer(
        &self,
        dst: TextureId,
        dst_region: &TextureRegion,
        src: BufferId,
        src_offset: u64,
        row_stride: u32,
        layer_stride: u32,
    ) -> bool {
        let reporter = self.ctx.reporter("copy_texture_from_buffer");
        let registry = self.ctx.registry.lock();
        let texture = lookup(&registry.textures, dst, "destination texture", reporter.as_ref());
        let buffer = lookup(&registry.buffers, src, "source buffer", reporter.as_ref());
        let (Some(texture), Some(buffer)) = (texture, buffer) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            checks::required_bind_flags(r, "destination texture", &texture.name(), texture.desc.bind_flags, BindFlags::COPY_DST);
            checks::required_bind_flags(r, "source buffer", &buffer.name(), buffer.desc.bind_flags, BindFlags::COPY_SRC);
            if checks::texture_region(r, texture, dst_region) {
                let size = checks::region_data_size(texture, dst_region, row_stride, layer_stride);
                checks::buffer_range(r, buffer, src_offset, size);
            }
            if !buffer.initialized {
                r.error(
                    ErrorType::UndefinedBehavior,
                    format!("copying from uninitialized buffer {}", buffer.name()),
                );
            }
        }
        true
    }

    pub(super) fn validate_generate_mips(&self, texture: TextureId) -> bool {
        let reporter = self.ctx.reporter("generate_mips");
        let registry = self.ctx.registry.lock();
        let Some(texture) = lookup(&registry.textures, texture, "texture", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_outside_render_pass(r);
            if !texture.desc.misc_flags.contains(MiscFlags::GENERATE_MIPS) {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "cannot generate MIP-maps for texture {} created without GENERATE_MIPS flag",
                        texture.name()
                    ),
                );
            }
            if texture.mip_levels <= 1 {
                r.warning(
                    WarningType::PointlessOperation,
                    format!("generating MIP-maps for texture {} with a single MIP level", texture.name()),
                );
            }
        }
        true
    }
}
