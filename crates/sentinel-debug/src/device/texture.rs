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

use super::DebugRenderDevice;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugTexture};
use sentinel_core::renderer::{
    num_mip_levels, BindFlags, ImageView, MiscFlags, MutableImageView, ResourceError,
    ResourceType, TextureDescriptor, TextureId, TextureRegion, TextureType,
    TextureViewDescriptor,
};
use sentinel_core::{ErrorType, WarningType};

impl DebugRenderDevice {
    /// Validates and creates a texture.
    pub fn create_texture(
        &self,
        desc: &TextureDescriptor,
        initial_image: Option<&ImageView<'_>>,
    ) -> Result<TextureId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_texture") {
            self.validate_texture_desc(&r, desc, initial_image);
        }
        let id = self.ctx.native().create_texture(desc, initial_image)?;
        log::debug!(
            "DebugRenderDevice: Created {:?} texture with ID: {id:?}",
            desc.texture_type
        );
        self.ctx
            .registry
            .lock()
            .textures
            .insert(id, DebugTexture::new(id, desc.clone()));
        Ok(id)
    }

    /// Validates and creates a view of `shared`.
    pub fn create_texture_view(
        &self,
        shared: TextureId,
        desc: &TextureViewDescriptor,
    ) -> Result<TextureId, ResourceError> {
        let shared_texture = {
            let reporter = self.ctx.reporter("create_texture_view");
            let registry = self.ctx.registry.lock();
            let texture = lookup(&registry.textures, shared, "texture", reporter.as_ref())
                .ok_or(ResourceError::InvalidHandle)?;
            if let Some(r) = &reporter {
                checks::texture_view(r, self.ctx.capabilities(), texture, desc);
            }
            texture.clone()
        };
        let id = self.ctx.native().create_texture_view(shared, desc)?;
        log::debug!("DebugRenderDevice: Created texture view with ID: {id:?} of {shared:?}");
        self.ctx
            .registry
            .lock()
            .textures
            .insert(id, DebugTexture::new_view(id, &shared_texture, desc));
        Ok(id)
    }

    /// Releases a texture or texture view.
    ///
    /// Views still referring to a released texture are released with it and
    /// reported, so later uses of them are caught as dangling handles.
    pub fn release_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let reporter = self.ctx.reporter("release_texture");
        let views: Vec<TextureId> = {
            let mut registry = self.ctx.registry.lock();
            if registry.textures.remove(&id).is_none() {
                if let Some(r) = &reporter {
                    r.null_handle("texture", id);
                }
                return Err(ResourceError::InvalidHandle);
            }
            let views: Vec<TextureId> = registry
                .textures
                .values()
                .filter(|texture| texture.shared == Some(id))
                .map(|texture| texture.id)
                .collect();
            for view in &views {
                registry.textures.remove(view);
            }
            views
        };
        if !views.is_empty() {
            if let Some(r) = &reporter {
                r.warning(
                    WarningType::ImproperArgument,
                    format!(
                        "texture {id:?} released while {} texture view(s) still refer to it: {views:?}",
                        views.len()
                    ),
                );
            }
            for &view in &views {
                if let Err(e) = self.ctx.native().release_texture(view) {
                    log::warn!("DebugRenderDevice: Failed to release texture view {view:?} of {id:?}: {e}");
                }
            }
        }
        self.ctx.native().release_texture(id)?;
        log::debug!("DebugRenderDevice: Released texture with ID: {id:?}");
        Ok(())
    }

    /// Writes image data into a texture region.
    pub fn write_texture(
        &self,
        id: TextureId,
        region: &TextureRegion,
        image: &ImageView<'_>,
    ) -> Result<(), ResourceError> {
        self.validate_texture_io("write_texture", id, region, image.data.len())?;
        self.ctx.native().write_texture(id, region, image)?;
        self.ctx.queue_record.lock().texture_writes += 1;
        Ok(())
    }

    /// Reads a texture region into image memory.
    pub fn read_texture(
        &self,
        id: TextureId,
        region: &TextureRegion,
        image: &mut MutableImageView<'_>,
    ) -> Result<(), ResourceError> {
        self.validate_texture_io("read_texture", id, region, image.data.len())?;
        self.ctx.native().read_texture(id, region, image)?;
        self.ctx.queue_record.lock().texture_reads += 1;
        Ok(())
    }

    fn validate_texture_io(
        &self,
        source: &str,
        id: TextureId,
        region: &TextureRegion,
        data_len: usize,
    ) -> Result<(), ResourceError> {
        let reporter = self.ctx.reporter(source);
        let registry = self.ctx.registry.lock();
        let texture = lookup(&registry.textures, id, "texture", reporter.as_ref())
            .ok_or(ResourceError::InvalidHandle)?;
        if let Some(r) = &reporter {
            checks::texture_region(r, texture, region);
            let required = checks::region_data_size(texture, region, 0, 0);
            if (data_len as u64) < required {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "image data too small for texture region ({data_len} bytes specified, but {required} required)"
                    ),
                );
            }
        }
        Ok(())
    }

    fn validate_texture_desc(
        &self,
        r: &Reporter,
        desc: &TextureDescriptor,
        initial_image: Option<&ImageView<'_>>,
    ) {
        checks::bind_flags_for(r, desc.bind_flags, ResourceType::Texture);
        if !MiscFlags::TEXTURE_FLAGS.contains(desc.misc_flags) {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "invalid misc flags for texture: {:?}",
                    desc.misc_flags - MiscFlags::TEXTURE_FLAGS
                ),
            );
        }
        if desc.bind_flags.contains(BindFlags::COLOR_ATTACHMENT) && desc.format.is_depth_stencil() {
            r.error(
                ErrorType::InvalidArgument,
                format!("cannot create color attachment texture with depth-stencil format {:?}", desc.format),
            );
        }
        if desc.bind_flags.contains(BindFlags::DEPTH_STENCIL_ATTACHMENT) && !desc.format.is_depth_stencil() {
            r.error(
                ErrorType::InvalidArgument,
                format!("cannot create depth-stencil attachment texture with color format {:?}", desc.format),
            );
        }
        if desc.extent.is_empty() {
            r.error(
                ErrorType::InvalidArgument,
                format!("texture extent must not be empty: {:?}", desc.extent),
            );
        }

        self.validate_texture_type(r, desc);

        let full_chain = num_mip_levels(desc.texture_type, desc.extent);
        if desc.mip_levels > full_chain {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "number of MIP levels exceeds full MIP chain ({} specified, but limit is {full_chain} for {:?} texture of extent {:?})",
                    desc.mip_levels, desc.texture_type, desc.extent
                ),
            );
        }

        if desc.misc_flags.contains(MiscFlags::GENERATE_MIPS) {
            if !desc
                .bind_flags
                .contains(BindFlags::SAMPLED | BindFlags::COLOR_ATTACHMENT)
            {
                r.error(
                    ErrorType::InvalidArgument,
                    "MIP-map generation requires sampled and color attachment bind flags",
                );
            }
            if initial_image.is_none() {
                r.warning(
                    WarningType::ImproperArgument,
                    "MIP-map generation flag is set, but no initial image data was specified",
                );
            }
        }

        if let Some(image) = initial_image {
            let bytes_per_texel = u64::from(image.format.bytes_per_element());
            if bytes_per_texel == 0 {
                r.error(
                    ErrorType::InvalidArgument,
                    "initial image data has undefined format",
                );
            } else {
                let layers = match desc.texture_type {
                    t if t.is_array() || t.is_cube() => u64::from(desc.array_layers),
                    _ => 1,
                };
                let required = desc.extent.volume() * layers * bytes_per_texel;
                if (image.data.len() as u64) < required {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "initial image data too small ({} bytes specified, but {required} required)",
                            image.data.len()
                        ),
                    );
                }
            }
        }
    }

    fn validate_texture_type(&self, r: &Reporter, desc: &TextureDescriptor) {
        let features = self.ctx.features();
        let limits = self.ctx.limits();
        let extent = desc.extent;
        let require = |supported: bool, what: &str| {
            if !supported {
                r.error(ErrorType::UnsupportedFeature, format!("{what} not supported"));
            }
        };
        let max_size = |dims: &[(u32, &str)], limit: u32| {
            for &(size, axis) in dims {
                if size > limit {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "{:?} texture {axis} exceeds limit ({size} specified, but limit is {limit})",
                            desc.texture_type
                        ),
                    );
                }
            }
        };
        let unit = |dims: &[(u32, &str)]| {
            for &(size, axis) in dims {
                if size != 1 {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "{:?} texture {axis} must be 1, but {size} was specified",
                            desc.texture_type
                        ),
                    );
                }
            }
        };
        let layers = |check: &dyn Fn(u32) -> bool, rule: &str| {
            if !check(desc.array_layers) {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "invalid number of array layers for {:?} texture: {} ({rule})",
                        desc.texture_type, desc.array_layers
                    ),
                );
            }
        };
        let max_layers = limits.max_texture_array_layers;
        let array_rule = format!("must be in [1, {max_layers}]");
        let in_array_range = |n: u32| n >= 1 && n <= max_layers;
        let square = || {
            if extent.width != extent.height {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "{:?} texture faces must be square, but extent is {} x {}",
                        desc.texture_type, extent.width, extent.height
                    ),
                );
            }
        };

        match desc.texture_type {
            TextureType::Texture1D => {
                max_size(&[(extent.width, "width")], limits.max_1d_texture_size);
                unit(&[(extent.height, "height"), (extent.depth, "depth")]);
                layers(&|n| n == 1, "must be 1");
            }
            TextureType::Texture2D => {
                max_size(&[(extent.width, "width"), (extent.height, "height")], limits.max_2d_texture_size);
                unit(&[(extent.depth, "depth")]);
                layers(&|n| n == 1, "must be 1");
            }
            TextureType::Texture3D => {
                require(features.has_3d_textures, "3D textures");
                max_size(
                    &[(extent.width, "width"), (extent.height, "height"), (extent.depth, "depth")],
                    limits.max_3d_texture_size,
                );
                layers(&|n| n == 1, "must be 1");
            }
            TextureType::TextureCube => {
                require(features.has_cube_textures, "cube textures");
                max_size(&[(extent.width, "width"), (extent.height, "height")], limits.max_cube_texture_size);
                unit(&[(extent.depth, "depth")]);
                square();
                layers(&|n| n == 6, "must be 6");
            }
            TextureType::Texture1DArray => {
                require(features.has_array_textures, "array textures");
                max_size(&[(extent.width, "width")], limits.max_1d_texture_size);
                unit(&[(extent.height, "height"), (extent.depth, "depth")]);
                layers(&in_array_range, &array_rule);
            }
            TextureType::Texture2DArray => {
                require(features.has_array_textures, "array textures");
                max_size(&[(extent.width, "width"), (extent.height, "height")], limits.max_2d_texture_size);
                unit(&[(extent.depth, "depth")]);
                layers(&in_array_range, &array_rule);
            }
            TextureType::TextureCubeArray => {
                require(features.has_cube_array_textures, "cube array textures");
                max_size(&[(extent.width, "width"), (extent.height, "height")], limits.max_cube_texture_size);
                unit(&[(extent.depth, "depth")]);
                square();
                layers(
                    &|n| n > 0 && n % 6 == 0 && n <= max_layers,
                    &format!("must be a multiple of 6 in [6, {max_layers}]"),
                );
            }
            TextureType::Texture2DMS | TextureType::Texture2DMSArray => {
                require(features.has_multi_sample_textures, "multi-sample textures");
                if desc.texture_type == TextureType::Texture2DMSArray {
                    require(features.has_array_textures, "array textures");
                    layers(&in_array_range, &array_rule);
                } else {
                    layers(&|n| n == 1, "must be 1");
                }
                max_size(&[(extent.width, "width"), (extent.height, "height")], limits.max_2d_texture_size);
                unit(&[(extent.depth, "depth")]);
                if desc.samples == 0 || desc.samples > limits.max_samples {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "number of samples out of range ({} specified, but must be in [1, {}])",
                            desc.samples, limits.max_samples
                        ),
                    );
                }
            }
        }

        if !desc.texture_type.is_multisample() && desc.samples > 1 {
            r.warning(
                WarningType::ImproperArgument,
                format!(
                    "{} samples specified for non-multi-sample {:?} texture are ignored",
                    desc.samples, desc.texture_type
                ),
            );
        }
    }
}
