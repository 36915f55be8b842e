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
use crate::report::Reporter;
use crate::wrappers::{DebugObject, DebugRenderTarget, ResourceRegistry};
use sentinel_core::renderer::{
    AttachmentDescriptor, BindFlags, Format, RenderTargetDescriptor, RenderTargetId,
    ResourceError,
};
use sentinel_core::ErrorType;

impl DebugRenderDevice {
    /// Validates and creates a render target.
    pub fn create_render_target(
        &self,
        desc: &RenderTargetDescriptor,
    ) -> Result<RenderTargetId, ResourceError> {
        let depth_format = {
            let reporter = self.ctx.reporter("create_render_target");
            let registry = self.ctx.registry.lock();

            let attachments = desc
                .color_attachments
                .iter()
                .chain(&desc.resolve_attachments)
                .chain(&desc.depth_stencil_attachment);
            let mut all_known = true;
            for texture in attachments.filter_map(|attachment| attachment.texture) {
                if !registry.textures.contains_key(&texture) {
                    if let Some(r) = &reporter {
                        r.null_handle("texture", texture);
                    }
                    all_known = false;
                }
            }
            if !all_known {
                return Err(ResourceError::InvalidHandle);
            }

            if let Some(r) = &reporter {
                self.validate_render_target_desc(r, &registry, desc);
            }
            desc.depth_stencil_attachment
                .as_ref()
                .map(|attachment| attachment_format(&registry, attachment))
        };

        let id = self.ctx.native().create_render_target(desc)?;
        log::debug!(
            "DebugRenderDevice: Created render target with ID: {id:?} ({} color attachment(s))",
            desc.color_attachments.len()
        );
        let depth_stencil = depth_format.map_or((false, false), |format| {
            (format.is_depth(), format.has_stencil())
        });
        self.ctx.registry.lock().render_targets.insert(
            id,
            DebugRenderTarget::new(id, desc.clone(), depth_stencil),
        );
        Ok(id)
    }

    /// Releases a render target.
    pub fn release_render_target(&self, id: RenderTargetId) -> Result<(), ResourceError> {
        self.release_object(
            "release_render_target",
            "render target",
            id,
            |registry| registry.render_targets.remove(&id).is_some(),
            |native| native.release_render_target(id),
        )
    }

    fn validate_render_target_desc(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        desc: &RenderTargetDescriptor,
    ) {
        let features = self.ctx.features();
        let limits = self.ctx.limits();

        if !features.has_render_targets {
            r.error(ErrorType::UnsupportedFeature, "render targets not supported");
        }
        if desc.resolution.width == 0 || desc.resolution.height == 0 {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "render target resolution must not be empty ({} x {})",
                    desc.resolution.width, desc.resolution.height
                ),
            );
        }
        let num_colors = desc.color_attachments.len() as u32;
        if num_colors > limits.max_color_attachments {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "render target color attachments exceed limit ({num_colors} specified, but limit is {})",
                    limits.max_color_attachments
                ),
            );
        }
        if !desc.resolve_attachments.is_empty() && desc.resolve_attachments.len() != desc.color_attachments.len() {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "number of resolve attachments ({}) does not match number of color attachments ({num_colors})",
                    desc.resolve_attachments.len()
                ),
            );
        }
        if desc.samples > limits.max_samples {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "render target samples exceed limit ({} specified, but limit is {})",
                    desc.samples, limits.max_samples
                ),
            );
        }
        if num_colors == 0 && desc.depth_stencil_attachment.is_none() {
            r.error(
                ErrorType::InvalidArgument,
                "cannot create render target without attachments",
            );
        }

        for (i, attachment) in desc.color_attachments.iter().enumerate() {
            self.validate_attachment(r, registry, &format!("color attachment [{i}]"), attachment, false);
        }
        for (i, attachment) in desc.resolve_attachments.iter().enumerate() {
            self.validate_attachment(r, registry, &format!("resolve attachment [{i}]"), attachment, false);
        }
        if let Some(attachment) = &desc.depth_stencil_attachment {
            self.validate_attachment(r, registry, "depth-stencil attachment", attachment, true);
        }
    }

    fn validate_attachment(
        &self,
        r: &Reporter,
        registry: &ResourceRegistry,
        what: &str,
        attachment: &AttachmentDescriptor,
        depth_stencil: bool,
    ) {
        let required_flag = if depth_stencil {
            BindFlags::DEPTH_STENCIL_ATTACHMENT
        } else {
            BindFlags::COLOR_ATTACHMENT
        };
        let format = attachment_format(registry, attachment);
        if format == Format::Undefined {
            r.error(
                ErrorType::InvalidArgument,
                format!("{what} has neither a texture nor a format"),
            );
        } else if format.is_depth_stencil() != depth_stencil {
            r.error(
                ErrorType::InvalidArgument,
                format!("{what} has incompatible format {format:?}"),
            );
        }

        let Some(texture) = attachment.texture.and_then(|id| registry.textures.get(&id)) else {
            return;
        };
        if !texture.desc.bind_flags.contains(required_flag) {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "cannot use texture {} as {what}: missing bind flag {required_flag:?}",
                    texture.name()
                ),
            );
        }
        if attachment.mip_level >= texture.mip_levels {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "{what} MIP level {} out of range (texture {} has {} MIP level(s))",
                    attachment.mip_level,
                    texture.name(),
                    texture.mip_levels
                ),
            );
        }
        if attachment.array_layer >= texture.array_layers() {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "{what} array layer {} out of range (texture {} has {} layer(s))",
                    attachment.array_layer,
                    texture.name(),
                    texture.array_layers()
                ),
            );
        }
    }
}

/// The format of an attachment: the texture format when a texture is attached.
fn attachment_format(registry: &ResourceRegistry, attachment: &AttachmentDescriptor) -> Format {
    attachment
        .texture
        .and_then(|id| registry.textures.get(&id))
        .map_or(attachment.format, |texture| texture.desc.format)
}
