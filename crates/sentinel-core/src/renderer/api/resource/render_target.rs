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

//! Defines render targets: offscreen framebuffers made of texture attachments.

use super::TextureId;
use crate::renderer::api::util::{Extent2D, Format};

/// An opaque handle to a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub usize);

/// One attachment of a render target.
///
/// When `texture` is `None` the backend allocates an internal attachment of
/// the given `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentDescriptor {
    /// Format of an internal attachment.
    pub format: Format,
    /// The attached texture, if any.
    pub texture: Option<TextureId>,
    /// MIP level of the texture to render into.
    pub mip_level: u32,
    /// Array layer of the texture to render into.
    pub array_layer: u32,
}

impl AttachmentDescriptor {
    /// Creates an attachment to the first MIP level and layer of `texture`.
    pub fn from_texture(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }
}

/// A descriptor used to create a [`RenderTargetId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderTargetDescriptor {
    /// An optional debug label for the render target.
    pub label: Option<String>,
    /// Size of every attachment.
    pub resolution: Extent2D,
    /// Number of samples per pixel.
    pub samples: u32,
    /// Color attachments.
    pub color_attachments: Vec<AttachmentDescriptor>,
    /// Multisample resolve attachments, parallel to `color_attachments`.
    pub resolve_attachments: Vec<AttachmentDescriptor>,
    /// Optional depth-stencil attachment.
    pub depth_stencil_attachment: Option<AttachmentDescriptor>,
}
