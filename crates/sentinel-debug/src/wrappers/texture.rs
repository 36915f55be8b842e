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

use super::impl_debug_object;
use sentinel_core::renderer::{
    mip_extent, Extent3D, TextureDescriptor, TextureId, TextureType, TextureViewDescriptor,
};

/// Wrapper of a texture or a texture view.
///
/// A view carries a descriptor synthesized from its shared texture: the view
/// type and format replace the original ones, and the subresource range becomes
/// the layer and MIP count of the view.
#[derive(Debug, Clone)]
pub struct DebugTexture {
    /// Native ID.
    pub id: TextureId,
    /// Creation descriptor, or the synthesized descriptor of a view.
    pub desc: TextureDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// Resolved number of MIP levels.
    pub mip_levels: u32,
    /// The texture this view was created from. `None` for regular textures.
    pub shared: Option<TextureId>,
}

impl DebugTexture {
    /// Wraps a freshly created texture.
    pub fn new(id: TextureId, desc: TextureDescriptor) -> Self {
        Self {
            id,
            label: desc.label.clone(),
            mip_levels: desc.mip_level_count(),
            shared: None,
            desc,
        }
    }

    /// Wraps a freshly created view of `shared`.
    pub fn new_view(id: TextureId, shared: &DebugTexture, view: &TextureViewDescriptor) -> Self {
        let base_extent = mip_extent(
            shared.desc.texture_type,
            shared.desc.extent,
            view.subresource.base_mip_level,
        )
        .unwrap_or(shared.desc.extent);
        let desc = TextureDescriptor {
            label: view.label.clone(),
            texture_type: view.texture_type,
            format: view.format,
            extent: base_extent,
            array_layers: view.subresource.num_array_layers,
            mip_levels: view.subresource.num_mip_levels,
            ..shared.desc.clone()
        };
        Self {
            id,
            label: view.label.clone(),
            mip_levels: view.subresource.num_mip_levels,
            shared: Some(shared.id),
            desc,
        }
    }

    /// Returns `true` for texture views.
    pub fn is_view(&self) -> bool {
        self.shared.is_some()
    }

    /// The number of array layers, counting cube faces. Non-array textures have one.
    pub fn array_layers(&self) -> u32 {
        match self.desc.texture_type {
            TextureType::Texture1D
            | TextureType::Texture2D
            | TextureType::Texture3D
            | TextureType::Texture2DMS => 1,
            _ => self.desc.array_layers,
        }
    }

    /// The extent of `mip_level`, or `None` if the level does not exist.
    pub fn mip_extent(&self, mip_level: u32) -> Option<Extent3D> {
        if mip_level >= self.mip_levels {
            return None;
        }
        mip_extent(self.desc.texture_type, self.desc.extent, mip_level)
    }
}

impl_debug_object!(DebugTexture, TextureId, TextureDescriptor);
