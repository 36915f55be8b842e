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

//! Defines data structures related to GPU texture resources and texture views.

use crate::renderer::api::util::{
    BindFlags, CpuAccessFlags, Extent3D, Format, MiscFlags, Offset3D,
};

/// An opaque handle to a GPU texture or texture view.
///
/// Texture views share the handle space of textures: a view created with
/// [`RenderDevice::create_texture_view`](crate::RenderDevice::create_texture_view)
/// is bound and released exactly like a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// The dimensionality and layout of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureType {
    /// One-dimensional texture.
    Texture1D,
    /// Two-dimensional texture.
    #[default]
    Texture2D,
    /// Three-dimensional texture.
    Texture3D,
    /// Cube texture with six faces.
    TextureCube,
    /// Array of one-dimensional textures.
    Texture1DArray,
    /// Array of two-dimensional textures.
    Texture2DArray,
    /// Array of cube textures.
    TextureCubeArray,
    /// Two-dimensional multisample texture.
    Texture2DMS,
    /// Array of two-dimensional multisample textures.
    Texture2DMSArray,
}

impl TextureType {
    /// Returns `true` for the array texture types.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TextureType::Texture1DArray
                | TextureType::Texture2DArray
                | TextureType::TextureCubeArray
                | TextureType::Texture2DMSArray
        )
    }

    /// Returns `true` for the multisample texture types.
    pub fn is_multisample(&self) -> bool {
        matches!(
            self,
            TextureType::Texture2DMS | TextureType::Texture2DMSArray
        )
    }

    /// Returns `true` for cube and cube array textures.
    pub fn is_cube(&self) -> bool {
        matches!(
            self,
            TextureType::TextureCube | TextureType::TextureCubeArray
        )
    }
}

/// A descriptor used to create a [`TextureId`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    /// An optional debug label for the texture.
    pub label: Option<String>,
    /// The texture dimensionality.
    pub texture_type: TextureType,
    /// How the texture will be bound.
    pub bind_flags: BindFlags,
    /// CPU access rights for mapping.
    pub cpu_access_flags: CpuAccessFlags,
    /// Miscellaneous creation hints.
    pub misc_flags: MiscFlags,
    /// The texel format.
    pub format: Format,
    /// Size of the first MIP level. Array layers are not part of the extent.
    pub extent: Extent3D,
    /// Number of array layers. Must be 1 for non-array types and 6 for cubes.
    pub array_layers: u32,
    /// Number of MIP levels. Zero selects the full MIP chain.
    pub mip_levels: u32,
    /// Number of samples for multisample textures.
    pub samples: u32,
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            texture_type: TextureType::Texture2D,
            bind_flags: BindFlags::SAMPLED | BindFlags::COLOR_ATTACHMENT,
            cpu_access_flags: CpuAccessFlags::empty(),
            misc_flags: MiscFlags::empty(),
            format: Format::RGBA8UNorm,
            extent: Extent3D::default(),
            array_layers: 1,
            mip_levels: 1,
            samples: 1,
        }
    }
}

impl TextureDescriptor {
    /// Returns the resolved number of MIP levels, expanding zero to the full chain.
    pub fn mip_level_count(&self) -> u32 {
        if self.mip_levels == 0 {
            num_mip_levels(self.texture_type, self.extent)
        } else {
            self.mip_levels
        }
    }
}

/// Returns the number of MIP levels of a full MIP chain for the given type and extent.
///
/// Multisample textures never have more than one MIP level.
pub fn num_mip_levels(texture_type: TextureType, extent: Extent3D) -> u32 {
    let max_size = match texture_type {
        TextureType::Texture1D | TextureType::Texture1DArray => extent.width,
        TextureType::Texture2D
        | TextureType::Texture2DArray
        | TextureType::TextureCube
        | TextureType::TextureCubeArray => extent.width.max(extent.height),
        TextureType::Texture3D => extent.width.max(extent.height).max(extent.depth),
        TextureType::Texture2DMS | TextureType::Texture2DMSArray => return 1,
    };
    if max_size == 0 {
        0
    } else {
        32 - max_size.leading_zeros()
    }
}

/// Returns the extent of the given MIP level, or `None` if the level is out of range.
pub fn mip_extent(texture_type: TextureType, extent: Extent3D, mip_level: u32) -> Option<Extent3D> {
    if mip_level >= num_mip_levels(texture_type, extent) {
        return None;
    }
    let shrink = |size: u32| (size >> mip_level).max(1);
    let mip = match texture_type {
        TextureType::Texture1D | TextureType::Texture1DArray => {
            Extent3D::new(shrink(extent.width), 1, 1)
        }
        TextureType::Texture3D => Extent3D::new(
            shrink(extent.width),
            shrink(extent.height),
            shrink(extent.depth),
        ),
        _ => Extent3D::new(shrink(extent.width), shrink(extent.height), 1),
    };
    Some(mip)
}

/// A range of MIP levels and array layers of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSubresource {
    /// First array layer.
    pub base_array_layer: u32,
    /// Number of array layers.
    pub num_array_layers: u32,
    /// First MIP level.
    pub base_mip_level: u32,
    /// Number of MIP levels.
    pub num_mip_levels: u32,
}

impl Default for TextureSubresource {
    fn default() -> Self {
        Self {
            base_array_layer: 0,
            num_array_layers: 1,
            base_mip_level: 0,
            num_mip_levels: 1,
        }
    }
}

/// The source of one color component of a texture view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSwizzle {
    /// Constant zero.
    Zero,
    /// Constant one.
    One,
    /// The red component.
    Red,
    /// The green component.
    Green,
    /// The blue component.
    Blue,
    /// The alpha component.
    Alpha,
}

/// A component swizzle for all four color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSwizzleRGBA {
    /// Source of the red channel.
    pub r: TextureSwizzle,
    /// Source of the green channel.
    pub g: TextureSwizzle,
    /// Source of the blue channel.
    pub b: TextureSwizzle,
    /// Source of the alpha channel.
    pub a: TextureSwizzle,
}

impl Default for TextureSwizzleRGBA {
    fn default() -> Self {
        Self {
            r: TextureSwizzle::Red,
            g: TextureSwizzle::Green,
            b: TextureSwizzle::Blue,
            a: TextureSwizzle::Alpha,
        }
    }
}

impl TextureSwizzleRGBA {
    /// Returns `true` if every channel maps to itself.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// A descriptor for creating a view onto a subresource of an existing texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureViewDescriptor {
    /// An optional debug label for the view.
    pub label: Option<String>,
    /// The type the view interprets the texture as.
    pub texture_type: TextureType,
    /// The view format. Must be compatible with the texture format.
    pub format: Format,
    /// The viewed subresource range.
    pub subresource: TextureSubresource,
    /// Component swizzle.
    pub swizzle: TextureSwizzleRGBA,
}

/// A region inside a texture, addressed by subresource, offset and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureRegion {
    /// The MIP level and array layers of the region.
    pub subresource: TextureSubresource,
    /// Texel offset of the region inside the MIP level.
    pub offset: Offset3D,
    /// Size of the region in texels.
    pub extent: Extent3D,
}

/// A single texel location, used as the origin of texture-to-texture copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureLocation {
    /// Texel offset inside the MIP level.
    pub offset: Offset3D,
    /// Array layer.
    pub array_layer: u32,
    /// MIP level.
    pub mip_level: u32,
}

/// Read-only image data in CPU memory.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    /// Format of the texels in `data`.
    pub format: Format,
    /// Tightly packed texel data.
    pub data: &'a [u8],
}

/// Writable image storage in CPU memory, used for texture read-backs.
#[derive(Debug)]
pub struct MutableImageView<'a> {
    /// Format the texels are converted to.
    pub format: Format,
    /// Destination storage.
    pub data: &'a mut [u8],
}
