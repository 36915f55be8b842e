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

//! Hardware formats shared by textures, typed buffers, index buffers and vertex attributes.

/// Defines the memory format of an element: a texel, an index, or a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// No format. Used for untyped buffers.
    #[default]
    Undefined,
    // 8-bit formats
    /// One 8-bit unsigned normalized component.
    R8UNorm,
    /// One 8-bit unsigned integer component.
    R8UInt,
    /// Two 8-bit unsigned normalized components.
    RG8UNorm,
    /// Four 8-bit unsigned normalized components (RGBA).
    RGBA8UNorm,
    /// Four 8-bit unsigned normalized components (RGBA) in the sRGB color space.
    RGBA8UNormSrgb,
    /// Four 8-bit unsigned normalized components (BGRA).
    BGRA8UNorm,
    /// Four 8-bit unsigned normalized components (BGRA) in the sRGB color space.
    BGRA8UNormSrgb,
    // 16-bit formats
    /// One 16-bit unsigned integer component. Valid index format.
    R16UInt,
    /// One 16-bit float component.
    R16Float,
    /// Two 16-bit float components.
    RG16Float,
    /// Four 16-bit float components.
    RGBA16Float,
    // 32-bit formats
    /// One 32-bit unsigned integer component. Valid index format.
    R32UInt,
    /// One 32-bit float component.
    R32Float,
    /// Two 32-bit float components.
    RG32Float,
    /// Three 32-bit float components.
    RGB32Float,
    /// Four 32-bit unsigned integer components.
    RGBA32UInt,
    /// Four 32-bit float components.
    RGBA32Float,
    // Depth/stencil formats
    /// A 16-bit unsigned normalized depth format.
    D16UNorm,
    /// A 24-bit unsigned normalized depth format with an 8-bit stencil component.
    D24UNormS8UInt,
    /// A 32-bit float depth format.
    D32Float,
    /// A 32-bit float depth format with an 8-bit stencil component.
    D32FloatS8X24UInt,
}

impl Format {
    /// Returns the size in bytes of a single element of this format.
    /// `Undefined` has a size of zero.
    pub fn bytes_per_element(&self) -> u32 {
        match self {
            Format::Undefined => 0,
            Format::R8UNorm | Format::R8UInt => 1,
            Format::RG8UNorm | Format::R16UInt | Format::R16Float | Format::D16UNorm => 2,
            Format::RGBA8UNorm
            | Format::RGBA8UNormSrgb
            | Format::BGRA8UNorm
            | Format::BGRA8UNormSrgb
            | Format::RG16Float
            | Format::R32UInt
            | Format::R32Float
            | Format::D24UNormS8UInt
            | Format::D32Float => 4,
            Format::RGBA16Float | Format::RG32Float | Format::D32FloatS8X24UInt => 8,
            Format::RGB32Float => 12,
            Format::RGBA32UInt | Format::RGBA32Float => 16,
        }
    }

    /// Returns `true` for formats with a depth component.
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            Format::D16UNorm | Format::D24UNormS8UInt | Format::D32Float | Format::D32FloatS8X24UInt
        )
    }

    /// Returns `true` for formats with a stencil component.
    pub fn has_stencil(&self) -> bool {
        matches!(self, Format::D24UNormS8UInt | Format::D32FloatS8X24UInt)
    }

    /// Returns `true` for any depth or stencil format.
    pub fn is_depth_stencil(&self) -> bool {
        self.is_depth() || self.has_stencil()
    }

    /// Returns `true` for the two formats accepted by index buffers.
    pub fn is_index_format(&self) -> bool {
        matches!(self, Format::R16UInt | Format::R32UInt)
    }
}
