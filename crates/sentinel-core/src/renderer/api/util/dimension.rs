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

//! Provides structs for representing extents (sizes) and offsets in 2D and 3D.
//!
//! Extents use unsigned components; offsets are signed so that a region can be
//! validated against negative origins instead of wrapping silently.

/// A two-dimensional extent, typically representing width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new 2D extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A three-dimensional extent, representing width, height, and depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth component of the extent. Array layers are described separately.
    pub depth: u32,
}

impl Extent3D {
    /// Creates a new 3D extent.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns `true` if any of the three components is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// Returns the number of texels covered by this extent.
    pub fn volume(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * u64::from(self.depth)
    }
}

impl Default for Extent3D {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl From<Extent2D> for Extent3D {
    fn from(extent: Extent2D) -> Self {
        Self::new(extent.width, extent.height, 1)
    }
}

/// A three-dimensional offset, representing an (x, y, z) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset3D {
    /// The x-coordinate.
    pub x: i32,
    /// The y-coordinate.
    pub y: i32,
    /// The z-coordinate.
    pub z: i32,
}

impl Offset3D {
    /// Creates a new 3D offset.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_volume_and_emptiness() {
        assert_eq!(Extent3D::new(4, 4, 2).volume(), 32);
        assert!(Extent3D::new(4, 0, 1).is_empty());
        assert!(!Extent3D::default().is_empty());
    }

    #[test]
    fn extent_from_2d_has_unit_depth() {
        let e: Extent3D = Extent2D::new(640, 480).into();
        assert_eq!(e, Extent3D::new(640, 480, 1));
    }
}
