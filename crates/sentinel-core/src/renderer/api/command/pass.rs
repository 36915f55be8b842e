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

//! Render-pass clears and command buffer creation.

use bitflags::bitflags;

/// Values written by clear operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearValue {
    /// Clear color, RGBA.
    pub color: [f32; 4],
    /// Clear depth.
    pub depth: f32,
    /// Clear stencil value.
    pub stencil: u32,
}

impl Default for ClearValue {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 0.0],
            depth: 1.0,
            stencil: 0,
        }
    }
}

bitflags! {
    /// Which attachments a clear operation affects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachments.
        const COLOR = 1 << 0;
        /// Depth attachment.
        const DEPTH = 1 << 1;
        /// Stencil attachment.
        const STENCIL = 1 << 2;
    }
}

impl ClearFlags {
    /// Depth and stencil.
    pub const DEPTH_STENCIL: Self = Self::DEPTH.union(Self::STENCIL);
    /// Color and depth.
    pub const COLOR_DEPTH: Self = Self::COLOR.union(Self::DEPTH);
    /// Every attachment.
    pub const ALL: Self = Self::COLOR.union(Self::DEPTH).union(Self::STENCIL);
}

impl Default for ClearFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Clears one attachment of the bound render target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttachmentClear {
    /// Either `COLOR`, or any combination of `DEPTH` and `STENCIL`.
    pub flags: ClearFlags,
    /// Index of the color attachment. Ignored for depth-stencil clears.
    pub color_attachment: u32,
    /// Clear values.
    pub clear_value: ClearValue,
}

impl AttachmentClear {
    /// Clears a color attachment.
    pub fn color(color_attachment: u32, color: [f32; 4]) -> Self {
        Self {
            flags: ClearFlags::COLOR,
            color_attachment,
            clear_value: ClearValue {
                color,
                ..Default::default()
            },
        }
    }

    /// Clears the depth attachment.
    pub fn depth(depth: f32) -> Self {
        Self {
            flags: ClearFlags::DEPTH,
            color_attachment: 0,
            clear_value: ClearValue {
                depth,
                ..Default::default()
            },
        }
    }
}

bitflags! {
    /// Command buffer creation flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommandBufferFlags: u32 {
        /// A secondary command buffer, executed from a primary one.
        const SECONDARY = 1 << 0;
        /// The command buffer may be submitted more than once.
        const MULTI_SUBMIT = 1 << 1;
        /// The command buffer is submitted automatically on `end`.
        const IMMEDIATE_SUBMIT = 1 << 2;
    }
}

impl Default for CommandBufferFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A descriptor used to create a command buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandBufferDescriptor {
    /// An optional debug label for the command buffer.
    pub label: Option<String>,
    /// Creation flags.
    pub flags: CommandBufferFlags,
}
