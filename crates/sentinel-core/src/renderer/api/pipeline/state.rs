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

//! State descriptors for the graphics pipeline.

use super::enums::*;
use bitflags::bitflags;

/// Maximum number of color attachments a blend state describes.
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Depth test and write state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DepthDescriptor {
    /// Enables the depth test.
    pub test_enabled: bool,
    /// Enables writing to the depth buffer.
    pub write_enabled: bool,
    /// Depth comparison function.
    pub compare_op: CompareOp,
}

/// Stencil state for a single face of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFaceDescriptor {
    /// Operation when the stencil test fails.
    pub stencil_fail_op: StencilOp,
    /// Operation when the stencil test passes and the depth test fails.
    pub depth_fail_op: StencilOp,
    /// Operation when both tests pass.
    pub depth_pass_op: StencilOp,
    /// Stencil comparison function.
    pub compare_op: CompareOp,
    /// Mask applied when reading the stencil buffer.
    pub read_mask: u32,
    /// Mask applied when writing the stencil buffer.
    pub write_mask: u32,
    /// Static stencil reference value.
    pub reference: u32,
}

impl Default for StencilFaceDescriptor {
    fn default() -> Self {
        Self {
            stencil_fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            depth_pass_op: StencilOp::Keep,
            compare_op: CompareOp::Less,
            read_mask: !0,
            write_mask: !0,
            reference: 0,
        }
    }
}

/// Stencil test state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StencilDescriptor {
    /// Enables the stencil test.
    pub test_enabled: bool,
    /// The stencil reference is set with `set_stencil_reference` instead of the face descriptors.
    pub reference_dynamic: bool,
    /// State for front faces.
    pub front: StencilFaceDescriptor,
    /// State for back faces.
    pub back: StencilFaceDescriptor,
}

/// Rasterizer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDescriptor {
    /// Polygon fill mode.
    pub polygon_mode: PolygonMode,
    /// Face culling mode.
    pub cull_mode: CullMode,
    /// Constant depth bias.
    pub depth_bias_constant_factor: f32,
    /// Slope-scaled depth bias.
    pub depth_bias_slope_factor: f32,
    /// Front faces are wound counter-clockwise.
    pub front_ccw: bool,
    /// Primitives are discarded before rasterization.
    pub discard_enabled: bool,
    /// Depth values are clamped instead of clipped.
    pub depth_clamp_enabled: bool,
    /// The scissor test is enabled.
    pub scissor_test_enabled: bool,
    /// Multisample rasterization is enabled.
    pub multi_sample_enabled: bool,
    /// Lines are anti-aliased.
    pub anti_aliased_line_enabled: bool,
    /// Conservative rasterization is enabled.
    pub conservative_rasterization: bool,
    /// Line width for line primitives.
    pub line_width: f32,
}

impl Default for RasterizerDescriptor {
    fn default() -> Self {
        Self {
            polygon_mode: PolygonMode::Fill,
            cull_mode: CullMode::Disabled,
            depth_bias_constant_factor: 0.0,
            depth_bias_slope_factor: 0.0,
            front_ccw: false,
            discard_enabled: false,
            depth_clamp_enabled: false,
            scissor_test_enabled: false,
            multi_sample_enabled: false,
            anti_aliased_line_enabled: false,
            conservative_rasterization: false,
            line_width: 1.0,
        }
    }
}

bitflags! {
    /// The color channels written by a blend target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorMask: u8 {
        /// Red channel.
        const R = 1 << 0;
        /// Green channel.
        const G = 1 << 1;
        /// Blue channel.
        const B = 1 << 2;
        /// Alpha channel.
        const A = 1 << 3;
    }
}

impl ColorMask {
    /// All four channels.
    pub const ALL: Self = Self::R.union(Self::G).union(Self::B).union(Self::A);
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Blend state for a single color attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendTargetDescriptor {
    /// Enables blending for this target.
    pub blend_enabled: bool,
    /// Source color factor.
    pub src_color: BlendOp,
    /// Destination color factor.
    pub dst_color: BlendOp,
    /// Color arithmetic.
    pub color_arithmetic: BlendArithmetic,
    /// Source alpha factor.
    pub src_alpha: BlendOp,
    /// Destination alpha factor.
    pub dst_alpha: BlendOp,
    /// Alpha arithmetic.
    pub alpha_arithmetic: BlendArithmetic,
    /// Channels written to the attachment.
    pub color_mask: ColorMask,
}

impl Default for BlendTargetDescriptor {
    fn default() -> Self {
        Self {
            blend_enabled: false,
            src_color: BlendOp::SrcAlpha,
            dst_color: BlendOp::InvSrcAlpha,
            color_arithmetic: BlendArithmetic::Add,
            src_alpha: BlendOp::SrcAlpha,
            dst_alpha: BlendOp::InvSrcAlpha,
            alpha_arithmetic: BlendArithmetic::Add,
            color_mask: ColorMask::ALL,
        }
    }
}

/// Blend state for all color attachments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendDescriptor {
    /// Alpha-to-coverage is enabled.
    pub alpha_to_coverage_enabled: bool,
    /// Each target uses its own blend state; otherwise `targets[0]` applies to all.
    pub independent_blend_enabled: bool,
    /// Sample coverage mask.
    pub sample_mask: u32,
    /// Logic fragment operation. Excludes blending when enabled.
    pub logic_op: LogicOp,
    /// Static blend factor.
    pub blend_factor: [f32; 4],
    /// The blend factor is set with `set_blend_factor` instead of `blend_factor`.
    pub blend_factor_dynamic: bool,
    /// Per-attachment blend state.
    pub targets: [BlendTargetDescriptor; MAX_COLOR_ATTACHMENTS],
}

impl Default for BlendDescriptor {
    fn default() -> Self {
        Self {
            alpha_to_coverage_enabled: false,
            independent_blend_enabled: false,
            sample_mask: !0,
            logic_op: LogicOp::Disabled,
            blend_factor: [0.0; 4],
            blend_factor_dynamic: false,
            targets: [BlendTargetDescriptor::default(); MAX_COLOR_ATTACHMENTS],
        }
    }
}

impl BlendDescriptor {
    /// Returns the blend targets that are in effect, honoring `independent_blend_enabled`.
    pub fn active_targets(&self) -> &[BlendTargetDescriptor] {
        if self.independent_blend_enabled {
            &self.targets
        } else {
            &self.targets[..1]
        }
    }

    /// Returns `true` if the blend factor is consumed by any active target.
    pub fn uses_blend_factor(&self) -> bool {
        let is_factor = |op: BlendOp| matches!(op, BlendOp::BlendFactor | BlendOp::InvBlendFactor);
        self.active_targets().iter().any(|t| {
            t.blend_enabled
                && (is_factor(t.src_color)
                    || is_factor(t.dst_color)
                    || is_factor(t.src_alpha)
                    || is_factor(t.dst_alpha))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_targets_depend_on_independent_blend() {
        let mut blend = BlendDescriptor::default();
        assert_eq!(blend.active_targets().len(), 1);
        blend.independent_blend_enabled = true;
        assert_eq!(blend.active_targets().len(), MAX_COLOR_ATTACHMENTS);
    }

    #[test]
    fn blend_factor_usage_requires_enabled_blending() {
        let mut blend = BlendDescriptor::default();
        blend.targets[0].src_color = BlendOp::BlendFactor;
        assert!(!blend.uses_blend_factor());
        blend.targets[0].blend_enabled = true;
        assert!(blend.uses_blend_factor());
    }
}
