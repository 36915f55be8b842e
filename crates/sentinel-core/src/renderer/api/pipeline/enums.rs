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

//! Enums for pipeline configuration.

/// The way vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Every vertex is a point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Consecutive vertices form connected lines.
    LineStrip,
    /// Like `LineStrip`, with the last vertex connected to the first.
    LineLoop,
    /// `LineList` with adjacency information.
    LineListAdjacency,
    /// `LineStrip` with adjacency information.
    LineStripAdjacency,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Consecutive vertices form connected triangles.
    TriangleStrip,
    /// Triangles sharing the first vertex.
    TriangleFan,
    /// `TriangleList` with adjacency information.
    TriangleListAdjacency,
    /// `TriangleStrip` with adjacency information.
    TriangleStripAdjacency,
    /// Patches with the given number of control points (1 to 32) for tessellation.
    Patches(u32),
}

impl PrimitiveTopology {
    /// Returns `true` for the four adjacency topologies.
    pub fn is_adjacency(&self) -> bool {
        matches!(
            self,
            PrimitiveTopology::LineListAdjacency
                | PrimitiveTopology::LineStripAdjacency
                | PrimitiveTopology::TriangleListAdjacency
                | PrimitiveTopology::TriangleStripAdjacency
        )
    }
}

impl std::fmt::Display for PrimitiveTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveTopology::PointList => f.write_str("PointList"),
            PrimitiveTopology::LineList => f.write_str("LineList"),
            PrimitiveTopology::LineStrip => f.write_str("LineStrip"),
            PrimitiveTopology::LineLoop => f.write_str("LineLoop"),
            PrimitiveTopology::LineListAdjacency => f.write_str("LineListAdjacency"),
            PrimitiveTopology::LineStripAdjacency => f.write_str("LineStripAdjacency"),
            PrimitiveTopology::TriangleList => f.write_str("TriangleList"),
            PrimitiveTopology::TriangleStrip => f.write_str("TriangleStrip"),
            PrimitiveTopology::TriangleFan => f.write_str("TriangleFan"),
            PrimitiveTopology::TriangleListAdjacency => f.write_str("TriangleListAdjacency"),
            PrimitiveTopology::TriangleStripAdjacency => f.write_str("TriangleStripAdjacency"),
            PrimitiveTopology::Patches(n) => write!(f, "Patches{n}"),
        }
    }
}

/// A comparison function used for depth, stencil and sampler comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareOp {
    /// Never passes.
    Never,
    /// Passes if the new value is less than the existing value.
    #[default]
    Less,
    /// Passes if the values are equal.
    Equal,
    /// Passes if the new value is less than or equal to the existing value.
    LessEqual,
    /// Passes if the new value is greater than the existing value.
    Greater,
    /// Passes if the values are not equal.
    NotEqual,
    /// Passes if the new value is greater than or equal to the existing value.
    GreaterEqual,
    /// Always passes.
    Always,
}

/// An operation applied to the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOp {
    /// Keeps the current value.
    #[default]
    Keep,
    /// Sets the value to zero.
    Zero,
    /// Replaces the value with the stencil reference.
    Replace,
    /// Increments and clamps.
    IncClamp,
    /// Decrements and clamps.
    DecClamp,
    /// Bitwise inverts the value.
    Invert,
    /// Increments and wraps.
    IncWrap,
    /// Decrements and wraps.
    DecWrap,
}

/// A blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
    /// `0`
    Zero,
    /// `1`
    One,
    /// Source color.
    SrcColor,
    /// `1 - source color`
    InvSrcColor,
    /// Source alpha.
    SrcAlpha,
    /// `1 - source alpha`
    InvSrcAlpha,
    /// Destination color.
    DstColor,
    /// `1 - destination color`
    InvDstColor,
    /// Destination alpha.
    DstAlpha,
    /// `1 - destination alpha`
    InvDstAlpha,
    /// `min(source alpha, 1 - destination alpha)`
    SrcAlphaSaturate,
    /// The dynamic or static blend factor.
    BlendFactor,
    /// `1 - blend factor`
    InvBlendFactor,
}

/// The arithmetic combining blended source and destination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendArithmetic {
    /// `src + dst`
    #[default]
    Add,
    /// `src - dst`
    Subtract,
    /// `dst - src`
    RevSubtract,
    /// `min(src, dst)`
    Min,
    /// `max(src, dst)`
    Max,
}

/// A logic fragment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicOp {
    /// No logic operation; regular blending applies.
    #[default]
    Disabled,
    /// `0`
    Clear,
    /// `1`
    Set,
    /// `src`
    Copy,
    /// `!src`
    CopyInverted,
    /// `dst`
    NoOp,
    /// `!dst`
    Invert,
    /// `src & dst`
    And,
    /// `src & !dst`
    AndReverse,
    /// `!src & dst`
    AndInverted,
    /// `!(src & dst)`
    Nand,
    /// `src | dst`
    Or,
    /// `src | !dst`
    OrReverse,
    /// `!src | dst`
    OrInverted,
    /// `!(src | dst)`
    Nor,
    /// `src ^ dst`
    Xor,
    /// `!(src ^ dst)`
    Equiv,
}

/// The rasterization mode for polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    /// Polygons are filled.
    #[default]
    Fill,
    /// Polygon edges are drawn as lines.
    Wireframe,
    /// Polygon vertices are drawn as points.
    Points,
}

/// The face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling.
    #[default]
    Disabled,
    /// Front faces are culled.
    Front,
    /// Back faces are culled.
    Back,
}

/// The faces a stencil reference applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilFace {
    /// Front and back faces.
    #[default]
    FrontAndBack,
    /// Front faces only.
    Front,
    /// Back faces only.
    Back,
}
