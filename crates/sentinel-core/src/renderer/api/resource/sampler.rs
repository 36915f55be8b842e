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

//! Defines sampler states.

use crate::renderer::api::pipeline::CompareOp;

/// An opaque handle to a sampler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerId(pub usize);

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplerAddressMode {
    /// Repeat the texture.
    #[default]
    Repeat,
    /// Repeat the texture, mirrored on every repetition.
    Mirror,
    /// Clamp to the edge texel.
    Clamp,
    /// Use the border color.
    Border,
    /// Mirror once, then clamp.
    MirrorOnce,
}

/// Texel filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplerFilter {
    /// Nearest-neighbor filtering.
    Nearest,
    /// Linear filtering.
    #[default]
    Linear,
}

/// A descriptor used to create a [`SamplerId`].
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDescriptor {
    /// An optional debug label for the sampler.
    pub label: Option<String>,
    /// Address mode for the U, V and W coordinates.
    pub address_modes: [SamplerAddressMode; 3],
    /// Minification filter.
    pub min_filter: SamplerFilter,
    /// Magnification filter.
    pub mag_filter: SamplerFilter,
    /// Filter between MIP levels.
    pub mip_map_filter: SamplerFilter,
    /// Whether MIP-mapping is enabled at all.
    pub mip_mapping_enabled: bool,
    /// Bias added to the computed MIP level.
    pub mip_map_lod_bias: f32,
    /// Lowest MIP level the sampler may access.
    pub min_lod: f32,
    /// Highest MIP level the sampler may access.
    pub max_lod: f32,
    /// Maximum anisotropy. 1 disables anisotropic filtering.
    pub max_anisotropy: u32,
    /// Depth comparison function, if this is a comparison sampler.
    pub compare_op: Option<CompareOp>,
    /// Border color for [`SamplerAddressMode::Border`].
    pub border_color: [f32; 4],
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            address_modes: [SamplerAddressMode::Repeat; 3],
            min_filter: SamplerFilter::Linear,
            mag_filter: SamplerFilter::Linear,
            mip_map_filter: SamplerFilter::Linear,
            mip_mapping_enabled: true,
            mip_map_lod_bias: 0.0,
            min_lod: 0.0,
            max_lod: 1000.0,
            max_anisotropy: 1,
            compare_op: None,
            border_color: [0.0; 4],
        }
    }
}
