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
use sentinel_core::renderer::{RenderTargetDescriptor, RenderTargetId};

/// Wrapper of a render target.
#[derive(Debug, Clone)]
pub struct DebugRenderTarget {
    /// Native ID.
    pub id: RenderTargetId,
    /// Creation descriptor.
    pub desc: RenderTargetDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// Number of color attachments.
    pub num_color_attachments: u32,
    /// The depth-stencil attachment has a depth component.
    pub has_depth: bool,
    /// The depth-stencil attachment has a stencil component.
    pub has_stencil: bool,
}

impl DebugRenderTarget {
    /// Wraps a freshly created render target.
    ///
    /// `depth_stencil` reports the `(depth, stencil)` components of the resolved
    /// depth-stencil attachment format.
    pub fn new(id: RenderTargetId, desc: RenderTargetDescriptor, depth_stencil: (bool, bool)) -> Self {
        Self {
            id,
            label: desc.label.clone(),
            num_color_attachments: desc.color_attachments.len() as u32,
            has_depth: depth_stencil.0,
            has_stencil: depth_stencil.1,
            desc,
        }
    }

    /// Total number of attachments, counting the depth-stencil attachment once.
    pub fn num_attachments(&self) -> u32 {
        self.num_color_attachments + u32::from(self.has_depth || self.has_stencil)
    }
}

impl_debug_object!(DebugRenderTarget, RenderTargetId, RenderTargetDescriptor);
