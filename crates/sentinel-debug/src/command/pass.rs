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

//! Validation of render passes, clears and the end of recording.

use super::DebugCommandBuffer;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugObject};
use sentinel_core::renderer::{AttachmentClear, ClearFlags, ClearValue, RenderTargetId};
use sentinel_core::{ErrorType, WarningType};

impl DebugCommandBuffer {
    pub(super) fn validate_end(&self, r: &Reporter) {
        self.assert_recording(r);
        if self.state.inside_render_pass {
            r.error(
                ErrorType::InvalidState,
                "cannot end command buffer while inside a render pass",
            );
        }
        if self.state.stream_output_busy {
            r.error(
                ErrorType::InvalidState,
                "cannot end command buffer while stream-output is active",
            );
        }
        if self.state.render_condition_active {
            r.error(
                ErrorType::InvalidState,
                "cannot end command buffer while a render condition is active",
            );
        }
        if self.state.debug_group_depth > 0 {
            r.error(
                ErrorType::InvalidState,
                format!(
                    "cannot end command buffer with {} unclosed debug group(s)",
                    self.state.debug_group_depth
                ),
            );
        }
    }

    /// Returns whether the call is nested inside an open render pass, or `None`
    /// if the render target is unknown.
    pub(super) fn validate_begin_render_pass(
        &self,
        render_target: RenderTargetId,
        clear_values: &[ClearValue],
    ) -> Option<bool> {
        let reporter = self.ctx.reporter("begin_render_pass");
        let registry = self.ctx.registry.lock();
        let target = lookup(&registry.render_targets, render_target, "render target", reporter.as_ref())?;
        let nested = self.state.inside_render_pass;
        if let Some(r) = &reporter {
            self.assert_recording(r);
            if nested {
                r.error(
                    ErrorType::InvalidState,
                    "cannot begin new render pass while previous render pass is still active",
                );
            }
            let num_attachments = target.num_attachments() as usize;
            if clear_values.len() > num_attachments {
                r.warning(
                    WarningType::ImproperArgument,
                    format!(
                        "{} clear value(s) specified, but render target {} has only {num_attachments} attachment(s)",
                        clear_values.len(),
                        target.name()
                    ),
                );
            }
        }
        Some(nested)
    }

    pub(super) fn validate_clear(&self, r: &Reporter, flags: ClearFlags) {
        self.assert_inside_render_pass(r);
        if flags.is_empty() {
            r.warning(WarningType::PointlessOperation, "clear with no attachment flags");
            return;
        }
        self.validate_clear_flags(r, flags, None);
    }

    pub(super) fn validate_clear_attachments(&self, r: &Reporter, attachments: &[AttachmentClear]) {
        self.assert_inside_render_pass(r);
        if attachments.is_empty() {
            r.warning(WarningType::PointlessOperation, "no attachments to clear");
            return;
        }
        for (i, attachment) in attachments.iter().enumerate() {
            let flags = attachment.flags;
            if flags.contains(ClearFlags::COLOR) && flags.intersects(ClearFlags::DEPTH_STENCIL) {
                r.error(
                    ErrorType::InvalidArgument,
                    format!("attachment clear [{i}] mixes color and depth-stencil flags ({flags:?})"),
                );
                continue;
            }
            if flags.is_empty() {
                r.warning(
                    WarningType::PointlessOperation,
                    format!("attachment clear [{i}] has no flags"),
                );
                continue;
            }
            self.validate_clear_flags(r, flags, Some(attachment.color_attachment));
        }
    }

    /// Checks the cleared components against the bound render target.
    fn validate_clear_flags(&self, r: &Reporter, flags: ClearFlags, color_attachment: Option<u32>) {
        let registry = self.ctx.registry.lock();
        let Some(target) = self
            .bindings
            .render_target
            .and_then(|id| registry.render_targets.get(&id))
        else {
            return;
        };
        let num_colors = target.num_color_attachments;
        if flags.contains(ClearFlags::COLOR) {
            match color_attachment {
                Some(index) if index >= num_colors => r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "color attachment index {index} out of range for render target {} with {num_colors} color attachment(s)",
                        target.name()
                    ),
                ),
                None if num_colors == 0 => r.error(
                    ErrorType::InvalidArgument,
                    format!("cannot clear color: render target {} has no color attachments", target.name()),
                ),
                _ => {}
            }
        }
        if flags.contains(ClearFlags::DEPTH) && !target.has_depth {
            r.error(
                ErrorType::InvalidArgument,
                format!("cannot clear depth: render target {} has no depth attachment", target.name()),
            );
        }
        if flags.contains(ClearFlags::STENCIL) && !target.has_stencil {
            r.error(
                ErrorType::InvalidArgument,
                format!("cannot clear stencil: render target {} has no stencil attachment", target.name()),
            );
        }
    }
}
