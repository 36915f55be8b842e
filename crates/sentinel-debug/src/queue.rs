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

//! The command-queue validator.

use crate::command::DebugCommandBuffer;
use crate::context::DebugContext;
use crate::wrappers::{lookup, DebugObject, QueryState};
use sentinel_core::renderer::{FenceId, FrameProfile, QueryHeapId};
use sentinel_core::ErrorType;
use std::sync::Arc;

/// A validating decorator over the native [`CommandQueue`](sentinel_core::CommandQueue).
///
/// Submissions drain the profile of the submitted command buffer and hand a
/// [`FrameProfile`] to the attached profiler.
#[derive(Debug, Clone)]
pub struct DebugCommandQueue {
    ctx: Arc<DebugContext>,
}

impl DebugCommandQueue {
    pub(crate) fn new(ctx: Arc<DebugContext>) -> Self {
        Self { ctx }
    }

    /// Submits a command buffer that has finished recording.
    pub fn submit(&self, command_buffer: &mut DebugCommandBuffer) {
        if let Some(r) = self.ctx.reporter("submit") {
            if command_buffer.is_recording() {
                r.error(
                    ErrorType::InvalidState,
                    "cannot submit command buffer while it is still recording",
                );
            }
        }
        self.ctx.log_forwarding("DebugCommandQueue", "submit");
        self.ctx.native_queue().submit(command_buffer.native());
        self.ctx.queue_record.lock().command_buffer_submissions += 1;

        if let Some(profiler) = self.ctx.profiler() {
            let profile = FrameProfile {
                command_queue_record: self.ctx.take_queue_record(),
                command_buffer_record: command_buffer.take_record(),
                time_records: command_buffer.take_time_records(),
            };
            profiler.accumulate(&profile);
        }
    }

    /// Submits a fence. An unknown fence is reported and not submitted.
    pub fn submit_fence(&self, fence: FenceId) {
        {
            let reporter = self.ctx.reporter("submit_fence");
            let registry = self.ctx.registry.lock();
            if lookup(&registry.fences, fence, "fence", reporter.as_ref()).is_none() {
                return;
            }
        }
        self.ctx.log_forwarding("DebugCommandQueue", "submit_fence");
        self.ctx.native_queue().submit_fence(fence);
        self.ctx.queue_record.lock().fence_submissions += 1;
    }

    /// Waits for a fence. An unknown fence is reported and yields `false`.
    pub fn wait_fence(&self, fence: FenceId, timeout: u64) -> bool {
        {
            let reporter = self.ctx.reporter("wait_fence");
            let registry = self.ctx.registry.lock();
            if lookup(&registry.fences, fence, "fence", reporter.as_ref()).is_none() {
                return false;
            }
        }
        self.ctx.log_forwarding("DebugCommandQueue", "wait_fence");
        self.ctx.native_queue().wait_fence(fence, timeout)
    }

    /// Blocks until the native queue is idle.
    pub fn wait_idle(&self) {
        self.ctx.log_forwarding("DebugCommandQueue", "wait_idle");
        self.ctx.native_queue().wait_idle();
    }

    /// Retrieves the results of `num_queries` queries starting at `first_query`.
    ///
    /// Every requested slot must have completed a begin/end pair. An unknown
    /// heap or an output buffer too small for the results is reported and
    /// yields `false` without a native call.
    pub fn query_result(&self, heap: QueryHeapId, first_query: u32, num_queries: u32, out: &mut [u8]) -> bool {
        {
            let reporter = self.ctx.reporter("query_result");
            let registry = self.ctx.registry.lock();
            let Some(wrapper) = lookup(&registry.query_heaps, heap, "query heap", reporter.as_ref()) else {
                return false;
            };
            let required = wrapper
                .desc
                .query_type
                .result_size()
                .saturating_mul(num_queries as usize);
            if out.len() < required {
                if let Some(r) = &reporter {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "query result buffer too small: {} byte(s) provided, but {required} required for {num_queries} quer(ies)",
                            out.len()
                        ),
                    );
                }
                return false;
            }
            if let Some(r) = &reporter {
                let end = u64::from(first_query) + u64::from(num_queries);
                if end > u64::from(wrapper.num_queries()) {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "query range [{first_query}, {end}) out of bounds for query heap {} with {} queries",
                            wrapper.name(),
                            wrapper.num_queries()
                        ),
                    );
                }
                for query in first_query..first_query.saturating_add(num_queries) {
                    match wrapper.state(query) {
                        Some(QueryState::Ready) | None => {}
                        Some(QueryState::Busy) => r.error(
                            ErrorType::InvalidState,
                            format!(
                                "query result for query {query} of heap {} requested before the query has ended",
                                wrapper.name()
                            ),
                        ),
                        Some(QueryState::Uninitialized) => r.error(
                            ErrorType::InvalidState,
                            format!(
                                "query result for query {query} of heap {} requested, but the query was never recorded",
                                wrapper.name()
                            ),
                        ),
                    }
                }
            }
        }
        self.ctx.log_forwarding("DebugCommandQueue", "query_result");
        self.ctx
            .native_queue()
            .query_result(heap, first_query, num_queries, out)
    }
}
