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

use super::CommandBuffer;
use crate::renderer::api::resource::{FenceId, QueryHeapId};
use std::fmt::Debug;

/// A queue that executes recorded command buffers on the GPU.
pub trait CommandQueue: Send + Sync + Debug {
    /// Submits a command buffer that has finished recording.
    fn submit(&self, command_buffer: &dyn CommandBuffer);

    /// Submits a fence that is signaled once all previously submitted work completed.
    fn submit_fence(&self, fence: FenceId);

    /// Blocks until the fence is signaled or `timeout` nanoseconds elapsed.
    /// Returns `true` if the fence was signaled.
    fn wait_fence(&self, fence: FenceId, timeout: u64) -> bool;

    /// Blocks until the queue is idle.
    fn wait_idle(&self);

    /// Copies the results of `num_queries` queries starting at `first_query` into `out`.
    ///
    /// Returns `false` if the results are not available yet; `out` is left
    /// unspecified in that case. Results are 64-bit values, or
    /// [`QueryPipelineStatistics`](crate::renderer::api::resource::QueryPipelineStatistics)
    /// blocks for pipeline-statistics heaps.
    fn query_result(
        &self,
        heap: QueryHeapId,
        first_query: u32,
        num_queries: u32,
        out: &mut [u8],
    ) -> bool;
}
