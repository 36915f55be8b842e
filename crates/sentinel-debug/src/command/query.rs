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

//! Validation of queries, render conditions and stream-output sections.

use super::DebugCommandBuffer;
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugObject, DebugQueryHeap, QueryState};
use sentinel_core::renderer::{BindFlags, BufferId, QueryHeapId};
use sentinel_core::{ErrorType, WarningType};

/// Reports a query index outside the heap. Returns the slot state when in range.
fn query_slot(r: &Reporter, heap: &DebugQueryHeap, query: u32) -> Option<QueryState> {
    let state = heap.state(query);
    if state.is_none() {
        r.error(
            ErrorType::InvalidArgument,
            format!(
                "query index out of bounds ({query} specified, but query heap {} has {} queries)",
                heap.name(),
                heap.num_queries()
            ),
        );
    }
    state
}

impl DebugCommandBuffer {
    pub(super) fn validate_begin_query(&self, heap: QueryHeapId, query: u32) -> bool {
        let reporter = self.ctx.reporter("begin_query");
        let registry = self.ctx.registry.lock();
        let Some(heap) = lookup(&registry.query_heaps, heap, "query heap", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_recording(r);
            if query_slot(r, heap, query) == Some(QueryState::Busy) {
                r.error(
                    ErrorType::InvalidState,
                    format!("query {query} of heap {} is already in progress", heap.name()),
                );
            }
        }
        true
    }

    pub(super) fn validate_end_query(&self, heap: QueryHeapId, query: u32) -> bool {
        let reporter = self.ctx.reporter("end_query");
        let registry = self.ctx.registry.lock();
        let Some(heap) = lookup(&registry.query_heaps, heap, "query heap", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_recording(r);
            match query_slot(r, heap, query) {
                Some(QueryState::Busy) | None => {}
                Some(_) => r.error(
                    ErrorType::InvalidState,
                    format!("query {query} of heap {} has not been begun", heap.name()),
                ),
            }
        }
        true
    }

    /// Moves a query slot to `state`. Out-of-range slots are ignored.
    pub(super) fn set_query_state(&self, heap: QueryHeapId, query: u32, state: QueryState) {
        let mut registry = self.ctx.registry.lock();
        if let Some(slot) = registry
            .query_heaps
            .get_mut(&heap)
            .and_then(|heap| heap.states.get_mut(query as usize))
        {
            *slot = state;
        }
    }

    pub(super) fn validate_begin_render_condition(&self, heap: QueryHeapId, query: u32) -> bool {
        let reporter = self.ctx.reporter("begin_render_condition");
        let registry = self.ctx.registry.lock();
        let Some(heap) = lookup(&registry.query_heaps, heap, "query heap", reporter.as_ref()) else {
            return false;
        };
        if let Some(r) = &reporter {
            self.assert_recording(r);
            if !self.ctx.features().has_render_condition {
                r.error(ErrorType::UnsupportedFeature, "render conditions not supported");
            }
            if !heap.desc.render_condition {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "cannot use query heap {} as render condition: it was not created with render condition enabled",
                        heap.name()
                    ),
                );
            }
            if query_slot(r, heap, query).is_some_and(|state| state != QueryState::Ready) {
                r.error(
                    ErrorType::InvalidState,
                    format!("query {query} of heap {} has not completed", heap.name()),
                );
            }
            if self.state.render_condition_active {
                r.error(
                    ErrorType::InvalidState,
                    "render condition is already active",
                );
            }
        }
        true
    }

    pub(super) fn validate_begin_stream_output(&self, buffers: &[BufferId]) -> bool {
        let reporter = self.ctx.reporter("begin_stream_output");
        let registry = self.ctx.registry.lock();
        let mut known = true;
        for &id in buffers {
            known &= lookup(&registry.buffers, id, "stream-output buffer", reporter.as_ref()).is_some();
        }
        if !known {
            return false;
        }
        if let Some(r) = &reporter {
            self.assert_recording(r);
            if !self.ctx.features().has_stream_outputs {
                r.error(ErrorType::UnsupportedFeature, "stream-outputs not supported");
            }
            let max = self.ctx.limits().max_stream_outputs as usize;
            if buffers.len() > max {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "number of stream-output buffers exceeds limit ({} specified, but limit is {max})",
                        buffers.len()
                    ),
                );
            }
            if buffers.is_empty() {
                r.warning(WarningType::PointlessOperation, "no stream-output buffers are specified");
            }
            for buffer in buffers.iter().filter_map(|id| registry.buffers.get(id)) {
                checks::required_bind_flags(
                    r,
                    "stream-output buffer",
                    &buffer.name(),
                    buffer.desc.bind_flags,
                    BindFlags::STREAM_OUTPUT_BUFFER,
                );
            }
            if self.state.stream_output_busy {
                r.error(
                    ErrorType::InvalidState,
                    "stream-output is already active",
                );
            }
        }
        true
    }
}
