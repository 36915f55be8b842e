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
use sentinel_core::renderer::{QueryHeapDescriptor, QueryHeapId};

/// Recording state of a single query slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryState {
    /// The slot was never recorded.
    #[default]
    Uninitialized,
    /// `begin_query` was recorded without a matching `end_query`.
    Busy,
    /// The slot completed a begin/end pair; its result may be retrieved.
    Ready,
}

/// Wrapper of a query heap with one state per slot.
#[derive(Debug, Clone)]
pub struct DebugQueryHeap {
    /// Native ID.
    pub id: QueryHeapId,
    /// Creation descriptor.
    pub desc: QueryHeapDescriptor,
    /// Debug label.
    pub label: Option<String>,
    /// Per-slot states, sized to the query count.
    pub states: Vec<QueryState>,
}

impl DebugQueryHeap {
    /// Wraps a freshly created query heap. Every slot starts uninitialized.
    pub fn new(id: QueryHeapId, desc: QueryHeapDescriptor) -> Self {
        Self {
            id,
            label: desc.label.clone(),
            states: vec![QueryState::Uninitialized; desc.num_queries as usize],
            desc,
        }
    }

    /// Number of query slots.
    pub fn num_queries(&self) -> u32 {
        self.desc.num_queries
    }

    /// The state of slot `query`, or `None` if out of range.
    pub fn state(&self, query: u32) -> Option<QueryState> {
        self.states.get(query as usize).copied()
    }
}

impl_debug_object!(DebugQueryHeap, QueryHeapId, QueryHeapDescriptor);
