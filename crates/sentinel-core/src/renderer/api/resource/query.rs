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

//! Defines query heaps and query result layouts.

use bytemuck::{Pod, Zeroable};

/// An opaque handle to a query heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryHeapId(pub usize);

/// The kind of value a query heap measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryType {
    /// Number of samples that passed the depth test.
    #[default]
    SamplesPassed,
    /// Non-zero if any sample passed the depth test.
    AnySamplesPassed,
    /// Like `AnySamplesPassed`, with a conservative implementation allowed.
    AnySamplesPassedConservative,
    /// GPU time elapsed between begin and end, in nanoseconds.
    TimeElapsed,
    /// Number of primitives written by stream-output.
    StreamOutPrimitivesWritten,
    /// Non-zero if stream-output overflowed.
    StreamOutOverflow,
    /// Pipeline statistics, see [`QueryPipelineStatistics`].
    PipelineStatistics,
}

impl QueryType {
    /// Returns `true` for the occlusion query types, the only ones usable as render conditions.
    pub fn is_occlusion(&self) -> bool {
        matches!(
            self,
            QueryType::SamplesPassed
                | QueryType::AnySamplesPassed
                | QueryType::AnySamplesPassedConservative
        )
    }

    /// Returns the size in bytes of the result of a single query of this type.
    pub fn result_size(&self) -> usize {
        match self {
            QueryType::PipelineStatistics => std::mem::size_of::<QueryPipelineStatistics>(),
            _ => std::mem::size_of::<u64>(),
        }
    }
}

/// A descriptor used to create a [`QueryHeapId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryHeapDescriptor {
    /// An optional debug label for the heap.
    pub label: Option<String>,
    /// Kind of queries in this heap.
    pub query_type: QueryType,
    /// Number of query slots.
    pub num_queries: u32,
    /// Whether the queries may be used as render conditions.
    pub render_condition: bool,
}

/// How a render condition waits for its query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderConditionMode {
    /// Wait for the query result.
    #[default]
    Wait,
    /// Do not wait; render if the result is unavailable.
    NoWait,
    /// Wait, with per-region granularity.
    ByRegionWait,
    /// Do not wait, with per-region granularity.
    ByRegionNoWait,
    /// Like `Wait`, with the condition inverted.
    WaitInverted,
    /// Like `NoWait`, with the condition inverted.
    NoWaitInverted,
    /// Like `ByRegionWait`, with the condition inverted.
    ByRegionWaitInverted,
    /// Like `ByRegionNoWait`, with the condition inverted.
    ByRegionNoWaitInverted,
}

/// The result layout of a [`QueryType::PipelineStatistics`] query.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct QueryPipelineStatistics {
    /// Vertices read by the input assembler.
    pub input_assembly_vertices: u64,
    /// Primitives read by the input assembler.
    pub input_assembly_primitives: u64,
    /// Vertex shader invocations.
    pub vertex_shader_invocations: u64,
    /// Geometry shader invocations.
    pub geometry_shader_invocations: u64,
    /// Primitives emitted by the geometry shader.
    pub geometry_shader_primitives: u64,
    /// Primitives sent to the clipper.
    pub clipping_invocations: u64,
    /// Primitives that survived clipping.
    pub clipping_primitives: u64,
    /// Fragment shader invocations.
    pub fragment_shader_invocations: u64,
    /// Tessellation-control shader invocations.
    pub tess_control_shader_invocations: u64,
    /// Tessellation-evaluation shader invocations.
    pub tess_evaluation_shader_invocations: u64,
    /// Compute shader invocations.
    pub compute_shader_invocations: u64,
}
