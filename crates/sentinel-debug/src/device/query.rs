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

use super::DebugRenderDevice;
use crate::wrappers::DebugQueryHeap;
use sentinel_core::renderer::{QueryHeapDescriptor, QueryHeapId, QueryType, ResourceError};
use sentinel_core::ErrorType;

impl DebugRenderDevice {
    /// Validates and creates a query heap.
    pub fn create_query_heap(&self, desc: &QueryHeapDescriptor) -> Result<QueryHeapId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_query_heap") {
            let features = self.ctx.features();
            if desc.num_queries == 0 {
                r.error(
                    ErrorType::InvalidArgument,
                    "cannot create query heap with zero queries",
                );
            }
            if desc.render_condition {
                if !desc.query_type.is_occlusion() {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "cannot create query heap of type {:?} with render condition (only occlusion queries)",
                            desc.query_type
                        ),
                    );
                }
                if !features.has_render_condition {
                    r.error(ErrorType::UnsupportedFeature, "render conditions not supported");
                }
            }
            match desc.query_type {
                QueryType::PipelineStatistics if !features.has_pipeline_statistics => {
                    r.error(ErrorType::UnsupportedFeature, "pipeline statistics queries not supported")
                }
                QueryType::StreamOutPrimitivesWritten | QueryType::StreamOutOverflow
                    if !features.has_stream_outputs =>
                {
                    r.error(ErrorType::UnsupportedFeature, "stream-output queries not supported")
                }
                _ => {}
            }
        }
        let id = self.ctx.native().create_query_heap(desc)?;
        log::debug!(
            "DebugRenderDevice: Created {:?} query heap with ID: {id:?} ({} queries)",
            desc.query_type,
            desc.num_queries
        );
        self.ctx
            .registry
            .lock()
            .query_heaps
            .insert(id, DebugQueryHeap::new(id, desc.clone()));
        Ok(id)
    }

    /// Releases a query heap.
    pub fn release_query_heap(&self, id: QueryHeapId) -> Result<(), ResourceError> {
        self.release_object(
            "release_query_heap",
            "query heap",
            id,
            |registry| registry.query_heaps.remove(&id).is_some(),
            |native| native.release_query_heap(id),
        )
    }
}
