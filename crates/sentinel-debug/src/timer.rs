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

//! GPU time measurement for the frame profiler.
//!
//! The pool brackets forwarded commands with time-elapsed queries. Query heaps are
//! allocated on demand and reused after each [`QueryTimerPool::reset`]; they are
//! only released with the owning command buffer.

use sentinel_core::renderer::{QueryHeapDescriptor, QueryHeapId, QueryType, TimeRecord};
use sentinel_core::{CommandBuffer, CommandQueue, RenderDevice};
use std::thread;

#[derive(Debug)]
struct PendingRecord {
    annotation: String,
    /// `None` when no query heap could be allocated for this record.
    slot: Option<(QueryHeapId, u32)>,
}

/// A growable pool of time-elapsed query heaps.
#[derive(Debug)]
pub struct QueryTimerPool {
    queries_per_heap: u32,
    max_poll_attempts: u32,
    heaps: Vec<QueryHeapId>,
    current_heap: usize,
    current_query: u32,
    records: Vec<PendingRecord>,
    active: Option<(QueryHeapId, u32)>,
}

impl QueryTimerPool {
    /// Creates an empty pool. No query heap is allocated until the first [`start`](Self::start).
    pub fn new(queries_per_heap: u32, max_poll_attempts: u32) -> Self {
        Self {
            queries_per_heap: queries_per_heap.max(1),
            max_poll_attempts,
            heaps: Vec::new(),
            current_heap: 0,
            current_query: 0,
            records: Vec::new(),
            active: None,
        }
    }

    /// Drops pending records and rewinds to the first slot of the first heap.
    pub fn reset(&mut self) {
        self.records.clear();
        self.current_heap = 0;
        self.current_query = 0;
        self.active = None;
    }

    /// Opens a measurement named `name` by recording a begin-query into `native`.
    pub fn start(&mut self, device: &dyn RenderDevice, native: &mut dyn CommandBuffer, name: &str) {
        if self.current_query >= self.queries_per_heap {
            self.current_heap += 1;
            self.current_query = 0;
        }
        let slot = self
            .acquire_heap(device)
            .map(|heap| (heap, self.current_query));
        if let Some((heap, query)) = slot {
            native.begin_query(heap, query);
        }
        self.records.push(PendingRecord {
            annotation: name.to_owned(),
            slot,
        });
        self.active = slot;
    }

    /// Closes the measurement opened by the last [`start`](Self::start).
    pub fn stop(&mut self, native: &mut dyn CommandBuffer) {
        if let Some((heap, query)) = self.active.take() {
            native.end_query(heap, query);
            self.current_query += 1;
        }
    }

    /// Number of measurements recorded since the last reset.
    pub fn pending(&self) -> usize {
        self.records.len()
    }

    /// Number of query heaps owned by the pool.
    pub fn num_heaps(&self) -> usize {
        self.heaps.len()
    }

    /// Resolves every pending measurement and returns the records in call order.
    ///
    /// A query that does not become ready within the poll budget keeps an elapsed
    /// time of zero.
    pub fn take_records(&mut self, queue: &dyn CommandQueue) -> Vec<TimeRecord> {
        let max_attempts = self.max_poll_attempts;
        std::mem::take(&mut self.records)
            .into_iter()
            .map(|pending| {
                let elapsed_time = pending
                    .slot
                    .map_or(0, |(heap, query)| poll_elapsed(queue, heap, query, max_attempts));
                TimeRecord {
                    annotation: pending.annotation,
                    elapsed_time,
                }
            })
            .collect()
    }

    /// Releases every query heap of the pool.
    pub fn release(&mut self, device: &dyn RenderDevice) {
        for heap in self.heaps.drain(..) {
            if let Err(e) = device.release_query_heap(heap) {
                log::warn!("QueryTimerPool: Failed to release timer query heap {heap:?}: {e}");
            }
        }
        self.reset();
    }

    fn acquire_heap(&mut self, device: &dyn RenderDevice) -> Option<QueryHeapId> {
        if let Some(&heap) = self.heaps.get(self.current_heap) {
            return Some(heap);
        }
        let desc = QueryHeapDescriptor {
            label: Some(format!("sentinel.timer[{}]", self.num_heaps())),
            query_type: QueryType::TimeElapsed,
            num_queries: self.queries_per_heap,
            render_condition: false,
        };
        match device.create_query_heap(&desc) {
            Ok(heap) => {
                self.heaps.push(heap);
                self.current_heap = self.heaps.len() - 1;
                log::info!(
                    "QueryTimerPool: Allocated timer query heap {heap:?} ({} heap(s) of {} queries)",
                    self.heaps.len(),
                    self.queries_per_heap
                );
                Some(heap)
            }
            Err(e) => {
                log::warn!("QueryTimerPool: Failed to allocate timer query heap: {e}");
                None
            }
        }
    }
}

fn poll_elapsed(queue: &dyn CommandQueue, heap: QueryHeapId, query: u32, max_attempts: u32) -> u64 {
    let mut elapsed = 0u64;
    for _ in 0..max_attempts {
        if queue.query_result(heap, query, 1, bytemuck::bytes_of_mut(&mut elapsed)) {
            return elapsed;
        }
        thread::yield_now();
    }
    log::warn!("QueryTimerPool: Query {query} of heap {heap:?} not ready after {max_attempts} attempts");
    0
}
