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

//! Per-frame performance counters and GPU time records.

use serde::{Deserialize, Serialize};

/// Counters for operations issued directly against a device or command queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandQueueRecord {
    /// Number of `write_buffer` calls.
    pub buffer_writes: u32,
    /// Number of `read_buffer` calls.
    pub buffer_reads: u32,
    /// Number of `map_buffer` calls.
    pub buffer_mappings: u32,
    /// Number of `write_texture` calls.
    pub texture_writes: u32,
    /// Number of `read_texture` calls.
    pub texture_reads: u32,
    /// Number of command buffers submitted.
    pub command_buffer_submissions: u32,
    /// Number of fences submitted.
    pub fence_submissions: u32,
}

impl CommandQueueRecord {
    /// Adds every counter of `other` to `self`.
    pub fn accumulate(&mut self, other: &CommandQueueRecord) {
        self.buffer_writes += other.buffer_writes;
        self.buffer_reads += other.buffer_reads;
        self.buffer_mappings += other.buffer_mappings;
        self.texture_writes += other.texture_writes;
        self.texture_reads += other.texture_reads;
        self.command_buffer_submissions += other.command_buffer_submissions;
        self.fence_submissions += other.fence_submissions;
    }
}

/// Counters for commands recorded into a command buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBufferRecord {
    /// Number of completed `begin`/`end` encodings.
    pub encodings: u32,
    /// Number of MIP-map generations.
    pub mip_maps_generations: u32,
    /// Number of vertex buffer bindings.
    pub vertex_buffer_bindings: u32,
    /// Number of index buffer bindings.
    pub index_buffer_bindings: u32,
    /// Number of constant buffer bindings.
    pub constant_buffer_bindings: u32,
    /// Number of sampled (read-only) buffer bindings.
    pub sampled_buffer_bindings: u32,
    /// Number of storage (read/write) buffer bindings.
    pub storage_buffer_bindings: u32,
    /// Number of sampled texture bindings.
    pub sampled_texture_bindings: u32,
    /// Number of storage texture bindings.
    pub storage_texture_bindings: u32,
    /// Number of sampler bindings.
    pub sampler_bindings: u32,
    /// Number of resource heap bindings.
    pub resource_heap_bindings: u32,
    /// Number of graphics pipeline bindings.
    pub graphics_pipeline_bindings: u32,
    /// Number of compute pipeline bindings.
    pub compute_pipeline_bindings: u32,
    /// Number of `clear` and `clear_attachments` commands.
    pub attachment_clears: u32,
    /// Number of `update_buffer` commands.
    pub buffer_updates: u32,
    /// Number of buffer copies (from buffers or textures).
    pub buffer_copies: u32,
    /// Number of `fill_buffer` commands.
    pub buffer_fills: u32,
    /// Number of texture copies (from textures or buffers).
    pub texture_copies: u32,
    /// Number of render-pass sections.
    pub render_pass_sections: u32,
    /// Number of stream-output sections.
    pub stream_output_sections: u32,
    /// Number of query sections.
    pub query_sections: u32,
    /// Number of render-condition sections.
    pub render_condition_sections: u32,
    /// Number of draw commands, including indirect draws.
    pub draw_commands: u32,
    /// Number of dispatch commands, including indirect dispatches.
    pub dispatch_commands: u32,
}

impl CommandBufferRecord {
    /// Adds every counter of `other` to `self`.
    pub fn accumulate(&mut self, other: &CommandBufferRecord) {
        self.encodings += other.encodings;
        self.mip_maps_generations += other.mip_maps_generations;
        self.vertex_buffer_bindings += other.vertex_buffer_bindings;
        self.index_buffer_bindings += other.index_buffer_bindings;
        self.constant_buffer_bindings += other.constant_buffer_bindings;
        self.sampled_buffer_bindings += other.sampled_buffer_bindings;
        self.storage_buffer_bindings += other.storage_buffer_bindings;
        self.sampled_texture_bindings += other.sampled_texture_bindings;
        self.storage_texture_bindings += other.storage_texture_bindings;
        self.sampler_bindings += other.sampler_bindings;
        self.resource_heap_bindings += other.resource_heap_bindings;
        self.graphics_pipeline_bindings += other.graphics_pipeline_bindings;
        self.compute_pipeline_bindings += other.compute_pipeline_bindings;
        self.attachment_clears += other.attachment_clears;
        self.buffer_updates += other.buffer_updates;
        self.buffer_copies += other.buffer_copies;
        self.buffer_fills += other.buffer_fills;
        self.texture_copies += other.texture_copies;
        self.render_pass_sections += other.render_pass_sections;
        self.stream_output_sections += other.stream_output_sections;
        self.query_sections += other.query_sections;
        self.render_condition_sections += other.render_condition_sections;
        self.draw_commands += other.draw_commands;
        self.dispatch_commands += other.dispatch_commands;
    }
}

/// A named GPU time measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// The name of the measured command, e.g. `"draw"`.
    pub annotation: String,
    /// Elapsed GPU time in nanoseconds. Zero when the measurement never resolved.
    pub elapsed_time: u64,
}

/// An aggregated profile of the work issued within one or more recording sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameProfile {
    /// Device and queue level counters.
    pub command_queue_record: CommandQueueRecord,
    /// Command recording counters.
    pub command_buffer_record: CommandBufferRecord,
    /// GPU time records in the order they were measured.
    pub time_records: Vec<TimeRecord>,
}

impl FrameProfile {
    /// Merges `other` into `self`: counters are summed and time records appended.
    pub fn accumulate(&mut self, other: &FrameProfile) {
        self.command_queue_record
            .accumulate(&other.command_queue_record);
        self.command_buffer_record
            .accumulate(&other.command_buffer_record);
        self.time_records
            .extend(other.time_records.iter().cloned());
    }

    /// Resets every counter to zero and drops all time records.
    pub fn clear(&mut self) {
        *self = FrameProfile::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_sums_counters_and_appends_records() {
        let mut total = FrameProfile::default();
        let mut frame = FrameProfile::default();
        frame.command_buffer_record.draw_commands = 3;
        frame.command_queue_record.buffer_writes = 1;
        frame.time_records.push(TimeRecord {
            annotation: "draw".to_string(),
            elapsed_time: 120,
        });

        total.accumulate(&frame);
        total.accumulate(&frame);

        assert_eq!(total.command_buffer_record.draw_commands, 6);
        assert_eq!(total.command_queue_record.buffer_writes, 2);
        assert_eq!(total.time_records.len(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut profile = FrameProfile::default();
        profile.command_buffer_record.dispatch_commands = 9;
        profile.time_records.push(TimeRecord::default());
        profile.clear();
        assert_eq!(profile, FrameProfile::default());
    }

    #[test]
    fn profile_serializes_to_json() {
        let mut profile = FrameProfile::default();
        profile.command_buffer_record.encodings = 1;
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"encodings\":1"));
        let back: FrameProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
