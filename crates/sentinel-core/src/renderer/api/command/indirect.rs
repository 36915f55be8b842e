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

//! Argument layouts read by indirect draw and dispatch commands.

use bytemuck::{Pod, Zeroable};

/// Arguments of one `draw_indirect` command.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawIndirectArguments {
    /// Number of vertices.
    pub num_vertices: u32,
    /// Number of instances.
    pub num_instances: u32,
    /// First vertex.
    pub first_vertex: u32,
    /// First instance.
    pub first_instance: u32,
}

impl DrawIndirectArguments {
    /// Size of the argument block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Arguments of one `draw_indexed_indirect` command.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawIndexedIndirectArguments {
    /// Number of indices.
    pub num_indices: u32,
    /// Number of instances.
    pub num_instances: u32,
    /// First index.
    pub first_index: u32,
    /// Value added to every index.
    pub vertex_offset: i32,
    /// First instance.
    pub first_instance: u32,
}

impl DrawIndexedIndirectArguments {
    /// Size of the argument block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Arguments of one `dispatch_indirect` command.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DispatchIndirectArguments {
    /// Work groups along X.
    pub num_work_groups_x: u32,
    /// Work groups along Y.
    pub num_work_groups_y: u32,
    /// Work groups along Z.
    pub num_work_groups_z: u32,
}

impl DispatchIndirectArguments {
    /// Size of the argument block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}
