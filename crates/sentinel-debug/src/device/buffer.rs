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
use crate::checks;
use crate::report::Reporter;
use crate::wrappers::{lookup, DebugBuffer, DebugObject};
use sentinel_core::renderer::{
    BindFlags, BufferDescriptor, BufferId, BufferMapping, CpuAccess, CpuAccessFlags, MiscFlags,
    ResourceError, ResourceType,
};
use sentinel_core::{ErrorType, WarningType};
use std::ops::Range;

impl DebugRenderDevice {
    /// Validates and creates a buffer.
    pub fn create_buffer(
        &self,
        desc: &BufferDescriptor,
        initial_data: Option<&[u8]>,
    ) -> Result<BufferId, ResourceError> {
        if let Some(r) = self.ctx.reporter("create_buffer") {
            self.validate_buffer_desc(&r, desc, initial_data);
        }
        let id = self.ctx.native().create_buffer(desc, initial_data)?;
        log::debug!(
            "DebugRenderDevice: Created buffer with ID: {id:?} ({} bytes)",
            desc.size
        );
        self.ctx
            .registry
            .lock()
            .buffers
            .insert(id, DebugBuffer::new(id, desc.clone(), initial_data.is_some()));
        Ok(id)
    }

    /// Releases a buffer.
    pub fn release_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        self.release_object(
            "release_buffer",
            "buffer",
            id,
            |registry| registry.buffers.remove(&id).is_some(),
            |native| native.release_buffer(id),
        )
    }

    /// Writes `data` into a buffer at `offset`.
    pub fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        {
            let reporter = self.ctx.reporter("write_buffer");
            let registry = self.ctx.registry.lock();
            let buffer = lookup(&registry.buffers, id, "buffer", reporter.as_ref())
                .ok_or(ResourceError::InvalidHandle)?;
            if let Some(r) = &reporter {
                checks::buffer_range(r, buffer, offset, data.len() as u64);
                if buffer.mapped {
                    r.error(
                        ErrorType::InvalidState,
                        format!("cannot write buffer {} while it is mapped", buffer.name()),
                    );
                }
            }
        }
        self.ctx.native().write_buffer(id, offset, data)?;
        self.ctx.registry.lock().mark_initialized(id);
        self.ctx.queue_record.lock().buffer_writes += 1;
        Ok(())
    }

    /// Reads buffer contents at `offset` into `out`.
    pub fn read_buffer(&self, id: BufferId, offset: u64, out: &mut [u8]) -> Result<(), ResourceError> {
        {
            let reporter = self.ctx.reporter("read_buffer");
            let registry = self.ctx.registry.lock();
            let buffer = lookup(&registry.buffers, id, "buffer", reporter.as_ref())
                .ok_or(ResourceError::InvalidHandle)?;
            if let Some(r) = &reporter {
                checks::buffer_range(r, buffer, offset, out.len() as u64);
                if !buffer.initialized {
                    r.error(
                        ErrorType::UndefinedBehavior,
                        format!("reading uninitialized buffer {}", buffer.name()),
                    );
                }
                if buffer.mapped {
                    r.error(
                        ErrorType::InvalidState,
                        format!("cannot read buffer {} while it is mapped", buffer.name()),
                    );
                }
            }
        }
        self.ctx.native().read_buffer(id, offset, out)?;
        self.ctx.queue_record.lock().buffer_reads += 1;
        Ok(())
    }

    /// Maps a byte range of a buffer into CPU memory.
    pub fn map_buffer(
        &self,
        id: BufferId,
        access: CpuAccess,
        range: Range<u64>,
    ) -> Result<BufferMapping, ResourceError> {
        {
            let reporter = self.ctx.reporter("map_buffer");
            let registry = self.ctx.registry.lock();
            let buffer = lookup(&registry.buffers, id, "buffer", reporter.as_ref())
                .ok_or(ResourceError::InvalidHandle)?;
            if let Some(r) = &reporter {
                self.validate_map_buffer(r, buffer, access, &range);
            }
        }
        let mapping = self.ctx.native().map_buffer(id, access, range)?;
        if let Some(buffer) = self.ctx.registry.lock().buffers.get_mut(&id) {
            buffer.mapped = true;
            if access != CpuAccess::ReadOnly {
                buffer.initialized = true;
            }
        }
        self.ctx.queue_record.lock().buffer_mappings += 1;
        Ok(mapping)
    }

    /// Unmaps a mapped buffer.
    pub fn unmap_buffer(&self, id: BufferId) {
        {
            let reporter = self.ctx.reporter("unmap_buffer");
            let registry = self.ctx.registry.lock();
            let Some(buffer) = lookup(&registry.buffers, id, "buffer", reporter.as_ref()) else {
                return;
            };
            if let Some(r) = &reporter {
                if !buffer.mapped {
                    r.error(
                        ErrorType::InvalidState,
                        format!("cannot unmap buffer {} that is not mapped", buffer.name()),
                    );
                }
            }
        }
        self.ctx.native().unmap_buffer(id);
        if let Some(buffer) = self.ctx.registry.lock().buffers.get_mut(&id) {
            buffer.mapped = false;
        }
    }

    fn validate_buffer_desc(&self, r: &Reporter, desc: &BufferDescriptor, initial_data: Option<&[u8]>) {
        let features = self.ctx.features();
        let limits = self.ctx.limits();

        checks::bind_flags_for(r, desc.bind_flags, ResourceType::Buffer);
        if !CpuAccessFlags::all().contains(desc.cpu_access_flags) {
            r.error(
                ErrorType::InvalidArgument,
                format!("unknown CPU access flags: {:#x}", desc.cpu_access_flags.bits()),
            );
        }
        if !MiscFlags::BUFFER_FLAGS.contains(desc.misc_flags) {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "invalid misc flags for buffer: {:?}",
                    desc.misc_flags - MiscFlags::BUFFER_FLAGS
                ),
            );
        }

        if desc.size > limits.max_buffer_size {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "buffer size exceeds limit ({} specified, but limit is {})",
                    desc.size, limits.max_buffer_size
                ),
            );
        }

        if desc.bind_flags.contains(BindFlags::CONSTANT_BUFFER) {
            if !features.has_constant_buffers {
                r.error(ErrorType::UnsupportedFeature, "constant buffers not supported");
            }
            if desc.size > limits.max_constant_buffer_size {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "constant buffer size exceeds limit ({} specified, but limit is {})",
                        desc.size, limits.max_constant_buffer_size
                    ),
                );
            }
            if desc.size % 16 != 0 {
                r.warning(
                    WarningType::ImproperArgument,
                    format!(
                        "constant buffer size is out of pack alignment (alignment is 16 bytes, but size is {})",
                        desc.size
                    ),
                );
            }
        }
        if desc.bind_flags.contains(BindFlags::STORAGE) && !features.has_storage_buffers {
            r.error(ErrorType::UnsupportedFeature, "storage buffers not supported");
        }
        if desc.bind_flags.contains(BindFlags::STREAM_OUTPUT_BUFFER) && !features.has_stream_outputs {
            r.error(ErrorType::UnsupportedFeature, "stream-output buffers not supported");
        }

        if let Some((first, rest)) = desc.vertex_attribs.split_first() {
            for attrib in rest {
                if attrib.slot != first.slot
                    || attrib.stride != first.stride
                    || attrib.instance_divisor != first.instance_divisor
                {
                    r.error(
                        ErrorType::InvalidArgument,
                        format!(
                            "vertex attribute '{}' does not share slot, stride and instance divisor with '{}' (all attributes of one buffer must)",
                            attrib.name, first.name
                        ),
                    );
                }
            }
        }

        if desc.bind_flags.contains(BindFlags::INDEX_BUFFER)
            && !desc.format.is_index_format()
            && desc.format.bytes_per_element() != 0
        {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "invalid index buffer format {:?} (must be R16UInt or R32UInt)",
                    desc.format
                ),
            );
        }

        let stride = u64::from(desc.element_stride());
        if stride > 0 && desc.size % stride != 0 {
            r.warning(
                WarningType::ImproperArgument,
                format!(
                    "buffer size ({}) is not a multiple of its element stride ({stride})",
                    desc.size
                ),
            );
        }

        if let Some(data) = initial_data {
            if data.len() as u64 > desc.size {
                r.error(
                    ErrorType::InvalidArgument,
                    format!(
                        "initial data ({} bytes) exceeds buffer size ({})",
                        data.len(),
                        desc.size
                    ),
                );
            }
        }
    }

    fn validate_map_buffer(&self, r: &Reporter, buffer: &DebugBuffer, access: CpuAccess, range: &Range<u64>) {
        if range.start > range.end {
            r.error(
                ErrorType::InvalidArgument,
                format!("invalid map range [{}, {})", range.start, range.end),
            );
        } else {
            checks::buffer_range(r, buffer, range.start, range.end - range.start);
        }
        let required = access.required_flags();
        if !buffer.desc.cpu_access_flags.contains(required) {
            r.error(
                ErrorType::InvalidArgument,
                format!(
                    "cannot map buffer {} with {access:?} access: missing CPU access flags {:?}",
                    buffer.name(),
                    required - buffer.desc.cpu_access_flags
                ),
            );
        }
        if buffer.mapped {
            r.error(
                ErrorType::InvalidState,
                format!("buffer {} is already mapped", buffer.name()),
            );
        }
        if matches!(access, CpuAccess::ReadOnly | CpuAccess::ReadWrite) && !buffer.initialized {
            r.error(
                ErrorType::UndefinedBehavior,
                format!("mapping uninitialized buffer {} for reading", buffer.name()),
            );
        }
    }
}

