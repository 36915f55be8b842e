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

use crate::renderer::api::core::FrameProfile;

/// A sink for frame profiles produced by the validation layer.
pub trait ProfilerSink: Send + Sync {
    /// Merges a profile into the sink's running totals.
    fn accumulate(&self, profile: &FrameProfile);

    /// Returns `true` if individual commands should be bracketed with GPU timer queries.
    ///
    /// Sampled once per recording session, when the command buffer begins.
    fn is_timing_enabled(&self) -> bool;
}
