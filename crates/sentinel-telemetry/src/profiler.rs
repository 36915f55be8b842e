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

//! An accumulating profiler sink.

use parking_lot::Mutex;
use sentinel_core::renderer::FrameProfile;
use sentinel_core::ProfilerSink;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;

/// Errors of profile export.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The profile could not be serialized.
    #[error("failed to serialize frame profile: {0}")]
    Json(#[from] serde_json::Error),
    /// The profile could not be written.
    #[error("failed to write frame profile to {path}: {source}")]
    Io {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A [`ProfilerSink`] that sums every submitted [`FrameProfile`].
#[derive(Debug, Default)]
pub struct FrameProfiler {
    profile: Mutex<FrameProfile>,
    timing: AtomicBool,
    submissions: AtomicU64,
}

impl FrameProfiler {
    /// Creates a profiler with per-command timing disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a profiler with per-command timing enabled or disabled.
    pub fn with_timing(enabled: bool) -> Self {
        let profiler = Self::default();
        profiler.set_timing_enabled(enabled);
        profiler
    }

    /// Enables or disables per-command timing. Takes effect at the next `begin`.
    pub fn set_timing_enabled(&self, enabled: bool) {
        self.timing.store(enabled, Ordering::Relaxed);
    }

    /// Number of profiles accumulated so far.
    pub fn submissions(&self) -> u64 {
        self.submissions.load(Ordering::Relaxed)
    }

    /// Returns a copy of the accumulated profile.
    pub fn snapshot(&self) -> FrameProfile {
        self.profile.lock().clone()
    }

    /// Takes the accumulated profile and starts a new one.
    pub fn take(&self) -> FrameProfile {
        self.submissions.store(0, Ordering::Relaxed);
        std::mem::take(&mut *self.profile.lock())
    }

    /// Serializes the accumulated profile as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TelemetryError> {
        Ok(serde_json::to_string_pretty(&*self.profile.lock())?)
    }

    /// Writes the accumulated profile as JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TelemetryError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("FrameProfiler: Wrote frame profile to {}", path.display());
        Ok(())
    }
}

impl ProfilerSink for FrameProfiler {
    fn accumulate(&self, profile: &FrameProfile) {
        self.profile.lock().accumulate(profile);
        self.submissions.fetch_add(1, Ordering::Relaxed);
    }

    fn is_timing_enabled(&self) -> bool {
        self.timing.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::renderer::TimeRecord;

    fn frame(draws: u32) -> FrameProfile {
        let mut profile = FrameProfile::default();
        profile.command_buffer_record.draw_commands = draws;
        profile.command_queue_record.command_buffer_submissions = 1;
        profile.time_records.push(TimeRecord {
            annotation: "draw".to_owned(),
            elapsed_time: 10,
        });
        profile
    }

    #[test]
    fn test_accumulate_sums_profiles() {
        let profiler = FrameProfiler::new();
        profiler.accumulate(&frame(2));
        profiler.accumulate(&frame(3));

        let total = profiler.snapshot();
        assert_eq!(total.command_buffer_record.draw_commands, 5);
        assert_eq!(total.command_queue_record.command_buffer_submissions, 2);
        assert_eq!(total.time_records.len(), 2);
        assert_eq!(profiler.submissions(), 2);
    }

    #[test]
    fn test_take_resets() {
        let profiler = FrameProfiler::new();
        profiler.accumulate(&frame(1));
        let taken = profiler.take();
        assert_eq!(taken.command_buffer_record.draw_commands, 1);
        assert_eq!(profiler.snapshot(), FrameProfile::default());
        assert_eq!(profiler.submissions(), 0);
    }

    #[test]
    fn test_timing_flag() {
        let profiler = FrameProfiler::with_timing(true);
        assert!(profiler.is_timing_enabled());
        profiler.set_timing_enabled(false);
        assert!(!profiler.is_timing_enabled());
    }

    #[test]
    fn test_write_json() {
        let profiler = FrameProfiler::new();
        profiler.accumulate(&frame(4));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        profiler.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: FrameProfile = serde_json::from_str(&text).unwrap();
        assert_eq!(back.command_buffer_record.draw_commands, 4);
    }

    #[test]
    fn test_write_json_to_missing_directory_fails() {
        let profiler = FrameProfiler::new();
        let dir = tempfile::tempdir().unwrap();
        let result = profiler.write_json(dir.path().join("missing").join("profile.json"));
        assert!(matches!(result, Err(TelemetryError::Io { .. })));
    }
}
