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

//! Collected validation findings.

use parking_lot::Mutex;
use sentinel_core::{Debugger, ErrorType, WarningType};
use std::fmt;

/// The category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// A validation error.
    Error(ErrorType),
    /// A validation warning.
    Warning(WarningType),
}

impl ReportKind {
    /// Returns `true` for errors.
    pub fn is_error(&self) -> bool {
        matches!(self, ReportKind::Error(_))
    }
}

/// A single finding, attributed to the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// The public call being validated, e.g. `"draw"`.
    pub source: String,
    /// Error or warning category.
    pub kind: ReportKind,
    /// The formatted message.
    pub message: String,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReportKind::Error(ty) => write!(f, "error ({ty}) in '{}': {}", self.source, self.message),
            ReportKind::Warning(ty) => write!(f, "warning ({ty}) in '{}': {}", self.source, self.message),
        }
    }
}

/// An ordered list of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// All entries in the order they were posted.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if at least one error was reported.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|entry| entry.kind.is_error())
    }

    /// Iterates over the errors.
    pub fn errors(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| entry.kind.is_error())
    }

    /// Iterates over the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| !entry.kind.is_error())
    }

    /// Number of errors of the given type.
    pub fn error_count(&self, error_type: ErrorType) -> usize {
        self.count(ReportKind::Error(error_type))
    }

    /// Number of warnings of the given type.
    pub fn warning_count(&self, warning_type: WarningType) -> usize {
        self.count(ReportKind::Warning(warning_type))
    }

    /// Returns `true` if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.message.contains(needle))
    }

    fn count(&self, kind: ReportKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// A [`Debugger`] that collects every finding into a [`Report`].
#[derive(Debug, Default)]
pub struct ReportLog {
    source: Mutex<String>,
    report: Mutex<Report>,
}

impl ReportLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the findings collected so far.
    pub fn report(&self) -> Report {
        self.report.lock().clone()
    }

    /// Takes the findings collected so far, leaving the log empty.
    pub fn take_report(&self) -> Report {
        std::mem::take(&mut *self.report.lock())
    }

    /// Drops every collected finding.
    pub fn clear(&self) {
        self.report.lock().entries.clear();
    }

    /// Returns `true` if at least one error was collected.
    pub fn has_errors(&self) -> bool {
        self.report.lock().has_errors()
    }

    /// Number of collected errors of the given type.
    pub fn error_count(&self, error_type: ErrorType) -> usize {
        self.report.lock().error_count(error_type)
    }

    /// Number of collected warnings of the given type.
    pub fn warning_count(&self, warning_type: WarningType) -> usize {
        self.report.lock().warning_count(warning_type)
    }

    /// Returns `true` if any collected message contains `needle`.
    pub fn contains_message(&self, needle: &str) -> bool {
        self.report.lock().contains(needle)
    }

    fn push(&self, kind: ReportKind, message: &str) {
        let source = self.source.lock().clone();
        self.report.lock().entries.push(ReportEntry {
            source,
            kind,
            message: message.to_owned(),
        });
    }
}

impl Debugger for ReportLog {
    fn set_source(&self, source: &str) {
        let mut current = self.source.lock();
        current.clear();
        current.push_str(source);
    }

    fn post_error(&self, error_type: ErrorType, message: &str) {
        self.push(ReportKind::Error(error_type), message);
    }

    fn post_warning(&self, warning_type: WarningType, message: &str) {
        self.push(ReportKind::Warning(warning_type), message);
    }
}
