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

//! Reporting primitives.
//!
//! A [`Reporter`] exists only while a debugger is attached and validation is
//! enabled, so every check of the layer sits behind an `Option` test and costs
//! nothing otherwise.
//!
//! Findings are queued while the call is validated and delivered to the
//! debugger when the reporter is dropped. Every call site creates its reporter
//! before locking the resource registry, so the lock is released by the time the
//! debugger runs and a debugger may call back into the device.

use sentinel_core::{Debugger, ErrorType, WarningType};
use std::cell::RefCell;
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug)]
enum Finding {
    Error(ErrorType, String),
    Warning(WarningType, String),
}

/// Collects findings for one public call and posts them to the attached debugger.
pub struct Reporter {
    debugger: Arc<dyn Debugger>,
    source: String,
    findings: RefCell<Vec<Finding>>,
}

impl Reporter {
    /// Creates a reporter for the public call named `source`.
    pub fn new(debugger: Arc<dyn Debugger>, source: &str) -> Self {
        Self {
            debugger,
            source: source.to_owned(),
            findings: RefCell::new(Vec::new()),
        }
    }

    /// Queues an error.
    pub fn error(&self, error_type: ErrorType, message: impl AsRef<str>) {
        self.findings
            .borrow_mut()
            .push(Finding::Error(error_type, message.as_ref().to_owned()));
    }

    /// Queues a warning.
    pub fn warning(&self, warning_type: WarningType, message: impl AsRef<str>) {
        self.findings
            .borrow_mut()
            .push(Finding::Warning(warning_type, message.as_ref().to_owned()));
    }

    /// Reports a handle that does not refer to a live object.
    pub fn null_handle(&self, kind: &str, id: impl Debug) {
        self.error(
            ErrorType::InvalidArgument,
            format!("{kind} {id:?} is null or has already been released"),
        );
    }

    /// Number of findings queued so far.
    pub fn pending(&self) -> usize {
        self.findings.borrow().len()
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        self.debugger.set_source(&self.source);
        for finding in self.findings.get_mut().drain(..) {
            match finding {
                Finding::Error(error_type, message) => self.debugger.post_error(error_type, &message),
                Finding::Warning(warning_type, message) => {
                    self.debugger.post_warning(warning_type, &message)
                }
            }
        }
    }
}
