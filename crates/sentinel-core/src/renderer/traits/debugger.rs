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

use std::fmt;

/// Category of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// An argument is out of range or otherwise invalid.
    InvalidArgument,
    /// The call is not allowed in the current state.
    InvalidState,
    /// The call needs a feature the device does not support.
    UnsupportedFeature,
    /// The call leads to undefined behavior on the GPU.
    UndefinedBehavior,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorType::InvalidArgument => "invalid argument",
            ErrorType::InvalidState => "invalid state",
            ErrorType::UnsupportedFeature => "unsupported feature",
            ErrorType::UndefinedBehavior => "undefined behavior",
        };
        f.write_str(name)
    }
}

/// Category of a validation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningType {
    /// The call has no effect.
    PointlessOperation,
    /// An argument is valid but likely not what was intended.
    ImproperArgument,
    /// The result differs between backends.
    VaryingBehavior,
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningType::PointlessOperation => "pointless operation",
            WarningType::ImproperArgument => "improper argument",
            WarningType::VaryingBehavior => "varying behavior",
        };
        f.write_str(name)
    }
}

/// A sink for validation findings.
///
/// The validation layer calls [`set_source`](Debugger::set_source) with the name of
/// the public call being validated before posting any finding for it, so that
/// implementations can attribute each message to a call site.
pub trait Debugger: Send + Sync {
    /// Sets the name of the call subsequent findings belong to.
    fn set_source(&self, source: &str);

    /// Posts an error.
    fn post_error(&self, error_type: ErrorType, message: &str);

    /// Posts a warning.
    fn post_warning(&self, warning_type: WarningType, message: &str);
}
