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

//! Structures consumed by command recording.

pub mod indirect;
pub mod pass;
pub mod viewport;

pub use self::indirect::*;
pub use self::pass::*;
pub use self::viewport::*;

/// Size sentinel that selects the whole remaining resource, e.g. for `fill_buffer`.
pub const WHOLE_SIZE: u64 = u64::MAX;
