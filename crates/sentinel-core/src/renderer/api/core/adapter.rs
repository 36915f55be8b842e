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

//! Backend identity.

/// A backend-agnostic representation of a graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsBackendType {
    /// Vulkan API.
    Vulkan,
    /// Apple's Metal API.
    Metal,
    /// Microsoft's DirectX 12 API.
    Dx12,
    /// Microsoft's DirectX 11 API.
    Dx11,
    /// OpenGL API.
    OpenGL,
    /// A backend that records commands without executing them.
    Null,
    /// An unknown or unsupported backend.
    #[default]
    Unknown,
}

impl GraphicsBackendType {
    /// Returns `true` if the backend is one of the Direct3D APIs.
    pub fn is_direct3d(&self) -> bool {
        matches!(self, GraphicsBackendType::Dx11 | GraphicsBackendType::Dx12)
    }
}

impl std::fmt::Display for GraphicsBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraphicsBackendType::Vulkan => "Vulkan",
            GraphicsBackendType::Metal => "Metal",
            GraphicsBackendType::Dx12 => "Direct3D 12",
            GraphicsBackendType::Dx11 => "Direct3D 11",
            GraphicsBackendType::OpenGL => "OpenGL",
            GraphicsBackendType::Null => "Null",
            GraphicsBackendType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
