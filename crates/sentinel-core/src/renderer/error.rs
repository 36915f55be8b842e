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

//! Defines the hierarchy of error types returned by native graphics backends.
//!
//! Validation findings of the debug layer are never reported through these types;
//! they go to the attached [`Debugger`](crate::Debugger). These errors describe
//! failures of the native backend itself.

use crate::renderer::api::pipeline::{PipelineStateId, ShaderId, ShaderType};
use std::fmt;

/// An error related to the creation or compilation of a shader.
#[derive(Debug)]
pub enum ShaderError {
    /// The shader source failed to compile into a backend-specific module.
    CompilationError {
        /// A descriptive label for the shader, if available.
        label: String,
        /// Detailed error messages from the shader compiler.
        details: String,
    },
    /// The requested shader could not be found.
    NotFound {
        /// The ID of the shader that was not found.
        id: ShaderId,
    },
    /// The backend does not support shaders of this stage.
    UnsupportedStage(ShaderType),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CompilationError { label, details } => {
                write!(f, "Shader compilation failed for '{label}': {details}")
            }
            ShaderError::NotFound { id } => {
                write!(f, "Shader not found for ID: {id:?}")
            }
            ShaderError::UnsupportedStage(stage) => {
                write!(f, "Unsupported shader stage: {stage}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation of a pipeline layout or pipeline state.
#[derive(Debug)]
pub enum PipelineError {
    /// Failed to create a pipeline layout.
    LayoutCreationFailed(String),
    /// The graphics backend failed to build the pipeline state object.
    CompilationFailed {
        /// A descriptive label for the pipeline, if available.
        label: Option<String>,
        /// Detailed error messages from the backend.
        details: String,
    },
    /// A shader provided for the pipeline was invalid or missing.
    InvalidShaderForPipeline {
        /// The ID of the invalid shader.
        id: ShaderId,
        /// The label of the pipeline being created.
        pipeline_label: Option<String>,
    },
    /// The specified pipeline state ID is not valid.
    InvalidPipelineState {
        /// The ID of the invalid pipeline state.
        id: PipelineStateId,
    },
    /// A required graphics feature is not supported by the device.
    FeatureNotSupported(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::LayoutCreationFailed(msg) => {
                write!(f, "Pipeline layout creation failed: {msg}")
            }
            PipelineError::CompilationFailed { label, details } => {
                write!(
                    f,
                    "Pipeline compilation failed for '{}': {}",
                    label.as_deref().unwrap_or("Unknown"),
                    details
                )
            }
            PipelineError::InvalidShaderForPipeline { id, pipeline_label } => {
                write!(
                    f,
                    "Invalid shader {:?} for pipeline '{}'",
                    id,
                    pipeline_label.as_deref().unwrap_or("Unknown")
                )
            }
            PipelineError::InvalidPipelineState { id } => {
                write!(f, "Invalid pipeline state ID: {id:?}")
            }
            PipelineError::FeatureNotSupported(msg) => {
                write!(f, "Feature not supported: {msg}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// An error related to the creation or use of a GPU resource (buffers, textures, etc.).
#[derive(Debug)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A pipeline-specific error occurred.
    Pipeline(PipelineError),
    /// A generic resource could not be found.
    NotFound,
    /// The handle or ID used to reference a resource is invalid.
    InvalidHandle,
    /// The device ran out of memory.
    OutOfMemory,
    /// The resource cannot be mapped in the requested way.
    MapFailed(String),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
    /// An attempt was made to access a resource out of its bounds (e.g., in a buffer).
    OutOfBounds,
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::Pipeline(err) => write!(f, "Pipeline resource error: {err}"),
            ResourceError::NotFound => write!(f, "Resource not found with ID."),
            ResourceError::InvalidHandle => write!(f, "Invalid resource handle or ID."),
            ResourceError::OutOfMemory => write!(f, "Out of device memory."),
            ResourceError::MapFailed(msg) => write!(f, "Failed to map resource: {msg}"),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
            ResourceError::OutOfBounds => {
                write!(f, "Resource access out of bounds.")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            ResourceError::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

impl From<PipelineError> for ResourceError {
    fn from(err: PipelineError) -> Self {
        ResourceError::Pipeline(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::CompilationError {
            label: "MyShader".to_string(),
            details: "Syntax error at line 5".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Shader compilation failed for 'MyShader': Syntax error at line 5"
        );
        assert_eq!(
            format!("{}", ShaderError::UnsupportedStage(ShaderType::Geometry)),
            "Unsupported shader stage: geometry"
        );
    }

    #[test]
    fn resource_error_display_wrapping_shader_error() {
        let shader_err = ShaderError::NotFound { id: ShaderId(42) };
        let res_err: ResourceError = shader_err.into();
        assert_eq!(
            format!("{res_err}"),
            "Shader resource error: Shader not found for ID: ShaderId(42)"
        );
        assert!(res_err.source().is_some());
    }

    #[test]
    fn resource_error_wrapping_pipeline_error_has_source() {
        let res_err: ResourceError = PipelineError::InvalidPipelineState {
            id: PipelineStateId(3),
        }
        .into();
        assert_eq!(
            format!("{res_err}"),
            "Pipeline resource error: Invalid pipeline state ID: PipelineStateId(3)"
        );
        assert!(res_err.source().is_some());
        assert!(ResourceError::OutOfBounds.source().is_none());
    }
}
