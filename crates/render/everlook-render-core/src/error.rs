use thiserror::Error;

use crate::device::ShaderStage;

/// Errors raised by GPU resource wrappers. None are retried at this layer.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RenderError {
    #[error("failed to compile {stage} shader:\n{log}")]
    ShaderCompilation { stage: ShaderStage, log: String },

    #[error("failed to link shader program:\n{log}")]
    ShaderLinking { log: String },

    #[error("invalid shader source: {reason}")]
    ShaderSource { reason: String },

    #[error("uniform '{name}' not found in program")]
    UniformNotFound { name: String },

    #[error("write of {len} bytes at offset {offset} exceeds buffer of {capacity} bytes")]
    BufferSize {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("texture {width}x{height} expects {expected} bytes of RGBA8, got {actual}")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("vertex attribute {index} has {components} components (expected 1..=4)")]
    InvalidAttribute { index: u32, components: u8 },

    #[error("device could not create a {kind} object")]
    ObjectCreation { kind: &'static str },
}

impl RenderError {
    /// Native compiler/linker log, when the error carries one.
    pub fn native_log(&self) -> Option<&str> {
        match self {
            Self::ShaderCompilation { log, .. } | Self::ShaderLinking { log } => Some(log),
            _ => None,
        }
    }
}
