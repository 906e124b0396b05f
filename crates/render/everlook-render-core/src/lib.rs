//! Everlook Render Core
//!
//! Owned wrappers over native GPU objects for drawing animated models:
//! typed buffers, vertex layouts, RGBA textures and shader programs. Every
//! native call goes through a caller-supplied [`GraphicsDevice`]; each wrapper
//! releases its object exactly once through an explicit `dispose`.
//!
//! All calls must come from the thread that owns the graphics context.

pub mod buffer;
pub mod device;
pub mod error;
pub mod headless;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use buffer::Buffer;
pub use device::{
    BufferId, BufferTarget, BufferUsage, GraphicsDevice, ProgramId, ShaderId, ShaderStage,
    TextureFilter, TextureId, TextureParams, TextureWrap, UniformLocation,
};
pub use error::RenderError;
pub use headless::{HeadlessDevice, UniformValue};
pub use shader::{ShaderCache, ShaderProgram, ShaderSources};
pub use texture::Texture2D;
pub use vertex::{AttributeKind, VertexAttributePointer};

/// Render core result type
pub type Result<T> = core::result::Result<T, RenderError>;
