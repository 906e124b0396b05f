//! Graphics device seam.
//!
//! Wrappers never talk to a driver directly; every native call goes through a
//! [`GraphicsDevice`] passed in by the caller. Calls are synchronous and must
//! come from the thread that owns the graphics context.

use std::fmt;

use crate::vertex::VertexAttributePointer;
use crate::Result;

macro_rules! native_handle {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);
    )*};
}

native_handle! {
    /// Native buffer object name.
    BufferId,
    /// Native texture object name.
    TextureId,
    /// Native shader object name.
    ShaderId,
    /// Native program object name.
    ProgramId,
    /// Resolved uniform location within a linked program.
    UniformLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binding point of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Index data.
    ElementArray,
    Uniform,
}

/// Expected update frequency of a buffer's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    #[default]
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    Nearest,
    #[default]
    Linear,
}

/// Sampling parameters applied when a texture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureParams {
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
}

impl TextureParams {
    pub fn clamped(filter: TextureFilter) -> Self {
        Self {
            wrap_s: TextureWrap::ClampToEdge,
            wrap_t: TextureWrap::ClampToEdge,
            min_filter: filter,
            mag_filter: filter,
        }
    }
}

/// Native graphics API surface used by the resource wrappers.
///
/// Implementations map these onto an OpenGL-style context; [`HeadlessDevice`]
/// keeps everything in memory.
///
/// [`HeadlessDevice`]: crate::HeadlessDevice
pub trait GraphicsDevice {
    // Buffers
    fn create_buffer(&mut self) -> Result<BufferId>;
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>);
    /// Replace the whole store of `buffer`.
    fn buffer_data(&mut self, buffer: BufferId, data: &[u8], usage: BufferUsage);
    /// Overwrite part of the store; the range is checked by the caller.
    fn buffer_sub_data(&mut self, buffer: BufferId, offset: usize, data: &[u8]);
    fn delete_buffer(&mut self, buffer: BufferId);

    // Vertex layout
    fn enable_vertex_attribute(&mut self, index: u32);
    fn vertex_attribute_pointer(&mut self, pointer: &VertexAttributePointer);

    // Textures
    fn create_texture(&mut self) -> Result<TextureId>;
    fn texture_image_rgba8(&mut self, texture: TextureId, width: u32, height: u32, pixels: &[u8]);
    fn texture_parameters(&mut self, texture: TextureId, params: &TextureParams);
    fn bind_texture_2d(&mut self, unit: u32, texture: Option<TextureId>);
    fn delete_texture(&mut self, texture: TextureId);

    // Shaders and programs
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderId>;
    /// Compile `source`; `false` means the info log holds the failure.
    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&mut self, shader: ShaderId);
    fn create_program(&mut self) -> Result<ProgramId>;
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);
    /// Link attached stages; `false` means the info log holds the failure.
    fn link_program(&mut self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn use_program(&mut self, program: Option<ProgramId>);
    fn delete_program(&mut self, program: ProgramId);

    // Uniforms
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn uniform_matrix4(&mut self, location: UniformLocation, columns: &[f32; 16]);
    fn uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]);
    fn uniform_int(&mut self, location: UniformLocation, value: i32);
}
