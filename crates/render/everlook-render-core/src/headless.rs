//! In-memory [`GraphicsDevice`] for tests and tools without a GPU context.
//!
//! Behaviour:
//! - compiling fails on a `#error <message>` line, with a GL-style info log
//! - linking fails when no compiled vertex stage is attached
//! - uniforms are the `uniform <type> <name>;` declarations of the attached
//!   stages, assigned locations at link time
//! - deleting an unknown or already deleted object is counted, not fatal

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::device::{
    BufferId, BufferTarget, BufferUsage, GraphicsDevice, ProgramId, ShaderId, ShaderStage,
    TextureId, TextureParams, UniformLocation,
};
use crate::vertex::VertexAttributePointer;
use crate::{RenderError, Result};

/// Value last written to a uniform location.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Mat4([f32; 16]),
    Vec4([f32; 4]),
    Int(i32),
}

#[derive(Debug, Default)]
struct BufferState {
    data: Vec<u8>,
    usage: BufferUsage,
}

#[derive(Debug, Default)]
struct TextureState {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    params: TextureParams,
}

#[derive(Debug)]
struct ShaderState {
    stage: ShaderStage,
    compiled: bool,
    log: String,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
struct ProgramState {
    attached: Vec<ShaderId>,
    linked: bool,
    log: String,
    uniforms: BTreeMap<String, UniformLocation>,
}

#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_name: u32,
    object_limit: Option<usize>,
    buffers: HashMap<BufferId, BufferState>,
    textures: HashMap<TextureId, TextureState>,
    shaders: HashMap<ShaderId, ShaderState>,
    programs: HashMap<ProgramId, ProgramState>,
    bound_buffers: HashMap<BufferTarget, BufferId>,
    bound_textures: BTreeMap<u32, TextureId>,
    current_program: Option<ProgramId>,
    enabled_attributes: BTreeSet<u32>,
    attribute_pointers: BTreeMap<u32, VertexAttributePointer>,
    uniform_values: HashMap<UniformLocation, UniformValue>,
    invalid_deletes: usize,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that refuses to create more than `limit` live objects.
    pub fn with_object_limit(limit: usize) -> Self {
        Self {
            object_limit: Some(limit),
            ..Self::default()
        }
    }

    fn allocate(&mut self, kind: &'static str) -> Result<u32> {
        if let Some(limit) = self.object_limit {
            if self.live_objects() >= limit {
                return Err(RenderError::ObjectCreation { kind });
            }
        }
        // Name 0 is reserved, as in GL.
        self.next_name += 1;
        Ok(self.next_name)
    }

    fn forget<K: std::hash::Hash + Eq + std::fmt::Debug, V>(
        map: &mut HashMap<K, V>,
        key: K,
        invalid_deletes: &mut usize,
    ) -> Option<V> {
        let removed = map.remove(&key);
        if removed.is_none() {
            log::warn!("delete of unknown object {:?}", key);
            *invalid_deletes += 1;
        }
        removed
    }

    /// Buffers, textures, shaders and programs currently alive.
    pub fn live_objects(&self) -> usize {
        self.buffers.len() + self.textures.len() + self.shaders.len() + self.programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    /// Deletes of objects that did not exist (double release included).
    pub fn invalid_deletes(&self) -> usize {
        self.invalid_deletes
    }

    pub fn buffer_contents(&self, buffer: BufferId) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(|b| b.data.as_slice())
    }

    pub fn buffer_usage(&self, buffer: BufferId) -> Option<BufferUsage> {
        self.buffers.get(&buffer).map(|b| b.usage)
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferId> {
        self.bound_buffers.get(&target).copied()
    }

    pub fn texture_pixels(&self, texture: TextureId) -> Option<(u32, u32, &[u8])> {
        self.textures
            .get(&texture)
            .map(|t| (t.width, t.height, t.pixels.as_slice()))
    }

    pub fn texture_params(&self, texture: TextureId) -> Option<TextureParams> {
        self.textures.get(&texture).map(|t| t.params)
    }

    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.bound_textures.get(&unit).copied()
    }

    pub fn current_program(&self) -> Option<ProgramId> {
        self.current_program
    }

    pub fn is_attribute_enabled(&self, index: u32) -> bool {
        self.enabled_attributes.contains(&index)
    }

    pub fn attribute_pointer(&self, index: u32) -> Option<&VertexAttributePointer> {
        self.attribute_pointers.get(&index)
    }

    /// Active uniform names of a linked program, sorted.
    pub fn active_uniforms(&self, program: ProgramId) -> Vec<&str> {
        self.programs
            .get(&program)
            .map(|p| p.uniforms.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn uniform_value(&self, program: ProgramId, name: &str) -> Option<&UniformValue> {
        let location = self.uniform_location(program, name)?;
        self.uniform_values.get(&location)
    }
}

/// Compile `source`: `Err(log)` on the first `#error` directive.
fn compile_glsl(source: &str) -> std::result::Result<Vec<String>, String> {
    let mut uniforms = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let line = line.trim();
        if let Some(message) = line.strip_prefix("#error") {
            return Err(format!(
                "ERROR: 0:{}: '#error' : {}\nERROR: 1 compilation errors. No code generated.",
                line_no + 1,
                message.trim()
            ));
        }
        if let Some(name) = uniform_name(line) {
            uniforms.push(name.to_owned());
        }
    }
    Ok(uniforms)
}

/// Name declared by a `uniform [precision] <type> <name>[N];` line.
fn uniform_name(line: &str) -> Option<&str> {
    let decl = line.strip_prefix("uniform")?;
    if !decl.starts_with(char::is_whitespace) {
        return None;
    }
    let decl = decl.split(';').next()?.trim();
    let name = decl.split_whitespace().last()?;
    let name = name.split('[').next()?;
    (!name.is_empty()).then_some(name)
}

impl GraphicsDevice for HeadlessDevice {
    fn create_buffer(&mut self) -> Result<BufferId> {
        let id = BufferId(self.allocate("buffer")?);
        self.buffers.insert(id, BufferState::default());
        Ok(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        match buffer {
            Some(id) => self.bound_buffers.insert(target, id),
            None => self.bound_buffers.remove(&target),
        };
    }

    fn buffer_data(&mut self, buffer: BufferId, data: &[u8], usage: BufferUsage) {
        if let Some(state) = self.buffers.get_mut(&buffer) {
            state.data = data.to_vec();
            state.usage = usage;
        }
    }

    fn buffer_sub_data(&mut self, buffer: BufferId, offset: usize, data: &[u8]) {
        if let Some(dst) = self
            .buffers
            .get_mut(&buffer)
            .and_then(|state| state.data.get_mut(offset..offset + data.len()))
        {
            dst.copy_from_slice(data);
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        if Self::forget(&mut self.buffers, buffer, &mut self.invalid_deletes).is_some() {
            self.bound_buffers.retain(|_, bound| *bound != buffer);
        }
    }

    fn enable_vertex_attribute(&mut self, index: u32) {
        self.enabled_attributes.insert(index);
    }

    fn vertex_attribute_pointer(&mut self, pointer: &VertexAttributePointer) {
        self.attribute_pointers.insert(pointer.index, *pointer);
    }

    fn create_texture(&mut self) -> Result<TextureId> {
        let id = TextureId(self.allocate("texture")?);
        self.textures.insert(id, TextureState::default());
        Ok(id)
    }

    fn texture_image_rgba8(&mut self, texture: TextureId, width: u32, height: u32, pixels: &[u8]) {
        if let Some(state) = self.textures.get_mut(&texture) {
            state.width = width;
            state.height = height;
            state.pixels = pixels.to_vec();
        }
    }

    fn texture_parameters(&mut self, texture: TextureId, params: &TextureParams) {
        if let Some(state) = self.textures.get_mut(&texture) {
            state.params = *params;
        }
    }

    fn bind_texture_2d(&mut self, unit: u32, texture: Option<TextureId>) {
        match texture {
            Some(id) => self.bound_textures.insert(unit, id),
            None => self.bound_textures.remove(&unit),
        };
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if Self::forget(&mut self.textures, texture, &mut self.invalid_deletes).is_some() {
            self.bound_textures.retain(|_, bound| *bound != texture);
        }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderId> {
        let id = ShaderId(self.allocate("shader")?);
        self.shaders.insert(
            id,
            ShaderState {
                stage,
                compiled: false,
                log: String::new(),
                uniforms: Vec::new(),
            },
        );
        Ok(id)
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> bool {
        let Some(state) = self.shaders.get_mut(&shader) else {
            return false;
        };
        match compile_glsl(source) {
            Ok(uniforms) => {
                state.compiled = true;
                state.log.clear();
                state.uniforms = uniforms;
            }
            Err(log) => {
                state.compiled = false;
                state.log = log;
                state.uniforms.clear();
            }
        }
        state.compiled
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        Self::forget(&mut self.shaders, shader, &mut self.invalid_deletes);
    }

    fn create_program(&mut self) -> Result<ProgramId> {
        let id = ProgramId(self.allocate("program")?);
        self.programs.insert(id, ProgramState::default());
        Ok(id)
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(state) = self.programs.get_mut(&program) {
            state.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: ProgramId) -> bool {
        let Some(state) = self.programs.get(&program) else {
            return false;
        };

        let mut has_vertex = false;
        let mut names = BTreeSet::new();
        let mut failure = None;
        for id in &state.attached {
            match self.shaders.get(id) {
                Some(shader) if shader.compiled => {
                    has_vertex |= shader.stage == ShaderStage::Vertex;
                    names.extend(shader.uniforms.iter().cloned());
                }
                _ => {
                    failure = Some(format!("error: attached shader {} is not compiled", id.0));
                    break;
                }
            }
        }
        if failure.is_none() && !has_vertex {
            failure = Some("error: no vertex shader attached to program".to_owned());
        }

        let mut uniforms = BTreeMap::new();
        if failure.is_none() {
            for name in names {
                self.next_name += 1;
                uniforms.insert(name, UniformLocation(self.next_name));
            }
        }

        let Some(state) = self.programs.get_mut(&program) else {
            return false;
        };
        state.linked = failure.is_none();
        state.log = failure.unwrap_or_default();
        state.uniforms = uniforms;
        state.linked
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        self.programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.current_program = program;
    }

    fn delete_program(&mut self, program: ProgramId) {
        if let Some(state) = Self::forget(&mut self.programs, program, &mut self.invalid_deletes) {
            for location in state.uniforms.values() {
                self.uniform_values.remove(location);
            }
            if self.current_program == Some(program) {
                self.current_program = None;
            }
        }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let state = self.programs.get(&program)?;
        if !state.linked {
            return None;
        }
        state.uniforms.get(name).copied()
    }

    fn uniform_matrix4(&mut self, location: UniformLocation, columns: &[f32; 16]) {
        self.uniform_values.insert(location, UniformValue::Mat4(*columns));
    }

    fn uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]) {
        self.uniform_values.insert(location, UniformValue::Vec4(value));
    }

    fn uniform_int(&mut self, location: UniformLocation, value: i32) {
        self.uniform_values.insert(location, UniformValue::Int(value));
    }
}
