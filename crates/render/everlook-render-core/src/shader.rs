//! Shader programs and the per-context shader cache.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::{Mat4, Vec4};

use crate::device::{GraphicsDevice, ProgramId, ShaderId, ShaderStage, UniformLocation};
use crate::texture::Texture2D;
use crate::{RenderError, Result};

/// GLSL sources for one program. The text itself is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderSources {
    pub vertex: Option<String>,
    pub fragment: Option<String>,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: Some(vertex.into()),
            fragment: Some(fragment.into()),
        }
    }

    fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> + '_ {
        [
            (ShaderStage::Vertex, self.vertex.as_deref()),
            (ShaderStage::Fragment, self.fragment.as_deref()),
        ]
        .into_iter()
        .filter_map(|(stage, src)| src.map(|s| (stage, s)))
    }

    fn validate(&self) -> Result<()> {
        if self.vertex.is_none() && self.fragment.is_none() {
            return Err(RenderError::ShaderSource {
                reason: "no shader stages given".into(),
            });
        }
        for (stage, source) in self.stages() {
            if source.trim().is_empty() {
                return Err(RenderError::ShaderSource {
                    reason: format!("{stage} source is empty"),
                });
            }
            if source.contains('\0') {
                return Err(RenderError::ShaderSource {
                    reason: format!("{stage} source contains a NUL byte"),
                });
            }
        }
        Ok(())
    }
}

/// Owns one compiled and linked program.
///
/// Construction either yields a usable program or fails with the native log;
/// a failed build leaves no native objects behind.
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
    disposed: bool,
}

fn discard<D: GraphicsDevice + ?Sized>(device: &mut D, program: ProgramId, shaders: &[ShaderId]) {
    for &shader in shaders {
        device.delete_shader(shader);
    }
    device.delete_program(program);
}

impl ShaderProgram {
    pub fn new<D>(device: &mut D, sources: &ShaderSources) -> Result<Self>
    where
        D: GraphicsDevice + ?Sized,
    {
        sources.validate()?;

        let program = device.create_program()?;
        let mut shaders = Vec::with_capacity(2);
        for (stage, source) in sources.stages() {
            let shader = match device.create_shader(stage) {
                Ok(shader) => shader,
                Err(err) => {
                    discard(device, program, &shaders);
                    return Err(err);
                }
            };
            shaders.push(shader);
            if !device.compile_shader(shader, source) {
                let log = device.shader_info_log(shader);
                log::debug!("{stage} shader failed to compile: {log}");
                discard(device, program, &shaders);
                return Err(RenderError::ShaderCompilation { stage, log });
            }
            device.attach_shader(program, shader);
        }

        if !device.link_program(program) {
            let log = device.program_info_log(program);
            log::debug!("program {:?} failed to link: {log}", program);
            discard(device, program, &shaders);
            return Err(RenderError::ShaderLinking { log });
        }

        // Linked programs keep their code; the stage objects are no longer needed.
        for shader in shaders {
            device.delete_shader(shader);
        }
        log::debug!("program {:?} linked", program);
        Ok(Self {
            id: program,
            disposed: false,
        })
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Make this the current program.
    pub fn enable<D>(&self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.use_program(Some(self.id));
    }

    pub fn uniform<D>(&self, device: &D, name: &str) -> Result<UniformLocation>
    where
        D: GraphicsDevice + ?Sized,
    {
        device
            .uniform_location(self.id, name)
            .ok_or_else(|| RenderError::UniformNotFound { name: name.into() })
    }

    /// Set a `mat4` uniform (column-major). The program must be enabled.
    pub fn set_matrix<D>(&self, device: &mut D, name: &str, matrix: &Mat4) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let location = self.uniform(&*device, name)?;
        device.uniform_matrix4(location, &matrix.to_cols_array());
        Ok(())
    }

    pub fn set_vector4<D>(&self, device: &mut D, name: &str, value: Vec4) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let location = self.uniform(&*device, name)?;
        device.uniform_vec4(location, value.to_array());
        Ok(())
    }

    pub fn set_int<D>(&self, device: &mut D, name: &str, value: i32) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let location = self.uniform(&*device, name)?;
        device.uniform_int(location, value);
        Ok(())
    }

    /// Bind `texture` to `unit` and point sampler `name` at it.
    pub fn bind_texture_2d<D>(
        &self,
        device: &mut D,
        name: &str,
        unit: u32,
        texture: &Texture2D,
    ) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let location = self.uniform(&*device, name)?;
        texture.bind(device, unit);
        device.uniform_int(location, unit as i32);
        Ok(())
    }

    pub fn dispose<D>(mut self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.delete_program(self.id);
        self.disposed = true;
        log::debug!("program {:?} disposed", self.id);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("program {:?} dropped without dispose; native object leaked", self.id);
        }
    }
}

/// Shader programs keyed by name, owned alongside the graphics context.
///
/// Failed loads are not cached; the next request for the same name loads again.
#[derive(Debug, Default)]
pub struct ShaderCache {
    programs: HashMap<String, ShaderProgram>,
}

impl ShaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached program for `name`, building it from `load(name)` on first use.
    pub fn get_or_load<D, F>(
        &mut self,
        device: &mut D,
        name: &str,
        load: F,
    ) -> Result<&ShaderProgram>
    where
        D: GraphicsDevice + ?Sized,
        F: FnOnce(&str) -> Result<ShaderSources>,
    {
        match self.programs.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let sources = load(name)?;
                let program = ShaderProgram::new(device, &sources)?;
                log::debug!("shader '{}' cached as {:?}", name, program.id());
                Ok(&*entry.insert(program))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ShaderProgram> {
        self.programs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Drop one program from the cache, releasing it.
    pub fn evict<D>(&mut self, device: &mut D, name: &str) -> bool
    where
        D: GraphicsDevice + ?Sized,
    {
        match self.programs.remove(name) {
            Some(program) => {
                program.dispose(device);
                true
            }
            None => false,
        }
    }

    /// Release every cached program. Call before the context goes away.
    pub fn dispose<D>(self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        let count = self.programs.len();
        for (_, program) in self.programs {
            program.dispose(device);
        }
        log::debug!("shader cache disposed ({count} programs)");
    }
}
