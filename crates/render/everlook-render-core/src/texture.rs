//! RGBA8 2D textures.

use crate::device::{GraphicsDevice, TextureId, TextureParams};
use crate::{RenderError, Result};

/// Owns one native 2D texture. Released by [`Texture2D::dispose`]; a drop
/// without dispose logs a leak.
#[derive(Debug)]
pub struct Texture2D {
    id: TextureId,
    width: u32,
    height: u32,
    params: TextureParams,
    disposed: bool,
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

impl Texture2D {
    /// Create a texture and upload `pixels` (row-major RGBA8).
    pub fn new<D>(
        device: &mut D,
        width: u32,
        height: u32,
        pixels: &[u8],
        params: TextureParams,
    ) -> Result<Self>
    where
        D: GraphicsDevice + ?Sized,
    {
        let expected = expected_len(width, height);
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(RenderError::TextureSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        let id = device.create_texture()?;
        device.texture_image_rgba8(id, width, height, pixels);
        device.texture_parameters(id, &params);
        log::debug!("texture {:?} created: {}x{}", id, width, height);
        Ok(Self {
            id,
            width,
            height,
            params,
            disposed: false,
        })
    }

    /// Replace the pixels; dimensions are fixed.
    pub fn upload<D>(&mut self, device: &mut D, pixels: &[u8]) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let expected = expected_len(self.width, self.height);
        if pixels.len() != expected {
            return Err(RenderError::TextureSize {
                width: self.width,
                height: self.height,
                expected,
                actual: pixels.len(),
            });
        }
        device.texture_image_rgba8(self.id, self.width, self.height, pixels);
        Ok(())
    }

    pub fn set_params<D>(&mut self, device: &mut D, params: TextureParams)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.texture_parameters(self.id, &params);
        self.params = params;
    }

    /// Bind to texture unit `unit`.
    pub fn bind<D>(&self, device: &mut D, unit: u32)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.bind_texture_2d(unit, Some(self.id));
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn params(&self) -> TextureParams {
        self.params
    }

    pub fn dispose<D>(mut self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.delete_texture(self.id);
        self.disposed = true;
        log::debug!("texture {:?} disposed", self.id);
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("texture {:?} dropped without dispose; native object leaked", self.id);
        }
    }
}
