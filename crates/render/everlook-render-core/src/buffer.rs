//! Typed GPU buffer with a CPU-side mirror.

use std::mem::size_of;

use bytemuck::Pod;

use crate::device::{BufferId, BufferTarget, BufferUsage, GraphicsDevice};
use crate::{RenderError, Result};

/// Owns one native buffer object.
///
/// The native object is released only by [`Buffer::dispose`]. Dropping a
/// buffer that was never disposed leaks the native object and logs a warning;
/// the wrapper has no device to release it with.
#[derive(Debug)]
pub struct Buffer<T: Pod> {
    id: BufferId,
    target: BufferTarget,
    usage: BufferUsage,
    data: Vec<T>,
    disposed: bool,
}

impl<T: Pod> Buffer<T> {
    /// Create the native buffer and upload `data`.
    pub fn new<D>(
        device: &mut D,
        target: BufferTarget,
        usage: BufferUsage,
        data: Vec<T>,
    ) -> Result<Self>
    where
        D: GraphicsDevice + ?Sized,
    {
        let id = device.create_buffer()?;
        device.buffer_data(id, bytemuck::cast_slice(&data), usage);
        log::debug!(
            "buffer {:?} created: {:?}, {} elements ({} bytes)",
            id,
            target,
            data.len(),
            data.len() * size_of::<T>()
        );
        Ok(Self {
            id,
            target,
            usage,
            data,
            disposed: false,
        })
    }

    /// Replace the contents, reallocating the native store.
    pub fn set_data<D>(&mut self, device: &mut D, data: Vec<T>)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.buffer_data(self.id, bytemuck::cast_slice(&data), self.usage);
        self.data = data;
    }

    /// Overwrite `data.len()` elements starting at element `start`.
    pub fn update<D>(&mut self, device: &mut D, start: usize, data: &[T]) -> Result<()>
    where
        D: GraphicsDevice + ?Sized,
    {
        let end = start.checked_add(data.len()).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(RenderError::BufferSize {
                offset: start.saturating_mul(size_of::<T>()),
                len: std::mem::size_of_val(data),
                capacity: self.byte_len(),
            });
        };
        device.buffer_sub_data(self.id, start * size_of::<T>(), bytemuck::cast_slice(data));
        self.data[start..end].copy_from_slice(data);
        Ok(())
    }

    /// CPU mirror of the uploaded contents.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.len() * size_of::<T>()
    }

    #[inline]
    pub fn id(&self) -> BufferId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn bind<D>(&self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.bind_buffer(self.target, Some(self.id));
    }

    /// Release the native buffer. Consumes the wrapper, so it runs once.
    pub fn dispose<D>(mut self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.delete_buffer(self.id);
        self.disposed = true;
        log::debug!("buffer {:?} disposed", self.id);
    }
}

impl<T: Pod> Drop for Buffer<T> {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("buffer {:?} dropped without dispose; native object leaked", self.id);
        }
    }
}
