//! Vertex attribute layout.

use crate::device::GraphicsDevice;
use crate::{RenderError, Result};

/// Scalar type of one attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

impl AttributeKind {
    pub fn size_bytes(self) -> u32 {
        match self {
            AttributeKind::Byte | AttributeKind::UnsignedByte => 1,
            AttributeKind::Short | AttributeKind::UnsignedShort => 2,
            AttributeKind::Int | AttributeKind::UnsignedInt | AttributeKind::Float => 4,
        }
    }
}

/// Where one shader input reads from the bound array buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributePointer {
    pub index: u32,
    pub components: u8,
    pub kind: AttributeKind,
    pub normalized: bool,
    /// Bytes between consecutive vertices; 0 means tightly packed.
    pub stride: u32,
    /// Byte offset of the first component.
    pub offset: u32,
}

impl VertexAttributePointer {
    pub fn new(index: u32, components: u8, kind: AttributeKind) -> Result<Self> {
        if !(1..=4).contains(&components) {
            return Err(RenderError::InvalidAttribute { index, components });
        }
        Ok(Self {
            index,
            components,
            kind,
            normalized: false,
            stride: 0,
            offset: 0,
        })
    }

    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Size in bytes of this attribute within one vertex.
    #[inline]
    pub fn size_bytes(&self) -> u32 {
        self.components as u32 * self.kind.size_bytes()
    }

    /// Enable the attribute slot and point it at the bound array buffer.
    pub fn enable<D>(&self, device: &mut D)
    where
        D: GraphicsDevice + ?Sized,
    {
        device.enable_vertex_attribute(self.index);
        device.vertex_attribute_pointer(self);
    }

    /// Pointers for interleaved attributes laid out back to back, in order.
    /// Each entry is `(index, components, kind)`.
    pub fn interleaved(layout: &[(u32, u8, AttributeKind)]) -> Result<Vec<Self>> {
        let mut pointers = Vec::with_capacity(layout.len());
        let mut offset = 0;
        for &(index, components, kind) in layout {
            let pointer = Self::new(index, components, kind)?.offset(offset);
            offset += pointer.size_bytes();
            pointers.push(pointer);
        }
        for pointer in &mut pointers {
            pointer.stride = offset;
        }
        Ok(pointers)
    }
}
