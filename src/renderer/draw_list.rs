//! Recording renderer
//!
//! Collects one frame of draw calls into per-texture vertex batches. Consecutive
//! draws with the same texture share a batch, so the host issues one draw call
//! per texture run.

use super::shapes::{solid_quad, textured_quad};
use super::vertex::Vertex;
use super::{Renderer, Rgba, TextureHandle, WHITE};
use crate::sim::catalog::FrameRect;
use crate::sim::collider::Rect;

/// Vertices sharing one texture (`None` = solid color)
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub texture: Option<TextureHandle>,
    pub vertices: Vec<Vertex>,
}

impl DrawBatch {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    batches: Vec<DrawBatch>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded batches, keeping nothing for the next frame
    pub fn clear(&mut self) {
        self.batches.clear();
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    pub fn quad_count(&self) -> usize {
        self.batches.iter().map(DrawBatch::quad_count).sum()
    }

    fn push_quad(&mut self, texture: Option<&TextureHandle>, quad: [Vertex; 6]) {
        match self.batches.last_mut() {
            Some(batch) if batch.texture.as_ref() == texture => batch.vertices.extend_from_slice(&quad),
            _ => self.batches.push(DrawBatch {
                texture: texture.cloned(),
                vertices: quad.to_vec(),
            }),
        }
    }
}

impl Renderer for DrawList {
    fn draw_texture(&mut self, texture: &TextureHandle, src: Option<FrameRect>, dest: Rect) {
        self.push_quad(Some(texture), textured_quad(dest, src, WHITE));
    }

    fn fill_rect(&mut self, dest: Rect, color: Rgba) {
        self.push_quad(None, solid_quad(dest, color));
    }
}
