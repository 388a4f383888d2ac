//! Render boundary
//!
//! Drawing and texture loading belong to the host application. The simulation
//! only talks to the [`Renderer`] and [`TextureLoader`] traits; [`DrawList`]
//! is a recording renderer that batches quads into GPU-ready vertex buffers.

pub mod draw_list;
pub mod shapes;
pub mod vertex;

use std::path::PathBuf;
use std::rc::Rc;

pub use draw_list::{DrawBatch, DrawList};
pub use vertex::Vertex;

use crate::sim::catalog::FrameRect;
use crate::sim::collider::Rect;

/// RGBA color, 0-255 per channel
pub type Rgba = [u8; 4];

/// Placeholder color for projectiles without a texture
pub const MAGENTA: Rgba = [255, 0, 255, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];

/// Shared reference to a texture loaded by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: u32,
    path: Rc<str>,
}

impl TextureHandle {
    pub fn new(id: u32, path: &str) -> Self {
        Self {
            id,
            path: Rc::from(path),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Draw target for one frame
pub trait Renderer {
    /// Draw `src` (texels, whole texture if `None`) of `texture` into `dest`
    fn draw_texture(&mut self, texture: &TextureHandle, src: Option<FrameRect>, dest: Rect);

    fn fill_rect(&mut self, dest: Rect, color: Rgba);
}

/// Resolves a texture path to a handle. `None` means the resource is unavailable.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle>;
}

impl<F> TextureLoader for F
where
    F: FnMut(&str) -> Option<TextureHandle>,
{
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        self(path)
    }
}

/// Loader that accepts any texture file present under `root`
#[derive(Debug, Clone)]
pub struct FsTextureLoader {
    root: PathBuf,
    next_id: u32,
}

impl FsTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: 1,
        }
    }
}

impl TextureLoader for FsTextureLoader {
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        let full = self.root.join(path);
        if !full.is_file() {
            log::warn!("Texture not found: {}", full.display());
            return None;
        }
        let handle = TextureHandle::new(self.next_id, path);
        self.next_id += 1;
        Some(handle)
    }
}
