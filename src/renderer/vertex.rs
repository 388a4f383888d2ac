//! Vertex types for 2D quads

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position, texel coordinate and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    /// Texel-space coordinate (the host normalizes by texture size)
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Size of one vertex in bytes (buffer stride)
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_is_packed() {
        assert_eq!(Vertex::STRIDE, 8 * 4);
        let verts = [Vertex::new(1.0, 2.0, 0.0, 0.0, [1.0; 4]); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 3 * Vertex::STRIDE);
    }
}
