//! Quad generation for sprites and solid rectangles

use super::Rgba;
use super::vertex::Vertex;
use crate::sim::catalog::FrameRect;
use crate::sim::collider::Rect;

/// 0-255 color to normalized floats
fn color_to_f32(color: Rgba) -> [f32; 4] {
    color.map(|c| c as f32 / 255.0)
}

/// Two triangles covering `dest`, mapped to the texel rectangle `src`
pub fn textured_quad(dest: Rect, src: Option<FrameRect>, tint: Rgba) -> [Vertex; 6] {
    let color = color_to_f32(tint);
    let (u0, v0, u1, v1) = match src {
        Some(frame) => (
            frame.x as f32,
            frame.y as f32,
            (frame.x + frame.w) as f32,
            (frame.y + frame.h) as f32,
        ),
        // Whole texture, normalized
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let min = dest.min;
    let max = dest.max();

    let tl = Vertex::new(min.x, min.y, u0, v0, color);
    let tr = Vertex::new(max.x, min.y, u1, v0, color);
    let bl = Vertex::new(min.x, max.y, u0, v1, color);
    let br = Vertex::new(max.x, max.y, u1, v1, color);

    [tl, bl, tr, tr, bl, br]
}

/// Untextured quad
pub fn solid_quad(dest: Rect, color: Rgba) -> [Vertex; 6] {
    textured_quad(dest, None, color)
}
