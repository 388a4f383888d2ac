//! Collider shapes and overlap tests
//!
//! Every spatial entity resolves to exactly one world-space [`Shape`]: its
//! declared custom collider, or its render bounds when no custom collider is
//! enabled. The shape pair picks one of three overlap algorithms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::non_negative;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(non_negative(w), non_negative(h)),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: rectangles sharing only an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Point on (or in) the rectangle nearest to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max())
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }
}

/// Collider discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderShape {
    None,
    Circle,
    Rectangle,
}

/// Custom collider declared relative to the entity origin.
///
/// `offset` is the top-left of the collider box, so a circle's center sits at
/// `origin + offset + (radius, radius)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Collider {
    #[default]
    None,
    Circle { offset: Vec2, radius: f32 },
    Rect { offset: Vec2, size: Vec2 },
}

impl Collider {
    pub fn circle(offset: Vec2, radius: f32) -> Self {
        Collider::Circle {
            offset,
            radius: non_negative(radius),
        }
    }

    pub fn rect(offset: Vec2, size: Vec2) -> Self {
        Collider::Rect {
            offset,
            size: Vec2::new(non_negative(size.x), non_negative(size.y)),
        }
    }

    pub fn shape(&self) -> ColliderShape {
        match self {
            Collider::None => ColliderShape::None,
            Collider::Circle { .. } => ColliderShape::Circle,
            Collider::Rect { .. } => ColliderShape::Rectangle,
        }
    }

    pub fn offset(&self) -> Vec2 {
        match *self {
            Collider::None => Vec2::ZERO,
            Collider::Circle { offset, .. } | Collider::Rect { offset, .. } => offset,
        }
    }

    /// Extent of the collider box (diameter for circles)
    pub fn size(&self) -> Vec2 {
        match *self {
            Collider::None => Vec2::ZERO,
            Collider::Circle { radius, .. } => Vec2::splat(radius * 2.0),
            Collider::Rect { size, .. } => size,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match *self {
            Collider::Circle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    /// Resolve to world space for an entity at `origin`. `None` has no shape of its own.
    pub fn resolve(&self, origin: Vec2) -> Option<Shape> {
        match *self {
            Collider::None => None,
            Collider::Circle { offset, radius } => Some(Shape::Circle {
                center: origin + offset + Vec2::splat(radius),
                radius,
            }),
            Collider::Rect { offset, size } => {
                Some(Shape::Rect(Rect::from_min_size(origin + offset, size)))
            }
        }
    }
}

/// World-space collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect(Rect),
}

impl Shape {
    /// Axis-aligned bounds of the shape
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Circle { center, radius } => {
                Rect::from_min_size(center - Vec2::splat(radius), Vec2::splat(radius * 2.0))
            }
            Shape::Rect(rect) => rect,
        }
    }
}

/// Overlap test selected by the shape pair
pub fn shapes_overlap(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Rect(ra), Shape::Rect(rb)) => rect_rect(ra, rb),
        (
            Shape::Circle {
                center: ca,
                radius: ra,
            },
            Shape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(*ca, *ra, *cb, *rb),
        (Shape::Circle { center, radius }, Shape::Rect(rect))
        | (Shape::Rect(rect), Shape::Circle { center, radius }) => {
            circle_rect(*center, *radius, rect)
        }
    }
}

#[inline]
pub fn rect_rect(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Circles collide iff center distance < sum of radii (touching is a miss)
#[inline]
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    center_a.distance_squared(center_b) < reach * reach
}

/// Circle vs rectangle via the rectangle point closest to the circle center
#[inline]
pub fn circle_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_circle_boundary_excluded() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circle_circle(a, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circle_circle(a, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circle_circle(a, 5.0, Vec2::new(6.0, 8.0), 5.0));
    }

    #[test]
    fn test_circle_rect_outside_and_inside() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);

        // Circle edge 2 units short of the rectangle's left edge
        assert!(!circle_rect(Vec2::new(-5.0, 10.0), 3.0, &rect));
        // Center 2 units inside the left edge
        assert!(circle_rect(Vec2::new(2.0, 10.0), 3.0, &rect));
        // Center 2 units outside, radius reaches across the edge
        assert!(circle_rect(Vec2::new(-2.0, 10.0), 3.0, &rect));
        // Exactly touching
        assert!(!circle_rect(Vec2::new(-3.0, 10.0), 3.0, &rect));
    }

    #[test]
    fn test_circle_rect_corner() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Diagonal distance from (13, 14) to corner (10, 10) is 5
        assert!(!circle_rect(Vec2::new(13.0, 14.0), 5.0, &rect));
        assert!(circle_rect(Vec2::new(13.0, 14.0), 5.1, &rect));
    }

    #[test]
    fn test_rect_rect_edge_touching_is_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_rect(&a, &Rect::new(9.0, 9.0, 10.0, 10.0)));
        assert!(!rect_rect(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rect_rect(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_dispatch_is_symmetric() {
        let circle = Shape::Circle {
            center: Vec2::new(-2.0, 5.0),
            radius: 3.0,
        };
        let rect = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(shapes_overlap(&circle, &rect));
        assert!(shapes_overlap(&rect, &circle));
    }

    #[test]
    fn test_degenerate_sizes_clamped() {
        assert_eq!(Collider::circle(Vec2::ZERO, -4.0).radius(), Some(0.0));
        assert_eq!(Collider::rect(Vec2::ZERO, Vec2::new(-1.0, 3.0)).size(), Vec2::new(0.0, 3.0));
        assert_eq!(Rect::new(0.0, 0.0, -5.0, f32::NAN).size, Vec2::ZERO);
    }

    #[test]
    fn test_circle_resolves_center_from_offset() {
        let collider = Collider::circle(Vec2::new(1.0, 2.0), 4.0);
        let shape = collider.resolve(Vec2::new(10.0, 10.0));
        assert_eq!(
            shape,
            Some(Shape::Circle {
                center: Vec2::new(15.0, 16.0),
                radius: 4.0
            })
        );
        assert_eq!(collider.size(), Vec2::splat(8.0));
        assert_eq!(Collider::None.resolve(Vec2::ZERO), None);
    }
}
