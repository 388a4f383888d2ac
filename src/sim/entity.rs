//! Spatial entity record shared by actors and projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{Collider, Rect, Shape, shapes_overlap};
use crate::non_negative;

/// Entity category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    PowerItem,
    BombItem,
    LifeItem,
    PointItem,
}

impl EntityKind {
    pub fn is_projectile(&self) -> bool {
        matches!(self, EntityKind::PlayerProjectile | EntityKind::EnemyProjectile)
    }

    pub fn is_item(&self) -> bool {
        matches!(
            self,
            EntityKind::PowerItem | EntityKind::BombItem | EntityKind::LifeItem | EntityKind::PointItem
        )
    }
}

/// Which per-frame passes an entity takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub update: bool,
    pub render: bool,
    pub collide: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            update: true,
            render: true,
            collide: true,
        }
    }
}

/// Position, geometry, motion and collider of anything that lives on the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialEntity {
    pub kind: EntityKind,
    /// Top-left of the render bounds
    pub pos: Vec2,
    size: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub active: bool,
    pub caps: Capabilities,
    collider: Collider,
    /// When false, collision tests use the render bounds
    use_collider: bool,
}

impl SpatialEntity {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::new(non_negative(size.x), non_negative(size.y)),
            vel: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            active: true,
            caps: Capabilities::default(),
            collider: Collider::None,
            use_collider: false,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(non_negative(width), non_negative(height));
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    /// Render bounds rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Center-to-center distance
    pub fn distance_to(&self, other: &SpatialEntity) -> f32 {
        self.center().distance(other.center())
    }

    /// True once the render bounds lie entirely outside `[0, width] x [0, height]`
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        let max = self.pos + self.size;
        max.x < 0.0 || self.pos.x > width || max.y < 0.0 || self.pos.y > height
    }

    /// Keep the render bounds inside the box `[min, max]`
    pub fn clamp_position(&mut self, min: Vec2, max: Vec2) {
        let limit = (max - self.size).max(min);
        self.pos = self.pos.clamp(min, limit);
    }

    pub fn set_circle_collider(&mut self, offset: Vec2, radius: f32) {
        self.collider = Collider::circle(offset, radius);
        self.use_collider = true;
    }

    pub fn set_rect_collider(&mut self, offset: Vec2, size: Vec2) {
        self.collider = Collider::rect(offset, size);
        self.use_collider = true;
    }

    /// Drop the custom collider; collisions fall back to render bounds
    pub fn clear_collider(&mut self) {
        self.collider = Collider::None;
        self.use_collider = false;
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn uses_custom_collider(&self) -> bool {
        self.use_collider && self.collider != Collider::None
    }

    /// World-space shape used for collision tests
    pub fn collision_shape(&self) -> Shape {
        if self.use_collider {
            if let Some(shape) = self.collider.resolve(self.pos) {
                return shape;
            }
        }
        Shape::Rect(self.bounds())
    }

    /// Shape-aware overlap test. Pure predicate.
    pub fn collides_with(&self, other: &SpatialEntity) -> bool {
        shapes_overlap(&self.collision_shape(), &other.collision_shape())
    }
}
