//! Danmaku Pool - projectile lifecycle and collision core for bullet-hell shooters
//!
//! Core modules:
//! - `sim`: Entities, colliders, projectiles, the template catalog and the projectile pool
//! - `renderer`: Render boundary (draw trait + recording draw list)
//! - `settings`: Data-driven pool configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::PoolSettings;
pub use sim::{
    Actor, BulletHandle, Collidable, Collider, Contact, EntityKind, Owner, PoolEvent, Projectile,
    ProjectilePool, SpatialEntity, TemplateCatalog, TemplateSource,
};

use glam::Vec2;

/// Pool and playfield configuration constants
pub mod consts {
    /// Frame budget at 60 Hz, in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Playfield dimensions (projectiles leaving this box are retired)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Pool defaults
    pub const DEFAULT_POOL_SIZE: usize = 1000;
    pub const MAX_POOL_SIZE: usize = 10_000;
    /// Fraction of current capacity added by one growth step
    pub const GROWTH_FRACTION: f32 = 0.2;

    /// Projectile defaults
    pub const DEFAULT_DAMAGE: f32 = 1.0;
    pub const DEFAULT_COLLIDER_RADIUS: f32 = 4.0;
    /// Sprite-sheet frame duration (ms)
    pub const ANIMATION_FRAME_MS: f32 = 100.0;
    /// Side length of the untextured placeholder square
    pub const PLACEHOLDER_SIZE: f32 = 8.0;

    /// Player reactions
    pub const PLAYER_INVINCIBLE_MS: f32 = 2000.0;
    pub const MAX_POWER: f32 = 4.0;
    pub const POWER_ITEM_VALUE: f32 = 0.1;
    pub const POINT_ITEM_VALUE: u64 = 10;
}

/// Velocity vector from speed and heading (radians, 0 = +x, y grows downward)
#[inline]
pub fn polar_velocity(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Clamp a geometric quantity to non-negative
#[inline]
pub fn non_negative(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
