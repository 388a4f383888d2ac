//! Simulation module
//!
//! Everything that moves, collides or gets recycled lives here:
//! - Fixed timestep only, caller-driven (`update` then `check_collisions` each frame)
//! - Single-threaded; projectiles are owned exclusively by the pool
//! - No rendering or platform dependencies beyond the `Renderer` trait

pub mod actor;
pub mod catalog;
pub mod collider;
pub mod contact;
pub mod entity;
pub mod pool;
pub mod projectile;

pub use actor::{Actor, Reaction};
pub use catalog::{CatalogError, ColliderSpec, FrameRect, ProjectileTemplate, TemplateCatalog, TemplateSource};
pub use collider::{Collider, ColliderShape, Rect, Shape, shapes_overlap};
pub use contact::{Collidable, Contact};
pub use entity::{Capabilities, EntityKind, SpatialEntity};
pub use pool::{BulletHandle, PoolEvent, ProjectilePool};
pub use projectile::{ExpireHook, HitHook, MotionHook, Owner, Projectile};
