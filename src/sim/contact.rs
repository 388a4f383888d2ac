//! Entity-side collision boundary
//!
//! Anything the pool sweeps projectiles against implements [`Collidable`].
//! The pool invokes `on_collision` on both participants of every qualifying
//! overlap; what an entity does with the hit (damage, pickups, score) is its
//! own business.

use super::entity::SpatialEntity;

/// What one participant sees of the other during a collision
#[derive(Debug, Clone, Copy)]
pub struct Contact<'a> {
    pub body: &'a SpatialEntity,
    /// Damage carried by the other participant (0 for actors and items)
    pub damage: f32,
}

pub trait Collidable {
    fn body(&self) -> &SpatialEntity;

    fn contact_damage(&self) -> f32 {
        0.0
    }

    fn contact(&self) -> Contact<'_> {
        Contact {
            body: self.body(),
            damage: self.contact_damage(),
        }
    }

    fn on_collision(&mut self, other: &Contact<'_>);
}

impl<T: Collidable + ?Sized> Collidable for &mut T {
    fn body(&self) -> &SpatialEntity {
        (**self).body()
    }

    fn contact_damage(&self) -> f32 {
        (**self).contact_damage()
    }

    fn on_collision(&mut self, other: &Contact<'_>) {
        (**self).on_collision(other)
    }
}

impl<T: Collidable + ?Sized> Collidable for Box<T> {
    fn body(&self) -> &SpatialEntity {
        (**self).body()
    }

    fn contact_damage(&self) -> f32 {
        (**self).contact_damage()
    }

    fn on_collision(&mut self, other: &Contact<'_>) {
        (**self).on_collision(other)
    }
}
