//! Actors: players, enemies and items on the receiving end of collisions
//!
//! Reactions are looked up by `(self kind, other kind)` in a static table so
//! adding a new pairing is one row, not another branch in every actor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::{Collidable, Contact};
use super::entity::{EntityKind, SpatialEntity};
use crate::consts::*;

/// Effect applied to the receiving actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Lose a life and become briefly invincible
    TakeHit,
    /// Lose hit points equal to the contact's damage
    TakeDamage,
    GainPower,
    GainBomb,
    GainLife,
    GainPoints,
    /// Item picked up; disappears
    Collected,
}

const REACTIONS: &[(EntityKind, EntityKind, Reaction)] = &[
    (EntityKind::Player, EntityKind::EnemyProjectile, Reaction::TakeHit),
    (EntityKind::Enemy, EntityKind::PlayerProjectile, Reaction::TakeDamage),
    (EntityKind::Player, EntityKind::PowerItem, Reaction::GainPower),
    (EntityKind::Player, EntityKind::BombItem, Reaction::GainBomb),
    (EntityKind::Player, EntityKind::LifeItem, Reaction::GainLife),
    (EntityKind::Player, EntityKind::PointItem, Reaction::GainPoints),
    (EntityKind::PowerItem, EntityKind::Player, Reaction::Collected),
    (EntityKind::BombItem, EntityKind::Player, Reaction::Collected),
    (EntityKind::LifeItem, EntityKind::Player, Reaction::Collected),
    (EntityKind::PointItem, EntityKind::Player, Reaction::Collected),
];

/// Reaction of `this` to touching `other`, if any
pub fn reaction(this: EntityKind, other: EntityKind) -> Option<Reaction> {
    REACTIONS
        .iter()
        .find(|(a, b, _)| *a == this && *b == other)
        .map(|(_, _, reaction)| *reaction)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub body: SpatialEntity,
    pub hp: f32,
    pub lives: u32,
    pub power: f32,
    pub bombs: u32,
    pub score: u64,
    /// Remaining invincibility (ms)
    pub invincible_ms: f32,
    /// Collisions that produced a reaction
    pub hits: u32,
}

impl Actor {
    fn with_body(body: SpatialEntity) -> Self {
        Self {
            body,
            hp: 1.0,
            lives: 1,
            power: 0.0,
            bombs: 0,
            score: 0,
            invincible_ms: 0.0,
            hits: 0,
        }
    }

    pub fn player(x: f32, y: f32, lives: u32) -> Self {
        let mut actor = Self::with_body(SpatialEntity::new(
            EntityKind::Player,
            Vec2::new(x, y),
            Vec2::new(32.0, 48.0),
        ));
        // Small hitbox at the sprite's core
        actor.body.set_circle_collider(Vec2::new(13.0, 21.0), 3.0);
        actor.lives = lives;
        actor
    }

    pub fn enemy(x: f32, y: f32, hp: f32) -> Self {
        let mut actor = Self::with_body(SpatialEntity::new(
            EntityKind::Enemy,
            Vec2::new(x, y),
            Vec2::new(32.0, 32.0),
        ));
        actor.hp = hp.max(0.0);
        actor
    }

    /// Pickup of the given item kind. Returns `None` for non-item kinds.
    pub fn item(kind: EntityKind, x: f32, y: f32) -> Option<Self> {
        if !kind.is_item() {
            return None;
        }
        let mut actor = Self::with_body(SpatialEntity::new(kind, Vec2::new(x, y), Vec2::new(16.0, 16.0)));
        actor.body.set_circle_collider(Vec2::ZERO, 8.0);
        Some(actor)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// Tick timers and integrate velocity
    pub fn update(&mut self, dt: f32) {
        if !self.body.active || !self.body.caps.update {
            return;
        }
        self.invincible_ms = (self.invincible_ms - dt).max(0.0);
        self.body.pos += self.body.vel * dt;
    }

    fn apply(&mut self, reaction: Reaction, damage: f32) {
        match reaction {
            Reaction::TakeHit => {
                if self.is_invincible() {
                    return;
                }
                self.lives = self.lives.saturating_sub(1);
                self.invincible_ms = PLAYER_INVINCIBLE_MS;
                log::debug!("Player hit, {} lives left", self.lives);
            }
            Reaction::TakeDamage => {
                self.hp = (self.hp - damage).max(0.0);
                log::trace!("Enemy took {} damage, {} hp left", damage, self.hp);
            }
            Reaction::GainPower => self.power = (self.power + POWER_ITEM_VALUE).min(MAX_POWER),
            Reaction::GainBomb => self.bombs += 1,
            Reaction::GainLife => self.lives += 1,
            Reaction::GainPoints => self.score += POINT_ITEM_VALUE,
            Reaction::Collected => self.body.active = false,
        }
        self.hits += 1;

        let depleted = match self.body.kind {
            EntityKind::Player => self.lives == 0,
            EntityKind::Enemy => self.hp <= 0.0,
            _ => false,
        };
        if depleted {
            log::debug!("{:?} destroyed", self.body.kind);
            self.body.active = false;
        }
    }

    /// Actor-vs-actor contact (player collecting items, ramming enemies).
    /// Dispatches both sides when the shapes overlap.
    pub fn touch(&mut self, other: &mut Actor) -> bool {
        if !self.body.active || !other.body.active || !self.body.collides_with(&other.body) {
            return false;
        }
        self.on_collision(&other.contact());
        other.on_collision(&self.contact());
        true
    }
}

impl Collidable for Actor {
    fn body(&self) -> &SpatialEntity {
        &self.body
    }

    fn on_collision(&mut self, other: &Contact<'_>) {
        if !self.body.active {
            return;
        }
        if let Some(reaction) = reaction(self.body.kind, other.body.kind) {
            self.apply(reaction, other.damage);
        }
    }
}
