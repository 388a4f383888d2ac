//! Projectile entity: ownership, damage, lifetime, motion and hit response
//!
//! Lifecycle: Free -> Active -> (Expired | OutOfBounds | Hit) -> Free.
//! All methods are safe no-ops on an inactive projectile.

use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{ColliderSpec, ProjectileTemplate};
use super::collider::Rect;
use super::contact::{Collidable, Contact};
use super::entity::{EntityKind, SpatialEntity};
use crate::consts::*;
use crate::renderer::{MAGENTA, Renderer, TextureHandle};
use crate::settings::PoolSettings;
use crate::{non_negative, polar_velocity};

/// Per-instance motion override, run after built-in integration
pub type MotionHook = Rc<dyn Fn(&mut Projectile, f32)>;
/// Hit reaction, run before the projectile deactivates
pub type HitHook = Rc<dyn Fn(&mut Projectile, &SpatialEntity)>;
/// Expiry reaction, run when the lifetime runs out
pub type ExpireHook = Rc<dyn Fn(&mut Projectile)>;

/// Who fired the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    /// Entity tag a projectile of this owner carries
    pub fn projectile_kind(&self) -> EntityKind {
        match self {
            Owner::Player => EntityKind::PlayerProjectile,
            Owner::Enemy => EntityKind::EnemyProjectile,
        }
    }

    /// Whether a projectile of this owner reacts to hitting `kind`
    pub fn is_hostile_to(&self, kind: EntityKind) -> bool {
        matches!(
            (self, kind),
            (Owner::Player, EntityKind::Enemy) | (Owner::Enemy, EntityKind::Player)
        )
    }
}

pub struct Projectile {
    pub body: SpatialEntity,
    owner: Owner,
    damage: f32,
    pub accel: Vec2,
    /// Configured lifetime in ms (0 = unlimited)
    lifetime_ms: f32,
    lived_ms: f32,
    template: Option<Rc<ProjectileTemplate>>,
    texture: Option<TextureHandle>,
    frame: usize,
    frame_timer: f32,
    frame_ms: f32,
    motion: Option<MotionHook>,
    on_hit: Option<HitHook>,
    on_expire: Option<ExpireHook>,
}

impl fmt::Debug for Projectile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projectile")
            .field("type_id", &self.type_id())
            .field("owner", &self.owner)
            .field("pos", &self.body.pos)
            .field("vel", &self.body.vel)
            .field("active", &self.body.active)
            .field("damage", &self.damage)
            .field("lifetime_ms", &self.lifetime_ms)
            .field("lived_ms", &self.lived_ms)
            .finish_non_exhaustive()
    }
}

impl Projectile {
    pub fn new(owner: Owner, x: f32, y: f32) -> Self {
        Self {
            body: SpatialEntity::new(owner.projectile_kind(), Vec2::new(x, y), Vec2::ZERO),
            owner,
            damage: DEFAULT_DAMAGE,
            accel: Vec2::ZERO,
            lifetime_ms: 0.0,
            lived_ms: 0.0,
            template: None,
            texture: None,
            frame: 0,
            frame_timer: 0.0,
            frame_ms: ANIMATION_FRAME_MS,
            motion: None,
            on_hit: None,
            on_expire: None,
        }
    }

    /// Inactive instance for pool storage
    pub(crate) fn pooled() -> Self {
        let mut projectile = Self::new(Owner::Player, 0.0, 0.0);
        projectile.body.active = false;
        projectile
    }

    /// Clean baseline before a pooled instance is reconfigured.
    /// Leaves the projectile inactive with the default circle collider.
    pub(crate) fn reset(&mut self, owner: Owner, pos: Vec2, settings: &PoolSettings) {
        self.set_owner(owner);
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.body.rotation = 0.0;
        self.body.scale = 1.0;
        self.body.active = false;
        self.accel = Vec2::ZERO;
        self.lifetime_ms = 0.0;
        self.lived_ms = 0.0;
        self.damage = non_negative(settings.default_damage);
        self.body.set_circle_collider(Vec2::ZERO, settings.default_collider_radius);
        self.template = None;
        self.texture = None;
        self.frame = 0;
        self.frame_timer = 0.0;
        self.frame_ms = settings.animation_frame_ms;
        self.motion = None;
        self.on_hit = None;
        self.on_expire = None;
    }

    /// Free-list state: inactive, motionless, no lifetime
    pub(crate) fn retire(&mut self) {
        self.body.active = false;
        self.body.vel = Vec2::ZERO;
        self.lifetime_ms = 0.0;
        self.lived_ms = 0.0;
    }

    /// Spawn at `(x, y)` with zeroed motion and lifetime. Appearance is configured separately.
    pub fn activate(&mut self, owner: Owner, x: f32, y: f32) {
        self.set_owner(owner);
        self.body.pos = Vec2::new(x, y);
        self.body.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
        self.lived_ms = 0.0;
        self.body.active = true;
    }

    fn set_owner(&mut self, owner: Owner) {
        self.owner = owner;
        self.body.kind = owner.projectile_kind();
    }

    /// Bind template appearance and collider. The collider is centered in the render bounds.
    pub fn apply_template(&mut self, template: Rc<ProjectileTemplate>, texture: TextureHandle) {
        let collider_size = template.collider.size();
        let render_size = template
            .frames
            .first()
            .map(|frame| frame.size() * template.render_scale)
            .unwrap_or(collider_size);
        self.body.set_size(render_size.x, render_size.y);

        let offset = (render_size - collider_size) * 0.5;
        match template.collider {
            ColliderSpec::Circle { radius } => self.body.set_circle_collider(offset, radius),
            ColliderSpec::Rect { w, h } => self.body.set_rect_collider(offset, Vec2::new(w, h)),
        }

        self.frame = 0;
        self.frame_timer = 0.0;
        self.template = Some(template);
        self.texture = Some(texture);
    }

    pub fn set_speed_angle(&mut self, speed: f32, angle: f32) {
        self.body.vel = polar_velocity(speed, angle);
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.body.vel = Vec2::new(vx, vy);
    }

    pub fn set_acceleration(&mut self, ax: f32, ay: f32) {
        self.accel = Vec2::new(ax, ay);
    }

    pub fn set_damage(&mut self, damage: f32) {
        self.damage = non_negative(damage);
    }

    /// Set lifetime in ms (0 = unlimited) and restart the clock
    pub fn set_lifetime(&mut self, ms: f32) {
        self.lifetime_ms = non_negative(ms);
        self.lived_ms = 0.0;
    }

    pub fn set_motion(&mut self, hook: MotionHook) {
        self.motion = Some(hook);
    }

    pub fn set_on_hit(&mut self, hook: HitHook) {
        self.on_hit = Some(hook);
    }

    pub fn set_on_expire(&mut self, hook: ExpireHook) {
        self.on_expire = Some(hook);
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn lifetime_ms(&self) -> f32 {
        self.lifetime_ms
    }

    pub fn lived_ms(&self) -> f32 {
        self.lived_ms
    }

    pub fn is_active(&self) -> bool {
        self.body.active
    }

    pub fn deactivate(&mut self) {
        self.body.active = false;
    }

    /// Bound template id, if configured
    pub fn type_id(&self) -> Option<&str> {
        self.template.as_deref().map(|t| t.id.as_str())
    }

    pub fn template(&self) -> Option<&ProjectileTemplate> {
        self.template.as_deref()
    }

    pub fn current_frame(&self) -> usize {
        self.frame
    }

    /// Positive lifetime fully elapsed
    pub fn lifetime_elapsed(&self) -> bool {
        self.lifetime_ms > 0.0 && self.lived_ms >= self.lifetime_ms
    }

    pub fn is_expired(&self) -> bool {
        !self.body.active || self.lifetime_elapsed()
    }

    /// Advance one step of `dt` milliseconds.
    ///
    /// Expiry is checked before motion: a projectile that expires this step
    /// does not move.
    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }

        if self.lifetime_ms > 0.0 {
            self.lived_ms += dt;
            if self.lived_ms >= self.lifetime_ms {
                if let Some(hook) = self.on_expire.clone() {
                    hook(self);
                }
                self.body.active = false;
                return;
            }
        }

        self.body.vel += self.accel * dt;
        self.body.pos += self.body.vel * dt;

        self.advance_animation(dt);

        if let Some(hook) = self.motion.clone() {
            hook(self, dt);
        }
    }

    fn advance_animation(&mut self, dt: f32) {
        let frames = match self.template.as_deref() {
            Some(template) if template.frames.len() > 1 => template.frames.len(),
            _ => return,
        };
        if self.frame_ms <= 0.0 {
            return;
        }
        self.frame_timer += dt;
        if self.frame_timer >= self.frame_ms {
            let steps = (self.frame_timer / self.frame_ms) as usize;
            self.frame = (self.frame + steps % frames) % frames;
            self.frame_timer %= self.frame_ms;
        }
    }

    /// Ownership-aware hit response. Returns true if the hit counted.
    fn react(&mut self, other: &SpatialEntity) -> bool {
        if !self.body.active || other.kind.is_projectile() || !self.owner.is_hostile_to(other.kind) {
            return false;
        }
        if let Some(hook) = self.on_hit.clone() {
            hook(self, other);
        }
        self.body.active = false;
        true
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        if !self.body.active || !self.body.caps.render {
            return;
        }

        match (self.template.as_deref(), self.texture.as_ref()) {
            (Some(template), Some(texture)) => match template.frames.get(self.frame) {
                Some(frame) => {
                    let dest = Rect::from_min_size(self.body.pos, frame.size() * template.render_scale);
                    renderer.draw_texture(texture, Some(*frame), dest);
                }
                None => renderer.draw_texture(texture, None, self.body.bounds()),
            },
            _ => {
                let dest = Rect::from_min_size(self.body.pos, Vec2::splat(PLACEHOLDER_SIZE));
                renderer.fill_rect(dest, MAGENTA);
            }
        }
    }
}

impl Collidable for Projectile {
    fn body(&self) -> &SpatialEntity {
        &self.body
    }

    fn contact_damage(&self) -> f32 {
        self.damage
    }

    fn on_collision(&mut self, other: &Contact<'_>) {
        self.react(other.body);
    }
}
