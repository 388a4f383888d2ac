//! Object-pooled projectile manager
//!
//! Every projectile instance is allocated up front (or in a growth step) and
//! reused. Each slot is either in the FIFO free queue or in the active set,
//! never both. Callers hold generational [`BulletHandle`]s, so a handle from a
//! previous life of a recycled slot is rejected instead of aliasing the new
//! occupant.
//!
//! Per frame: [`ProjectilePool::update`], then [`ProjectilePool::check_collisions`],
//! then [`ProjectilePool::render`].

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec2;

use super::catalog::{TemplateCatalog, TemplateSource};
use super::contact::Collidable;
use super::entity::EntityKind;
use super::projectile::{Owner, Projectile};
use crate::renderer::{Renderer, TextureLoader};
use crate::settings::PoolSettings;

/// Generation-checked reference to a pooled projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletHandle {
    index: u32,
    generation: u32,
}

impl BulletHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Why a projectile left the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    /// Configured lifetime ran out
    Expired(BulletHandle),
    /// Render bounds left the playfield
    OutOfBounds(BulletHandle),
    /// Deactivated by its own motion hook
    Killed(BulletHandle),
    /// Scored a hit on an entity
    Hit { bullet: BulletHandle, target: EntityKind },
}

struct Slot {
    projectile: Projectile,
    generation: u32,
    /// Position in `active`, `None` while free
    active_pos: Option<usize>,
}

impl Slot {
    fn new() -> Self {
        Self {
            projectile: Projectile::pooled(),
            generation: 0,
            active_pos: None,
        }
    }
}

pub struct ProjectilePool {
    settings: PoolSettings,
    slots: Vec<Slot>,
    free: VecDeque<u32>,
    active: Vec<u32>,
    source: Option<Box<dyn TemplateSource>>,
    events: Vec<PoolEvent>,
    /// Reused copy of the active set for sweeps that recycle mid-iteration
    scratch: Vec<u32>,
    peak_active: usize,
    total_created: u64,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new(PoolSettings::default())
    }
}

impl ProjectilePool {
    /// Unallocated, uninitialized pool
    pub fn new(settings: PoolSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            slots: Vec::new(),
            free: VecDeque::new(),
            active: Vec::new(),
            source: None,
            events: Vec::new(),
            scratch: Vec::new(),
            peak_active: 0,
            total_created: 0,
        }
    }

    /// Bind the template source and allocate the initial capacity.
    /// Fails without side effects if already initialized.
    pub fn initialize(&mut self, source: impl TemplateSource + 'static) -> bool {
        if self.source.is_some() {
            log::warn!("Projectile pool already initialized");
            return false;
        }

        let capacity = self.settings.initial_capacity;
        self.slots.reserve_exact(capacity);
        self.free.reserve(capacity);
        self.active.reserve(capacity);
        self.scratch.reserve(capacity);
        for index in 0..capacity {
            self.slots.push(Slot::new());
            self.free.push_back(index as u32);
        }
        self.source = Some(Box::new(source));

        log::info!(
            "Projectile pool initialized with {} slots (ceiling {})",
            capacity,
            self.settings.max_capacity
        );
        true
    }

    /// Load templates from a directory of JSON descriptors, then initialize
    pub fn initialize_from_dir(&mut self, dir: impl AsRef<Path>, loader: &mut dyn TextureLoader) -> bool {
        if self.is_initialized() {
            log::warn!("Projectile pool already initialized");
            return false;
        }
        match TemplateCatalog::load_dir(dir, loader) {
            Ok(catalog) => self.initialize(catalog),
            Err(e) => {
                log::warn!("Failed to load projectile templates: {}", e);
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Bound template source, if initialized
    pub fn catalog(&self) -> Option<&dyn TemplateSource> {
        self.source.as_deref()
    }

    /// Acquire a slot, configure it from `type_id` and activate it at `(x, y)`.
    ///
    /// On an empty free queue one growth step is attempted. Returns `None` when
    /// the pool is at its ceiling or the type cannot be configured; in both
    /// cases no projectile is left active.
    pub fn create_bullet(&mut self, type_id: &str, owner: Owner, x: f32, y: f32) -> Option<BulletHandle> {
        if !self.is_initialized() {
            log::warn!("Projectile pool not initialized");
            return None;
        }

        let index = match self.free.pop_front() {
            Some(index) => index,
            None => {
                if !self.grow() {
                    log::debug!("Projectile pool exhausted ({} slots)", self.slots.len());
                    return None;
                }
                self.free.pop_front()?
            }
        };

        let source = self.source.as_deref()?;
        let slot = &mut self.slots[index as usize];
        slot.projectile.reset(owner, Vec2::new(x, y), &self.settings);

        if !source.configure_existing(&mut slot.projectile, type_id) {
            log::warn!("Unknown projectile type '{}'", type_id);
            slot.projectile.retire();
            self.free.push_back(index);
            return None;
        }

        slot.projectile.activate(owner, x, y);
        slot.active_pos = Some(self.active.len());
        self.active.push(index);

        self.total_created += 1;
        self.peak_active = self.peak_active.max(self.active.len());

        Some(BulletHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Return a projectile to the free queue. Stale or already-free handles are ignored.
    pub fn recycle_bullet(&mut self, handle: BulletHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.release(handle.index);
        true
    }

    /// Recycle every active projectile
    pub fn clear_active_bullets(&mut self) {
        while let Some(&index) = self.active.last() {
            self.release(index);
        }
    }

    /// Advance all active projectiles by `dt` ms and retire any that expired,
    /// killed themselves, or left the playfield. Starts a new event log.
    pub fn update(&mut self, dt: f32) {
        self.events.clear();

        let mut snapshot = std::mem::take(&mut self.scratch);
        snapshot.clear();
        snapshot.extend_from_slice(&self.active);

        let playfield = self.settings.playfield();
        for &index in &snapshot {
            let slot = &mut self.slots[index as usize];
            if slot.active_pos.is_none() {
                continue;
            }
            let handle = BulletHandle {
                index,
                generation: slot.generation,
            };
            let projectile = &mut slot.projectile;
            projectile.update(dt);

            let event = if projectile.lifetime_elapsed() {
                PoolEvent::Expired(handle)
            } else if !projectile.is_active() {
                PoolEvent::Killed(handle)
            } else if projectile.body.is_out_of_bounds(playfield.x, playfield.y) {
                PoolEvent::OutOfBounds(handle)
            } else {
                continue;
            };

            log::trace!("Retiring projectile {:?}", event);
            self.release(index);
            self.events.push(event);
        }

        self.scratch = snapshot;
    }

    /// Test every active projectile against `entities` and dispatch
    /// `on_collision` to both sides of each qualifying overlap.
    ///
    /// Inactive or non-colliding entities are skipped, as are other projectiles.
    /// A projectile scores at most one hit per call; it is recycled before
    /// the call returns.
    pub fn check_collisions<C: Collidable>(&mut self, entities: &mut [C]) {
        let mut snapshot = std::mem::take(&mut self.scratch);
        snapshot.clear();
        snapshot.extend_from_slice(&self.active);

        for &index in &snapshot {
            let slot = &mut self.slots[index as usize];
            if slot.active_pos.is_none() {
                continue;
            }
            let projectile = &mut slot.projectile;
            if !projectile.is_active() || !projectile.body.caps.collide {
                continue;
            }

            let mut hit = None;
            for entity in entities.iter_mut() {
                let body = entity.body();
                if !body.active || !body.caps.collide || body.kind.is_projectile() {
                    continue;
                }
                if !projectile.body.collides_with(body) {
                    continue;
                }

                let target = body.kind;
                projectile.on_collision(&entity.contact());
                entity.on_collision(&projectile.contact());

                if !projectile.is_active() {
                    hit = Some(target);
                    break;
                }
            }

            if let Some(target) = hit {
                let bullet = BulletHandle {
                    index,
                    generation: slot.generation,
                };
                self.release(index);
                self.events.push(PoolEvent::Hit { bullet, target });
            }
        }

        self.scratch = snapshot;
    }

    /// Draw every active projectile
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for &index in &self.active {
            self.slots[index as usize].projectile.render(renderer);
        }
    }

    pub fn get(&self, handle: BulletHandle) -> Option<&Projectile> {
        if self.is_live(handle) {
            Some(&self.slots[handle.index()].projectile)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: BulletHandle) -> Option<&mut Projectile> {
        if self.is_live(handle) {
            Some(&mut self.slots[handle.index()].projectile)
        } else {
            None
        }
    }

    /// Handle refers to the current life of an active slot
    pub fn is_live(&self, handle: BulletHandle) -> bool {
        self.slots
            .get(handle.index())
            .is_some_and(|slot| slot.generation == handle.generation && slot.active_pos.is_some())
    }

    /// Active projectiles in active-set order
    pub fn iter_active(&self) -> impl Iterator<Item = (BulletHandle, &Projectile)> + '_ {
        self.active.iter().map(move |&index| {
            let slot = &self.slots[index as usize];
            (
                BulletHandle {
                    index,
                    generation: slot.generation,
                },
                &slot.projectile,
            )
        })
    }

    pub fn active_bullets_by_owner(&self, owner: Owner) -> Vec<BulletHandle> {
        self.iter_active()
            .filter(|(_, projectile)| projectile.is_active() && projectile.owner() == owner)
            .map(|(handle, _)| handle)
            .collect()
    }

    pub fn active_bullet_count(&self) -> usize {
        self.active.len()
    }

    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    pub fn available_bullet_count(&self) -> usize {
        self.free.len()
    }

    pub fn capacity_ceiling(&self) -> usize {
        self.settings.max_capacity
    }

    pub fn peak_active_count(&self) -> usize {
        self.peak_active
    }

    pub fn total_created_count(&self) -> u64 {
        self.total_created
    }

    /// Retirement events recorded since the start of the last `update`.
    /// The log is reset by every `update`; drain it before the next frame.
    pub fn drain_events(&mut self) -> impl Iterator<Item = PoolEvent> + '_ {
        self.events.drain(..)
    }

    /// Add `additional` free slots. Fails without mutation if that would pass the ceiling.
    pub fn expand(&mut self, additional: usize) -> bool {
        let old_size = self.slots.len();
        let new_size = match old_size.checked_add(additional) {
            Some(new_size) if additional > 0 && new_size <= self.settings.max_capacity => new_size,
            _ => {
                log::debug!(
                    "Cannot expand projectile pool from {} by {} (ceiling {})",
                    old_size,
                    additional,
                    self.settings.max_capacity
                );
                return false;
            }
        };

        self.slots.reserve_exact(additional);
        for index in old_size..new_size {
            self.slots.push(Slot::new());
            self.free.push_back(index as u32);
        }
        log::info!("Expanded projectile pool from {} to {}", old_size, new_size);
        true
    }

    /// One growth step: a fraction of current capacity, at least one slot,
    /// clamped to what the ceiling still allows.
    fn grow(&mut self) -> bool {
        let capacity = self.slots.len();
        let headroom = self.settings.max_capacity.saturating_sub(capacity);
        if headroom == 0 {
            return false;
        }
        let step = ((capacity as f32 * self.settings.growth_fraction) as usize)
            .max(1)
            .min(headroom);
        self.expand(step)
    }

    /// Move an active slot to the back of the free queue and bump its generation
    fn release(&mut self, index: u32) {
        let Some(pos) = self.slots[index as usize].active_pos.take() else {
            return;
        };
        self.active.swap_remove(pos);
        if let Some(&moved) = self.active.get(pos) {
            self.slots[moved as usize].active_pos = Some(pos);
        }

        let slot = &mut self.slots[index as usize];
        slot.projectile.retire();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push_back(index);
    }

    /// Verify the free/active partition. Returns a description of the first violation.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut seen = vec![0u8; self.slots.len()];

        for (pos, &index) in self.active.iter().enumerate() {
            let slot = self
                .slots
                .get(index as usize)
                .ok_or_else(|| format!("active index {index} out of range"))?;
            if slot.active_pos != Some(pos) {
                return Err(format!("slot {index} active position mismatch"));
            }
            if !slot.projectile.is_active() {
                return Err(format!("slot {index} in active set but inactive"));
            }
            seen[index as usize] += 1;
        }

        for &index in &self.free {
            let slot = self
                .slots
                .get(index as usize)
                .ok_or_else(|| format!("free index {index} out of range"))?;
            if slot.active_pos.is_some() {
                return Err(format!("slot {index} both free and active"));
            }
            seen[index as usize] += 1;
        }

        match seen.iter().position(|&count| count != 1) {
            Some(index) => Err(format!("slot {index} appears {} times", seen[index])),
            None if self.slots.len() > self.settings.max_capacity => Err(format!(
                "pool size {} exceeds ceiling {}",
                self.slots.len(),
                self.settings.max_capacity
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawList, TextureHandle};
    use crate::sim::catalog::ProjectileTemplate;
    use crate::sim::contact::Contact;
    use crate::sim::entity::SpatialEntity;

    fn catalog() -> TemplateCatalog {
        let orb = ProjectileTemplate::from_json(
            r#"{"id": "orb", "texture": "orb.png", "frames": [{"x": 0, "y": 0, "w": 8, "h": 8}],
                "collider": {"type": "circle", "radius": 4}}"#,
        )
        .expect("valid");
        let needle = ProjectileTemplate::from_json(
            r#"{"id": "needle", "texture": "needle.png", "collider": {"type": "rect", "w": 2, "h": 12}}"#,
        )
        .expect("valid");
        let mut loader = |path: &str| Some(TextureHandle::new(1, path));
        TemplateCatalog::from_templates([orb, needle], &mut loader).expect("loads")
    }

    fn pool(initial: usize, max: usize) -> ProjectilePool {
        let mut pool = ProjectilePool::new(PoolSettings::with_capacity(initial, max));
        assert!(pool.initialize(catalog()));
        pool
    }

    /// Minimal collidable that counts reactions
    struct Target {
        body: SpatialEntity,
        hits: u32,
    }

    impl Target {
        fn new(kind: EntityKind, x: f32, y: f32) -> Self {
            Self {
                body: SpatialEntity::new(kind, Vec2::new(x, y), Vec2::new(16.0, 16.0)),
                hits: 0,
            }
        }
    }

    impl Collidable for Target {
        fn body(&self) -> &SpatialEntity {
            &self.body
        }

        fn on_collision(&mut self, _other: &Contact<'_>) {
            self.hits += 1;
        }
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut pool = pool(4, 8);
        assert!(!pool.initialize(catalog()));
        assert_eq!(pool.pool_size(), 4);
        assert!(!pool.initialize_from_dir("/nowhere", &mut |_: &str| -> Option<TextureHandle> { None }));
    }

    #[test]
    fn test_uninitialized_pool_creates_nothing() {
        let mut pool = ProjectilePool::new(PoolSettings::with_capacity(4, 8));
        assert!(pool.create_bullet("orb", Owner::Enemy, 0.0, 0.0).is_none());
        assert_eq!(pool.pool_size(), 0);
    }

    #[test]
    fn test_create_configures_and_activates() {
        let mut pool = pool(4, 8);
        let h = pool.create_bullet("orb", Owner::Enemy, 100.0, 50.0).expect("slot");
        let p = pool.get(h).expect("live");
        assert!(p.is_active());
        assert_eq!(p.type_id(), Some("orb"));
        assert_eq!(p.owner(), Owner::Enemy);
        assert_eq!(p.body.kind, EntityKind::EnemyProjectile);
        assert_eq!(p.body.pos, Vec2::new(100.0, 50.0));
        assert_eq!(p.damage(), 1.0);
        assert_eq!(pool.active_bullet_count(), 1);
        assert_eq!(pool.available_bullet_count(), 3);
        assert_eq!(pool.total_created_count(), 1);
        pool.check_consistency().expect("consistent");
    }

    #[test]
    fn test_unknown_type_returns_slot() {
        let mut pool = pool(4, 8);
        assert!(pool.create_bullet("laser", Owner::Player, 0.0, 0.0).is_none());
        assert_eq!(pool.active_bullet_count(), 0);
        assert_eq!(pool.available_bullet_count(), 4);
        assert_eq!(pool.total_created_count(), 0);
        pool.check_consistency().expect("consistent");
    }

    #[test]
    fn test_create_then_recycle_restores_counts() {
        let mut pool = pool(4, 8);
        let h = pool.create_bullet("orb", Owner::Player, 0.0, 0.0).expect("slot");
        assert!(pool.recycle_bullet(h));
        assert_eq!(pool.active_bullet_count(), 0);
        assert_eq!(pool.available_bullet_count(), 4);

        // Idempotent, and the stale handle no longer resolves
        assert!(!pool.recycle_bullet(h));
        assert!(pool.get(h).is_none());
        pool.check_consistency().expect("consistent");
    }

    #[test]
    fn test_stale_handle_does_not_alias_new_life() {
        let mut pool = pool(1, 1);
        let old = pool.create_bullet("orb", Owner::Player, 0.0, 0.0).expect("slot");
        pool.recycle_bullet(old);
        let new = pool.create_bullet("orb", Owner::Enemy, 0.0, 0.0).expect("slot");

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(!pool.recycle_bullet(old));
        assert!(pool.is_live(new));
        assert!(pool.get_mut(old).is_none());
    }

    #[test]
    fn test_growth_to_ceiling() {
        let mut pool = pool(10, 12);
        for _ in 0..10 {
            assert!(pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).is_some());
        }
        assert_eq!(pool.pool_size(), 10);

        assert!(pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).is_some());
        assert!(pool.pool_size() >= 11 && pool.pool_size() <= 12);

        while pool.active_bullet_count() < pool.pool_size() {
            assert!(pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).is_some());
        }
        assert_eq!(pool.pool_size(), 12);

        // At ceiling with nothing free
        let active = pool.active_bullet_count();
        assert!(pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).is_none());
        assert_eq!(pool.active_bullet_count(), active);
        assert_eq!(pool.pool_size(), 12);

        pool.clear_active_bullets();
        assert_eq!(pool.active_bullet_count(), 0);
        assert_eq!(pool.available_bullet_count(), pool.pool_size());
        assert_eq!(pool.peak_active_count(), 12);
        pool.check_consistency().expect("consistent");
    }

    #[test]
    fn test_expand_past_ceiling_fails_without_mutation() {
        let mut pool = pool(4, 6);
        assert!(!pool.expand(3));
        assert_eq!(pool.pool_size(), 4);
        assert_eq!(pool.available_bullet_count(), 4);
        assert!(!pool.expand(0));
        assert!(!pool.expand(usize::MAX));
        assert_eq!(pool.pool_size(), 4);
        assert_eq!(pool.available_bullet_count(), 4);
        assert!(pool.expand(2));
        assert_eq!(pool.pool_size(), 6);
    }

    #[test]
    fn test_undrained_event_log_holds_one_frame() {
        let mut pool = pool(4, 4);
        let mut nobody: [Target; 0] = [];
        for _ in 0..1000 {
            let h = pool.create_bullet("orb", Owner::Enemy, 100.0, 100.0).expect("slot");
            pool.get_mut(h).expect("live").set_lifetime(1.0);
            pool.update(16.0);
            pool.check_collisions(&mut nobody);
        }
        assert_eq!(pool.drain_events().count(), 1);
        assert_eq!(pool.active_bullet_count(), 0);
    }

    #[test]
    fn test_small_pool_grows_by_at_least_one() {
        let mut pool = pool(1, 3);
        pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).expect("slot");
        pool.create_bullet("orb", Owner::Enemy, 10.0, 10.0).expect("grown");
        assert_eq!(pool.pool_size(), 2);
    }

    #[test]
    fn test_update_retires_expired_and_out_of_bounds() {
        let mut pool = pool(8, 8);
        let short = pool.create_bullet("orb", Owner::Enemy, 100.0, 100.0).expect("slot");
        pool.get_mut(short).expect("live").set_lifetime(32.0);

        let runaway = pool.create_bullet("orb", Owner::Enemy, 790.0, 100.0).expect("slot");
        pool.get_mut(runaway).expect("live").set_velocity(1.0, 0.0);

        let stays = pool.create_bullet("orb", Owner::Enemy, 400.0, 300.0).expect("slot");

        pool.update(16.0);
        assert_eq!(pool.active_bullet_count(), 2);
        assert!(pool.is_live(short));
        assert!(!pool.is_live(runaway));
        assert_eq!(pool.drain_events().collect::<Vec<_>>(), vec![PoolEvent::OutOfBounds(runaway)]);

        pool.update(16.0);
        assert!(!pool.is_live(short));
        assert!(pool.is_live(stays));
        assert_eq!(pool.active_bullet_count(), 1);
        assert_eq!(pool.drain_events().collect::<Vec<_>>(), vec![PoolEvent::Expired(short)]);
        pool.check_consistency().expect("consistent");
    }

    #[test]
    fn test_friendly_hit_recycles_and_dispatches_once() {
        let mut pool = pool(4, 4);
        let h = pool.create_bullet("orb", Owner::Player, 100.0, 100.0).expect("slot");
        let mut targets = vec![Target::new(EntityKind::Enemy, 96.0, 96.0)];

        pool.check_collisions(&mut targets);
        assert_eq!(targets[0].hits, 1);
        assert!(!pool.is_live(h));
        assert_eq!(pool.active_bullet_count(), 0);

        pool.check_collisions(&mut targets);
        assert_eq!(targets[0].hits, 1);

        let events: Vec<_> = pool.drain_events().collect();
        assert_eq!(
            events,
            vec![PoolEvent::Hit {
                bullet: h,
                target: EntityKind::Enemy
            }]
        );
    }

    #[test]
    fn test_one_hit_per_projectile_per_frame() {
        let mut pool = pool(4, 4);
        pool.create_bullet("orb", Owner::Player, 100.0, 100.0).expect("slot");
        let mut targets = vec![
            Target::new(EntityKind::Enemy, 96.0, 96.0),
            Target::new(EntityKind::Enemy, 98.0, 98.0),
        ];
        pool.check_collisions(&mut targets);
        assert_eq!(targets[0].hits + targets[1].hits, 1);
    }

    #[test]
    fn test_non_hostile_overlap_still_notifies_entity() {
        let mut pool = pool(4, 4);
        let h = pool.create_bullet("orb", Owner::Player, 100.0, 100.0).expect("slot");
        let mut targets = vec![Target::new(EntityKind::Player, 96.0, 96.0)];
        pool.check_collisions(&mut targets);
        // The player's own shot does not react, the entity still sees the overlap
        assert!(pool.is_live(h));
        assert_eq!(targets[0].hits, 1);
    }

    #[test]
    fn test_projectile_pairs_ignored() {
        let mut pool = pool(4, 4);
        let h = pool.create_bullet("orb", Owner::Player, 100.0, 100.0).expect("slot");
        let mut targets = vec![
            Target::new(EntityKind::EnemyProjectile, 96.0, 96.0),
            Target::new(EntityKind::PlayerProjectile, 96.0, 96.0),
        ];
        pool.check_collisions(&mut targets);
        assert!(pool.is_live(h));
        assert_eq!(targets[0].hits, 0);
        assert_eq!(targets[1].hits, 0);
    }

    #[test]
    fn test_inactive_entities_skipped() {
        let mut pool = pool(4, 4);
        let h = pool.create_bullet("orb", Owner::Player, 100.0, 100.0).expect("slot");
        let mut targets = vec![Target::new(EntityKind::Enemy, 96.0, 96.0)];
        targets[0].body.active = false;
        pool.check_collisions(&mut targets);
        assert!(pool.is_live(h));
        assert_eq!(targets[0].hits, 0);
    }

    #[test]
    fn test_active_by_owner() {
        let mut pool = pool(8, 8);
        let a = pool.create_bullet("orb", Owner::Player, 0.0, 0.0).expect("slot");
        pool.create_bullet("needle", Owner::Enemy, 0.0, 0.0).expect("slot");
        let c = pool.create_bullet("needle", Owner::Player, 0.0, 0.0).expect("slot");

        let mut mine = pool.active_bullets_by_owner(Owner::Player);
        mine.sort();
        assert_eq!(mine, vec![a, c]);
        assert_eq!(pool.active_bullets_by_owner(Owner::Enemy).len(), 1);
    }

    #[test]
    fn test_render_draws_active_only() {
        let mut pool = pool(4, 4);
        let a = pool.create_bullet("orb", Owner::Player, 0.0, 0.0).expect("slot");
        pool.create_bullet("needle", Owner::Enemy, 20.0, 20.0).expect("slot");
        pool.recycle_bullet(a);

        let mut list = DrawList::new();
        pool.render(&mut list);
        assert_eq!(list.quad_count(), 1);
        assert_eq!(
            list.batches()[0].texture.as_ref().map(|t| t.path()),
            Some("needle.png")
        );
    }

    #[test]
    fn test_hooks_do_not_survive_reuse() {
        use std::rc::Rc;

        let mut pool = pool(1, 1);
        let h = pool.create_bullet("orb", Owner::Enemy, 100.0, 100.0).expect("slot");
        pool.get_mut(h)
            .expect("live")
            .set_motion(Rc::new(|p: &mut Projectile, _dt: f32| p.deactivate()));
        pool.update(1.0);
        assert_eq!(pool.drain_events().collect::<Vec<_>>(), vec![PoolEvent::Killed(h)]);

        let again = pool.create_bullet("orb", Owner::Enemy, 100.0, 100.0).expect("slot");
        pool.update(1.0);
        assert!(pool.is_live(again));
    }
}
