//! Danmaku Pool headless demo
//!
//! Runs a fixed number of 60 Hz frames: enemies fire seeded radial rings, the
//! player fires straight up, and the pool handles expiry, culling and hits.
//! Pool statistics are logged at the end.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::f32::consts::TAU;
    use std::path::PathBuf;
    use std::rc::Rc;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use danmaku_pool::consts::*;
    use danmaku_pool::renderer::{DrawList, FsTextureLoader, TextureHandle, TextureLoader};
    use danmaku_pool::sim::{Actor, EntityKind, Owner, PoolEvent, Projectile, ProjectilePool, TemplateCatalog};
    use danmaku_pool::PoolSettings;

    /// Enemy ring speed (px/ms)
    const RING_SPEED: f32 = 0.12;
    /// Player shot speed (px/ms)
    const SHOT_SPEED: f32 = 0.6;
    /// Frames between player shots
    const SHOT_INTERVAL: u32 = 6;
    /// Sine-weave amplitude for weaving rings (px/ms lateral)
    const WEAVE: f32 = 0.05;

    #[derive(Debug, Parser)]
    #[command(name = "danmaku-pool", about = "Headless projectile pool demo")]
    pub struct Args {
        /// RNG seed for spawn patterns
        #[arg(long, default_value_t = 0xDA11)]
        seed: u64,

        /// Frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u32,

        /// Projectiles per enemy ring
        #[arg(long, default_value_t = 24)]
        spawn_per_frame: u32,

        /// Directory of projectile template descriptors
        #[arg(long, default_value = "assets/bullets")]
        templates: PathBuf,

        /// Pool settings file (JSON); defaults when absent
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Resolve textures on disk relative to this directory instead of headless handles
        #[arg(long)]
        textures: Option<PathBuf>,
    }

    /// Demo world: one player, a row of enemies, dropped items
    struct Game {
        pool: ProjectilePool,
        rng: Pcg32,
        player: Actor,
        actors: Vec<Actor>,
        items: Vec<Actor>,
        frame: u32,
        ring_size: u32,
        types: Vec<String>,
        hits: u32,
        draw_list: DrawList,
    }

    impl Game {
        fn new(pool: ProjectilePool, seed: u64, ring_size: u32) -> Result<Self> {
            let types = pool.catalog().map(|c| c.list_types()).unwrap_or_default();
            if types.is_empty() {
                bail!("no projectile types available");
            }

            let playfield = pool.settings().playfield();
            let player = Actor::player(playfield.x * 0.5, playfield.y - 80.0, 3);
            let actors = (0..4)
                .map(|i| Actor::enemy(120.0 + i as f32 * 160.0, 60.0, 40.0))
                .collect();

            Ok(Self {
                pool,
                rng: Pcg32::seed_from_u64(seed),
                player,
                actors,
                items: Vec::new(),
                frame: 0,
                ring_size: ring_size.max(1),
                types,
                hits: 0,
                draw_list: DrawList::new(),
            })
        }

        fn spawn_ring(&mut self, origin: Vec2) {
            let type_id = self.types[self.rng.random_range(0..self.types.len())].clone();
            let phase = self.rng.random_range(0.0..TAU);
            let weave = self.rng.random_bool(0.25);

            for i in 0..self.ring_size {
                let angle = phase + TAU * i as f32 / self.ring_size as f32;
                let Some(handle) = self.pool.create_bullet(&type_id, Owner::Enemy, origin.x, origin.y) else {
                    log::debug!("Ring truncated at {} of {}", i, self.ring_size);
                    return;
                };
                if let Some(bullet) = self.pool.get_mut(handle) {
                    bullet.set_speed_angle(RING_SPEED, angle);
                    bullet.set_lifetime(8000.0);
                    if weave {
                        let normal = Vec2::new(-angle.sin(), angle.cos());
                        bullet.set_motion(Rc::new(move |p: &mut Projectile, dt: f32| {
                            let wobble = (p.lived_ms() * 0.01).sin() * WEAVE;
                            p.body.pos += normal * wobble * dt;
                        }));
                    }
                }
            }
        }

        fn fire_player_shot(&mut self) {
            if !self.player.body.active {
                return;
            }
            let muzzle = self.player.body.center() - Vec2::new(0.0, 24.0);
            let Some(handle) = self.pool.create_bullet(&self.types[0], Owner::Player, muzzle.x, muzzle.y) else {
                return;
            };
            if let Some(shot) = self.pool.get_mut(handle) {
                shot.set_velocity(0.0, -SHOT_SPEED);
                shot.set_damage(1.0 + self.player.power);
            }
        }

        fn step(&mut self) {
            self.frame += 1;

            // Player drifts side to side
            let t = self.frame as f32 * FRAME_MS * 0.001;
            self.player.body.vel = Vec2::new(t.cos() * 0.15, 0.0);
            self.player.update(FRAME_MS);
            let playfield = self.pool.settings().playfield();
            self.player.body.clamp_position(Vec2::ZERO, playfield);

            if self.frame % SHOT_INTERVAL == 0 {
                self.fire_player_shot();
            }
            if self.frame % 30 == 0 {
                let shooters: Vec<Vec2> = self
                    .actors
                    .iter()
                    .filter(|a| a.body.active)
                    .map(|a| a.body.center())
                    .collect();
                for origin in shooters {
                    self.spawn_ring(origin);
                }
            }

            self.pool.update(FRAME_MS);
            self.pool.check_collisions(&mut self.actors);
            self.pool.check_collisions(std::slice::from_mut(&mut self.player));

            for event in self.pool.drain_events() {
                if let PoolEvent::Hit { target, .. } = event {
                    log::trace!("Hit {:?}", target);
                    self.hits += 1;
                }
            }

            // Downed enemies drop an item
            for enemy in self.actors.iter_mut().filter(|a| !a.body.active && a.hits > 0) {
                let kind = match self.rng.random_range(0..4) {
                    0 => EntityKind::PowerItem,
                    1 => EntityKind::BombItem,
                    2 => EntityKind::LifeItem,
                    _ => EntityKind::PointItem,
                };
                let at = enemy.body.center();
                if let Some(mut item) = Actor::item(kind, at.x, at.y) {
                    item.body.vel = Vec2::new(0.0, 0.08);
                    self.items.push(item);
                }
                log::info!("Enemy down at frame {}", self.frame);
                enemy.hits = 0;
            }

            for item in &mut self.items {
                item.update(FRAME_MS);
                self.player.touch(item);
            }
            self.items
                .retain(|i| i.body.active && !i.body.is_out_of_bounds(playfield.x, playfield.y));

            self.draw_list.clear();
            self.pool.render(&mut self.draw_list);
        }
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = match &args.settings {
            Some(path) => PoolSettings::load(path),
            None => PoolSettings::default(),
        };

        let mut headless_ids = 0u32;
        let mut headless = |path: &str| -> Option<TextureHandle> {
            headless_ids += 1;
            Some(TextureHandle::new(headless_ids, path))
        };
        let mut fs_loader = args.textures.clone().map(FsTextureLoader::new);
        let loader: &mut dyn TextureLoader = match fs_loader.as_mut() {
            Some(fs) => fs,
            None => &mut headless,
        };

        let catalog = TemplateCatalog::load_dir(&args.templates, loader)
            .with_context(|| format!("loading templates from {}", args.templates.display()))?;
        log::info!(
            "Catalog: {} types, {} textures",
            catalog.len(),
            catalog.texture_count()
        );

        let mut pool = ProjectilePool::new(settings);
        if !pool.initialize(catalog) {
            bail!("projectile pool failed to initialize");
        }

        let mut game = Game::new(pool, args.seed, args.spawn_per_frame)?;
        for _ in 0..args.frames {
            game.step();
            if game.frame % 60 == 0 {
                log::debug!(
                    "frame {}: {} active, {} free, {} quads",
                    game.frame,
                    game.pool.active_bullet_count(),
                    game.pool.available_bullet_count(),
                    game.draw_list.quad_count()
                );
            }
        }

        if let Err(e) = game.pool.check_consistency() {
            bail!("pool invariant violated: {}", e);
        }

        let pool = &game.pool;
        log::info!(
            "{} frames: {} created, peak {} active, pool {} / {}, {} hits",
            game.frame,
            pool.total_created_count(),
            pool.peak_active_count(),
            pool.pool_size(),
            pool.capacity_ceiling(),
            game.hits
        );
        log::info!(
            "Player: {} lives, power {:.1}, {} bombs, score {}",
            game.player.lives,
            game.player.power,
            game.player.bombs,
            game.player.score
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Danmaku Pool demo starting...");
    demo::run(demo::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host drives the pool directly
}
