//! Property tests for pool bookkeeping

use danmaku_pool::renderer::TextureHandle;
use danmaku_pool::sim::{BulletHandle, Owner, ProjectilePool, ProjectileTemplate, TemplateCatalog};
use danmaku_pool::PoolSettings;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create { known: bool, x: f32, y: f32 },
    Recycle(usize),
    RecycleStale(usize),
    Update(f32),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<bool>(), -50.0f32..850.0, -50.0f32..650.0)
            .prop_map(|(known, x, y)| Op::Create { known, x, y }),
        3 => any::<usize>().prop_map(Op::Recycle),
        1 => any::<usize>().prop_map(Op::RecycleStale),
        2 => (0.0f32..50.0).prop_map(Op::Update),
        1 => Just(Op::Clear),
    ]
}

fn pool(initial: usize, max: usize) -> ProjectilePool {
    let orb = ProjectileTemplate::from_json(r#"{"id": "orb", "texture": "orb.png"}"#).expect("valid");
    let mut loader = |path: &str| Some(TextureHandle::new(1, path));
    let catalog = TemplateCatalog::from_templates([orb], &mut loader).expect("loads");
    let mut pool = ProjectilePool::new(PoolSettings::with_capacity(initial, max));
    assert!(pool.initialize(catalog));
    pool
}

proptest! {
    #[test]
    fn membership_partition_holds(
        initial in 1usize..16,
        extra in 0usize..16,
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let max = initial + extra;
        let mut pool = pool(initial, max);
        let mut live: Vec<BulletHandle> = Vec::new();
        let mut dead: Vec<BulletHandle> = Vec::new();

        for op in ops {
            match op {
                Op::Create { known, x, y } => {
                    let type_id = if known { "orb" } else { "missing" };
                    let before = pool.active_bullet_count();
                    match pool.create_bullet(type_id, Owner::Enemy, x, y) {
                        Some(h) => {
                            prop_assert!(known);
                            prop_assert_eq!(pool.active_bullet_count(), before + 1);
                            live.push(h);
                        }
                        None => {
                            prop_assert_eq!(pool.active_bullet_count(), before);
                        }
                    }
                }
                Op::Recycle(i) if !live.is_empty() => {
                    let h = live.swap_remove(i % live.len());
                    // May already have been retired by an update
                    pool.recycle_bullet(h);
                    prop_assert!(!pool.is_live(h));
                    dead.push(h);
                }
                Op::RecycleStale(i) if !dead.is_empty() => {
                    let active = pool.active_bullet_count();
                    prop_assert!(!pool.recycle_bullet(dead[i % dead.len()]));
                    prop_assert_eq!(pool.active_bullet_count(), active);
                }
                Op::Update(dt) => {
                    pool.update(dt);
                    pool.drain_events().for_each(drop);
                }
                Op::Clear => {
                    pool.clear_active_bullets();
                    prop_assert_eq!(pool.active_bullet_count(), 0);
                    dead.append(&mut live);
                }
                _ => {}
            }

            live.retain(|h| pool.is_live(*h));
            prop_assert!(pool.check_consistency().is_ok());
            prop_assert_eq!(
                pool.active_bullet_count() + pool.available_bullet_count(),
                pool.pool_size()
            );
            prop_assert!(pool.pool_size() <= max);
            prop_assert!(pool.pool_size() >= initial);
        }
    }

    #[test]
    fn growth_never_passes_ceiling(initial in 1usize..32, extra in 0usize..32, spawns in 0usize..96) {
        let max = initial + extra;
        let mut pool = pool(initial, max);
        let mut created = 0;
        for _ in 0..spawns {
            if pool.create_bullet("orb", Owner::Player, 400.0, 300.0).is_some() {
                created += 1;
            }
        }
        prop_assert_eq!(created, spawns.min(max));
        prop_assert!(pool.pool_size() <= max);
        prop_assert_eq!(pool.active_bullet_count(), created);
    }
}
