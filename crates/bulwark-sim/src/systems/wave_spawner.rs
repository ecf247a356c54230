//! Wave spawning system: releases the wave's enemies one at a time.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::enums::EnemyKind;
use bulwark_core::types::DevParams;

use crate::run_state::RunState;
use crate::world_setup;

/// Selection weight of each archetype on `wave`. Zero means locked.
pub fn kind_weight(kind: EnemyKind, wave: u32) -> f64 {
    match kind {
        EnemyKind::Normal => 1.0,
        EnemyKind::Fast if wave >= 3 => 0.3,
        EnemyKind::Zigzag if wave >= 5 => 0.2,
        EnemyKind::Boss if wave >= 7 => 0.1,
        EnemyKind::Splitter if wave >= 10 => 0.15,
        _ => 0.0,
    }
}

/// Weighted draw over `EnemyKind::ALL`. Subtracts weights in order until
/// the remainder is at or below zero; the earlier kind wins ties.
pub fn pick_enemy_kind(rng: &mut ChaCha8Rng, wave: u32) -> EnemyKind {
    let total: f64 = EnemyKind::ALL.iter().map(|&k| kind_weight(k, wave)).sum();
    let mut r = rng.gen_range(0.0..total);
    for kind in EnemyKind::ALL {
        r -= kind_weight(kind, wave);
        if r <= 0.0 {
            return kind;
        }
    }
    EnemyKind::Normal
}

/// Spawn at most one enemy per tick once the inter-spawn delay has elapsed.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, run: &mut RunState, dev: &DevParams, dt: f64) {
    if dev.no_enemy_spawn || run.quota_reached() {
        return;
    }
    run.spawn_timer += dt;
    if run.spawn_timer < run.spawn_delay {
        return;
    }
    let kind = pick_enemy_kind(rng, run.wave);
    world_setup::spawn_enemy(world, rng, kind, run.wave, dev);
    run.enemies_spawned += 1;
    run.spawn_timer = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn early_waves_only_normal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(pick_enemy_kind(&mut rng, 1), EnemyKind::Normal);
            assert_eq!(pick_enemy_kind(&mut rng, 2), EnemyKind::Normal);
        }
    }

    #[test]
    fn unlock_thresholds() {
        assert_eq!(kind_weight(EnemyKind::Fast, 2), 0.0);
        assert!(kind_weight(EnemyKind::Fast, 3) > 0.0);
        assert_eq!(kind_weight(EnemyKind::Zigzag, 4), 0.0);
        assert!(kind_weight(EnemyKind::Zigzag, 5) > 0.0);
        assert_eq!(kind_weight(EnemyKind::Boss, 6), 0.0);
        assert!(kind_weight(EnemyKind::Boss, 7) > 0.0);
        assert_eq!(kind_weight(EnemyKind::Splitter, 9), 0.0);
        assert!(kind_weight(EnemyKind::Splitter, 10) > 0.0);
    }

    #[test]
    fn late_waves_draw_every_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(pick_enemy_kind(&mut rng, 12));
        }
        assert_eq!(seen.len(), EnemyKind::ALL.len());
    }

    #[test]
    fn spawns_one_per_delay() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let progress = bulwark_campaign::PermanentProgress::default();
        let mut run = RunState::new(&progress);
        let dev = DevParams::default();

        // Delay is 1.0 s: 59 ticks is not enough, the 61st tick is.
        for _ in 0..59 {
            super::run(&mut world, &mut rng, &mut run, &dev, 1.0 / 60.0);
        }
        assert_eq!(run.enemies_spawned, 0);
        for _ in 0..2 {
            super::run(&mut world, &mut rng, &mut run, &dev, 1.0 / 60.0);
        }
        assert_eq!(run.enemies_spawned, 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn stops_at_quota() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let progress = bulwark_campaign::PermanentProgress::default();
        let mut run = RunState::new(&progress);
        run.spawn_delay = 0.0;
        let dev = DevParams::default();
        for _ in 0..100 {
            super::run(&mut world, &mut rng, &mut run, &dev, 1.0 / 60.0);
        }
        assert_eq!(run.enemies_spawned, run.enemies_per_wave);
        assert_eq!(world.len() as u32, run.enemies_per_wave);
    }
}
