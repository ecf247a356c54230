//! Enemy behaviour system: per-archetype motion, escapes and cannon contact.
//!
//! Motion is skipped entirely while time is frozen. Escapes and contact
//! never pay a reward or count as kills.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::components::{Cannon, Enemy, EnemyMotion};
use bulwark_core::constants::*;
use bulwark_core::enums::EnemyKind;
use bulwark_core::events::AudioEvent;
use bulwark_core::types::{DevParams, Position};

use crate::run_state::RunState;
use crate::systems::collision;

/// Chance per tick that an idle fast enemy starts a dash.
pub fn dash_chance(wave: u32) -> f64 {
    (0.02 + 0.003 * wave as f64).min(0.08)
}

pub fn dash_ticks(wave: u32) -> u32 {
    60u32.saturating_sub(2 * wave).max(20)
}

pub fn dash_multiplier(wave: u32) -> f64 {
    if wave > FAST_HYPER_WAVE {
        FAST_HYPER_DASH_MULTIPLIER
    } else {
        FAST_DASH_MULTIPLIER
    }
}

/// Advance one enemy by one tick according to its archetype.
pub fn step_motion(
    enemy: &mut Enemy,
    motion: &mut EnemyMotion,
    pos: &mut Position,
    rng: &mut ChaCha8Rng,
    dt: f64,
) {
    match enemy.kind {
        EnemyKind::Normal => {
            pos.y += enemy.speed * dt;
        }
        EnemyKind::Fast => {
            if motion.dash_ticks == 0 && rng.gen::<f64>() < dash_chance(enemy.wave) {
                motion.dash_ticks = dash_ticks(enemy.wave);
            }
            let mult = if motion.dash_ticks > 0 {
                motion.dash_ticks -= 1;
                dash_multiplier(enemy.wave)
            } else {
                1.0
            };
            pos.y += enemy.speed * mult * dt;
            pos.x = motion.base_x + FAST_DRIFT_AMPLITUDE * (pos.y * FAST_DRIFT_FREQUENCY).sin();
        }
        EnemyKind::Zigzag => {
            motion.zigzag_phase += ZIGZAG_PHASE_STEP;
            pos.y += enemy.speed * dt;
            pos.x = motion.base_x + ZIGZAG_AMPLITUDE * motion.zigzag_phase.sin();
        }
        EnemyKind::Boss => {
            pos.y += enemy.speed * dt;
            motion.boss_shield_ticks = motion.boss_shield_ticks.saturating_sub(1);
            if motion.boss_shield_ticks == 0 {
                motion.boss_shield_up = !motion.boss_shield_up;
                motion.boss_shield_ticks = crate::world_setup::boss_shield_period(enemy.wave);
            }
            if enemy.wave > BOSS_REGEN_WAVE {
                motion.regen_timer -= dt;
                if motion.regen_timer <= 0.0 {
                    let amount = (enemy.wave / 5) as f64;
                    enemy.health = (enemy.health + amount).min(enemy.max_health);
                    motion.regen_timer = BOSS_REGEN_INTERVAL;
                }
            }
        }
        EnemyKind::Splitter => {
            motion.spin += SPLITTER_SPIN_STEP;
            pos.y += enemy.speed * dt;
            pos.x = motion.base_x
                + SPLITTER_WOBBLE_AMPLITUDE * (pos.y * SPLITTER_WOBBLE_FREQUENCY).cos();
        }
    }
}

/// Run enemy behaviour, then resolve escapes and cannon contact.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    run: &mut RunState,
    cannon: &Cannon,
    dev: &DevParams,
    frozen: bool,
    audio_events: &mut Vec<AudioEvent>,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    for (_entity, (enemy, motion, pos)) in
        world.query_mut::<(&mut Enemy, &mut EnemyMotion, &mut Position)>()
    {
        motion.prev_y = pos.y;
        if !frozen {
            step_motion(enemy, motion, pos, rng, dt);
        }
    }

    despawn_buffer.clear();
    for (entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        if pos.y > ESCAPE_Y {
            despawn_buffer.push(entity);
            audio_events.push(AudioEvent::EnemyEscaped);
            if !dev.god_mode {
                run.take_damage(ESCAPE_DAMAGE);
            }
        } else if collision::circles_overlap(*pos, enemy.radius, cannon.position, CANNON_RADIUS) {
            despawn_buffer.push(entity);
            audio_events.push(AudioEvent::Explosion);
            if !dev.god_mode {
                run.take_damage(CANNON_CONTACT_DAMAGE);
            }
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn enemy(kind: EnemyKind, wave: u32) -> Enemy {
        crate::world_setup::enemy_stats(kind, wave, &DevParams::default())
    }

    #[test]
    fn normal_descends_straight() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut e = enemy(EnemyKind::Normal, 1);
        let mut m = EnemyMotion {
            base_x: 200.0,
            ..Default::default()
        };
        let mut p = Position::new(200.0, 0.0);
        step_motion(&mut e, &mut m, &mut p, &mut rng, 1.0);
        assert_eq!(p.x, 200.0);
        assert!((p.y - 66.0).abs() < 1e-9);
    }

    #[test]
    fn zigzag_oscillates_around_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut e = enemy(EnemyKind::Zigzag, 5);
        let mut m = EnemyMotion {
            base_x: 400.0,
            ..Default::default()
        };
        let mut p = Position::new(400.0, 0.0);
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        for _ in 0..120 {
            step_motion(&mut e, &mut m, &mut p, &mut rng, DT);
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
        }
        assert!(min_x < 360.0 && max_x > 440.0);
        assert!(min_x >= 400.0 - ZIGZAG_AMPLITUDE && max_x <= 400.0 + ZIGZAG_AMPLITUDE);
    }

    #[test]
    fn fast_dash_scaling() {
        assert!((dash_chance(1) - 0.023).abs() < 1e-12);
        assert_eq!(dash_chance(30), 0.08);
        assert_eq!(dash_ticks(1), 58);
        assert_eq!(dash_ticks(30), 20);
        assert_eq!(dash_multiplier(10), FAST_DASH_MULTIPLIER);
        assert_eq!(dash_multiplier(11), FAST_HYPER_DASH_MULTIPLIER);
    }

    #[test]
    fn boss_regenerates_late() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut e = enemy(EnemyKind::Boss, 20);
        e.health = 10.0;
        let mut m = EnemyMotion {
            regen_timer: BOSS_REGEN_INTERVAL,
            boss_shield_ticks: 100,
            ..Default::default()
        };
        let mut p = Position::new(400.0, 0.0);
        for _ in 0..(2 * TICK_RATE + 1) {
            step_motion(&mut e, &mut m, &mut p, &mut rng, DT);
        }
        assert_eq!(e.health, 14.0);
    }

    #[test]
    fn boss_shield_toggles() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut e = enemy(EnemyKind::Boss, 7);
        let period = crate::world_setup::boss_shield_period(7);
        let mut m = EnemyMotion {
            boss_shield_ticks: period,
            ..Default::default()
        };
        let mut p = Position::new(400.0, 0.0);
        for _ in 0..period {
            step_motion(&mut e, &mut m, &mut p, &mut rng, DT);
        }
        assert!(m.boss_shield_up);
    }

    #[test]
    fn escape_costs_health_without_reward() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let progress = bulwark_campaign::PermanentProgress::default();
        let mut run = RunState::new(&progress);
        let cannon = crate::world_setup::build_cannon(&progress);
        let dev = DevParams::default();
        crate::world_setup::spawn_enemy_at(
            &mut world,
            EnemyKind::Normal,
            1,
            &dev,
            Position::new(100.0, ESCAPE_Y - 0.5),
        );
        let mut audio = Vec::new();
        let mut buf = Vec::new();
        super::run(
            &mut world, &mut rng, &mut run, &cannon, &dev, false, &mut audio, &mut buf, DT,
        );
        assert_eq!(world.len(), 0);
        assert_eq!(run.health, STARTING_HEALTH - ESCAPE_DAMAGE);
        assert_eq!(run.currency, STARTING_CURRENCY);
        assert_eq!(run.kills, 0);
        assert_eq!(audio, vec![AudioEvent::EnemyEscaped]);
    }

    #[test]
    fn frozen_enemies_do_not_move() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let progress = bulwark_campaign::PermanentProgress::default();
        let mut run = RunState::new(&progress);
        let cannon = crate::world_setup::build_cannon(&progress);
        let dev = DevParams::default();
        let e = crate::world_setup::spawn_enemy_at(
            &mut world,
            EnemyKind::Zigzag,
            5,
            &dev,
            Position::new(300.0, 100.0),
        );
        let mut audio = Vec::new();
        let mut buf = Vec::new();
        for _ in 0..30 {
            super::run(
                &mut world, &mut rng, &mut run, &cannon, &dev, true, &mut audio, &mut buf, DT,
            );
        }
        let pos = *world.get::<&Position>(e).unwrap();
        assert_eq!(pos, Position::new(300.0, 100.0));
    }
}
