//! Entity spawn factories for the simulation world.
//!
//! Creates enemy, split-child and bullet entities with the right component
//! bundles, and builds the run's cannon from permanent progress.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_campaign::PermanentProgress;
use bulwark_core::components::*;
use bulwark_core::constants::*;
use bulwark_core::enums::*;
use bulwark_core::types::{DevParams, Position, Velocity};

/// Multipliers for an archetype: (speed, health, reward, radius).
fn enemy_kind_params(kind: EnemyKind) -> (f64, f64, f64, f64) {
    match kind {
        EnemyKind::Normal => (1.0, 1.0, 1.0, 15.0),
        EnemyKind::Fast => (2.0, 0.7, 1.2, 12.0),
        EnemyKind::Zigzag => (1.5, 1.2, 1.5, 15.0),
        EnemyKind::Boss => (0.6, 3.0, 3.0, 25.0),
        EnemyKind::Splitter => (1.0, 1.5, 2.0, 18.0),
    }
}

/// Combat stats for a freshly spawned enemy of `kind` on `wave`.
pub fn enemy_stats(kind: EnemyKind, wave: u32, dev: &DevParams) -> Enemy {
    let w = wave as f64;
    let (speed_mult, health_mult, reward_mult, radius) = enemy_kind_params(kind);
    let health = (ENEMY_BASE_HEALTH + ENEMY_HEALTH_PER_WAVE * w)
        * health_mult
        * dev.enemy_health_multiplier;
    let speed =
        (ENEMY_BASE_SPEED + ENEMY_SPEED_PER_WAVE * w) * speed_mult * dev.enemy_speed_multiplier;
    let reward = ((ENEMY_BASE_REWARD + ENEMY_REWARD_PER_WAVE * w)
        * reward_mult
        * dev.money_multiplier)
        .floor()
        .max(0.0) as u64;
    Enemy {
        kind,
        health,
        max_health: health,
        speed,
        reward,
        radius,
        wave,
    }
}

/// Ticks between boss shield toggles.
pub fn boss_shield_period(wave: u32) -> u32 {
    200u32.saturating_sub(5 * wave).max(100)
}

/// Generations a splitter spawned on `wave` may split into.
pub fn splitter_splits(wave: u32) -> u8 {
    (1 + wave / 8).min(SPLITTER_MAX_SPLITS as u32) as u8
}

/// Spawn an enemy at the top of the field in a random column.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: EnemyKind,
    wave: u32,
    dev: &DevParams,
) -> Entity {
    let x = rng.gen_range(SPAWN_MARGIN_X..FIELD_WIDTH - SPAWN_MARGIN_X);
    spawn_enemy_at(world, kind, wave, dev, Position::new(x, SPAWN_Y))
}

/// Spawn an enemy at an exact position.
pub fn spawn_enemy_at(
    world: &mut World,
    kind: EnemyKind,
    wave: u32,
    dev: &DevParams,
    position: Position,
) -> Entity {
    let enemy = enemy_stats(kind, wave, dev);
    let motion = EnemyMotion {
        base_x: position.x,
        prev_y: position.y,
        boss_shield_ticks: boss_shield_period(wave),
        regen_timer: BOSS_REGEN_INTERVAL,
        splits_remaining: match kind {
            EnemyKind::Splitter => splitter_splits(wave),
            _ => 0,
        },
        ..Default::default()
    };
    world.spawn((enemy, motion, position))
}

/// Spawn the children of a splitter that died at `at`.
/// Children sit evenly spaced on a ring around the death point.
pub fn spawn_split_children(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    parent: &Enemy,
    at: Position,
    parent_splits: u8,
) -> u32 {
    let extra: u32 = rng.gen_range(0..2);
    let count = (2 + parent.wave / 10 + extra).min(SPLITTER_MAX_CHILDREN);
    let health = parent.max_health * SPLIT_HEALTH_FRACTION;

    for i in 0..count {
        let angle = std::f64::consts::TAU * i as f64 / count as f64;
        let position = Position::new(
            at.x + SPLIT_RING_RADIUS * angle.cos(),
            at.y + SPLIT_RING_RADIUS * angle.sin(),
        );
        let child = Enemy {
            kind: EnemyKind::Splitter,
            health,
            max_health: health,
            speed: parent.speed * SPLIT_SPEED_FACTOR,
            reward: (parent.reward as f64 * SPLIT_REWARD_FRACTION).floor() as u64,
            radius: SPLIT_CHILD_RADIUS,
            wave: parent.wave,
        };
        let motion = EnemyMotion {
            base_x: position.x,
            prev_y: position.y,
            splits_remaining: parent_splits.saturating_sub(1),
            ..Default::default()
        };
        world.spawn((child, motion, position));
    }
    count
}

pub fn spawn_bullet(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    bullet: Bullet,
) -> Entity {
    world.spawn((bullet, position, velocity))
}

/// The run's cannon: base stats plus permanent upgrades, no in-run upgrades.
pub fn build_cannon(progress: &PermanentProgress) -> Cannon {
    Cannon {
        position: Position::new(CANNON_X, CANNON_Y),
        damage: progress.base_damage(),
        fire_interval: CANNON_BASE_FIRE_INTERVAL,
        range: CANNON_BASE_RANGE,
        explosive_level: 0,
        multishot: 1,
        bullet_radius: progress.bullet_radius(),
        bullet_speed: progress.bullet_speed(),
        rotation: -std::f64::consts::FRAC_PI_2,
        last_shot: None,
    }
}

/// All three ultimate slots, ready to fire.
pub fn build_ultimates() -> Vec<UltimateSlot> {
    UltimateKind::ALL
        .iter()
        .map(|&kind| UltimateSlot {
            kind,
            cooldown_remaining: 0.0,
            cooldown_max: ultimate_cooldown(kind),
            last_used: None,
        })
        .collect()
}

pub fn ultimate_cooldown(kind: UltimateKind) -> f64 {
    match kind {
        UltimateKind::NuclearStorm => NUKE_COOLDOWN,
        UltimateKind::TimeFreeze => FREEZE_COOLDOWN,
        UltimateKind::OrbitalStrike => STRIKE_COOLDOWN,
    }
}

pub fn ultimate_duration(kind: UltimateKind) -> f64 {
    match kind {
        UltimateKind::NuclearStorm => NUKE_DURATION,
        UltimateKind::TimeFreeze => FREEZE_DURATION,
        UltimateKind::OrbitalStrike => STRIKE_DURATION,
    }
}
