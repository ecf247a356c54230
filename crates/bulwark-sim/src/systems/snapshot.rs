//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use bulwark_campaign::progression::permanent_max_level;
use bulwark_campaign::{PermanentProgress, UpgradeLevels};
use bulwark_core::components::*;
use bulwark_core::constants::SHIELD_Y;
use bulwark_core::enums::*;
use bulwark_core::events::AudioEvent;
use bulwark_core::state::*;
use bulwark_core::types::{Position, SimTime};

use crate::run_state::RunState;
use crate::systems::ultimate::UltimateEffect;

/// Build a complete GameStateSnapshot from the current engine state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    run: &RunState,
    cannon: &Cannon,
    shield: &Shield,
    ultimates: &[UltimateSlot],
    effect: &Option<UltimateEffect>,
    upgrades: &UpgradeLevels,
    progress: &PermanentProgress,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        cannon: CannonView {
            position: cannon.position,
            rotation: cannon.rotation,
            damage: cannon.damage,
            fire_interval: cannon.fire_interval,
            range: cannon.range,
            explosive_level: cannon.explosive_level,
            multishot: cannon.multishot,
        },
        shield: ShieldView {
            phase: shield.phase,
            y: SHIELD_Y,
            duration_remaining: shield.duration_remaining,
            duration_max: shield.duration_max,
            cooldown_remaining: shield.cooldown_remaining,
            cooldown_max: shield.cooldown_max,
        },
        ultimates: build_ultimates(ultimates, effect.is_some()),
        effect: effect.as_ref().map(UltimateEffect::view),
        run: RunView {
            currency: run.currency,
            health: run.health,
            max_health: run.max_health,
            wave: run.wave,
            kills: run.kills,
            wave_kills: run.wave_kills,
            enemies_spawned: run.enemies_spawned,
            enemies_per_wave: run.enemies_per_wave,
            spawn_delay: run.spawn_delay,
        },
        last_wave_reward: run.last_wave_reward,
        upgrades: build_upgrades(upgrades, run.currency),
        permanent_upgrades: build_permanent(progress),
        progress: ProgressView {
            total_kills: progress.total_kills,
            total_waves: progress.total_waves,
            total_games: progress.total_games,
            experience_points: progress.experience_points,
        },
        audio_events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &EnemyMotion, &Position)>()
        .iter()
        .map(|(_, (enemy, motion, pos))| EnemyView {
            kind: enemy.kind,
            position: *pos,
            health: enemy.health,
            max_health: enemy.max_health,
            radius: enemy.radius,
            spin: motion.spin,
            boss_shield_up: motion.boss_shield_up,
            dashing: motion.dash_ticks > 0,
        })
        .collect()
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(_, (bullet, pos))| BulletView {
            position: *pos,
            radius: bullet.radius,
            explosive: bullet.explosive_level > 0,
        })
        .collect()
}

fn build_ultimates(slots: &[UltimateSlot], effect_active: bool) -> Vec<UltimateView> {
    slots
        .iter()
        .map(|slot| UltimateView {
            index: slot.kind.index(),
            name: slot.kind.name().to_string(),
            cooldown_remaining: slot.cooldown_remaining,
            cooldown_max: slot.cooldown_max,
            ready: !effect_active && slot.cooldown_remaining <= 0.0,
        })
        .collect()
}

fn build_upgrades(levels: &UpgradeLevels, currency: u64) -> Vec<UpgradeView> {
    UpgradeKind::ALL
        .iter()
        .map(|&kind| {
            let cost = levels.cost(kind);
            UpgradeView {
                kind,
                level: levels.level_for(kind),
                cost,
                affordable: levels.purchasable(kind) && currency >= cost,
            }
        })
        .collect()
}

fn build_permanent(progress: &PermanentProgress) -> Vec<PermanentUpgradeView> {
    PermanentUpgradeKind::ALL
        .iter()
        .map(|&kind| PermanentUpgradeView {
            kind,
            level: progress.level(kind),
            max_level: permanent_max_level(kind),
            cost: progress.cost(kind),
            affordable: progress.can_purchase(kind),
        })
        .collect()
}
