//! Damage application and kill handling shared by every damage source.
//!
//! Enemies are despawned the moment they die, so a second source in the
//! same tick finds nothing and cannot pay the reward again.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bulwark_core::components::{Enemy, EnemyMotion};
use bulwark_core::enums::{EnemyKind, KillSource};
use bulwark_core::events::AudioEvent;
use bulwark_core::types::Position;

use crate::run_state::RunState;
use crate::systems::collision;
use crate::world_setup;

/// Everything besides the world that a kill touches.
pub struct KillLedger<'a> {
    pub run: &'a mut RunState,
    pub rng: &'a mut ChaCha8Rng,
    pub audio_events: &'a mut Vec<AudioEvent>,
    /// Let ultimate kills split splitters too.
    pub split_on_ability_kill: bool,
}

/// Remove a dead enemy, pay its reward and split it if the source allows.
/// Returns false if the enemy was already gone.
pub fn kill_enemy(
    world: &mut World,
    entity: Entity,
    source: KillSource,
    ledger: &mut KillLedger,
) -> bool {
    let Ok((enemy, splits, position)) = world
        .query_one_mut::<(&Enemy, &EnemyMotion, &Position)>(entity)
        .map(|(e, m, p)| (e.clone(), m.splits_remaining, *p))
    else {
        return false;
    };
    if world.despawn(entity).is_err() {
        return false;
    }

    ledger.run.record_kill(enemy.reward);
    ledger.audio_events.push(match source {
        KillSource::Weapon => AudioEvent::Explosion,
        KillSource::Shield => AudioEvent::ShieldImpact,
        KillSource::Ultimate(kind) => AudioEvent::UltimateKill {
            index: kind.index(),
        },
    });

    let may_split = match source {
        KillSource::Weapon => true,
        KillSource::Shield => false,
        KillSource::Ultimate(_) => ledger.split_on_ability_kill,
    };
    if enemy.kind == EnemyKind::Splitter && splits > 0 && may_split {
        world_setup::spawn_split_children(world, ledger.rng, &enemy, position, splits);
    }
    true
}

/// Subtract `amount` from an enemy's health, killing it at zero or below.
/// Returns true if this call killed it.
pub fn damage_enemy(
    world: &mut World,
    entity: Entity,
    amount: f64,
    source: KillSource,
    ledger: &mut KillLedger,
) -> bool {
    let dead = match world.get::<&mut Enemy>(entity) {
        Ok(mut enemy) => {
            enemy.health -= amount;
            enemy.health <= 0.0
        }
        Err(_) => return false,
    };
    dead && kill_enemy(world, entity, source, ledger)
}

/// Damage every enemy strictly inside `radius` of `center` once.
/// Children spawned by kills inside the burst are not hit by it.
/// Returns the number of kills.
pub fn area_burst(
    world: &mut World,
    center: Position,
    radius: f64,
    damage: f64,
    source: KillSource,
    exclude: Option<Entity>,
    ledger: &mut KillLedger,
) -> u32 {
    let victims = collision::enemies_within(world, center, radius, exclude);
    damage_each(world, &victims, damage, source, ledger)
}

/// Damage each listed enemy once. Entities already gone are skipped.
/// Returns the number of kills.
pub fn damage_each(
    world: &mut World,
    victims: &[Entity],
    damage: f64,
    source: KillSource,
    ledger: &mut KillLedger,
) -> u32 {
    let mut kills = 0;
    for &entity in victims {
        if damage_enemy(world, entity, damage, source, ledger) {
            kills += 1;
        }
    }
    kills
}
