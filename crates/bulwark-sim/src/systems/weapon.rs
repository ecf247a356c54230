//! Weapon system: projectile flight, hit resolution and cannon auto-fire.

use hecs::{Entity, World};

use bulwark_core::components::{Bullet, Cannon, Enemy};
use bulwark_core::constants::*;
use bulwark_core::enums::KillSource;
use bulwark_core::events::AudioEvent;
use bulwark_core::types::{DevParams, Position, Velocity};

use crate::systems::damage::{self, KillLedger};
use crate::systems::{collision, movement};
use crate::world_setup;

/// Angular offset of shot `i` in an `n`-shot volley. Index 0 is the
/// most counter-clockwise (left-most when firing up the screen).
pub fn spread_offset(i: u32, n: u32) -> f64 {
    let n = n.max(1) as f64;
    (i as f64 - (n - 1.0) / 2.0) * (MULTISHOT_SPREAD / n)
}

/// Nearest enemy strictly inside `range`. Ties keep the first found.
pub fn nearest_target(world: &World, from: Position, range: f64) -> Option<Position> {
    let mut best: Option<(f64, Position)> = None;
    for (_entity, (_enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
        let d = from.distance_to(pos);
        if d >= range {
            continue;
        }
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, *pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Fire a volley if the cannon is off its interval and has a target.
/// `last_shot` only advances when a volley actually leaves.
pub fn fire(
    world: &mut World,
    cannon: &mut Cannon,
    dev: &DevParams,
    now: f64,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    if let Some(last) = cannon.last_shot {
        if now - last < cannon.fire_interval {
            return false;
        }
    }
    let Some(target) = nearest_target(world, cannon.position, cannon.range) else {
        return false;
    };

    let aim = cannon.position.angle_to(&target);
    cannon.rotation = aim;
    let bullet = Bullet {
        damage: cannon.damage * dev.player_damage_multiplier,
        radius: cannon.bullet_radius,
        explosive_level: cannon.explosive_level,
    };
    let shots = cannon.multishot.max(1);
    for i in 0..shots {
        let velocity = Velocity::from_angle(aim + spread_offset(i, shots), cannon.bullet_speed);
        world_setup::spawn_bullet(world, cannon.position, velocity, bullet);
    }
    cannon.last_shot = Some(now);
    audio_events.push(AudioEvent::Shoot);
    true
}

/// Resolve bullet hits. Each bullet hits the first overlapping enemy in
/// query order, is consumed, and may splash the area around the impact.
pub fn resolve_hits(
    world: &mut World,
    dev: &DevParams,
    exclude_primary_from_splash: bool,
    ledger: &mut KillLedger,
) {
    let bullets: Vec<(Entity, Bullet, Position)> = world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(entity, (bullet, pos))| (entity, *bullet, *pos))
        .collect();

    for (entity, bullet, pos) in bullets {
        let Some(target) = collision::first_enemy_hit(world, pos, bullet.radius) else {
            continue;
        };
        let _ = world.despawn(entity);

        // Splash victims are fixed before the primary dies, so split children
        // born from this hit are not caught in its own blast.
        let splashed = (bullet.explosive_level > 0).then(|| {
            let radius =
                SPLASH_BASE_RADIUS + SPLASH_RADIUS_PER_LEVEL * bullet.explosive_level as f64;
            let exclude = exclude_primary_from_splash.then_some(target);
            collision::enemies_within(world, pos, radius, exclude)
        });

        let amount = if dev.one_hit_kill {
            world.get::<&Enemy>(target).map(|e| e.health).unwrap_or(0.0)
        } else {
            bullet.damage
        };
        let killed = damage::damage_enemy(world, target, amount, KillSource::Weapon, ledger);
        if !killed {
            ledger.audio_events.push(AudioEvent::Hit);
        }

        if let Some(victims) = splashed {
            let splash = (bullet.damage * SPLASH_DAMAGE_FRACTION).floor();
            damage::damage_each(world, &victims, splash, KillSource::Weapon, ledger);
        }
    }
}

/// Run the weapon for one tick: move bullets, cull, resolve hits, then fire.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    cannon: &mut Cannon,
    dev: &DevParams,
    exclude_primary_from_splash: bool,
    now: f64,
    ledger: &mut KillLedger,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    movement::run(world, dt);
    movement::cull_bullets(world, despawn_buffer);
    resolve_hits(world, dev, exclude_primary_from_splash, ledger);
    fire(world, cannon, dev, now, ledger.audio_events);
}
