//! Ultimate abilities: independent cooldowns, one shared active effect.
//!
//! Staggered sub-effects (missiles, strike sites) are held as a countdown
//! schedule evaluated every tick, so the whole effect is deterministic.

use hecs::World;
use rand::Rng;

use bulwark_core::components::{Cannon, Enemy, LaserBeam, Missile, StrikeSite, UltimateSlot};
use bulwark_core::constants::*;
use bulwark_core::enums::{KillSource, StrikePhase, UltimateKind};
use bulwark_core::events::AudioEvent;
use bulwark_core::state::EffectView;
use bulwark_core::types::{Position, Velocity};

use crate::systems::damage::{self, KillLedger};
use crate::world_setup;

/// The single running ultimate effect.
#[derive(Debug, Clone)]
pub struct UltimateEffect {
    pub kind: UltimateKind,
    pub remaining: f64,
    pub duration: f64,
    /// Halts enemy motion.
    pub frozen: bool,
    /// Seconds until each pending missile or strike site is released.
    pub pending: Vec<f64>,
    pub missiles: Vec<Missile>,
    pub lasers: Vec<LaserBeam>,
    pub strikes: Vec<StrikeSite>,
}

impl UltimateEffect {
    pub fn new(kind: UltimateKind) -> Self {
        let duration = world_setup::ultimate_duration(kind);
        let pending = match kind {
            UltimateKind::NuclearStorm => {
                release_schedule(NUKE_MISSILE_COUNT, NUKE_RELEASE_INTERVAL)
            }
            UltimateKind::TimeFreeze => Vec::new(),
            UltimateKind::OrbitalStrike => {
                release_schedule(STRIKE_SITE_COUNT, STRIKE_RELEASE_INTERVAL)
            }
        };
        Self {
            kind,
            remaining: duration,
            duration,
            frozen: kind == UltimateKind::TimeFreeze,
            pending,
            missiles: Vec::new(),
            lasers: Vec::new(),
            strikes: Vec::new(),
        }
    }

    pub fn view(&self) -> EffectView {
        EffectView {
            kind: self.kind,
            remaining: self.remaining,
            duration: self.duration,
            frozen: self.frozen,
            missiles: self.missiles.clone(),
            lasers: self.lasers.clone(),
            strikes: self.strikes.clone(),
        }
    }
}

fn release_schedule(count: u32, interval: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * interval).collect()
}

/// Whether an active effect has frozen time.
pub fn is_frozen(effect: &Option<UltimateEffect>) -> bool {
    effect.as_ref().is_some_and(|e| e.frozen)
}

/// Try to fire slot `index`. Refused for an unknown slot, while any effect
/// is running, or while the slot is cooling down (unless cooldowns are off).
/// A refusal changes nothing.
pub fn trigger(
    slots: &mut [UltimateSlot],
    effect: &mut Option<UltimateEffect>,
    index: usize,
    no_cooldowns: bool,
    now: f64,
) -> bool {
    if effect.is_some() {
        return false;
    }
    let Some(slot) = slots.get_mut(index) else {
        return false;
    };
    if slot.cooldown_remaining > 0.0 && !no_cooldowns {
        return false;
    }
    slot.cooldown_remaining = slot.cooldown_max;
    slot.last_used = Some(now);
    *effect = Some(UltimateEffect::new(slot.kind));
    true
}

/// Tick every slot's cooldown. Runs whether or not an effect is active.
pub fn tick_cooldowns(slots: &mut [UltimateSlot], dt: f64) {
    for slot in slots {
        slot.cooldown_remaining = (slot.cooldown_remaining - dt).max(0.0);
    }
}

/// Advance the active effect by one tick. Clears it on expiry.
pub fn run(
    world: &mut World,
    effect: &mut Option<UltimateEffect>,
    cannon: &Cannon,
    ledger: &mut KillLedger,
    dt: f64,
) {
    let Some(active) = effect.as_mut() else {
        return;
    };
    active.remaining -= dt;
    if active.remaining <= 0.0 {
        *effect = None;
        return;
    }

    match active.kind {
        UltimateKind::NuclearStorm => run_bombardment(world, active, ledger, dt),
        UltimateKind::TimeFreeze => run_freeze(world, active, cannon, ledger),
        UltimateKind::OrbitalStrike => run_orbital(world, active, ledger, dt),
    }
}

/// Take every pending release that is due, counting the rest down.
fn due_releases(pending: &mut Vec<f64>, dt: f64) -> usize {
    let before = pending.len();
    pending.retain(|&t| t > 0.0);
    let due = before - pending.len();
    for t in pending.iter_mut() {
        *t -= dt;
    }
    due
}

fn burst(world: &mut World, at: Position, kind: UltimateKind, ledger: &mut KillLedger) {
    ledger.audio_events.push(AudioEvent::Explosion);
    damage::area_burst(
        world,
        at,
        BURST_RADIUS,
        BURST_DAMAGE,
        KillSource::Ultimate(kind),
        None,
        ledger,
    );
}

fn run_bombardment(
    world: &mut World,
    effect: &mut UltimateEffect,
    ledger: &mut KillLedger,
    dt: f64,
) {
    for _ in 0..due_releases(&mut effect.pending, dt) {
        let missile = Missile {
            position: Position::new(ledger.rng.gen_range(0.0..FIELD_WIDTH), NUKE_SPAWN_Y),
            velocity: Velocity::new(
                ledger.rng.gen_range(-60.0..60.0),
                ledger.rng.gen_range(180.0..300.0),
            ),
            fuse_ticks: ledger.rng.gen_range(NUKE_MIN_FUSE_TICKS..=NUKE_MAX_FUSE_TICKS),
        };
        effect.missiles.push(missile);
    }

    let mut landed = Vec::new();
    effect.missiles.retain_mut(|m| {
        m.position.x += m.velocity.x * dt;
        m.position.y += m.velocity.y * dt;
        m.fuse_ticks = m.fuse_ticks.saturating_sub(1);
        if m.position.y > FIELD_HEIGHT || m.fuse_ticks == 0 {
            landed.push(m.position);
            false
        } else {
            true
        }
    });
    for at in landed {
        burst(world, at, UltimateKind::NuclearStorm, ledger);
    }
}

fn run_freeze(
    world: &mut World,
    effect: &mut UltimateEffect,
    cannon: &Cannon,
    ledger: &mut KillLedger,
) {
    let targets: Vec<hecs::Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in targets {
        damage::damage_enemy(
            world,
            entity,
            FREEZE_TICK_DAMAGE,
            KillSource::Ultimate(UltimateKind::TimeFreeze),
            ledger,
        );
    }

    effect.lasers = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (_, pos))| LaserBeam {
            from: cannon.position,
            to: *pos,
        })
        .collect();
}

fn run_orbital(world: &mut World, effect: &mut UltimateEffect, ledger: &mut KillLedger, dt: f64) {
    for _ in 0..due_releases(&mut effect.pending, dt) {
        let target = Position::new(
            ledger.rng.gen_range(0.0..FIELD_WIDTH),
            ledger.rng.gen_range(STRIKE_MIN_Y..STRIKE_MAX_Y),
        );
        effect.strikes.push(StrikeSite {
            target,
            phase: StrikePhase::Charging,
            charge_remaining: STRIKE_CHARGE_TIME,
        });
    }

    let mut impacts = Vec::new();
    for site in effect
        .strikes
        .iter_mut()
        .filter(|s| s.phase == StrikePhase::Charging)
    {
        site.charge_remaining -= dt;
        if site.charge_remaining <= 0.0 {
            site.phase = StrikePhase::Impact;
            site.charge_remaining = 0.0;
            impacts.push(site.target);
        }
    }
    for at in impacts {
        burst(world, at, UltimateKind::OrbitalStrike, ledger);
    }
}
