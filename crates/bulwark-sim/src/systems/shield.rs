//! Shield system: a timed line across the field that destroys whatever touches it.
//!
//! Ready -> Active -> Cooldown -> Ready. Cooldown starts when the shield expires.

use hecs::World;

use bulwark_core::components::Shield;
use bulwark_core::constants::*;
use bulwark_core::enums::{KillSource, ShieldPhase};

use crate::systems::collision;
use crate::systems::damage::{self, KillLedger};

/// Active time for a shield raised on `wave`.
pub fn shield_duration(wave: u32) -> f64 {
    SHIELD_BASE_DURATION + (SHIELD_DURATION_PER_WAVE * wave as f64).min(SHIELD_MAX_WAVE_BONUS)
}

/// Raise the shield. Refused while active, or while cooling down unless
/// cooldowns are disabled.
pub fn activate(shield: &mut Shield, wave: u32, no_cooldowns: bool) -> bool {
    match shield.phase {
        ShieldPhase::Active => return false,
        ShieldPhase::Cooldown if !no_cooldowns => return false,
        _ => {}
    }
    let duration = shield_duration(wave);
    shield.phase = ShieldPhase::Active;
    shield.duration_max = duration;
    shield.duration_remaining = duration;
    shield.cooldown_remaining = 0.0;
    shield.cooldown_max = SHIELD_COOLDOWN;
    true
}

/// Drop the shield immediately without starting a cooldown (game over).
pub fn clear(shield: &mut Shield) {
    *shield = Shield {
        cooldown_max: SHIELD_COOLDOWN,
        ..Default::default()
    };
}

/// Destroy enemies on the line while active, then advance the timers.
pub fn run(world: &mut World, shield: &mut Shield, ledger: &mut KillLedger, dt: f64) {
    match shield.phase {
        ShieldPhase::Ready => {}
        ShieldPhase::Active => {
            for entity in collision::enemies_on_shield(world) {
                damage::kill_enemy(world, entity, KillSource::Shield, ledger);
            }
            shield.duration_remaining -= dt;
            if shield.duration_remaining <= 0.0 {
                shield.phase = ShieldPhase::Cooldown;
                shield.duration_remaining = 0.0;
                shield.cooldown_remaining = shield.cooldown_max;
            }
        }
        ShieldPhase::Cooldown => {
            shield.cooldown_remaining -= dt;
            if shield.cooldown_remaining <= 0.0 {
                shield.phase = ShieldPhase::Ready;
                shield.cooldown_remaining = 0.0;
            }
        }
    }
}
