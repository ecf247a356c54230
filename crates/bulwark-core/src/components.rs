//! ECS components for hecs entities, plus the singleton combat records.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, Velocity};

/// Enemy combat stats. Paired with a `Position` and an `EnemyMotion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: f64,
    pub max_health: f64,
    /// Descent speed (units/s) before dash multipliers.
    pub speed: f64,
    /// Currency paid on kill.
    pub reward: u64,
    /// Collision radius.
    pub radius: f64,
    /// Wave the enemy was spawned in. Drives dash/regen/split scaling.
    pub wave: u32,
}

/// Per-archetype motion state. Fields unused by an archetype stay at default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyMotion {
    /// Spawn column; lateral motion is an offset from it.
    pub base_x: f64,
    /// Zigzag oscillator phase (radians).
    pub zigzag_phase: f64,
    /// Ticks left in the current dash (fast enemies).
    pub dash_ticks: u32,
    /// Splitter spin angle (radians, cosmetic).
    pub spin: f64,
    /// Cosmetic boss shield.
    pub boss_shield_up: bool,
    /// Ticks until the boss shield toggles.
    pub boss_shield_ticks: u32,
    /// Seconds until the next boss regeneration pulse.
    pub regen_timer: f64,
    /// How many more generations a splitter may split into.
    pub splits_remaining: u8,
    /// y at the start of this tick's move. The shield tests the swept span.
    pub prev_y: f64,
}

/// Cannon projectile. Paired with `Position` and `Velocity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: f64,
    pub radius: f64,
    /// Explosive upgrade level at fire time (0 = no splash).
    pub explosive_level: u32,
}

/// The player's fixed auto-firing cannon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    pub position: Position,
    pub damage: f64,
    /// Minimum seconds between volleys.
    pub fire_interval: f64,
    pub range: f64,
    pub explosive_level: u32,
    /// Bullets per volley.
    pub multishot: u32,
    pub bullet_radius: f64,
    /// Bullet speed (units/s).
    pub bullet_speed: f64,
    /// Barrel angle toward the last target (radians, atan2 convention).
    pub rotation: f64,
    /// Sim time of the last volley. `None` until the first shot.
    pub last_shot: Option<f64>,
}

/// Defensive line ability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shield {
    pub phase: ShieldPhase,
    pub duration_remaining: f64,
    pub duration_max: f64,
    pub cooldown_remaining: f64,
    pub cooldown_max: f64,
}

/// Cooldown tracking for one ultimate slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateSlot {
    pub kind: UltimateKind,
    pub cooldown_remaining: f64,
    pub cooldown_max: f64,
    /// Sim time of the last trigger.
    pub last_used: Option<f64>,
}

/// Falling bombardment warhead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Missile {
    pub position: Position,
    pub velocity: Velocity,
    /// Ticks until detonation if it has not landed.
    pub fuse_ticks: u32,
}

/// Freeze beam from the cannon to one enemy. Render only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaserBeam {
    pub from: Position,
    pub to: Position,
}

/// Orbital strike site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrikeSite {
    pub target: Position,
    pub phase: StrikePhase,
    /// Seconds until impact while charging.
    pub charge_remaining: f64,
}
