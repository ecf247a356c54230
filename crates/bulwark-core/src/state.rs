//! Game state snapshot: the complete visible state sent to the frontend each tick.
//!
//! Snapshots are read-only copies. Nothing in them feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::components::{LaserBeam, Missile, StrikeSite};
use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub cannon: CannonView,
    pub shield: ShieldView,
    pub ultimates: Vec<UltimateView>,
    /// The active ultimate effect, if any.
    pub effect: Option<EffectView>,
    pub run: RunView,
    /// Breakdown of the most recent wave completion reward.
    pub last_wave_reward: Option<WaveRewardView>,
    pub upgrades: Vec<UpgradeView>,
    pub permanent_upgrades: Vec<PermanentUpgradeView>,
    pub progress: ProgressView,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub radius: f64,
    /// Cosmetic: splitter spin angle.
    pub spin: f64,
    /// Cosmetic: boss shield bubble.
    pub boss_shield_up: bool,
    pub dashing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub radius: f64,
    pub explosive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CannonView {
    pub position: Position,
    pub rotation: f64,
    pub damage: f64,
    pub fire_interval: f64,
    pub range: f64,
    pub explosive_level: u32,
    pub multishot: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldView {
    pub phase: ShieldPhase,
    pub y: f64,
    pub duration_remaining: f64,
    pub duration_max: f64,
    pub cooldown_remaining: f64,
    pub cooldown_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateView {
    pub index: usize,
    pub name: String,
    pub cooldown_remaining: f64,
    pub cooldown_max: f64,
    /// Off cooldown and no other effect running.
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: UltimateKind,
    pub remaining: f64,
    pub duration: f64,
    pub frozen: bool,
    pub missiles: Vec<Missile>,
    pub lasers: Vec<LaserBeam>,
    pub strikes: Vec<StrikeSite>,
}

/// In-run counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunView {
    pub currency: u64,
    pub health: f64,
    pub max_health: f64,
    pub wave: u32,
    pub kills: u32,
    pub wave_kills: u32,
    pub enemies_spawned: u32,
    pub enemies_per_wave: u32,
    pub spawn_delay: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveRewardView {
    /// The wave that was cleared.
    pub wave: u32,
    pub base: u64,
    pub kill_bonus: u64,
    /// Extra currency paid on every fifth wave.
    pub survival_bonus: u64,
    pub kills: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeView {
    pub kind: UpgradeKind,
    pub level: u32,
    pub cost: u64,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanentUpgradeView {
    pub kind: PermanentUpgradeKind,
    pub level: u32,
    pub max_level: u32,
    pub cost: u64,
    pub affordable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressView {
    pub total_kills: u64,
    pub total_waves: u64,
    pub total_games: u64,
    pub experience_points: u64,
}
