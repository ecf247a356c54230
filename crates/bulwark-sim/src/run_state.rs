//! Per-run counters: currency, health, wave pacing and kills.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities. Rebuilt on every reset.

use bulwark_campaign::economy;
use bulwark_campaign::PermanentProgress;
use bulwark_core::constants::*;
use bulwark_core::state::WaveRewardView;

#[derive(Debug, Clone)]
pub struct RunState {
    pub currency: u64,
    pub health: f64,
    pub max_health: f64,
    /// Cannon damage before in-run damage upgrades, fixed for the run.
    pub base_damage: f64,
    /// Current wave, starting at 1.
    pub wave: u32,
    pub kills: u32,
    pub wave_kills: u32,

    // --- Spawner ---
    pub enemies_spawned: u32,
    pub enemies_per_wave: u32,
    pub spawn_delay: f64,
    /// Seconds since the last spawn.
    pub spawn_timer: f64,

    pub last_wave_reward: Option<WaveRewardView>,
    /// Set once the game-over tally has been written.
    pub game_over_recorded: bool,
}

impl RunState {
    /// Fresh run using the permanent levels in `progress`.
    pub fn new(progress: &PermanentProgress) -> Self {
        let max_health = progress.starting_max_health();
        Self {
            currency: progress.starting_currency(),
            health: max_health,
            max_health,
            base_damage: progress.base_damage(),
            wave: 1,
            kills: 0,
            wave_kills: 0,
            enemies_spawned: 0,
            enemies_per_wave: FIRST_WAVE_QUOTA,
            spawn_delay: FIRST_WAVE_SPAWN_DELAY,
            spawn_timer: 0.0,
            last_wave_reward: None,
            game_over_recorded: false,
        }
    }

    pub fn heal(&mut self, amount: f64) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Lose health. Health may go to or below zero; the wave system ends the run.
    pub fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
    }

    /// Credit a kill and its reward.
    pub fn record_kill(&mut self, reward: u64) {
        self.currency += reward;
        self.kills += 1;
        self.wave_kills += 1;
    }

    /// Every enemy of the wave has been spawned.
    pub fn quota_reached(&self) -> bool {
        self.enemies_spawned >= self.enemies_per_wave
    }

    /// Pay out the cleared wave and set up pacing for the next one.
    /// Returns the reward breakdown.
    pub fn complete_wave(&mut self) -> WaveRewardView {
        let completed = self.wave;
        let reward = economy::wave_reward(completed, self.wave_kills);
        self.currency += reward.total();
        self.heal(reward.survival_heal);

        let view = WaveRewardView {
            wave: completed,
            base: reward.base,
            kill_bonus: reward.kill_bonus,
            survival_bonus: reward.survival_bonus,
            kills: self.wave_kills,
        };

        self.wave = completed + 1;
        self.enemies_per_wave = economy::enemies_per_wave(completed);
        self.spawn_delay = economy::spawn_delay(completed);
        self.enemies_spawned = 0;
        self.spawn_timer = 0.0;
        self.wave_kills = 0;
        self.last_wave_reward = Some(view);
        view
    }
}
