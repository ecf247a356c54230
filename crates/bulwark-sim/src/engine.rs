//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bulwark_campaign::persistence::{self, ProgressStore};
use bulwark_campaign::upgrades::{damage_for_level, fire_interval_for_level, range_for_level};
use bulwark_campaign::{PermanentProgress, UpgradeLevels};
use bulwark_core::commands::PlayerCommand;
use bulwark_core::components::{Cannon, Shield, UltimateSlot};
use bulwark_core::constants::*;
use bulwark_core::enums::{EnemyKind, GamePhase, PermanentUpgradeKind, UpgradeKind};
use bulwark_core::events::AudioEvent;
use bulwark_core::state::GameStateSnapshot;
use bulwark_core::types::{DevParams, Position, SimTime};

use crate::run_state::RunState;
use crate::systems;
use crate::systems::damage::KillLedger;
use crate::systems::ultimate::UltimateEffect;
use crate::systems::waves::WaveOutcome;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Let ultimate kills split splitters. Shield kills never split.
    pub split_on_ability_kill: bool,
    /// Keep explosive splash off the enemy the bullet hit directly.
    pub exclude_primary_from_splash: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            split_on_ability_kill: false,
            exclude_primary_from_splash: true,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    config: SimConfig,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,

    // --- Run ---
    run: RunState,
    dev: DevParams,
    cannon: Cannon,
    upgrades: UpgradeLevels,
    shield: Shield,
    ultimates: Vec<UltimateSlot>,
    effect: Option<UltimateEffect>,

    // --- Cross-run ---
    progress: PermanentProgress,
    store: Box<dyn ProgressStore>,
}

impl SimulationEngine {
    /// Create a new engine, loading permanent progress from `store` once.
    pub fn new(config: SimConfig, store: Box<dyn ProgressStore>) -> Self {
        let progress = persistence::load_or_default(store.as_ref());
        let mut shield = Shield::default();
        systems::shield::clear(&mut shield);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            run: RunState::new(&progress),
            dev: DevParams::default(),
            cannon: world_setup::build_cannon(&progress),
            upgrades: UpgradeLevels::default(),
            shield,
            ultimates: world_setup::build_ultimates(),
            effect: None,
            progress,
            store,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        if self.dev.infinite_money && self.phase != GamePhase::GameOver {
            self.run.currency = INFINITE_CURRENCY;
        }

        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.run,
            &self.cannon,
            &self.shield,
            &self.ultimates,
            &self.effect,
            &self.upgrades,
            &self.progress,
            audio_events,
        )
    }

    // --- Player intents ---

    /// Raise the shield. False if refused.
    pub fn activate_shield(&mut self) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        let ok = systems::shield::activate(&mut self.shield, self.run.wave, self.dev.no_cooldowns);
        if ok {
            debug!("Shield raised for {:.1}s", self.shield.duration_max);
            self.audio_events.push(AudioEvent::ShieldActivated);
        }
        ok
    }

    /// Fire ultimate slot `index`. False if refused.
    pub fn trigger_ultimate(&mut self, index: usize) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        let ok = systems::ultimate::trigger(
            &mut self.ultimates,
            &mut self.effect,
            index,
            self.dev.no_cooldowns,
            self.time.elapsed_secs,
        );
        if ok {
            debug!("Ultimate {index} triggered");
            self.audio_events.push(AudioEvent::UltimateTriggered { index });
        }
        ok
    }

    /// Buy one level of an in-run upgrade. False if refused; nothing changes then.
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        match self.upgrades.purchase(kind, self.run.currency) {
            Ok(cost) => {
                self.run.currency -= cost;
                self.apply_upgrade(kind);
                debug!(
                    "Bought {kind:?} level {} for {cost}",
                    self.upgrades.level_for(kind)
                );
                self.audio_events.push(AudioEvent::UpgradePurchased { kind });
                true
            }
            Err(reason) => {
                debug!("Upgrade {kind:?} refused: {reason}");
                false
            }
        }
    }

    /// Buy one level of a permanent upgrade and save. Takes effect next run.
    pub fn buy_permanent_upgrade(&mut self, kind: PermanentUpgradeKind) -> bool {
        match self.progress.purchase(kind) {
            Ok(cost) => {
                persistence::save_logged(self.store.as_mut(), &self.progress);
                debug!(
                    "Bought permanent {kind:?} level {} for {cost} XP",
                    self.progress.level(kind)
                );
                self.audio_events
                    .push(AudioEvent::PermanentUpgradePurchased { kind });
                true
            }
            Err(reason) => {
                debug!("Permanent upgrade {kind:?} refused: {reason}");
                false
            }
        }
    }

    /// Start a fresh run with the current permanent levels.
    /// Commands queued behind a reset still run, against the new run.
    pub fn reset_game(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.run = RunState::new(&self.progress);
        self.cannon = world_setup::build_cannon(&self.progress);
        self.upgrades = UpgradeLevels::default();
        systems::shield::clear(&mut self.shield);
        self.ultimates = world_setup::build_ultimates();
        self.effect = None;
        info!(
            "New run: {} currency, {} health, {} damage",
            self.run.currency, self.run.max_health, self.cannon.damage
        );
    }

    /// Current price of the next level of `kind`.
    pub fn upgrade_cost(&self, kind: UpgradeKind) -> u64 {
        self.upgrades.cost(kind)
    }

    /// Place an enemy directly, bypassing the spawner. Stats use the current wave.
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, position: Position) -> Entity {
        world_setup::spawn_enemy_at(&mut self.world, kind, self.run.wave, &self.dev, position)
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn cannon(&self) -> &Cannon {
        &self.cannon
    }

    pub fn upgrades(&self) -> &UpgradeLevels {
        &self.upgrades
    }

    pub fn shield(&self) -> &Shield {
        &self.shield
    }

    pub fn ultimates(&self) -> &[UltimateSlot] {
        &self.ultimates
    }

    pub fn effect(&self) -> Option<&UltimateEffect> {
        self.effect.as_ref()
    }

    pub fn progress(&self) -> &PermanentProgress {
        &self.progress
    }

    pub fn dev_params(&self) -> &DevParams {
        &self.dev
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable run counters for scripted test setups.
    #[cfg(test)]
    pub fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Refusals are dropped silently.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::ActivateShield => {
                self.activate_shield();
            }
            PlayerCommand::TriggerUltimate { index } => {
                self.trigger_ultimate(index);
            }
            PlayerCommand::BuyUpgrade { kind } => {
                self.buy_upgrade(kind);
            }
            PlayerCommand::BuyPermanentUpgrade { kind } => {
                self.buy_permanent_upgrade(kind);
            }
            PlayerCommand::ResetGame => {
                self.reset_game();
            }
            PlayerCommand::SetDevParams { params } => {
                self.dev = params.sanitized();
                debug!("Developer overrides: {:?}", self.dev);
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Recompute the cannon stat (or health) an upgrade level drives.
    fn apply_upgrade(&mut self, kind: UpgradeKind) {
        let level = self.upgrades.level_for(kind);
        match kind {
            UpgradeKind::Damage => {
                self.cannon.damage = damage_for_level(self.run.base_damage, level);
            }
            UpgradeKind::FireRate => self.cannon.fire_interval = fire_interval_for_level(level),
            UpgradeKind::Range => self.cannon.range = range_for_level(level),
            UpgradeKind::Explosive => self.cannon.explosive_level = level,
            UpgradeKind::Heal => self.run.heal(HEAL_AMOUNT),
            UpgradeKind::MultiShot => self.cannon.multishot = level,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        let now = self.time.elapsed_secs;

        // 1. Spawner
        systems::wave_spawner::run(&mut self.world, &mut self.rng, &mut self.run, &self.dev, dt);

        // 2. Enemy behaviour, escapes, cannon contact
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.run,
            &self.cannon,
            &self.dev,
            systems::ultimate::is_frozen(&self.effect),
            &mut self.audio_events,
            &mut self.despawn_buffer,
            dt,
        );

        let mut ledger = KillLedger {
            run: &mut self.run,
            rng: &mut self.rng,
            audio_events: &mut self.audio_events,
            split_on_ability_kill: self.config.split_on_ability_kill,
        };

        // 3. Weapon: bullet flight, hits, auto-fire
        systems::weapon::run(
            &mut self.world,
            &mut self.cannon,
            &self.dev,
            self.config.exclude_primary_from_splash,
            now,
            &mut ledger,
            &mut self.despawn_buffer,
            dt,
        );

        // 4. Shield
        systems::shield::run(&mut self.world, &mut self.shield, &mut ledger, dt);

        // 5. Ultimates
        systems::ultimate::tick_cooldowns(&mut self.ultimates, dt);
        systems::ultimate::run(&mut self.world, &mut self.effect, &self.cannon, &mut ledger, dt);

        // 6. Waves and game over
        let outcome = systems::waves::run(&self.world, &mut self.run, &mut self.audio_events);
        if outcome == WaveOutcome::GameOver {
            self.end_run();
        }
    }

    /// Stop combat and record the run. Force-clears the shield and any effect.
    fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        systems::shield::clear(&mut self.shield);
        self.effect = None;
        systems::waves::record_game_over(
            &mut self.run,
            &mut self.progress,
            self.store.as_mut(),
            &mut self.audio_events,
        );
    }
}
