//! Wave state machine: wave completion, rewards, and game-over detection.
//!
//! Runs last each tick, after every other system has settled the field.

use hecs::World;
use log::info;

use bulwark_campaign::persistence::{self, ProgressStore};
use bulwark_campaign::PermanentProgress;
use bulwark_core::components::Enemy;
use bulwark_core::events::AudioEvent;
use bulwark_core::state::WaveRewardView;

use crate::run_state::RunState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveOutcome {
    Continue,
    WaveCleared(WaveRewardView),
    GameOver,
}

pub fn enemies_alive(world: &World) -> bool {
    world.query::<&Enemy>().iter().next().is_some()
}

/// Decide this tick's wave transition. Death takes priority over a clear.
/// A clear resets the spawn counter, so re-checking cannot pay twice.
pub fn run(world: &World, run: &mut RunState, audio_events: &mut Vec<AudioEvent>) -> WaveOutcome {
    if run.health <= 0.0 {
        return WaveOutcome::GameOver;
    }
    if !run.quota_reached() || enemies_alive(world) {
        return WaveOutcome::Continue;
    }

    let reward = run.complete_wave();
    audio_events.push(AudioEvent::WaveComplete { wave: reward.wave });
    info!(
        "Wave {} cleared: {} kills, reward {} (+{} kill bonus, +{} survival bonus)",
        reward.wave, reward.kills, reward.base, reward.kill_bonus, reward.survival_bonus
    );
    WaveOutcome::WaveCleared(reward)
}

/// Fold the finished run into permanent progress and save it, once per run.
/// Returns false if this run was already recorded.
pub fn record_game_over(
    run: &mut RunState,
    progress: &mut PermanentProgress,
    store: &mut dyn ProgressStore,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    if run.game_over_recorded {
        return false;
    }
    run.game_over_recorded = true;
    let earned = progress.record_game(run.wave, run.kills);
    persistence::save_logged(store, progress);
    audio_events.push(AudioEvent::GameOver);
    info!(
        "Game over on wave {} with {} kills: earned {} XP ({} total)",
        run.wave, run.kills, earned, progress.experience_points
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulwark_campaign::MemoryStore;
    use bulwark_core::enums::EnemyKind;
    use bulwark_core::types::{DevParams, Position};

    use crate::world_setup;

    #[test]
    fn clear_pays_once() {
        let world = World::new();
        let mut run = RunState::new(&PermanentProgress::default());
        run.enemies_spawned = run.enemies_per_wave;
        run.wave_kills = 10;
        let mut audio = Vec::new();

        let outcome = super::run(&world, &mut run, &mut audio);
        let WaveOutcome::WaveCleared(reward) = outcome else {
            panic!("Expected WaveCleared, got {outcome:?}");
        };
        assert_eq!(reward.wave, 1);
        assert_eq!(run.wave, 2);
        assert_eq!(run.currency, 100 + 85 + 60);
        assert_eq!(run.enemies_spawned, 0);
        assert_eq!(run.enemies_per_wave, 12);

        assert_eq!(super::run(&world, &mut run, &mut audio), WaveOutcome::Continue);
        assert_eq!(run.currency, 245);
        assert_eq!(run.wave, 2);
    }

    #[test]
    fn live_enemy_blocks_clear() {
        let mut world = World::new();
        let mut run = RunState::new(&PermanentProgress::default());
        run.enemies_spawned = run.enemies_per_wave;
        world_setup::spawn_enemy_at(
            &mut world,
            EnemyKind::Normal,
            1,
            &DevParams::default(),
            Position::new(100.0, 100.0),
        );
        let mut audio = Vec::new();
        assert_eq!(super::run(&world, &mut run, &mut audio), WaveOutcome::Continue);
        assert_eq!(run.wave, 1);
    }

    #[test]
    fn survival_bonus_heals_capped() {
        let world = World::new();
        let mut run = RunState::new(&PermanentProgress::default());
        run.wave = 5;
        run.health = run.max_health - 10.0;
        run.enemies_spawned = run.enemies_per_wave;
        let mut audio = Vec::new();
        super::run(&world, &mut run, &mut audio);
        assert_eq!(run.health, run.max_health);
        assert_eq!(run.last_wave_reward.map(|r| r.survival_bonus), Some(250));
    }

    #[test]
    fn game_over_recorded_once() {
        let mut run = RunState::new(&PermanentProgress::default());
        run.wave = 3;
        run.kills = 12;
        run.health = 0.0;
        let mut progress = PermanentProgress::default();
        let handle = MemoryStore::new();
        let mut store = handle.clone();
        let mut audio = Vec::new();

        assert_eq!(
            super::run(&World::new(), &mut run, &mut audio),
            WaveOutcome::GameOver
        );
        assert!(record_game_over(&mut run, &mut progress, &mut store, &mut audio));
        assert!(!record_game_over(&mut run, &mut progress, &mut store, &mut audio));

        // 10*2 + 2*12 + 15
        assert_eq!(progress.experience_points, 59);
        assert_eq!(progress.total_games, 1);
        assert_eq!(progress.total_waves, 2);
        assert_eq!(progress.total_kills, 12);
        assert_eq!(handle.save_count(), 1);
        assert_eq!(audio, vec![AudioEvent::GameOver]);
    }
}
