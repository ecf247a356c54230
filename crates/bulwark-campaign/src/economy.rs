//! Wave pacing and reward formulas.
//!
//! All functions are keyed on the wave number `c` that was just completed.

use bulwark_core::constants::*;

/// Currency breakdown paid when a wave is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveReward {
    pub base: u64,
    pub kill_bonus: u64,
    /// Non-zero on every fifth wave.
    pub survival_bonus: u64,
    /// Health restored alongside the survival bonus.
    pub survival_heal: f64,
}

impl WaveReward {
    pub fn total(&self) -> u64 {
        self.base + self.kill_bonus + self.survival_bonus
    }
}

/// Reward for clearing wave `completed` with `wave_kills` kills during it.
/// base = floor(50 + 25c + 10c^1.5), bonus = kills * (5 + c).
pub fn wave_reward(completed: u32, wave_kills: u32) -> WaveReward {
    let c = completed as f64;
    let base = (50.0 + 25.0 * c + 10.0 * c.powf(1.5)).floor() as u64;
    let kill_bonus = wave_kills as u64 * (5 + completed as u64);
    let (survival_bonus, survival_heal) =
        if completed > 0 && completed % SURVIVAL_BONUS_EVERY == 0 {
            (50 * completed as u64, SURVIVAL_BONUS_HEAL)
        } else {
            (0, 0.0)
        };
    WaveReward {
        base,
        kill_bonus,
        survival_bonus,
        survival_heal,
    }
}

/// Spawn quota for the wave after `completed`.
pub fn enemies_per_wave(completed: u32) -> u32 {
    (FIRST_WAVE_QUOTA + 2 * completed).min(MAX_WAVE_QUOTA)
}

/// Seconds between spawns for the wave after `completed`.
pub fn spawn_delay(completed: u32) -> f64 {
    (FIRST_WAVE_SPAWN_DELAY - 0.03 * (completed + 1) as f64).max(MIN_SPAWN_DELAY)
}

/// Experience earned by a run that ended on `wave` with `kills` kills.
pub fn experience_earned(wave: u32, kills: u32) -> u64 {
    let wave = wave as u64;
    10 * wave.saturating_sub(1) + 2 * kills as u64 + (5 * wave).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_wave_reward() {
        let r = wave_reward(1, 10);
        // floor(50 + 25 + 10) = 85, 10 kills * 6
        assert_eq!(r.base, 85);
        assert_eq!(r.kill_bonus, 60);
        assert_eq!(r.survival_bonus, 0);
        assert_eq!(r.total(), 145);
    }

    #[test]
    fn fifth_wave_survival_bonus() {
        let r = wave_reward(5, 0);
        assert_eq!(r.base, 286);
        assert_eq!(r.survival_bonus, 250);
        assert_eq!(r.survival_heal, SURVIVAL_BONUS_HEAL);

        let r = wave_reward(6, 0);
        assert_eq!(r.survival_bonus, 0);
        assert_eq!(r.survival_heal, 0.0);
    }

    #[test]
    fn reward_monotonic_in_wave() {
        let mut prev = 0;
        for c in 1..50 {
            let base = wave_reward(c, 0).base;
            assert!(base > prev, "wave {c} base {base} <= {prev}");
            prev = base;
        }
    }

    #[test]
    fn quota_grows_then_caps() {
        assert_eq!(enemies_per_wave(0), FIRST_WAVE_QUOTA);
        assert_eq!(enemies_per_wave(1), 12);
        assert_eq!(enemies_per_wave(15), 40);
        assert_eq!(enemies_per_wave(100), MAX_WAVE_QUOTA);
    }

    #[test]
    fn spawn_delay_shrinks_then_floors() {
        assert!((spawn_delay(1) - 0.94).abs() < 1e-12);
        assert!(spawn_delay(10) < spawn_delay(1));
        assert_eq!(spawn_delay(100), MIN_SPAWN_DELAY);
    }

    #[test]
    fn experience_formula() {
        // Died on wave 1 with no kills: just the wave-reached bonus.
        assert_eq!(experience_earned(1, 0), 5);
        // 10*4 + 2*30 + 25
        assert_eq!(experience_earned(5, 30), 125);
        // Wave bonus caps at 100.
        assert_eq!(experience_earned(40, 0), 390 + 100);
    }
}
