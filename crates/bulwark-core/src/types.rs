//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the play field. y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        DVec2::from(*self).distance(DVec2::from(*other))
    }

    /// Angle from this position toward another (radians, atan2 convention).
    pub fn angle_to(&self, other: &Position) -> f64 {
        let d = DVec2::from(*other) - DVec2::from(*self);
        d.y.atan2(d.x)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of the given magnitude pointing along `angle`.
    pub fn from_angle(angle: f64, speed: f64) -> Self {
        (DVec2::from_angle(angle) * speed).into()
    }

    pub fn speed(&self) -> f64 {
        DVec2::from(*self).length()
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

impl From<Velocity> for DVec2 {
    fn from(v: Velocity) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Velocity::new(v.x, v.y)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Developer overrides. Multipliers default to 1.0, flags to off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevParams {
    pub enemy_speed_multiplier: f64,
    pub enemy_health_multiplier: f64,
    /// Scales kill rewards.
    pub money_multiplier: f64,
    pub player_damage_multiplier: f64,
    /// Escapes and cannon contact cost no health.
    pub god_mode: bool,
    /// Shield and ultimates ignore their cooldowns.
    pub no_cooldowns: bool,
    /// Currency is pinned at the start of every tick.
    pub infinite_money: bool,
    /// Any weapon hit zeroes the target's health.
    pub one_hit_kill: bool,
    /// The spawner stays idle.
    pub no_enemy_spawn: bool,
}

impl DevParams {
    /// Clamp multipliers into a usable range. Enemy health, enemy speed and
    /// player damage stay positive; the money multiplier may be zero. NaN
    /// falls to the floor.
    pub fn sanitized(mut self) -> Self {
        let floor = crate::constants::MIN_DEV_MULTIPLIER;
        self.enemy_speed_multiplier = self.enemy_speed_multiplier.max(floor);
        self.enemy_health_multiplier = self.enemy_health_multiplier.max(floor);
        self.player_damage_multiplier = self.player_damage_multiplier.max(floor);
        self.money_multiplier = self.money_multiplier.max(0.0);
        self
    }
}

impl Default for DevParams {
    fn default() -> Self {
        Self {
            enemy_speed_multiplier: 1.0,
            enemy_health_multiplier: 1.0,
            money_multiplier: 1.0,
            player_damage_multiplier: 1.0,
            god_mode: false,
            no_cooldowns: false,
            infinite_money: false,
            one_hit_kill: false,
            no_enemy_spawn: false,
        }
    }
}
