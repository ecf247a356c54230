//! Simulation constants and tuning parameters.
//!
//! Distances are in field units (one unit = one canvas pixel), times in
//! seconds, speeds in units per second.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Play field ---

/// Field width. x grows to the right.
pub const FIELD_WIDTH: f64 = 800.0;

/// Field height. y grows downward; enemies descend toward the cannon.
pub const FIELD_HEIGHT: f64 = 600.0;

/// Spawn row above the visible field.
pub const SPAWN_Y: f64 = -30.0;

/// Horizontal margin kept free at both sides when picking a spawn column.
pub const SPAWN_MARGIN_X: f64 = 50.0;

/// Enemies below this line have escaped.
pub const ESCAPE_Y: f64 = FIELD_HEIGHT + 50.0;

/// Health lost when an enemy escapes.
pub const ESCAPE_DAMAGE: f64 = 10.0;

// --- Cannon ---

pub const CANNON_X: f64 = FIELD_WIDTH / 2.0;
pub const CANNON_Y: f64 = FIELD_HEIGHT - 50.0;

/// Collision radius of the cannon body.
pub const CANNON_RADIUS: f64 = 20.0;

/// Health lost when an enemy rams the cannon.
pub const CANNON_CONTACT_DAMAGE: f64 = 20.0;

pub const CANNON_BASE_DAMAGE: f64 = 20.0;
pub const CANNON_BASE_FIRE_INTERVAL: f64 = 0.5;
pub const CANNON_MIN_FIRE_INTERVAL: f64 = 0.1;
pub const CANNON_BASE_RANGE: f64 = 300.0;

/// Bullet radius before the permanent size multiplier.
pub const BULLET_BASE_RADIUS: f64 = 3.0;

/// Bullet speed per permanent speed level (8 px/frame at 60 Hz).
pub const BULLET_SPEED_STEP: f64 = 60.0;
pub const BULLET_BASE_SPEED_LEVEL: f64 = 8.0;

/// Total fan width of a multishot volley (radians), divided by shot count.
pub const MULTISHOT_SPREAD: f64 = 0.3;

/// Fraction of bullet damage dealt by explosive splash.
pub const SPLASH_DAMAGE_FRACTION: f64 = 0.5;
pub const SPLASH_BASE_RADIUS: f64 = 50.0;
pub const SPLASH_RADIUS_PER_LEVEL: f64 = 20.0;

// --- Run start ---

pub const STARTING_CURRENCY: u64 = 100;
pub const STARTING_HEALTH: f64 = 200.0;

/// Currency pinned by the infinite-money developer flag.
pub const INFINITE_CURRENCY: u64 = 999_999;

/// Floor for the enemy and player-damage developer multipliers.
pub const MIN_DEV_MULTIPLIER: f64 = 0.01;

// --- Enemies ---

pub const ENEMY_BASE_HEALTH: f64 = 25.0;
pub const ENEMY_HEALTH_PER_WAVE: f64 = 5.0;
pub const ENEMY_BASE_SPEED: f64 = 60.0;
pub const ENEMY_SPEED_PER_WAVE: f64 = 6.0;
pub const ENEMY_BASE_REWARD: f64 = 10.0;
pub const ENEMY_REWARD_PER_WAVE: f64 = 2.0;

/// Zigzag phase advance per tick.
pub const ZIGZAG_PHASE_STEP: f64 = 0.15;
pub const ZIGZAG_AMPLITUDE: f64 = 50.0;

/// Lateral drift of fast enemies: amplitude * sin(y * frequency).
pub const FAST_DRIFT_AMPLITUDE: f64 = 10.0;
pub const FAST_DRIFT_FREQUENCY: f64 = 0.01;
pub const FAST_DASH_MULTIPLIER: f64 = 2.5;
pub const FAST_HYPER_DASH_MULTIPLIER: f64 = 4.0;

/// Waves above this use the hyper dash multiplier.
pub const FAST_HYPER_WAVE: u32 = 10;

pub const SPLITTER_SPIN_STEP: f64 = 0.08;
pub const SPLITTER_WOBBLE_AMPLITUDE: f64 = 15.0;
pub const SPLITTER_WOBBLE_FREQUENCY: f64 = 0.02;
pub const SPLITTER_MAX_SPLITS: u8 = 3;
pub const SPLITTER_MAX_CHILDREN: u32 = 4;
pub const SPLIT_RING_RADIUS: f64 = 20.0;
pub const SPLIT_HEALTH_FRACTION: f64 = 0.3;
pub const SPLIT_SPEED_FACTOR: f64 = 1.5;
pub const SPLIT_REWARD_FRACTION: f64 = 0.3;
pub const SPLIT_CHILD_RADIUS: f64 = 10.0;

/// Bosses regenerate only past this wave.
pub const BOSS_REGEN_WAVE: u32 = 15;
pub const BOSS_REGEN_INTERVAL: f64 = 2.0;

// --- Waves ---

pub const FIRST_WAVE_QUOTA: u32 = 10;
pub const MAX_WAVE_QUOTA: u32 = 40;
pub const FIRST_WAVE_SPAWN_DELAY: f64 = 1.0;
pub const MIN_SPAWN_DELAY: f64 = 0.3;

/// Every Nth completed wave pays a survival bonus.
pub const SURVIVAL_BONUS_EVERY: u32 = 5;
pub const SURVIVAL_BONUS_HEAL: f64 = 50.0;

// --- Shield ---

/// The shield is a horizontal line across the whole field.
pub const SHIELD_Y: f64 = FIELD_HEIGHT - 150.0;
pub const SHIELD_THICKNESS: f64 = 5.0;
pub const SHIELD_BASE_DURATION: f64 = 3.0;
pub const SHIELD_DURATION_PER_WAVE: f64 = 0.5;
pub const SHIELD_MAX_WAVE_BONUS: f64 = 10.0;
pub const SHIELD_COOLDOWN: f64 = 8.0;

// --- Ultimates ---

pub const ULTIMATE_COUNT: usize = 3;

/// Area burst shared by bombardment missiles and orbital strikes.
pub const BURST_RADIUS: f64 = 120.0;
pub const BURST_DAMAGE: f64 = 200.0;

pub const NUKE_COOLDOWN: f64 = 15.0;
pub const NUKE_DURATION: f64 = 5.0;
pub const NUKE_MISSILE_COUNT: u32 = 10;
pub const NUKE_RELEASE_INTERVAL: f64 = 0.2;
pub const NUKE_SPAWN_Y: f64 = -50.0;
pub const NUKE_MIN_FUSE_TICKS: u32 = 60;
pub const NUKE_MAX_FUSE_TICKS: u32 = 180;

pub const FREEZE_COOLDOWN: f64 = 18.0;
pub const FREEZE_DURATION: f64 = 4.0;

/// Damage dealt to every enemy on each frozen tick.
pub const FREEZE_TICK_DAMAGE: f64 = 2.0;

pub const STRIKE_COOLDOWN: f64 = 20.0;
pub const STRIKE_DURATION: f64 = 6.0;
pub const STRIKE_SITE_COUNT: u32 = 5;
pub const STRIKE_RELEASE_INTERVAL: f64 = 0.8;
pub const STRIKE_CHARGE_TIME: f64 = 1.0;
pub const STRIKE_MIN_Y: f64 = 100.0;
pub const STRIKE_MAX_Y: f64 = FIELD_HEIGHT - 100.0;

// --- Upgrades ---

/// Range cannot be bought past this level.
pub const RANGE_MAX_LEVEL: u32 = 9;
pub const DAMAGE_PER_LEVEL: f64 = 15.0;
pub const FIRE_INTERVAL_STEP: f64 = 0.04;
pub const RANGE_PER_LEVEL: f64 = 35.0;
pub const HEAL_AMOUNT: f64 = 20.0;

// --- Permanent upgrades ---

pub const PERMANENT_COST_GROWTH: f64 = 1.8;
pub const PERM_DAMAGE_STEP: f64 = 5.0;
pub const PERM_MONEY_STEP: u64 = 50;
pub const PERM_HEALTH_STEP: f64 = 25.0;
pub const PERM_BULLET_SIZE_STEP: f64 = 0.3;
