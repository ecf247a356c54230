//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Straight descent.
    #[default]
    Normal,
    /// Quick and fragile, drifts and dashes.
    Fast,
    /// Sinusoidal lateral oscillation.
    Zigzag,
    /// Slow, armoured, worth a lot.
    Boss,
    /// Breaks into smaller splitters when shot down.
    Splitter,
}

impl EnemyKind {
    /// Selection order used by the weighted spawner draw.
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Zigzag,
        EnemyKind::Boss,
        EnemyKind::Splitter,
    ];
}

/// In-run upgrades bought with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    Damage,
    FireRate,
    Range,
    Explosive,
    Heal,
    MultiShot,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Damage,
        UpgradeKind::FireRate,
        UpgradeKind::Range,
        UpgradeKind::Explosive,
        UpgradeKind::Heal,
        UpgradeKind::MultiShot,
    ];
}

/// Cross-run upgrades bought with experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermanentUpgradeKind {
    BulletSize,
    StartingDamage,
    StartingMoney,
    StartingHealth,
    BulletSpeed,
}

impl PermanentUpgradeKind {
    pub const ALL: [PermanentUpgradeKind; 5] = [
        PermanentUpgradeKind::BulletSize,
        PermanentUpgradeKind::StartingDamage,
        PermanentUpgradeKind::StartingMoney,
        PermanentUpgradeKind::StartingHealth,
        PermanentUpgradeKind::BulletSpeed,
    ];
}

/// The three ultimate abilities, by slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UltimateKind {
    /// Slot 0: staggered falling missiles that burst on landing.
    NuclearStorm,
    /// Slot 1: halts enemy motion and burns every enemy a little each tick.
    TimeFreeze,
    /// Slot 2: staggered strike sites that charge, then burst.
    OrbitalStrike,
}

impl UltimateKind {
    pub const ALL: [UltimateKind; 3] = [
        UltimateKind::NuclearStorm,
        UltimateKind::TimeFreeze,
        UltimateKind::OrbitalStrike,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            UltimateKind::NuclearStorm => 0,
            UltimateKind::TimeFreeze => 1,
            UltimateKind::OrbitalStrike => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UltimateKind::NuclearStorm => "Nuclear Storm",
            UltimateKind::TimeFreeze => "Time Freeze",
            UltimateKind::OrbitalStrike => "Orbital Strike",
        }
    }
}

/// Shield lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldPhase {
    #[default]
    Ready,
    Active,
    Cooldown,
}

/// Orbital strike site lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikePhase {
    Charging,
    Impact,
}

/// What dealt the killing blow. Decides whether a splitter may split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSource {
    /// Direct bullet hit or explosive splash.
    Weapon,
    Shield,
    Ultimate(UltimateKind),
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}
