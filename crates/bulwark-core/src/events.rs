//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Cannon volley fired.
    Shoot,
    /// Bullet struck an enemy without killing it.
    Hit,
    /// Enemy destroyed by weapon fire or an area burst landed.
    Explosion,
    ShieldActivated,
    /// Shield destroyed an enemy.
    ShieldImpact,
    UltimateTriggered { index: usize },
    /// Enemy destroyed by an ultimate effect.
    UltimateKill { index: usize },
    UpgradePurchased { kind: UpgradeKind },
    PermanentUpgradePurchased { kind: PermanentUpgradeKind },
    /// `wave` is the wave that was just cleared.
    WaveComplete { wave: u32 },
    EnemyEscaped,
    GameOver,
}
