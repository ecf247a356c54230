//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Commands
//! that fail validation (unaffordable, on cooldown) are dropped silently.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::DevParams;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Abilities ---
    /// Raise the defensive line.
    ActivateShield,
    /// Fire ultimate slot 0, 1 or 2.
    TriggerUltimate { index: usize },

    // --- Shop ---
    /// Buy one level of an in-run upgrade with currency.
    BuyUpgrade { kind: UpgradeKind },
    /// Buy one level of a permanent upgrade with experience.
    BuyPermanentUpgrade { kind: PermanentUpgradeKind },

    // --- Simulation control ---
    /// Start a fresh run with the current permanent levels.
    ResetGame,
    /// Replace the developer overrides.
    SetDevParams { params: DevParams },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
