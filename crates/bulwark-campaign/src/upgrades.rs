use serde::{Deserialize, Serialize};

use bulwark_core::constants::*;
use bulwark_core::enums::UpgradeKind;

/// Pricing parameters for one upgrade type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradePricing {
    pub initial_level: u32,
    pub base_cost: f64,
    pub growth: f64,
    /// Cost exponent is `level - exponent_offset`.
    pub exponent_offset: u32,
}

pub fn pricing(kind: UpgradeKind) -> UpgradePricing {
    let (initial_level, base_cost, growth, exponent_offset) = match kind {
        UpgradeKind::Damage => (1, 50.0, 1.4, 1),
        UpgradeKind::FireRate => (1, 75.0, 1.4, 1),
        UpgradeKind::Range => (1, 100.0, 1.4, 1),
        UpgradeKind::Explosive => (0, 200.0, 1.4, 0),
        UpgradeKind::MultiShot => (1, 100.0, 2.0, 1),
        UpgradeKind::Heal => (0, 1.0, 1.5, 0),
    };
    UpgradePricing {
        initial_level,
        base_cost,
        growth,
        exponent_offset,
    }
}

/// Price of the next level of `kind` when currently at `level`.
/// Pure: same inputs always give the same cost.
pub fn upgrade_cost(kind: UpgradeKind, level: u32) -> u64 {
    let p = pricing(kind);
    let exponent = level.saturating_sub(p.exponent_offset) as f64;
    (p.base_cost * p.growth.powf(exponent)).ceil() as u64
}

/// Cannon damage at an upgrade level, on top of the run's base damage.
pub fn damage_for_level(base_damage: f64, level: u32) -> f64 {
    base_damage + DAMAGE_PER_LEVEL * level.saturating_sub(1) as f64
}

pub fn fire_interval_for_level(level: u32) -> f64 {
    (CANNON_BASE_FIRE_INTERVAL - FIRE_INTERVAL_STEP * level.saturating_sub(1) as f64)
        .max(CANNON_MIN_FIRE_INTERVAL)
}

pub fn range_for_level(level: u32) -> f64 {
    CANNON_BASE_RANGE + RANGE_PER_LEVEL * level.saturating_sub(1) as f64
}

/// In-run upgrade levels. Reset at the start of every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub damage: u32,
    pub fire_rate: u32,
    pub range: u32,
    pub explosive: u32,
    pub heal: u32,
    pub multishot: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            damage: pricing(UpgradeKind::Damage).initial_level,
            fire_rate: pricing(UpgradeKind::FireRate).initial_level,
            range: pricing(UpgradeKind::Range).initial_level,
            explosive: pricing(UpgradeKind::Explosive).initial_level,
            heal: pricing(UpgradeKind::Heal).initial_level,
            multishot: pricing(UpgradeKind::MultiShot).initial_level,
        }
    }
}

impl UpgradeLevels {
    pub fn level_for(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Damage => self.damage,
            UpgradeKind::FireRate => self.fire_rate,
            UpgradeKind::Range => self.range,
            UpgradeKind::Explosive => self.explosive,
            UpgradeKind::Heal => self.heal,
            UpgradeKind::MultiShot => self.multishot,
        }
    }

    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        match kind {
            UpgradeKind::Damage => self.damage = level,
            UpgradeKind::FireRate => self.fire_rate = level,
            UpgradeKind::Range => self.range = level,
            UpgradeKind::Explosive => self.explosive = level,
            UpgradeKind::Heal => self.heal = level,
            UpgradeKind::MultiShot => self.multishot = level,
        }
    }

    pub fn cost(&self, kind: UpgradeKind) -> u64 {
        upgrade_cost(kind, self.level_for(kind))
    }

    /// Whether another level of `kind` may be bought at all, ignoring price.
    pub fn purchasable(&self, kind: UpgradeKind) -> bool {
        match kind {
            UpgradeKind::Range => self.range < RANGE_MAX_LEVEL,
            _ => true,
        }
    }

    /// Buy one level. Returns the cost to deduct, or why the purchase was refused.
    /// Levels are untouched on refusal.
    pub fn purchase(&mut self, kind: UpgradeKind, currency: u64) -> Result<u64, String> {
        if !self.purchasable(kind) {
            return Err(format!("{kind:?} already at max level"));
        }
        let cost = self.cost(kind);
        if currency < cost {
            return Err(format!(
                "Insufficient currency: have {currency}, need {cost}"
            ));
        }
        let level = self.level_for(kind);
        self.set_level(kind, level + 1);
        Ok(cost)
    }
}
