//! Cross-run progression: experience, lifetime counters, permanent upgrades.

use serde::{Deserialize, Serialize};

use bulwark_core::constants::*;
use bulwark_core::enums::PermanentUpgradeKind;

use crate::economy::experience_earned;

/// (base cost, max level) per permanent upgrade.
pub fn permanent_table(kind: PermanentUpgradeKind) -> (f64, u32) {
    match kind {
        PermanentUpgradeKind::BulletSize => (50.0, 10),
        PermanentUpgradeKind::StartingDamage => (75.0, 15),
        PermanentUpgradeKind::StartingMoney => (100.0, 12),
        PermanentUpgradeKind::StartingHealth => (125.0, 8),
        PermanentUpgradeKind::BulletSpeed => (60.0, 10),
    }
}

pub fn permanent_max_level(kind: PermanentUpgradeKind) -> u32 {
    permanent_table(kind).1
}

/// Experience price of the next level: floor(base * 1.8^level).
pub fn permanent_upgrade_cost(kind: PermanentUpgradeKind, level: u32) -> u64 {
    let (base, _) = permanent_table(kind);
    (base * PERMANENT_COST_GROWTH.powf(level as f64)).floor() as u64
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermanentLevels {
    pub bullet_size: u32,
    pub starting_damage: u32,
    pub starting_money: u32,
    pub starting_health: u32,
    pub bullet_speed: u32,
}

impl PermanentLevels {
    pub fn level_for(&self, kind: PermanentUpgradeKind) -> u32 {
        match kind {
            PermanentUpgradeKind::BulletSize => self.bullet_size,
            PermanentUpgradeKind::StartingDamage => self.starting_damage,
            PermanentUpgradeKind::StartingMoney => self.starting_money,
            PermanentUpgradeKind::StartingHealth => self.starting_health,
            PermanentUpgradeKind::BulletSpeed => self.bullet_speed,
        }
    }

    pub fn set_level(&mut self, kind: PermanentUpgradeKind, level: u32) {
        match kind {
            PermanentUpgradeKind::BulletSize => self.bullet_size = level,
            PermanentUpgradeKind::StartingDamage => self.starting_damage = level,
            PermanentUpgradeKind::StartingMoney => self.starting_money = level,
            PermanentUpgradeKind::StartingHealth => self.starting_health = level,
            PermanentUpgradeKind::BulletSpeed => self.bullet_speed = level,
        }
    }
}

/// The one record that outlives a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermanentProgress {
    pub total_kills: u64,
    pub total_waves: u64,
    pub total_games: u64,
    pub experience_points: u64,
    pub upgrades: PermanentLevels,
}

impl PermanentProgress {
    /// Clamp every level to its type's max. Applied to anything read from storage.
    pub fn sanitized(mut self) -> Self {
        for kind in PermanentUpgradeKind::ALL {
            let level = self.upgrades.level_for(kind).min(permanent_max_level(kind));
            self.upgrades.set_level(kind, level);
        }
        self
    }

    pub fn level(&self, kind: PermanentUpgradeKind) -> u32 {
        self.upgrades.level_for(kind)
    }

    pub fn cost(&self, kind: PermanentUpgradeKind) -> u64 {
        permanent_upgrade_cost(kind, self.level(kind))
    }

    pub fn can_purchase(&self, kind: PermanentUpgradeKind) -> bool {
        self.level(kind) < permanent_max_level(kind) && self.experience_points >= self.cost(kind)
    }

    /// Spend experience on one level. Returns the cost, or why it was refused.
    pub fn purchase(&mut self, kind: PermanentUpgradeKind) -> Result<u64, String> {
        let level = self.level(kind);
        if level >= permanent_max_level(kind) {
            return Err(format!("{kind:?} already at max level"));
        }
        let cost = self.cost(kind);
        if self.experience_points < cost {
            return Err(format!(
                "Insufficient experience: have {}, need {cost}",
                self.experience_points
            ));
        }
        self.experience_points -= cost;
        self.upgrades.set_level(kind, level + 1);
        Ok(cost)
    }

    /// Fold a finished run into the lifetime totals. Returns experience earned.
    pub fn record_game(&mut self, wave: u32, kills: u32) -> u64 {
        let earned = experience_earned(wave, kills);
        self.experience_points += earned;
        self.total_games += 1;
        self.total_waves += wave.saturating_sub(1) as u64;
        self.total_kills += kills as u64;
        earned
    }

    // --- Starting stats for the next run ---

    pub fn starting_currency(&self) -> u64 {
        STARTING_CURRENCY + PERM_MONEY_STEP * self.upgrades.starting_money as u64
    }

    pub fn starting_max_health(&self) -> f64 {
        STARTING_HEALTH + PERM_HEALTH_STEP * self.upgrades.starting_health as f64
    }

    pub fn base_damage(&self) -> f64 {
        CANNON_BASE_DAMAGE + PERM_DAMAGE_STEP * self.upgrades.starting_damage as f64
    }

    pub fn bullet_radius(&self) -> f64 {
        BULLET_BASE_RADIUS * (1.0 + PERM_BULLET_SIZE_STEP * self.upgrades.bullet_size as f64)
    }

    pub fn bullet_speed(&self) -> f64 {
        (BULLET_BASE_SPEED_LEVEL + self.upgrades.bullet_speed as f64) * BULLET_SPEED_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_table() {
        assert_eq!(permanent_upgrade_cost(PermanentUpgradeKind::BulletSize, 0), 50);
        assert_eq!(permanent_upgrade_cost(PermanentUpgradeKind::BulletSize, 1), 90);
        assert_eq!(permanent_upgrade_cost(PermanentUpgradeKind::StartingDamage, 1), 135);
        assert_eq!(permanent_upgrade_cost(PermanentUpgradeKind::StartingHealth, 0), 125);
        assert_eq!(permanent_upgrade_cost(PermanentUpgradeKind::BulletSpeed, 1), 108);
    }

    #[test]
    fn purchase_with_exact_experience() {
        let mut p = PermanentProgress {
            experience_points: 100,
            ..Default::default()
        };
        let cost = p.purchase(PermanentUpgradeKind::StartingMoney).unwrap();
        assert_eq!(cost, 100);
        assert_eq!(p.experience_points, 0);
        assert_eq!(p.upgrades.starting_money, 1);
    }

    #[test]
    fn purchase_refused_at_max() {
        let mut p = PermanentProgress {
            experience_points: u64::MAX / 2,
            ..Default::default()
        };
        p.upgrades.starting_health = 8;
        let before = p.clone();
        assert!(!p.can_purchase(PermanentUpgradeKind::StartingHealth));
        assert!(p.purchase(PermanentUpgradeKind::StartingHealth).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn purchase_refused_when_short() {
        let mut p = PermanentProgress {
            experience_points: 49,
            ..Default::default()
        };
        assert!(p.purchase(PermanentUpgradeKind::BulletSize).is_err());
        assert_eq!(p.experience_points, 49);
        assert_eq!(p.upgrades.bullet_size, 0);
    }

    #[test]
    fn sanitize_clamps_levels() {
        let mut p = PermanentProgress::default();
        p.upgrades.bullet_speed = 99;
        p.upgrades.starting_damage = 3;
        let p = p.sanitized();
        assert_eq!(p.upgrades.bullet_speed, 10);
        assert_eq!(p.upgrades.starting_damage, 3);
    }

    #[test]
    fn record_game_totals() {
        let mut p = PermanentProgress::default();
        let earned = p.record_game(5, 30);
        assert_eq!(earned, 125);
        assert_eq!(p.experience_points, 125);
        assert_eq!(p.total_games, 1);
        assert_eq!(p.total_waves, 4);
        assert_eq!(p.total_kills, 30);
    }

    #[test]
    fn starting_stats_scale() {
        let mut p = PermanentProgress::default();
        assert_eq!(p.starting_currency(), 100);
        assert_eq!(p.starting_max_health(), 200.0);
        assert_eq!(p.base_damage(), 20.0);
        assert_eq!(p.bullet_radius(), 3.0);
        assert_eq!(p.bullet_speed(), 480.0);

        p.upgrades = PermanentLevels {
            bullet_size: 2,
            starting_damage: 2,
            starting_money: 1,
            starting_health: 4,
            bullet_speed: 2,
        };
        assert_eq!(p.starting_currency(), 150);
        assert_eq!(p.starting_max_health(), 300.0);
        assert_eq!(p.base_damage(), 30.0);
        assert!((p.bullet_radius() - 4.8).abs() < 1e-12);
        assert_eq!(p.bullet_speed(), 600.0);
    }

    #[test]
    fn persisted_field_names() {
        let json = serde_json::to_string(&PermanentProgress::default()).unwrap();
        assert!(json.contains("\"experiencePoints\""));
        assert!(json.contains("\"bulletSize\""));
        let back: PermanentProgress = serde_json::from_str(r#"{"totalKills":7}"#).unwrap();
        assert_eq!(back.total_kills, 7);
        assert_eq!(back.upgrades, PermanentLevels::default());
    }
}
