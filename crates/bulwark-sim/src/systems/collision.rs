//! Geometric intersection tests shared by weapon, shield and ultimates.

use glam::DVec2;
use hecs::{Entity, World};

use bulwark_core::components::{Enemy, EnemyMotion};
use bulwark_core::constants::*;
use bulwark_core::types::Position;

/// Strict circle overlap.
pub fn circles_overlap(a: Position, ra: f64, b: Position, rb: f64) -> bool {
    DVec2::from(a).distance(DVec2::from(b)) < ra + rb
}

/// Point-in-burst test: strictly inside `radius` of `center`.
pub fn within_radius(center: Position, radius: f64, point: Position) -> bool {
    DVec2::from(center).distance(DVec2::from(point)) < radius
}

/// Whether an enemy circle moving from `prev_y` to `y` this tick touched
/// the shield band anywhere along the way.
pub fn sweeps_shield(prev_y: f64, y: f64, radius: f64) -> bool {
    let top = prev_y.min(y) - radius;
    let bottom = prev_y.max(y) + radius;
    bottom >= SHIELD_Y && top <= SHIELD_Y + SHIELD_THICKNESS
}

/// Outside the visible field (bullet cull rule).
pub fn out_of_field(p: Position) -> bool {
    p.x < 0.0 || p.x > FIELD_WIDTH || p.y < 0.0 || p.y > FIELD_HEIGHT
}

/// First enemy in query order overlapping a circle. One linear scan.
pub fn first_enemy_hit(world: &World, at: Position, radius: f64) -> Option<Entity> {
    world
        .query::<(&Enemy, &Position)>()
        .iter()
        .find(|(_, (enemy, pos))| circles_overlap(at, radius, **pos, enemy.radius))
        .map(|(entity, _)| entity)
}

/// All enemies strictly inside a burst, in query order.
pub fn enemies_within(
    world: &World,
    center: Position,
    radius: f64,
    exclude: Option<Entity>,
) -> Vec<Entity> {
    world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(entity, (_, pos))| {
            Some(*entity) != exclude && within_radius(center, radius, **pos)
        })
        .map(|(entity, _)| entity)
        .collect()
}

/// Enemies that touched the shield band during this tick's move.
pub fn enemies_on_shield(world: &World) -> Vec<Entity> {
    world
        .query::<(&Enemy, &EnemyMotion, &Position)>()
        .iter()
        .filter(|(_, (enemy, motion, pos))| {
            sweeps_shield(motion.prev_y, pos.y, enemy.radius)
        })
        .map(|(entity, _)| entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Position::new(0.0, 0.0);
        assert!(circles_overlap(a, 3.0, Position::new(17.9, 0.0), 15.0));
        assert!(!circles_overlap(a, 3.0, Position::new(18.0, 0.0), 15.0));
    }

    #[test]
    fn burst_radius_is_strict() {
        let c = Position::new(100.0, 100.0);
        assert!(within_radius(c, 120.0, Position::new(100.0, 219.0)));
        assert!(!within_radius(c, 120.0, Position::new(100.0, 220.0)));
    }

    #[test]
    fn shield_band() {
        let touches = |y: f64| sweeps_shield(y, y, 15.0);
        assert!(touches(SHIELD_Y));
        assert!(touches(SHIELD_Y - 15.0));
        assert!(!touches(SHIELD_Y - 16.0));
        assert!(touches(SHIELD_Y + SHIELD_THICKNESS + 15.0));
        assert!(!touches(SHIELD_Y + SHIELD_THICKNESS + 16.0));
    }

    #[test]
    fn shield_band_is_swept() {
        // A 32-unit step jumps clean over a 29-unit band.
        let (from, to) = (SHIELD_Y - 13.0, SHIELD_Y + 19.0);
        assert!(!sweeps_shield(from, from, 12.0));
        assert!(!sweeps_shield(to, to, 12.0));
        assert!(sweeps_shield(from, to, 12.0));
        // Already past the band and moving away.
        assert!(!sweeps_shield(SHIELD_Y + 40.0, SHIELD_Y + 41.1, 15.0));
    }

    #[test]
    fn field_bounds() {
        assert!(!out_of_field(Position::new(0.0, 0.0)));
        assert!(!out_of_field(Position::new(FIELD_WIDTH, FIELD_HEIGHT)));
        assert!(out_of_field(Position::new(-0.1, 10.0)));
        assert!(out_of_field(Position::new(10.0, -0.1)));
        assert!(out_of_field(Position::new(10.0, FIELD_HEIGHT + 0.1)));
    }
}
