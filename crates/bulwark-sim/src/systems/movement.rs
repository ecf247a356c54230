//! Kinematic integration for projectiles.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Enemies carry no Velocity; their motion lives in the enemy behaviour system.

use hecs::{Entity, World};

use bulwark_core::components::Bullet;
use bulwark_core::types::{Position, Velocity};

use crate::systems::collision;

/// Integrate every entity with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}

/// Despawn bullets that have left the field.
pub fn cull_bullets(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, (_bullet, pos)) in world.query_mut::<(&Bullet, &Position)>() {
        if collision::out_of_field(*pos) {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_move_and_leave() {
        let mut world = World::new();
        let bullet = Bullet {
            damage: 20.0,
            radius: 3.0,
            explosive_level: 0,
        };
        let e = world.spawn((bullet, Position::new(400.0, 5.0), Velocity::new(0.0, -480.0)));
        run(&mut world, 1.0 / 60.0);
        let y = world.get::<&Position>(e).unwrap().y;
        assert!((y - -3.0).abs() < 1e-9);

        let mut buf = Vec::new();
        cull_bullets(&mut world, &mut buf);
        assert!(!world.contains(e));
    }
}
