//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only)
//! plus whatever engine-owned records they touch. Engine order per tick:
//! spawner, enemy behaviour, weapon, shield, ultimates, waves.

pub mod collision;
pub mod damage;
pub mod enemy_ai;
pub mod movement;
pub mod shield;
pub mod snapshot;
pub mod ultimate;
pub mod wave_spawner;
pub mod waves;
pub mod weapon;
