//! Simulation engine for BULWARK.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod run_state;
pub mod systems;
pub mod world_setup;

pub use bulwark_campaign as campaign;
pub use bulwark_core as core;
pub use engine::{SimConfig, SimulationEngine};
