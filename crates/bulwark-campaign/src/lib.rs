//! Economy and progression for BULWARK.
//!
//! In-run upgrade pricing, wave rewards and difficulty pacing, the
//! cross-run `PermanentProgress` record, and the store it is persisted to.
//! Nothing here touches the ECS world; the simulation calls in.

pub mod economy;
pub mod persistence;
pub mod progression;
pub mod upgrades;

pub use persistence::{JsonFileStore, MemoryStore, ProgressStore};
pub use progression::PermanentProgress;
pub use upgrades::UpgradeLevels;
