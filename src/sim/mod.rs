//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as `now` milliseconds from the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod combo;
pub mod effects;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zombie;

pub use combo::{ComboTracker, HitOutcome, Tier};
pub use effects::Effects;
pub use session::{ClickOutcome, Session, SessionUpdate};
pub use spawn::SpawnScheduler;
pub use state::{
    Difficulty, DifficultyConfig, GameEvent, GamePhase, MusicCue, SoundId, Stats,
};
pub use tick::{Flow, Game, GameOptions, TickInput, UiCommand, tick};
pub use zombie::{Zombie, ZombiePhase};
