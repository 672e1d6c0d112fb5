//! Challenge generation engine for Inkling.
//!
//! This crate turns a profile's rule set into a small random challenge:
//! it resolves rule templates, picks categories, and owns the daily/random
//! seeding policy of the shared random source.

pub mod engine;
pub mod model;
pub mod resolve;
pub mod seeding;

pub use engine::{ChallengeEngine, draw_entries, generate};
pub use model::{ChallengeEntry, GenerationMode, GenerationResult, TIMESTAMP_FORMAT};
pub use resolve::{EMPTY_OPTIONS_SENTINEL, resolve_item};
pub use seeding::{RandomSource, SeededCycle, daily_seed};
