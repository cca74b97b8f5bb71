pub mod difficulty;
pub mod scoring;
pub mod target;
pub mod words;

pub use difficulty::Difficulty;
pub use target::{IdGenerator, Position, SequentialIds, TargetId, WordTarget};
pub use words::{KeystrokeOutcome, WordEngine};
