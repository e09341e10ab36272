pub mod models;

pub use models::{FormatStats, GameFormat, GameOutcome, GameRecord, PlayerProfile, PlayerSnapshot};
