use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chess time-control classes tracked independently.
///
/// A closed enum: snapshots carrying any other format key fail to
/// deserialize, which rejects malformed input before scoring starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameFormat {
    Bullet,
    Blitz,
    Rapid,
}

impl GameFormat {
    pub fn as_str(&self) -> &str {
        match self {
            GameFormat::Bullet => "bullet",
            GameFormat::Blitz => "blitz",
            GameFormat::Rapid => "rapid",
        }
    }
}

/// Public profile data, fetched once per evaluation by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub joined_at: DateTime<Utc>,
}

/// Lifetime per-format totals as supplied by the stats endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatStats {
    pub rating: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl FormatStats {
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Result of one game from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Draw,
    Loss,
}

/// One finished game from the player's public archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub format: GameFormat,
    pub outcome: GameOutcome,
    pub player_rating_at_game: u32,
    /// Move accuracy in percent, when the game was analyzed.
    pub accuracy: Option<f64>,
    pub played_at: DateTime<Utc>,
    pub is_rated: bool,
}

/// Already-fetched input envelope for one evaluation.
///
/// The scoring pipeline never mutates it; everything derived is rebuilt
/// fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub username: Option<String>,
    pub profile: PlayerProfile,
    pub stats: BTreeMap<GameFormat, FormatStats>,
    pub recent_games: Vec<GameRecord>,
}

impl PlayerSnapshot {
    /// Reject malformed input before any scoring happens.
    ///
    /// Counts and format keys are already enforced by the types; this
    /// covers what the deserializer cannot, the accuracy range.
    pub fn validate(&self) -> Result<()> {
        for (idx, game) in self.recent_games.iter().enumerate() {
            if let Some(accuracy) = game.accuracy {
                ensure!(
                    accuracy.is_finite(),
                    "Game {idx}: accuracy is not a number"
                );
                ensure!(
                    (0.0..=100.0).contains(&accuracy),
                    "Game {idx}: accuracy {accuracy} outside the 0-100 range"
                );
            }
        }
        Ok(())
    }
}
