use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::GameFormat;

/// Win/loss/draw partition of a sample.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCounts {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Recent-game partition plus its win rate.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGames {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
}

/// Accuracy coverage among the recent games.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracySample {
    pub games_with_accuracy: u32,
    pub high_accuracy_games: u32,
    pub high_accuracy_percentage: f64,
}

/// Per-format statistics derived fresh on every evaluation.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatMetrics {
    pub current_rating: u32,
    pub overall_win_rate: f64,
    pub games_counts: GameCounts,
    pub recent_games: RecentGames,
    pub accuracy: AccuracySample,
}

/// Why the accuracy component contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyScoreReason {
    NoAccuracyData,
}

/// Confidence-weighted win-rate sub-score. Deliberately uncapped.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinRateScore {
    pub rate: f64,
    pub sample_size: u32,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Confidence-weighted accuracy sub-score. Deliberately uncapped.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyScore {
    pub percentage: f64,
    pub sample_size: u32,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<AccuracyScoreReason>,
}

/// Full numeric breakdown for one scored format, reported when the
/// debug flag is set.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub overall_win_rate: WinRateScore,
    pub recent_win_rate: WinRateScore,
    pub accuracy: AccuracyScore,
    /// Weighted sum before the age multiplier and the final cap.
    pub weighted_sum: f64,
    pub account_age_factor: f64,
}

/// One qualifying format's final score, capped to 0-100.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatScore {
    pub format: GameFormat,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<ScoreFactors>,
}

/// Why no format produced a score at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoScoreReason {
    NoRatedGames,
}

/// The reported maximum. `format` is `None` only when no format
/// qualified, which is a distinct outcome from a qualified score of zero.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFormatScore {
    pub format: Option<GameFormat>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<ScoreFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NoScoreReason>,
}

/// Final result of one evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResult {
    pub max_score: MaxFormatScore,
    /// Remaining qualifying formats, highest value first, never
    /// containing the reported max.
    pub other_formats: Vec<FormatScore>,
    pub account_age_factor: f64,
    pub evaluated_at: DateTime<Utc>,
}

/// Caller policy for one evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreOptions {
    /// Only count rated games toward the recent sample.
    pub rated_only: bool,
    /// Attach the numeric factor breakdown to every reported score.
    pub debug: bool,
}
