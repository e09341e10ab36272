use crate::config::settings::AccuracyThresholds;
use crate::domain::models::{FormatStats, GameOutcome, GameRecord};

use super::types::{AccuracySample, FormatMetrics, GameCounts, RecentGames};

/// Derive per-format metrics from lifetime totals and the recent games
/// already filtered to this format (and to rated games when that policy
/// is on).
///
/// A format with no recent games yields all-zero recent metrics; the
/// aggregator's minimum-sample rule decides whether it is scored.
pub fn build_format_metrics(
    stats: &FormatStats,
    recent: &[&GameRecord],
    thresholds: &AccuracyThresholds,
) -> FormatMetrics {
    let games_counts = lifetime_counts(stats);
    FormatMetrics {
        current_rating: stats.rating,
        overall_win_rate: win_rate(stats.wins, games_counts.total),
        games_counts,
        recent_games: partition_recent(recent),
        accuracy: classify_accuracy(recent, thresholds),
    }
}

fn lifetime_counts(stats: &FormatStats) -> GameCounts {
    GameCounts {
        total: stats.total(),
        wins: stats.wins,
        losses: stats.losses,
        draws: stats.draws,
    }
}

fn partition_recent(recent: &[&GameRecord]) -> RecentGames {
    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;

    for game in recent {
        match game.outcome {
            GameOutcome::Win => wins += 1,
            GameOutcome::Draw => draws += 1,
            GameOutcome::Loss => losses += 1,
        }
    }

    let total = wins + losses + draws;
    RecentGames {
        total,
        wins,
        losses,
        draws,
        win_rate: win_rate(wins, total),
    }
}

fn classify_accuracy(recent: &[&GameRecord], thresholds: &AccuracyThresholds) -> AccuracySample {
    let mut games_with_accuracy = 0u32;
    let mut high_accuracy_games = 0u32;

    for game in recent {
        let Some(accuracy) = game.accuracy else {
            continue;
        };
        games_with_accuracy += 1;
        if accuracy >= high_accuracy_floor(game.player_rating_at_game, thresholds) {
            high_accuracy_games += 1;
        }
    }

    let high_accuracy_percentage = if games_with_accuracy == 0 {
        0.0
    } else {
        f64::from(high_accuracy_games) / f64::from(games_with_accuracy) * 100.0
    };

    AccuracySample {
        games_with_accuracy,
        high_accuracy_games,
        high_accuracy_percentage,
    }
}

fn high_accuracy_floor(rating: u32, thresholds: &AccuracyThresholds) -> f64 {
    if rating < thresholds.low_rated_below {
        thresholds.low_rated_min_accuracy
    } else {
        thresholds.standard_min_accuracy
    }
}

fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total)
    }
}
