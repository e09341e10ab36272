use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::settings::{AccountAgeSettings, ScoringSettings};
use crate::domain::models::{GameFormat, GameRecord, PlayerSnapshot};

use super::accuracy::score_accuracy;
use super::metrics::build_format_metrics;
use super::types::{
    FormatMetrics, FormatScore, MaxFormatScore, NoScoreReason, RiskScoreResult, ScoreFactors,
    ScoreOptions,
};
use super::weight::WeightMemo;
use super::win_rate::score_win_rate;

pub const MAX_RISK_SCORE: f64 = 100.0;

/// Multiplier amplifying the score of newly created accounts.
///
/// `now` is an explicit parameter so evaluations are reproducible under
/// test.
pub fn account_age_factor(
    joined_at: DateTime<Utc>,
    now: DateTime<Utc>,
    settings: &AccountAgeSettings,
) -> f64 {
    let age_days = now.signed_duration_since(joined_at).num_days().max(0);
    if age_days <= settings.new_account_days {
        settings.multiplier
    } else {
        1.0
    }
}

/// Score every qualifying format and report the highest as the player's
/// risk score.
///
/// Pure apart from logging: identical inputs and an identical `now`
/// produce identical results. Formats below the minimum recent-game
/// sample are silently excluded; when none qualifies the result carries
/// the `no_rated_games` reason instead of a zero score.
pub fn compute_risk_score(
    snapshot: &PlayerSnapshot,
    settings: &ScoringSettings,
    options: &ScoreOptions,
    now: DateTime<Utc>,
) -> Result<RiskScoreResult> {
    settings.validate()?;
    snapshot.validate()?;

    let age_factor = account_age_factor(snapshot.profile.joined_at, now, &settings.account_age);
    let mut memo = WeightMemo::new(settings.confidence_games);
    let mut scored = Vec::new();

    for (format, stats) in &snapshot.stats {
        let games = format_games(&snapshot.recent_games, *format, options.rated_only);
        let metrics = build_format_metrics(stats, &games, &settings.high_accuracy);

        if metrics.recent_games.total < settings.min_recent_games {
            debug!(
                "{}: {} recent games, below the minimum of {} - excluded",
                format.as_str(),
                metrics.recent_games.total,
                settings.min_recent_games
            );
            continue;
        }

        scored.push(score_format(
            *format,
            &metrics,
            settings,
            age_factor,
            options.debug,
            &mut memo,
        ));
    }

    // Highest value first; equal values fall back to format order so
    // selection stays deterministic.
    scored.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.format.cmp(&b.format)));

    if scored.is_empty() {
        info!("No format met the minimum sample; reporting no_rated_games");
        return Ok(RiskScoreResult {
            max_score: MaxFormatScore {
                format: None,
                value: 0.0,
                factors: None,
                reason: Some(NoScoreReason::NoRatedGames),
            },
            other_formats: Vec::new(),
            account_age_factor: age_factor,
            evaluated_at: now,
        });
    }

    let mut other_formats = scored;
    let top = other_formats.remove(0);
    info!(
        "Max risk {:.1} in {} ({} other qualifying formats)",
        top.value,
        top.format.as_str(),
        other_formats.len()
    );

    Ok(RiskScoreResult {
        max_score: MaxFormatScore {
            format: Some(top.format),
            value: top.value,
            factors: top.factors,
            reason: None,
        },
        other_formats,
        account_age_factor: age_factor,
        evaluated_at: now,
    })
}

fn format_games(games: &[GameRecord], format: GameFormat, rated_only: bool) -> Vec<&GameRecord> {
    games
        .iter()
        .filter(|game| game.format == format && (!rated_only || game.is_rated))
        .collect()
}

fn score_format(
    format: GameFormat,
    metrics: &FormatMetrics,
    settings: &ScoringSettings,
    age_factor: f64,
    debug: bool,
    memo: &mut WeightMemo,
) -> FormatScore {
    let overall = score_win_rate(
        metrics.overall_win_rate,
        metrics.games_counts.total,
        &settings.win_rate,
        memo,
    );
    let recent = score_win_rate(
        metrics.recent_games.win_rate,
        metrics.recent_games.total,
        &settings.win_rate,
        memo,
    );
    let accuracy = score_accuracy(&metrics.accuracy, &settings.accuracy, memo);

    let weighted_sum = settings.weights.overall_win_rate * overall.weighted
        + settings.weights.recent_win_rate * recent.weighted
        + settings.weights.accuracy * accuracy.weighted;

    // Capped per format before the max is selected.
    let value = (age_factor * weighted_sum).min(MAX_RISK_SCORE);

    let factors = debug.then_some(ScoreFactors {
        overall_win_rate: overall,
        recent_win_rate: recent,
        accuracy,
        weighted_sum,
        account_age_factor: age_factor,
    });

    FormatScore {
        format,
        value,
        factors,
    }
}
