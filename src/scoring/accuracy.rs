use crate::config::settings::AccuracyBands;

use super::types::{AccuracySample, AccuracyScore, AccuracyScoreReason};
use super::weight::WeightMemo;

/// Piecewise sub-score over the percentage of suspiciously accurate
/// games, confidence weighted by the size of the accuracy sample and
/// uncapped.
///
/// Percentages at or below the moderate breakpoint are a deliberate
/// dead zone; an empty accuracy sample reports a distinct reason
/// instead of a silent zero.
pub fn score_accuracy(
    sample: &AccuracySample,
    bands: &AccuracyBands,
    memo: &mut WeightMemo,
) -> AccuracyScore {
    let percentage = sample.high_accuracy_percentage;

    if sample.games_with_accuracy == 0 || !percentage.is_finite() {
        return AccuracyScore {
            percentage,
            sample_size: sample.games_with_accuracy,
            raw: 0.0,
            weight: 0.0,
            weighted: 0.0,
            reason: Some(AccuracyScoreReason::NoAccuracyData),
        };
    }

    let raw = raw_accuracy_score(percentage, bands);
    let weight = memo.weight(sample.games_with_accuracy);
    AccuracyScore {
        percentage,
        sample_size: sample.games_with_accuracy,
        raw,
        weight,
        weighted: raw * weight,
        reason: None,
    }
}

fn raw_accuracy_score(percentage: f64, bands: &AccuracyBands) -> f64 {
    if percentage <= bands.moderate_pct {
        0.0
    } else if percentage <= bands.high_pct {
        (percentage - bands.moderate_pct) / bands.band_width * bands.base_scale
    } else if percentage <= bands.extreme_pct {
        bands.base_scale + (percentage - bands.high_pct) / bands.band_width * bands.base_scale
    } else {
        // Step band: +step_scale for every full step_width above the
        // extreme breakpoint. floor, not round: 34.9% and 30.0% land on
        // the same step.
        let steps = ((percentage - bands.extreme_pct) / bands.step_width).floor();
        2.0 * bands.base_scale + steps * bands.step_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ScoringSettings;

    fn bands() -> AccuracyBands {
        ScoringSettings::default().accuracy
    }

    fn sample(with: u32, high: u32) -> AccuracySample {
        let percentage = if with == 0 {
            0.0
        } else {
            f64::from(high) / f64::from(with) * 100.0
        };
        AccuracySample {
            games_with_accuracy: with,
            high_accuracy_games: high,
            high_accuracy_percentage: percentage,
        }
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_empty_sample_reports_no_accuracy_data() {
        let mut memo = WeightMemo::new(20.0);
        let score = score_accuracy(&sample(0, 0), &bands(), &mut memo);
        assert_eq!(score.weighted, 0.0);
        assert_eq!(score.reason, Some(AccuracyScoreReason::NoAccuracyData));
    }

    #[test]
    fn test_nan_percentage_reports_no_accuracy_data() {
        let mut memo = WeightMemo::new(20.0);
        let broken = AccuracySample {
            games_with_accuracy: 4,
            high_accuracy_games: 0,
            high_accuracy_percentage: f64::NAN,
        };
        let score = score_accuracy(&broken, &bands(), &mut memo);
        assert_eq!(score.weighted, 0.0);
        assert_eq!(score.reason, Some(AccuracyScoreReason::NoAccuracyData));
    }

    #[test]
    fn test_dead_zone_below_moderate() {
        assert_eq!(raw_accuracy_score(5.0, &bands()), 0.0);
        assert_eq!(raw_accuracy_score(10.0, &bands()), 0.0);
    }

    #[test]
    fn test_dead_zone_has_no_reason() {
        let mut memo = WeightMemo::new(20.0);
        let score = score_accuracy(&sample(20, 1), &bands(), &mut memo);
        assert_eq!(score.weighted, 0.0);
        assert_eq!(score.reason, None);
    }

    #[test]
    fn test_band_boundaries() {
        approx(raw_accuracy_score(15.0, &bands()), 25.0);
        approx(raw_accuracy_score(20.0, &bands()), 50.0);
        approx(raw_accuracy_score(25.0, &bands()), 75.0);
        approx(raw_accuracy_score(30.0, &bands()), 100.0);
    }

    #[test]
    fn test_step_band_uses_floor() {
        // 30.0 and 34.9 share the zero step; 35.0 moves up one
        approx(raw_accuracy_score(30.0, &bands()), 100.0);
        approx(raw_accuracy_score(34.9, &bands()), 100.0);
        approx(raw_accuracy_score(35.0, &bands()), 150.0);
        approx(raw_accuracy_score(83.0, &bands()), 600.0);
    }

    #[test]
    fn test_weighted_by_accuracy_sample_size() {
        let mut memo = WeightMemo::new(20.0);
        // 15 of 18 high -> 83.33%, raw 600
        let score = score_accuracy(&sample(18, 15), &bands(), &mut memo);
        approx(score.raw, 600.0);
        approx(score.weight, 18.0 / 38.0);
        assert!((score.weighted - 284.2105263157).abs() < 1e-6);
    }

    #[test]
    fn test_uncapped() {
        let mut memo = WeightMemo::new(20.0);
        let score = score_accuracy(&sample(1000, 1000), &bands(), &mut memo);
        assert!(score.weighted > 100.0);
    }
}
