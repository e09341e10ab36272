use crate::config::settings::WinRateBands;

use super::types::WinRateScore;
use super::weight::WeightMemo;

/// Piecewise win-rate sub-score, confidence weighted and uncapped.
///
/// Applied twice per format: once to the overall rate with the overall
/// sample size, once to the recent rate with the recent sample size.
/// A breakpoint value scores with the band below it.
pub fn score_win_rate(
    rate: f64,
    sample_size: u32,
    bands: &WinRateBands,
    memo: &mut WeightMemo,
) -> WinRateScore {
    let raw = raw_win_rate_score(rate, bands);
    let weight = memo.weight(sample_size);
    WinRateScore {
        rate,
        sample_size,
        raw,
        weight,
        weighted: raw * weight,
    }
}

fn raw_win_rate_score(rate: f64, bands: &WinRateBands) -> f64 {
    if rate <= bands.moderate_rate {
        0.0
    } else if rate <= bands.high_rate {
        (rate - bands.moderate_rate) / bands.band_width * bands.base_scale
    } else if rate <= bands.extreme_rate {
        bands.base_scale + (rate - bands.high_rate) / bands.band_width * bands.base_scale
    } else {
        // Open-ended band: extreme win rates keep growing past 100 so
        // they dominate the weighted sum before the final cap.
        2.0 * bands.base_scale + (rate - bands.extreme_rate) / bands.band_width * bands.extended_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ScoringSettings;

    fn bands() -> WinRateBands {
        ScoringSettings::default().win_rate
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_zero_at_or_below_half() {
        assert_eq!(raw_win_rate_score(0.0, &bands()), 0.0);
        assert_eq!(raw_win_rate_score(0.35, &bands()), 0.0);
        assert_eq!(raw_win_rate_score(0.5, &bands()), 0.0);
    }

    #[test]
    fn test_first_band_is_linear_to_fifty() {
        approx(raw_win_rate_score(0.55, &bands()), 25.0);
        approx(raw_win_rate_score(0.6, &bands()), 50.0);
    }

    #[test]
    fn test_second_band_is_linear_to_hundred() {
        approx(raw_win_rate_score(0.65, &bands()), 75.0);
        approx(raw_win_rate_score(0.7, &bands()), 100.0);
    }

    #[test]
    fn test_top_band_is_unbounded() {
        approx(raw_win_rate_score(0.8, &bands()), 200.0);
        approx(raw_win_rate_score(0.9, &bands()), 300.0);
        approx(raw_win_rate_score(1.0, &bands()), 400.0);
    }

    #[test]
    fn test_monotone_in_rate() {
        let bands = bands();
        let mut previous = -1.0;
        for step in 0..=100 {
            let rate = f64::from(step) / 100.0;
            let raw = raw_win_rate_score(rate, &bands);
            assert!(raw >= previous, "score dropped at rate {rate}");
            previous = raw;
        }
    }

    #[test]
    fn test_weighted_by_sample_size() {
        let bands = bands();
        let mut memo = WeightMemo::new(20.0);

        let score = score_win_rate(0.9, 20, &bands, &mut memo);
        approx(score.raw, 300.0);
        approx(score.weight, 0.5);
        approx(score.weighted, 150.0);
    }

    #[test]
    fn test_weighted_score_can_exceed_hundred() {
        let mut memo = WeightMemo::new(20.0);
        let score = score_win_rate(1.0, 1000, &bands(), &mut memo);
        assert!(score.weighted > 100.0);
    }
}
