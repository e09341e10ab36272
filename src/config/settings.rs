use anyhow::{Result, ensure};

use crate::config::presets::SensitivityPreset;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How strongly each sub-score contributes to the weighted sum.
///
/// The three weights must sum to 1.0; `ScoringSettings::validate`
/// enforces it at configuration-load time.
#[derive(Debug, Clone, Copy)]
pub struct AggregationWeights {
    pub overall_win_rate: f64,
    pub recent_win_rate: f64,
    pub accuracy: f64,
}

impl AggregationWeights {
    pub fn sum(&self) -> f64 {
        self.overall_win_rate + self.recent_win_rate + self.accuracy
    }
}

/// Breakpoints and scale constants for the piecewise win-rate scorer.
#[derive(Debug, Clone, Copy)]
pub struct WinRateBands {
    /// Rates at or below this contribute nothing.
    pub moderate_rate: f64,
    pub high_rate: f64,
    pub extreme_rate: f64,
    /// Width of the two linear bands.
    pub band_width: f64,
    pub base_scale: f64,
    /// Slope of the open-ended band above `extreme_rate`.
    pub extended_scale: f64,
}

/// Breakpoints and scale constants for the piecewise accuracy scorer.
#[derive(Debug, Clone, Copy)]
pub struct AccuracyBands {
    /// Percentages at or below this are a deliberate dead zone.
    pub moderate_pct: f64,
    pub high_pct: f64,
    pub extreme_pct: f64,
    pub band_width: f64,
    /// Step size of the open-ended band above `extreme_pct`.
    pub step_width: f64,
    pub base_scale: f64,
    pub step_scale: f64,
}

/// Rating-dependent thresholds classifying a game as suspiciously accurate.
#[derive(Debug, Clone, Copy)]
pub struct AccuracyThresholds {
    /// Players rated below this get the lower accuracy bar.
    pub low_rated_below: u32,
    pub low_rated_min_accuracy: f64,
    pub standard_min_accuracy: f64,
}

/// Amplification for newly created accounts.
#[derive(Debug, Clone, Copy)]
pub struct AccountAgeSettings {
    pub new_account_days: i64,
    pub multiplier: f64,
}

/// Every tunable of the scoring pipeline.
///
/// The surrounding product exposes sensitivity presets that move exactly
/// these values, so nothing here is hardcoded into the algorithm.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Sample size at which the confidence weight reaches 0.5.
    pub confidence_games: f64,
    /// Formats with fewer recent games are excluded from scoring.
    pub min_recent_games: u32,
    pub win_rate: WinRateBands,
    pub accuracy: AccuracyBands,
    pub high_accuracy: AccuracyThresholds,
    pub weights: AggregationWeights,
    pub account_age: AccountAgeSettings,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            confidence_games: 20.0,
            min_recent_games: 5,
            win_rate: WinRateBands {
                moderate_rate: 0.5,
                high_rate: 0.6,
                extreme_rate: 0.7,
                band_width: 0.1,
                base_scale: 50.0,
                extended_scale: 100.0,
            },
            accuracy: AccuracyBands {
                moderate_pct: 10.0,
                high_pct: 20.0,
                extreme_pct: 30.0,
                band_width: 10.0,
                step_width: 5.0,
                base_scale: 50.0,
                step_scale: 50.0,
            },
            high_accuracy: AccuracyThresholds {
                low_rated_below: 1500,
                low_rated_min_accuracy: 80.0,
                standard_min_accuracy: 90.0,
            },
            weights: AggregationWeights {
                overall_win_rate: 0.35,
                recent_win_rate: 0.35,
                accuracy: 0.30,
            },
            account_age: AccountAgeSettings {
                new_account_days: 60,
                multiplier: 1.5,
            },
        }
    }
}

impl ScoringSettings {
    /// Check the load-time invariants before any scoring uses these values.
    pub fn validate(&self) -> Result<()> {
        let weight_sum = self.weights.sum();
        ensure!(
            (weight_sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
            "Aggregation weights must sum to 1.0, got {weight_sum}"
        );
        ensure!(
            self.weights.overall_win_rate >= 0.0
                && self.weights.recent_win_rate >= 0.0
                && self.weights.accuracy >= 0.0,
            "Aggregation weights must be non-negative"
        );
        ensure!(
            self.confidence_games >= 1.0,
            "Confidence sample constant must be at least 1"
        );
        ensure!(
            self.min_recent_games >= 1,
            "Minimum recent games must be at least 1"
        );

        let win = &self.win_rate;
        ensure!(
            win.moderate_rate >= 0.0
                && win.moderate_rate < win.high_rate
                && win.high_rate < win.extreme_rate,
            "Win-rate breakpoints must be strictly increasing"
        );
        ensure!(
            win.band_width > 0.0 && win.base_scale > 0.0 && win.extended_scale > 0.0,
            "Win-rate band width and scales must be positive"
        );

        let acc = &self.accuracy;
        ensure!(
            acc.moderate_pct >= 0.0
                && acc.moderate_pct < acc.high_pct
                && acc.high_pct < acc.extreme_pct,
            "Accuracy breakpoints must be strictly increasing"
        );
        ensure!(
            acc.band_width > 0.0 && acc.step_width > 0.0 && acc.base_scale > 0.0 && acc.step_scale > 0.0,
            "Accuracy band widths and scales must be positive"
        );

        let high = &self.high_accuracy;
        ensure!(
            (0.0..=100.0).contains(&high.low_rated_min_accuracy)
                && (0.0..=100.0).contains(&high.standard_min_accuracy),
            "High-accuracy thresholds must be percentages"
        );
        ensure!(
            high.low_rated_min_accuracy <= high.standard_min_accuracy,
            "Low-rated accuracy threshold cannot exceed the standard one"
        );

        ensure!(
            self.account_age.new_account_days >= 0,
            "New-account age threshold cannot be negative"
        );
        ensure!(
            self.account_age.multiplier >= 1.0,
            "Account-age multiplier must be at least 1"
        );

        Ok(())
    }
}

/// Bundles the settings groups the binary works with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringSettings::default(),
        }
    }

    pub fn from_preset(preset: SensitivityPreset) -> Self {
        Self {
            scoring: preset.settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(ScoringSettings::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut settings = ScoringSettings::default();
        settings.weights.accuracy = 0.4;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_breakpoints_must_increase() {
        let mut settings = ScoringSettings::default();
        settings.win_rate.high_rate = 0.45;
        assert!(settings.validate().is_err());

        let mut settings = ScoringSettings::default();
        settings.accuracy.extreme_pct = 15.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_multiplier_below_one_rejected() {
        let mut settings = ScoringSettings::default();
        settings.account_age.multiplier = 0.5;
        assert!(settings.validate().is_err());
    }
}
