use clap::ValueEnum;

use crate::config::settings::ScoringSettings;

/// User-selectable sensitivity presets.
///
/// Each preset moves only the tunable constants; the shape of the scoring
/// pipeline never changes. Every preset must pass
/// `ScoringSettings::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SensitivityPreset {
    /// Larger samples required, smaller new-account window.
    Relaxed,
    /// The reference constants.
    Standard,
    /// Flags earlier on smaller samples and younger accounts.
    Strict,
}

impl SensitivityPreset {
    pub fn settings(&self) -> ScoringSettings {
        let mut settings = ScoringSettings::default();
        match self {
            SensitivityPreset::Relaxed => {
                settings.confidence_games = 30.0;
                settings.min_recent_games = 10;
                settings.account_age.new_account_days = 30;
            }
            SensitivityPreset::Standard => {}
            SensitivityPreset::Strict => {
                settings.confidence_games = 12.0;
                settings.min_recent_games = 3;
                settings.account_age.new_account_days = 90;
                settings.account_age.multiplier = 1.75;
            }
        }
        settings
    }

    pub fn as_str(&self) -> &str {
        match self {
            SensitivityPreset::Relaxed => "relaxed",
            SensitivityPreset::Standard => "standard",
            SensitivityPreset::Strict => "strict",
        }
    }
}

impl std::fmt::Display for SensitivityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The presets the product exposes, in display order.
pub fn all_presets() -> Vec<SensitivityPreset> {
    vec![
        SensitivityPreset::Relaxed,
        SensitivityPreset::Standard,
        SensitivityPreset::Strict,
    ]
}
