pub mod accuracy;
pub mod aggregator;
pub mod metrics;
pub mod types;
pub mod weight;
pub mod win_rate;

pub use accuracy::score_accuracy;
pub use aggregator::{MAX_RISK_SCORE, account_age_factor, compute_risk_score};
pub use metrics::build_format_metrics;
pub use types::{FormatMetrics, FormatScore, MaxFormatScore, RiskScoreResult, ScoreOptions};
pub use weight::{WeightMemo, confidence_weight};
pub use win_rate::score_win_rate;
