use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::models::PlayerSnapshot;
use crate::errors;
use crate::reputation::{self, PlayerReport, PlayerReputation};
use crate::scoring::{self, RiskScoreResult, ScoreOptions};

/// Scores already-fetched player data from disk.
///
/// Fetching the data is the front end's job; this service only loads,
/// validates and scores what it is handed.
pub struct EvaluationService {
    config: AppConfig,
}

impl EvaluationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        input: &Path,
        options: &ScoreOptions,
        now: DateTime<Utc>,
    ) -> Result<RiskScoreResult> {
        let snapshot = self.load_snapshot(input)?;
        info!(
            "Evaluating {} ({} formats, {} recent games)",
            snapshot.username.as_deref().unwrap_or("player"),
            snapshot.stats.len(),
            snapshot.recent_games.len()
        );

        scoring::compute_risk_score(&snapshot, &self.config.scoring, options, now)
    }

    pub fn summarize_reports(&self, input: &Path) -> Result<Vec<PlayerReputation>> {
        let reports = self.load_reports(input)?;
        info!("Summarizing {} reports", reports.len());
        reputation::summarize_reports(&reports)
    }

    fn load_snapshot(&self, input: &Path) -> Result<PlayerSnapshot> {
        let json = fs::read_to_string(input).with_context(|| errors::load_context(input))?;
        errors::with_parse_context(serde_json::from_str(&json), "player snapshot")
    }

    fn load_reports(&self, input: &Path) -> Result<Vec<PlayerReport>> {
        let json = fs::read_to_string(input).with_context(|| errors::load_context(input))?;
        errors::with_parse_context(serde_json::from_str(&json), "player reports")
    }
}
