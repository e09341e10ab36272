pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod reputation;
pub mod scoring;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;

use crate::cli::{Cli, Command};
use crate::config::presets::{self, SensitivityPreset};
use crate::config::settings::AppConfig;
use crate::scoring::{RiskScoreResult, ScoreOptions};
use crate::services::evaluation::EvaluationService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_score(
    input: &Path,
    rated_only: bool,
    debug: bool,
    preset: SensitivityPreset,
    now: Option<&str>,
) -> Result<()> {
    let now = resolve_now(now)?;
    let service = EvaluationService::new(AppConfig::from_preset(preset));
    let options = ScoreOptions { rated_only, debug };

    let result = service.run(input, &options, now)?;
    render_verdict(&result);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn handle_reputation(input: &Path) -> Result<()> {
    let service = EvaluationService::new(AppConfig::new());
    let summaries = service.summarize_reports(input)?;
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

pub fn handle_presets() -> Result<()> {
    for preset in presets::all_presets() {
        let settings = preset.settings();
        println!(
            "{:<10} confidence_games={:<5} min_recent_games={:<3} new_account_days={:<4} age_multiplier={}",
            preset.as_str(),
            settings.confidence_games,
            settings.min_recent_games,
            settings.account_age.new_account_days,
            settings.account_age.multiplier,
        );
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid --now timestamp: {raw}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

// Verdict goes to stderr so stdout stays machine-readable JSON.
fn render_verdict(result: &RiskScoreResult) {
    let line = match result.max_score.format {
        Some(format) => format!("max risk {:.1} ({})", result.max_score.value, format.as_str()),
        None => "no rated games to score".to_string(),
    };
    let painted = if result.max_score.format.is_none() {
        line.dimmed()
    } else if result.max_score.value >= 80.0 {
        line.red().bold()
    } else if result.max_score.value >= 60.0 {
        line.yellow()
    } else {
        line.green()
    };
    eprintln!("{painted}");
}
