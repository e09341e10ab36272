use std::collections::BTreeMap;

use anyhow::{Context, Result, ensure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::GameFormat;

const MIN_USERNAME_LEN: usize = 2;
const MAX_USERNAME_LEN: usize = 25;

/// One crowdsourced report of a suspicious player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub username: String,
    pub risk_score: f64,
    pub game_format: GameFormat,
    pub reported_at: DateTime<Utc>,
}

impl PlayerReport {
    pub fn validate(&self) -> Result<()> {
        let len = self.username.chars().count();
        ensure!(
            (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len),
            "Username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters, got {len}"
        );
        ensure!(
            self.risk_score.is_finite() && (0.0..=100.0).contains(&self.risk_score),
            "Risk score must be within 0-100, got {}",
            self.risk_score
        );
        Ok(())
    }
}

/// How much weight the crowd's reports on a player carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportConfidence {
    Low,
    Medium,
    High,
    Confirmed,
}

impl ReportConfidence {
    /// Classification from report volume and average risk.
    pub fn classify(report_count: u32, average_risk: f64) -> Self {
        if report_count >= 10 && average_risk >= 80.0 {
            ReportConfidence::Confirmed
        } else if report_count >= 5 && average_risk >= 70.0 {
            ReportConfidence::High
        } else if report_count >= 3 && average_risk >= 60.0 {
            ReportConfidence::Medium
        } else {
            ReportConfidence::Low
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportConfidence::Low => "low",
            ReportConfidence::Medium => "medium",
            ReportConfidence::High => "high",
            ReportConfidence::Confirmed => "confirmed",
        }
    }
}

/// Aggregated reputation for one reported player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReputation {
    pub username: String,
    pub total_reports: u32,
    pub average_risk_score: f64,
    pub report_count_by_format: BTreeMap<GameFormat, u32>,
    pub first_reported: DateTime<Utc>,
    pub last_reported: DateTime<Utc>,
    pub confidence: ReportConfidence,
}

/// Group reports by player (usernames compared case-insensitively) and
/// summarize each group. Summaries come back most-reported first.
pub fn summarize_reports(reports: &[PlayerReport]) -> Result<Vec<PlayerReputation>> {
    for (idx, report) in reports.iter().enumerate() {
        report
            .validate()
            .with_context(|| format!("Report {idx} for {:?}", report.username))?;
    }

    let mut grouped: BTreeMap<String, Vec<&PlayerReport>> = BTreeMap::new();
    for report in reports {
        grouped
            .entry(report.username.to_lowercase())
            .or_default()
            .push(report);
    }

    let mut summaries: Vec<PlayerReputation> =
        grouped.into_values().map(summarize_group).collect();
    summaries.sort_by(|a, b| {
        b.total_reports
            .cmp(&a.total_reports)
            .then_with(|| a.username.cmp(&b.username))
    });
    Ok(summaries)
}

fn summarize_group(reports: Vec<&PlayerReport>) -> PlayerReputation {
    let total_reports = reports.len() as u32;
    let average_risk_score =
        reports.iter().map(|report| report.risk_score).sum::<f64>() / f64::from(total_reports);

    let mut report_count_by_format = BTreeMap::new();
    let mut first_reported = reports[0].reported_at;
    let mut last_reported = reports[0].reported_at;
    for report in &reports {
        *report_count_by_format.entry(report.game_format).or_insert(0) += 1;
        first_reported = first_reported.min(report.reported_at);
        last_reported = last_reported.max(report.reported_at);
    }

    PlayerReputation {
        // display name as first submitted
        username: reports[0].username.clone(),
        total_reports,
        average_risk_score,
        report_count_by_format,
        first_reported,
        last_reported,
        confidence: ReportConfidence::classify(total_reports, average_risk_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn report(username: &str, risk_score: f64, day: u32) -> PlayerReport {
        PlayerReport {
            username: username.to_string(),
            risk_score,
            game_format: GameFormat::Blitz,
            reported_at: Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(ReportConfidence::classify(10, 80.0), ReportConfidence::Confirmed);
        assert_eq!(ReportConfidence::classify(9, 95.0), ReportConfidence::High);
        assert_eq!(ReportConfidence::classify(5, 70.0), ReportConfidence::High);
        assert_eq!(ReportConfidence::classify(3, 60.0), ReportConfidence::Medium);
        assert_eq!(ReportConfidence::classify(3, 59.9), ReportConfidence::Low);
        assert_eq!(ReportConfidence::classify(2, 99.0), ReportConfidence::Low);
    }

    #[test]
    fn test_usernames_group_case_insensitively() {
        let reports = vec![
            report("Magnus", 70.0, 1),
            report("magnus", 90.0, 3),
        ];
        let summaries = summarize_reports(&reports).unwrap();

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.username, "Magnus");
        assert_eq!(summary.total_reports, 2);
        assert!((summary.average_risk_score - 80.0).abs() < 1e-12);
        assert_eq!(summary.first_reported.day(), 1);
        assert_eq!(summary.last_reported.day(), 3);
    }

    #[test]
    fn test_summaries_sorted_by_report_count() {
        let reports = vec![
            report("alice", 50.0, 1),
            report("bob", 60.0, 1),
            report("bob", 65.0, 2),
        ];
        let summaries = summarize_reports(&reports).unwrap();
        assert_eq!(summaries[0].username, "bob");
        assert_eq!(summaries[1].username, "alice");
    }

    #[test]
    fn test_per_format_counts() {
        let mut reports = vec![report("carol", 70.0, 1), report("carol", 75.0, 2)];
        reports.push(PlayerReport {
            game_format: GameFormat::Rapid,
            ..report("carol", 80.0, 3)
        });
        let summaries = summarize_reports(&reports).unwrap();

        let by_format = &summaries[0].report_count_by_format;
        assert_eq!(by_format.get(&GameFormat::Blitz), Some(&2));
        assert_eq!(by_format.get(&GameFormat::Rapid), Some(&1));
    }

    #[test]
    fn test_invalid_reports_rejected() {
        assert!(summarize_reports(&[report("x", 50.0, 1)]).is_err());
        assert!(summarize_reports(&[report("alice", 120.0, 1)]).is_err());
        assert!(summarize_reports(&[report("alice", f64::NAN, 1)]).is_err());
    }

    #[test]
    fn test_no_reports_is_empty() {
        assert!(summarize_reports(&[]).unwrap().is_empty());
    }
}
