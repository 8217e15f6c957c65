//! Game report types with JSON persistence.
//!
//! A [`GameReport`] is the transcript the front-end writes out when a game
//! ends: every exam attempt plus the final standing.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exam::ExamOutcome;
use crate::progression::{GameOutcome, Player};

/// Record of one exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    pub course_name: String,
    pub baseline: u32,
    pub first_score: u32,
    #[serde(default)]
    pub second_score: Option<u32>,
    /// Absent when the attempt ended in a mid-exam drop.
    #[serde(default)]
    pub final_score: Option<u32>,
    pub passed: bool,
    pub dropped_mid_exam: bool,
}

impl ExamRecord {
    /// Build a record from the outcome of an attempt.
    pub fn from_outcome(course_name: &str, outcome: &ExamOutcome) -> Self {
        match outcome {
            ExamOutcome::Passed(summary) | ExamOutcome::Failed(summary) => Self {
                course_name: summary.course_name.clone(),
                baseline: summary.baseline,
                first_score: summary.first_score,
                second_score: summary.second_score,
                final_score: Some(summary.final_score),
                passed: matches!(outcome, ExamOutcome::Passed(_)),
                dropped_mid_exam: false,
            },
            ExamOutcome::DroppedAfterFirst => Self {
                course_name: course_name.to_string(),
                baseline: 0,
                first_score: 0,
                second_score: None,
                final_score: None,
                passed: false,
                dropped_mid_exam: true,
            },
        }
    }
}

/// A complete game transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Every exam attempt, in play order.
    pub exams: Vec<ExamRecord>,
    /// Final credit balance.
    pub credits: u32,
    /// Final failed-exam count.
    pub failed_exams: u32,
    /// Final standing.
    pub outcome: GameOutcome,
    /// Wall-clock game duration in milliseconds.
    pub duration_ms: u64,
}

impl GameReport {
    /// Snapshot the player's final standing.
    pub fn new(player: &Player, exams: Vec<ExamRecord>, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exams,
            credits: player.credits(),
            failed_exams: player.failed_exams(),
            outcome: player.evaluate_outcome(),
            duration_ms,
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GameReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::ExamSummary;

    fn summary(final_score: u32) -> ExamSummary {
        ExamSummary {
            course_name: "World History".into(),
            baseline: 1,
            first_score: final_score.saturating_sub(1),
            second_score: None,
            final_score,
        }
    }

    #[test]
    fn record_from_passed_outcome() {
        let outcome = ExamOutcome::Passed(summary(7));
        let record = ExamRecord::from_outcome("World History", &outcome);
        assert!(record.passed);
        assert_eq!(record.final_score, Some(7));
        assert!(!record.dropped_mid_exam);
    }

    #[test]
    fn record_from_mid_exam_drop() {
        let record = ExamRecord::from_outcome("Calculus I", &ExamOutcome::DroppedAfterFirst);
        assert!(!record.passed);
        assert!(record.dropped_mid_exam);
        assert_eq!(record.final_score, None);
        assert_eq!(record.course_name, "Calculus I");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let player = Player::new();
        let report = GameReport::new(
            &player,
            vec![ExamRecord::from_outcome(
                "World History",
                &ExamOutcome::Failed(summary(3)),
            )],
            1234,
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("game.json");
        report.save_json(&path).unwrap();

        let loaded = GameReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.exams.len(), 1);
        assert_eq!(loaded.outcome, GameOutcome::InProgress);
        assert_eq!(loaded.duration_ms, 1234);
    }
}
