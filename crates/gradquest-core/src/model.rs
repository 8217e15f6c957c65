//! Core data model types for gradquest.
//!
//! These are the fundamental types the entire game builds on: courses,
//! the professors who teach them, and the multiple-choice questions that
//! exams are scored against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Difficulty label of a professor's course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    /// Hard courses run the two-exam protocol.
    pub fn is_hard(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A professor assigned to a course archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Display name (e.g. "Prof. Maplewood").
    pub name: String,
    /// Difficulty of the courses this professor teaches.
    pub difficulty: Difficulty,
}

impl Professor {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    /// Extra-credit points granted before an exam is scored.
    ///
    /// The exam engine uses this as the attempt's starting score baseline.
    pub fn extra_credit(&self) -> u32 {
        match self.difficulty {
            Difficulty::Easy => 1,
            Difficulty::Hard => 0,
        }
    }
}

/// A single multiple-choice question presented during an exam.
///
/// Immutable once built by the bank builder; the four choices contain the
/// correct answer exactly once, padded with a placeholder when the bank is
/// too small to supply distinct distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the player.
    pub text: String,
    /// The four presentable choices, in bank-build order.
    pub choices: Vec<String>,
    /// The correct answer, verbatim.
    pub correct_answer: String,
}

/// A registered course: one archetype instance with its own question pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identity; stable across list moves.
    pub id: Uuid,
    /// Archetype slot this course was minted from, `1..=4`.
    pub archetype: u32,
    /// Course name.
    pub name: String,
    /// Assigned professor.
    pub professor: Professor,
    /// Set by the exam engine when an exam attempt passes.
    pub passed: bool,
    /// Question pool exams draw from.
    pub questions: Vec<Question>,
}

impl Course {
    pub fn new(
        archetype: u32,
        name: impl Into<String>,
        professor: Professor,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            archetype,
            name: name.into(),
            professor,
            passed: false,
            questions,
        }
    }

    /// One-line summary used by course listings.
    pub fn info(&self) -> String {
        format!(
            "{}, taught by {} ({} difficulty)",
            self.name, self.professor.name, self.professor.difficulty
        )
    }
}
