//! Question-source parser.
//!
//! Loads question files (one `<question>,<answer>` per line) and validates
//! them. Malformed lines are skipped with a diagnostic, never an error; the
//! game is expected to keep running on whatever parsed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::bank::is_sentinel;

/// A raw question/answer record, before choices are synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// The question text.
    pub text: String,
    /// The correct answer, verbatim.
    pub answer: String,
}

/// Parse a single question file.
///
/// Each line is split on its first comma; both fields are trimmed. Lines
/// with fewer than two fields are skipped with a warning. Duplicate
/// question text keeps the last answer seen, matching map insertion.
pub fn parse_question_file(path: &Path) -> Result<Vec<QuestionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    Ok(parse_question_str(&content, path))
}

/// Parse question lines from a string (useful for testing).
pub fn parse_question_str(content: &str, source_path: &Path) -> Vec<QuestionRecord> {
    let mut records: Vec<QuestionRecord> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        match line.split_once(',') {
            Some((text, answer)) => {
                let text = text.trim().to_string();
                let answer = answer.trim().to_string();
                if let Some(existing) = records.iter_mut().find(|r| r.text == text) {
                    existing.answer = answer;
                } else {
                    records.push(QuestionRecord { text, answer });
                }
            }
            None => {
                tracing::warn!(
                    file = %source_path.display(),
                    line = line_no + 1,
                    "incomplete question data, skipping line"
                );
            }
        }
    }

    records
}

/// Recursively load all `.csv` and `.txt` question files from a directory.
///
/// Unreadable files are skipped with a warning so one bad file never takes
/// the whole bank down.
pub fn load_question_directory(dir: &Path) -> Result<Vec<(PathBuf, Vec<QuestionRecord>)>> {
    let mut files = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            files.extend(load_question_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "csv" || ext == "txt")
        {
            match parse_question_file(&path) {
                Ok(records) => files.push((path, records)),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(files)
}

/// A warning from question-record validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question text (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate parsed records for issues a question author should know about.
pub fn validate_records(records: &[QuestionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for record in records {
        if record.text.is_empty() {
            warnings.push(ValidationWarning {
                question: None,
                message: "question text is empty".into(),
            });
        }
        if record.answer.is_empty() {
            warnings.push(ValidationWarning {
                question: Some(record.text.clone()),
                message: "answer is empty".into(),
            });
        }
        if is_sentinel(&record.answer) {
            warnings.push(ValidationWarning {
                question: Some(record.text.clone()),
                message: format!(
                    "answer '{}' is a free-pass word and will never appear as a distractor",
                    record.answer
                ),
            });
        }
    }

    let distinct_usable = {
        let mut answers: Vec<&str> = records
            .iter()
            .map(|r| r.answer.as_str())
            .filter(|a| !is_sentinel(a))
            .collect();
        answers.sort_unstable();
        answers.dedup();
        answers.len()
    };
    if !records.is_empty() && distinct_usable < 4 {
        warnings.push(ValidationWarning {
            question: None,
            message: format!(
                "only {distinct_usable} distinct usable answers; choices will be padded with 'None'"
            ),
        });
    }

    warnings
}
