//! Question bank builder.
//!
//! Turns raw question/answer records into presentable four-choice items by
//! drawing plausible distractors from the other answers in the bank.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;
use crate::parser::QuestionRecord;

/// Answers that always score as correct and never appear as distractors.
pub const SENTINEL_ANSWERS: [&str; 2] = ["Mohamed", "Messi"];

/// Number of choices presented per question.
pub const CHOICE_COUNT: usize = 4;

/// Placeholder choice used when the bank has too few distinct answers.
pub const PLACEHOLDER_CHOICE: &str = "None";

/// Whether an answer is one of the free-pass words, case-insensitively.
pub fn is_sentinel(answer: &str) -> bool {
    SENTINEL_ANSWERS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(answer))
}

/// Build one presentable [`Question`] per record.
///
/// The distractor pool is the set of correct answers across the whole bank
/// minus the sentinel answers. Each question starts with its own correct
/// answer and draws uniformly from the pool until four choices are
/// collected; slots that cannot be filled with a distinct distractor are
/// padded with [`PLACEHOLDER_CHOICE`] (placeholder duplicates are fine).
/// The final four choices are shuffled.
pub fn build_bank<R: Rng>(records: &[QuestionRecord], rng: &mut R) -> Vec<Question> {
    let pool: Vec<&str> = records
        .iter()
        .map(|r| r.answer.as_str())
        .filter(|a| !is_sentinel(a))
        .collect();

    records
        .iter()
        .map(|record| {
            let mut choices = vec![record.answer.clone()];
            while choices.len() < CHOICE_COUNT {
                let candidates: Vec<&str> = pool
                    .iter()
                    .copied()
                    .filter(|a| !choices.iter().any(|c| c == a))
                    .collect();
                match candidates.choose(rng) {
                    Some(pick) => choices.push((*pick).to_string()),
                    None => choices.push(PLACEHOLDER_CHOICE.to_string()),
                }
            }
            choices.shuffle(rng);

            Question {
                text: record.text.clone(),
                choices,
                correct_answer: record.answer.clone(),
            }
        })
        .collect()
}
