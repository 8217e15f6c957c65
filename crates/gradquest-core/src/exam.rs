//! Exam engine.
//!
//! Runs the scoring protocol for one course: a single pass for easy
//! courses, the two-exam protocol with a mid-exam drop decision for hard
//! ones. The engine marks a passing course as passed but never touches
//! credits or failure counters; those belong to the progression engine.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::bank::is_sentinel;
use crate::model::{Course, Question};
use crate::traits::{AnswerSource, ChoiceDialog, MessageSink, Reply};

/// Maximum questions drawn from a course's pool per exam.
pub const QUESTIONS_PER_EXAM: usize = 10;

/// Minimum final score needed to pass a course.
pub const PASS_THRESHOLD: u32 = 6;

/// Scores accumulated over a finished exam attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSummary {
    pub course_name: String,
    /// Extra credit granted by the professor before scoring.
    pub baseline: u32,
    /// Raw score of the only (or first) scoring pass.
    pub first_score: u32,
    /// Raw score of the second pass, hard courses only.
    pub second_score: Option<u32>,
    /// Baseline plus raw score (easy) or truncated average (hard).
    pub final_score: u32,
}

/// How an exam attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamOutcome {
    Passed(ExamSummary),
    Failed(ExamSummary),
    /// The player took the mid-exam drop offer on a hard course. No second
    /// pass ran and no score was finalized; the progression engine performs
    /// the actual drop.
    DroppedAfterFirst,
}

/// Run a full exam attempt for `course`.
///
/// A cancelled pass is not an error: its accumulated score is finalized
/// against the threshold as if the pass had ended normally.
pub fn run_exam<R: Rng>(
    course: &mut Course,
    rng: &mut R,
    answers: &mut dyn AnswerSource,
    dialog: &mut dyn ChoiceDialog,
    sink: &mut dyn MessageSink,
) -> ExamOutcome {
    let baseline = course.professor.extra_credit();

    let mut candidates: Vec<Question> = course
        .questions
        .iter()
        .take(QUESTIONS_PER_EXAM)
        .cloned()
        .collect();
    candidates.shuffle(rng);

    tracing::debug!(
        course = %course.name,
        questions = candidates.len(),
        hard = course.professor.difficulty.is_hard(),
        "starting exam"
    );

    if course.professor.difficulty.is_hard() {
        sink.notify("This is a hard course. You need to take two exams.");

        let first = scoring_pass(&candidates, "First Exam", rng, answers, sink);
        sink.notify(&format!(
            "You scored {first} out of 10 on the first exam."
        ));

        if dialog.confirm("Do you want to drop the course instead of continuing to the second exam?")
        {
            return ExamOutcome::DroppedAfterFirst;
        }

        let second = scoring_pass(&candidates, "Second Exam", rng, answers, sink);
        sink.notify(&format!(
            "You scored {second} out of 10 on the second exam."
        ));

        // Integer truncation of the two-exam average.
        let final_score = baseline + (first + second) / 2;
        sink.notify(&format!(
            "Your total average score after extra credit is {final_score} out of 10."
        ));

        let summary = ExamSummary {
            course_name: course.name.clone(),
            baseline,
            first_score: first,
            second_score: Some(second),
            final_score,
        };
        finish(course, summary, sink)
    } else {
        let raw = scoring_pass(&candidates, "Exam", rng, answers, sink);
        let final_score = baseline + raw;
        sink.notify(&format!(
            "You scored {final_score} out of 10 on the exam."
        ));

        let summary = ExamSummary {
            course_name: course.name.clone(),
            baseline,
            first_score: raw,
            second_score: None,
            final_score,
        };
        finish(course, summary, sink)
    }
}

fn finish(course: &mut Course, summary: ExamSummary, sink: &mut dyn MessageSink) -> ExamOutcome {
    if summary.final_score >= PASS_THRESHOLD {
        course.passed = true;
        sink.notify(&format!("You have passed the {} class!", course.name));
        ExamOutcome::Passed(summary)
    } else {
        sink.notify(&format!("You have failed the {} class.", course.name));
        ExamOutcome::Failed(summary)
    }
}

/// One full pass over up to ten questions, producing a 0..=10 raw score.
///
/// Invalid input re-presents the same question without advancing, with no
/// retry cap; the loop ends only on consumption or cancellation. A
/// cancellation keeps whatever score accumulated so far.
pub fn scoring_pass<R: Rng>(
    questions: &[Question],
    exam_title: &str,
    rng: &mut R,
    answers: &mut dyn AnswerSource,
    sink: &mut dyn MessageSink,
) -> u32 {
    let mut score = 0u32;
    let mut index = 0usize;

    while index < questions.len() {
        let question = &questions[index];
        let mut choices = question.choices.clone();
        choices.shuffle(rng);

        let prompt = render_question(question, &choices, exam_title, index + 1);
        let text = match answers.ask(&prompt, exam_title) {
            Reply::Answer(text) => text,
            Reply::Cancelled => {
                sink.notify("Exam cancelled.");
                break;
            }
        };
        let text = text.trim();

        if is_sentinel(text) {
            sink.notify("Correct!");
            score += 1;
        } else if let Some(choice) = select_choice(&choices, text) {
            if *choice == question.correct_answer {
                sink.notify("Correct!");
                score += 1;
            } else {
                sink.notify(&format!(
                    "Incorrect. The correct answer was '{}'.",
                    question.correct_answer
                ));
            }
        } else {
            sink.notify("Invalid answer. Please enter A, B, C, D, 'Mohamed', or 'Messi'.");
            // Re-present the same question; the index does not advance.
            continue;
        }

        index += 1;
    }

    tracing::debug!(%exam_title, score, "scoring pass finished");
    score
}

/// Map a single letter A-D (case-insensitive) to the shuffled choice it
/// names. Anything else is invalid.
fn select_choice<'a>(choices: &'a [String], text: &str) -> Option<&'a String> {
    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !('A'..='D').contains(&letter) {
        return None;
    }
    choices.get((letter as u8 - b'A') as usize)
}

fn render_question(
    question: &Question,
    choices: &[String],
    exam_title: &str,
    number: usize,
) -> String {
    let mut text = format!("{exam_title} - Question {number}: {}\n\n", question.text);
    for (i, choice) in choices.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        text.push_str(&format!("{letter}) {choice}\n"));
    }
    text
}
