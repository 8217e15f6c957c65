//! Progression engine.
//!
//! Owns the player-wide state (credits, one-shot drop/retake options,
//! course lists) and orchestrates registration, exam attempts, drops,
//! retakes, and win/loss evaluation. Courses only ever move between the
//! active and dropped lists; they are never duplicated or deleted.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProgressionError;
use crate::exam::{self, ExamOutcome};
use crate::factory::CourseFactory;
use crate::model::Course;
use crate::traits::{AnswerSource, ChoiceDialog, MessageSink};

/// Credits awarded for passing a course, and forfeited when a passed
/// course is dropped.
pub const CREDITS_PER_COURSE: u32 = 3;

/// Credits required to graduate.
pub const GRADUATION_CREDITS: u32 = 12;

/// Passed courses required to graduate.
pub const GRADUATION_COURSES: usize = 4;

/// Failed exams beyond which the player flunks out.
pub const FAILED_EXAM_LIMIT: u32 = 2;

/// Where the game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Graduated,
    FlunkedOut,
}

/// How a registration was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    /// A fresh course from the factory rotation.
    New,
    /// Re-registration of the oldest dropped course; consumes no
    /// archetype slot.
    Retake,
}

/// Outcome of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub course_id: Uuid,
    pub course_name: String,
    pub kind: RegistrationKind,
}

/// Receipt for a successful course drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropReceipt {
    pub course_name: String,
    /// Credits forfeited because the course had already been passed
    /// (floored so the balance never goes negative). This is the only path
    /// by which credits decrease.
    pub credits_forfeited: u32,
}

/// Result of spending the one-shot retake option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetakeOutcome {
    /// A failed course was found and its exam ran.
    Attempted(ExamOutcome),
    /// No non-passed course was available. The option is consumed anyway.
    NoFailedCourses,
}

/// The player: all progression state for one game.
#[derive(Debug)]
pub struct Player {
    credits: u32,
    failed_exams: u32,
    can_drop: bool,
    can_retake: bool,
    active: Vec<Course>,
    dropped: VecDeque<Course>,
    sequence: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            credits: 0,
            failed_exams: 0,
            can_drop: true,
            can_retake: true,
            active: Vec::new(),
            dropped: VecDeque::new(),
            sequence: 0,
        }
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn failed_exams(&self) -> u32 {
        self.failed_exams
    }

    pub fn can_drop(&self) -> bool {
        self.can_drop
    }

    pub fn can_retake(&self) -> bool {
        self.can_retake
    }

    /// Active courses in registration order.
    pub fn active_courses(&self) -> &[Course] {
        &self.active
    }

    /// Dropped courses in the order they were dropped (retake order).
    pub fn dropped_courses(&self) -> &VecDeque<Course> {
        &self.dropped
    }

    /// Look up an active course by id.
    pub fn course(&self, course_id: Uuid) -> Option<&Course> {
        self.active.iter().find(|c| c.id == course_id)
    }

    /// Register the next course.
    ///
    /// An outstanding dropped course always takes priority: it moves back
    /// to the active list without consuming a new archetype slot.
    pub fn register_course(&mut self, factory: &CourseFactory) -> Registered {
        if let Some(course) = self.dropped.pop_front() {
            let registered = Registered {
                course_id: course.id,
                course_name: course.name.clone(),
                kind: RegistrationKind::Retake,
            };
            tracing::info!(course = %course.name, "re-registered dropped course");
            self.active.push(course);
            return registered;
        }

        self.sequence += 1;
        let course = factory.next_course(self.sequence);
        let registered = Registered {
            course_id: course.id,
            course_name: course.name.clone(),
            kind: RegistrationKind::New,
        };
        tracing::info!(course = %course.name, sequence = self.sequence, "registered course");
        self.active.push(course);
        registered
    }

    /// Run an exam for the given active course and apply its consequences:
    /// credits on a pass, the failure counter on a fail, the drop protocol
    /// when the player bails out of a hard course mid-exam.
    pub fn attempt_exam<R: Rng>(
        &mut self,
        course_id: Uuid,
        rng: &mut R,
        answers: &mut dyn AnswerSource,
        dialog: &mut dyn ChoiceDialog,
        sink: &mut dyn MessageSink,
    ) -> Result<ExamOutcome, ProgressionError> {
        let index = self
            .active
            .iter()
            .position(|c| c.id == course_id)
            .ok_or(ProgressionError::CourseNotRegistered)?;

        let outcome = exam::run_exam(&mut self.active[index], rng, answers, dialog, sink);

        match &outcome {
            ExamOutcome::Passed(_) => {
                self.credits += CREDITS_PER_COURSE;
            }
            ExamOutcome::Failed(_) => {
                self.failed_exams += 1;
            }
            ExamOutcome::DroppedAfterFirst => match self.drop_course(course_id) {
                Ok(receipt) => {
                    sink.notify(&format!(
                        "You have dropped {}. You must retake it before registering anything new.",
                        receipt.course_name
                    ));
                    if receipt.credits_forfeited > 0 {
                        sink.notify(&format!(
                            "You have lost {} credits from dropping a passed course.",
                            receipt.credits_forfeited
                        ));
                    }
                }
                // Drop option already spent: the course stays active and
                // the attempt just ends.
                Err(err) => sink.notify(&err.to_string()),
            },
        }

        Ok(outcome)
    }

    /// Spend the one-shot drop option on an active course.
    pub fn drop_course(&mut self, course_id: Uuid) -> Result<DropReceipt, ProgressionError> {
        if !self.can_drop {
            return Err(ProgressionError::DropAlreadyUsed);
        }
        let index = self
            .active
            .iter()
            .position(|c| c.id == course_id)
            .ok_or(ProgressionError::CourseNotRegistered)?;

        let course = self.active.remove(index);
        self.can_drop = false;

        let credits_forfeited = if course.passed {
            let forfeited = self.credits.min(CREDITS_PER_COURSE);
            self.credits -= forfeited;
            forfeited
        } else {
            0
        };

        let receipt = DropReceipt {
            course_name: course.name.clone(),
            credits_forfeited,
        };
        tracing::info!(course = %course.name, credits_forfeited, "dropped course");
        self.dropped.push_back(course);

        Ok(receipt)
    }

    /// Spend the one-shot retake option on the first failed course.
    ///
    /// The option is consumed even when no eligible course exists.
    pub fn retake_exam<R: Rng>(
        &mut self,
        rng: &mut R,
        answers: &mut dyn AnswerSource,
        dialog: &mut dyn ChoiceDialog,
        sink: &mut dyn MessageSink,
    ) -> Result<RetakeOutcome, ProgressionError> {
        if !self.can_retake {
            return Err(ProgressionError::RetakeAlreadyUsed);
        }
        self.can_retake = false;

        let Some(course_id) = self.active.iter().find(|c| !c.passed).map(|c| c.id) else {
            return Ok(RetakeOutcome::NoFailedCourses);
        };

        let outcome = self.attempt_exam(course_id, rng, answers, dialog, sink)?;
        Ok(RetakeOutcome::Attempted(outcome))
    }

    /// Pure read of the win/loss state. Graduation is checked first, so a
    /// player who qualifies for both outcomes graduates.
    pub fn evaluate_outcome(&self) -> GameOutcome {
        let passed = self.active.iter().filter(|c| c.passed).count();

        if self.dropped.is_empty()
            && self.credits >= GRADUATION_CREDITS
            && passed >= GRADUATION_COURSES
        {
            GameOutcome::Graduated
        } else if self.failed_exams > FAILED_EXAM_LIMIT {
            GameOutcome::FlunkedOut
        } else {
            GameOutcome::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::traits::{RecordingSink, ScriptedDialog, ScriptedSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    /// A question any letter answers correctly.
    fn gimme() -> Question {
        Question {
            text: "freebie?".into(),
            choices: vec!["yes".into(), "yes".into(), "yes".into(), "yes".into()],
            correct_answer: "yes".into(),
        }
    }

    /// Factory where every archetype's pool is winnable with letter answers.
    fn factory() -> CourseFactory {
        CourseFactory::new([
            vec![gimme(); 10],
            vec![gimme(); 10],
            vec![gimme(); 10],
            vec![gimme(); 10],
        ])
    }

    /// Register a course and pass its exam with straight-A answers.
    fn pass_one(player: &mut Player, factory: &CourseFactory) -> Uuid {
        let registered = player.register_course(factory);
        let mut answers = ScriptedSource::answers(&["A"; 20]);
        let mut dialog = ScriptedDialog::always(false);
        let mut sink = RecordingSink::new();
        let outcome = player
            .attempt_exam(registered.course_id, &mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert!(matches!(outcome, ExamOutcome::Passed(_)), "{outcome:?}");
        registered.course_id
    }

    /// Register a course and fail its exam by answering nothing at all.
    fn fail_one(player: &mut Player, factory: &CourseFactory) -> Uuid {
        let registered = player.register_course(factory);
        let mut answers = ScriptedSource::answers(&[]);
        let mut dialog = ScriptedDialog::always(false);
        let mut sink = RecordingSink::new();
        let outcome = player
            .attempt_exam(registered.course_id, &mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert!(matches!(
            outcome,
            ExamOutcome::Failed(_) | ExamOutcome::Passed(_)
        ));
        registered.course_id
    }

    #[test]
    fn registration_cycles_archetypes() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        for n in 1..=8u32 {
            player.register_course(&factory);
            let course = player.active_courses().last().unwrap();
            assert_eq!(course.archetype, ((n - 1) % 4) + 1);
        }
    }

    #[test]
    fn dropped_course_must_be_reregistered_first() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        let first = player.register_course(&factory);
        player.drop_course(first.course_id).unwrap();
        assert_eq!(player.dropped_courses().len(), 1);

        let second = player.register_course(&factory);
        assert_eq!(second.kind, RegistrationKind::Retake);
        assert_eq!(second.course_id, first.course_id);
        assert!(player.dropped_courses().is_empty());

        // The retake consumed no archetype slot.
        let third = player.register_course(&factory);
        assert_eq!(third.kind, RegistrationKind::New);
        assert_eq!(player.course(third.course_id).unwrap().archetype, 2);
    }

    #[test]
    fn drop_is_one_shot() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        let a = player.register_course(&factory);
        let b = player.register_course(&factory);

        player.drop_course(a.course_id).unwrap();
        assert!(!player.can_drop());
        assert_eq!(
            player.drop_course(b.course_id),
            Err(ProgressionError::DropAlreadyUsed)
        );
    }

    #[test]
    fn drop_of_unknown_course_does_not_consume_the_option() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();
        player.register_course(&factory);

        assert_eq!(
            player.drop_course(Uuid::new_v4()),
            Err(ProgressionError::CourseNotRegistered)
        );
        assert!(player.can_drop());
    }

    #[test]
    fn dropping_a_passed_course_forfeits_three_credits() {
        let factory = factory();
        let mut player = Player::new();

        let course_id = pass_one(&mut player, &factory);
        assert_eq!(player.credits(), 3);

        let receipt = player.drop_course(course_id).unwrap();
        assert_eq!(receipt.credits_forfeited, 3);
        assert_eq!(player.credits(), 0);
    }

    #[test]
    fn dropping_an_unpassed_course_forfeits_nothing() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        let registered = player.register_course(&factory);
        let receipt = player.drop_course(registered.course_id).unwrap();
        assert_eq!(receipt.credits_forfeited, 0);
        assert_eq!(player.credits(), 0);
    }

    #[test]
    fn attempt_exam_awards_credits_on_pass() {
        let factory = factory();
        let mut player = Player::new();

        pass_one(&mut player, &factory);
        assert_eq!(player.credits(), 3);
        assert_eq!(player.failed_exams(), 0);
    }

    #[test]
    fn attempt_exam_counts_failures() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        fail_one(&mut player, &factory);
        assert_eq!(player.credits(), 0);
        assert_eq!(player.failed_exams(), 1);
    }

    #[test]
    fn attempt_exam_on_unknown_course_is_reported() {
        let mut player = Player::new();
        let mut answers = ScriptedSource::answers(&[]);
        let mut dialog = ScriptedDialog::always(false);
        let mut sink = RecordingSink::new();

        let result =
            player.attempt_exam(Uuid::new_v4(), &mut rng(), &mut answers, &mut dialog, &mut sink);
        assert_eq!(result, Err(ProgressionError::CourseNotRegistered));
    }

    #[test]
    fn mid_exam_drop_moves_the_course_and_counts_no_failure() {
        // Archetype 2 is hard; drop at the inter-exam decision.
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        player.register_course(&factory); // archetype 1
        let hard = player.register_course(&factory); // archetype 2, hard

        let mut answers = ScriptedSource::answers(&[]);
        let mut dialog = ScriptedDialog::always(true);
        let mut sink = RecordingSink::new();

        let outcome = player
            .attempt_exam(hard.course_id, &mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert_eq!(outcome, ExamOutcome::DroppedAfterFirst);
        assert_eq!(player.failed_exams(), 0);
        assert!(!player.can_drop());
        assert_eq!(player.dropped_courses().len(), 1);
        assert_eq!(player.active_courses().len(), 1);
    }

    #[test]
    fn mid_exam_drop_with_spent_option_leaves_the_course_active() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        let first = player.register_course(&factory);
        player.drop_course(first.course_id).unwrap();
        player.register_course(&factory); // re-register the dropped course
        let hard = player.register_course(&factory); // archetype 2, hard

        let mut answers = ScriptedSource::answers(&[]);
        let mut dialog = ScriptedDialog::always(true);
        let mut sink = RecordingSink::new();

        let outcome = player
            .attempt_exam(hard.course_id, &mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert_eq!(outcome, ExamOutcome::DroppedAfterFirst);
        assert!(player.course(hard.course_id).is_some());
        assert!(sink
            .messages()
            .iter()
            .any(|m| m.contains("already used your drop option")));
    }

    #[test]
    fn retake_is_consumed_even_without_an_eligible_course() {
        let mut player = Player::new();
        let mut answers = ScriptedSource::answers(&[]);
        let mut dialog = ScriptedDialog::always(false);
        let mut sink = RecordingSink::new();

        let outcome = player
            .retake_exam(&mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert_eq!(outcome, RetakeOutcome::NoFailedCourses);
        assert!(!player.can_retake());

        let again = player.retake_exam(&mut rng(), &mut answers, &mut dialog, &mut sink);
        assert_eq!(again, Err(ProgressionError::RetakeAlreadyUsed));
    }

    #[test]
    fn retake_targets_the_first_failed_course() {
        let factory = factory();
        let mut player = Player::new();

        pass_one(&mut player, &factory); // archetype 1, passed
        let failed = fail_one(&mut player, &factory); // archetype 2, failed

        let mut answers = ScriptedSource::answers(&["messi"; 20]);
        let mut dialog = ScriptedDialog::always(false);
        let mut sink = RecordingSink::new();

        let outcome = player
            .retake_exam(&mut rng(), &mut answers, &mut dialog, &mut sink)
            .unwrap();
        assert!(matches!(
            outcome,
            RetakeOutcome::Attempted(ExamOutcome::Passed(_))
        ));
        assert!(player.course(failed).unwrap().passed);
        assert_eq!(player.credits(), 6);
        assert!(!player.can_retake());
    }

    #[test]
    fn graduation_requires_empty_dropped_list() {
        let factory = factory();
        let mut player = Player::new();

        let mut last = None;
        for _ in 0..4 {
            last = Some(pass_one(&mut player, &factory));
        }
        assert_eq!(player.credits(), 12);
        assert_eq!(player.evaluate_outcome(), GameOutcome::Graduated);

        // Dropping one of the passed courses blocks graduation twice over:
        // an outstanding dropped course and only 9 credits remain.
        player.drop_course(last.unwrap()).unwrap();
        assert_eq!(player.evaluate_outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn flunk_out_requires_strictly_more_than_two_failures() {
        let factory = CourseFactory::without_questions();
        let mut player = Player::new();

        fail_one(&mut player, &factory);
        fail_one(&mut player, &factory);
        assert_eq!(player.evaluate_outcome(), GameOutcome::InProgress);

        fail_one(&mut player, &factory);
        assert_eq!(player.failed_exams(), 3);
        assert_eq!(player.evaluate_outcome(), GameOutcome::FlunkedOut);
    }
}
