//! Course factory.
//!
//! Cycles deterministically through the four course archetypes as the
//! player registers, attaching each new course's professor and question
//! pool. There is no randomness here: the Nth registration always yields
//! the same archetype.

use crate::model::{Course, Difficulty, Professor, Question};

/// Number of course archetypes in rotation.
pub const ARCHETYPE_COUNT: u32 = 4;

/// Fixed template for one archetype slot.
struct Archetype {
    name: &'static str,
    professor: &'static str,
    difficulty: Difficulty,
}

const ARCHETYPES: [Archetype; ARCHETYPE_COUNT as usize] = [
    Archetype {
        name: "Intro to Software Engineering",
        professor: "Prof. Maplewood",
        difficulty: Difficulty::Easy,
    },
    Archetype {
        name: "Calculus I",
        professor: "Prof. Okafor",
        difficulty: Difficulty::Hard,
    },
    Archetype {
        name: "World History",
        professor: "Prof. Alvarez",
        difficulty: Difficulty::Easy,
    },
    Archetype {
        name: "Organic Chemistry",
        professor: "Prof. Stein",
        difficulty: Difficulty::Hard,
    },
];

/// Deterministic source of new courses.
///
/// Holds one question pool per archetype, built once at startup. An empty
/// pool (missing question file) is playable, just degraded: exams over it
/// score the baseline alone.
pub struct CourseFactory {
    pools: [Vec<Question>; ARCHETYPE_COUNT as usize],
}

impl CourseFactory {
    pub fn new(pools: [Vec<Question>; ARCHETYPE_COUNT as usize]) -> Self {
        Self { pools }
    }

    /// A factory with empty pools for all archetypes.
    pub fn without_questions() -> Self {
        Self::new(Default::default())
    }

    /// Archetype slot for the nth registered course, `1..=4`.
    pub fn archetype_for(sequence_number: u32) -> u32 {
        debug_assert!(sequence_number >= 1, "sequence numbers start at 1");
        ((sequence_number - 1) % ARCHETYPE_COUNT) + 1
    }

    /// Mint the course for the given registration sequence number.
    pub fn next_course(&self, sequence_number: u32) -> Course {
        let archetype = Self::archetype_for(sequence_number);
        let slot = (archetype - 1) as usize;
        let template = &ARCHETYPES[slot];

        Course::new(
            archetype,
            template.name,
            Professor::new(template.professor, template.difficulty),
            self.pools[slot].clone(),
        )
    }
}
