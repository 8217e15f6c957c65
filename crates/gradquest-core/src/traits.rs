//! Collaborator port definitions between the engine and the front-end.
//!
//! The core never prompts or prints on its own: it produces message
//! content and calls these ports, and the `gradquest-io` crate implements
//! them for a real terminal. Scripted implementations live here as well so
//! tests and benches can replay whole exams deterministically.

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// What the player handed back for a single solicitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Raw answer text; classification (letter, sentinel, invalid) is the
    /// exam engine's job.
    Answer(String),
    /// The player abandoned the exam (dialog dismissed, end of input).
    Cancelled,
}

/// Blocking source of exam answers.
///
/// Called once per solicitation; the engine re-solicits the same question
/// itself when the reply is invalid.
pub trait AnswerSource {
    fn ask(&mut self, prompt: &str, exam_title: &str) -> Reply;
}

/// Blocking yes/no decision point (drop-vs-continue, "take the exam now?").
pub trait ChoiceDialog {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Fire-and-forget notification sink.
///
/// The engine owns the content of every message; rendering belongs to the
/// implementation.
pub trait MessageSink {
    fn notify(&mut self, message: &str);
}

// ---------------------------------------------------------------------------
// Scripted implementations
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of replies; reports `Cancelled` once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    replies: VecDeque<Reply>,
    calls: u32,
}

impl ScriptedSource {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: 0,
        }
    }

    /// Convenience constructor from plain answer strings.
    pub fn answers(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Reply::Answer((*t).to_string())))
    }

    /// Number of solicitations made so far.
    pub fn call_count(&self) -> u32 {
        self.calls
    }
}

impl AnswerSource for ScriptedSource {
    fn ask(&mut self, _prompt: &str, _exam_title: &str) -> Reply {
        self.calls += 1;
        self.replies.pop_front().unwrap_or(Reply::Cancelled)
    }
}

/// Replays a fixed sequence of confirm decisions, then a fallback.
#[derive(Debug)]
pub struct ScriptedDialog {
    decisions: VecDeque<bool>,
    fallback: bool,
}

impl ScriptedDialog {
    pub fn new(decisions: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            fallback,
        }
    }

    /// A dialog that answers the same way every time.
    pub fn always(decision: bool) -> Self {
        Self::new([], decision)
    }
}

impl ChoiceDialog for ScriptedDialog {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.decisions.pop_front().unwrap_or(self.fallback)
    }
}

/// Collects every notification for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl MessageSink for RecordingSink {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn notify(&mut self, _message: &str) {}
}
