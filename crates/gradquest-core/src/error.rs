//! Engine error types.
//!
//! Precondition violations are surfaced as typed variants so the front-end
//! can match on them instead of string matching. None of these are fatal:
//! the caller reports the message and carries on.

use thiserror::Error;

/// A progression operation's precondition was not met.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    /// The one-shot drop option has already been consumed.
    #[error("you have already used your drop option")]
    DropAlreadyUsed,

    /// The one-shot retake option has already been consumed.
    #[error("you have already used your retake option")]
    RetakeAlreadyUsed,

    /// The referenced course is not in the active course list.
    #[error("course is not in your course list")]
    CourseNotRegistered,
}

/// A session transition was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `start` on a session that already left `NotStarted`.
    #[error("game has already started")]
    AlreadyStarted,

    /// `pause` on a session that is not in progress.
    #[error("game is not in progress, cannot pause")]
    NotInProgress,

    /// `resume` on a session that is not paused.
    #[error("game is not paused, cannot resume")]
    NotPaused,
}
