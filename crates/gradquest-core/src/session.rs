//! Whole-game session state machine.
//!
//! Tracks the lifecycle around a run of the game: not started, in
//! progress, paused, ended. Rejected transitions come back as
//! [`SessionError`] values for the front-end to report; none are fatal,
//! and `Ended` is absorbing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Lifecycle status of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Paused,
    Ended,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::NotStarted => write!(f, "Not Started"),
            SessionStatus::InProgress => write!(f, "In Progress"),
            SessionStatus::Paused => write!(f, "Paused"),
            SessionStatus::Ended => write!(f, "Ended"),
        }
    }
}

/// One run of the game, from start through pause/resume to the end.
#[derive(Debug, Clone)]
pub struct GameSession {
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::NotStarted,
            started_at: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Wall-clock time since `start`, if the session has started.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.started_at.map(|t| Utc::now() - t)
    }

    /// Begin the session. Only valid once.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        self.status = SessionStatus::InProgress;
        self.started_at = Some(Utc::now());
        tracing::info!("game started");
        Ok(())
    }

    /// Pause an in-progress session. Pausing anything else is rejected.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(SessionError::NotInProgress);
        }
        self.status = SessionStatus::Paused;
        tracing::info!("game paused");
        Ok(())
    }

    /// Resume a paused session.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Paused {
            return Err(SessionError::NotPaused);
        }
        self.status = SessionStatus::InProgress;
        tracing::info!("game resumed");
        Ok(())
    }

    /// Restart: back to in progress with a fresh timestamp, from any state.
    pub fn restart(&mut self) {
        self.status = SessionStatus::InProgress;
        self.started_at = Some(Utc::now());
        tracing::info!("game restarted");
    }

    /// End the session. Absorbing and idempotent.
    pub fn end(&mut self) {
        self.status = SessionStatus::Ended;
        tracing::info!("game ended");
    }
}
