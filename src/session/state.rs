use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Countdown,
    Capturing,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::Countdown => write!(f, "counting down"),
            SessionStatus::Capturing => write!(f, "capturing"),
        }
    }
}

/// Lifecycle state of the capture session, independent of the recorded data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: SessionStatus,
    pub session_id: Option<Uuid>,
    /// Whole seconds left before capturing begins
    pub countdown_remaining: u32,
    /// When capturing began; kept after stop until the next start
    pub started_at: Option<DateTime<Utc>>,
    /// Bumped on every countdown start and cancel so stale tickers can tell
    /// their countdown is gone
    pub countdown_generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_countdown(&mut self, seconds: u32) {
        *self = Self {
            status: SessionStatus::Countdown,
            countdown_remaining: seconds,
            countdown_generation: self.countdown_generation.wrapping_add(1),
            ..Self::default()
        };
    }

    /// Count one second down. Returns true once the countdown has elapsed.
    pub fn tick(&mut self) -> bool {
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        self.countdown_remaining == 0
    }

    pub fn begin_capture(&mut self, session_id: Uuid, started_at: DateTime<Utc>) {
        *self = Self {
            status: SessionStatus::Capturing,
            session_id: Some(session_id),
            countdown_remaining: 0,
            started_at: Some(started_at),
            countdown_generation: self.countdown_generation,
        };
    }

    /// Leave capturing but keep the identity of the finished capture
    pub fn stop(&mut self) {
        self.status = SessionStatus::Idle;
        self.countdown_remaining = 0;
    }

    pub fn cancel(&mut self) {
        *self = Self {
            countdown_generation: self.countdown_generation.wrapping_add(1),
            ..Self::default()
        };
    }

    /// True while the countdown started as `generation` is still running
    pub fn is_counting_down(&self, generation: u64) -> bool {
        self.status == SessionStatus::Countdown && self.countdown_generation == generation
    }

    pub fn is_capturing(&self) -> bool {
        self.status == SessionStatus::Capturing
    }
}
