//! Session lifecycle: idle -> countdown -> capturing -> idle
//!
//! The controller is the single writer of the live session. Pointer events
//! are only classified while capturing; stopping freezes a `SessionReport`.

use chrono::Utc;
use uuid::Uuid;

use crate::capture::input::types::{PointerSample, RenderStroke};
use crate::config::SessionConfig;
use crate::export::{ExportPayload, SessionReport};
use crate::processing::{Segment, SessionStats, SkipEvent};

use super::context::SessionContext;
use super::error::{SessionError, SessionResult};
use super::state::{SessionState, SessionStatus};

#[derive(Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    state: SessionState,
    context: SessionContext,
    last_report: Option<SessionReport>,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self {
            context: SessionContext::new(config.clone()),
            config,
            state: SessionState::new(),
            last_report: None,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Begin the countdown; the live session is cleared.
    ///
    /// With a zero-second countdown capturing starts immediately.
    pub fn start(&mut self) -> SessionResult<SessionStatus> {
        if self.state.status != SessionStatus::Idle {
            return Err(SessionError::InvalidTransition {
                state: self.state.status,
                action: "start",
            });
        }

        self.context.clear();

        if self.config.countdown_secs == 0 {
            self.begin_capture();
        } else {
            self.state.begin_countdown(self.config.countdown_secs);
            tracing::info!("Countdown started ({}s)", self.config.countdown_secs);
        }

        Ok(self.state.status)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> SessionResult<SessionStatus> {
        if self.state.status != SessionStatus::Countdown {
            return Err(SessionError::InvalidTransition {
                state: self.state.status,
                action: "tick",
            });
        }

        if self.state.tick() {
            self.begin_capture();
        } else {
            tracing::debug!("Countdown: {}s remaining", self.state.countdown_remaining);
        }

        Ok(self.state.status)
    }

    /// Abort a running countdown
    pub fn cancel(&mut self) -> SessionResult<()> {
        if self.state.status != SessionStatus::Countdown {
            return Err(SessionError::InvalidTransition {
                state: self.state.status,
                action: "cancel",
            });
        }

        self.state.cancel();
        tracing::info!("Countdown cancelled");
        Ok(())
    }

    /// Stop capturing. Returns the frozen report when at least one segment
    /// was recorded.
    pub fn stop(&mut self) -> SessionResult<Option<SessionReport>> {
        if self.state.status != SessionStatus::Capturing {
            return Err(SessionError::InvalidTransition {
                state: self.state.status,
                action: "stop",
            });
        }

        self.state.stop();
        self.context.pointer_leave();

        if self.context.segments().is_empty() {
            tracing::info!("Capture stopped with no segments; no report generated");
            return Ok(None);
        }

        let report = SessionReport {
            session_id: self.state.session_id,
            started_at: self.state.started_at,
            generated_at: Utc::now(),
            stats: self.context.stats(),
            recent_skips: self.context.recent_skips(),
        };

        tracing::info!(
            "Capture stopped (segments={}, skips={}, score={}, dropped={})",
            report.stats.sample_count,
            report.stats.skip_count,
            report.stats.score,
            self.context.dropped_samples()
        );

        self.last_report = Some(report.clone());
        Ok(Some(report))
    }

    /// Return to idle and discard the live session. Issued reports are kept.
    pub fn reset(&mut self) {
        self.state.cancel();
        self.context.clear();
        tracing::info!("Session reset");
    }

    /// Deliver a pointer position. Ignored unless capturing.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<RenderStroke> {
        if !self.state.is_capturing() {
            tracing::trace!("Ignoring pointer move while {}", self.state.status);
            return None;
        }
        self.context.ingest(sample)
    }

    /// The pointer left the capture surface
    pub fn pointer_leave(&mut self) {
        self.context.pointer_leave();
    }

    pub fn stats(&self) -> SessionStats {
        self.context.stats()
    }

    pub fn recent_skips(&self) -> Vec<SkipEvent> {
        self.context.recent_skips()
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.context.segments().to_vec()
    }

    pub fn last_report(&self) -> Option<&SessionReport> {
        self.last_report.as_ref()
    }

    /// Snapshot of the live session. After a stop this still describes the
    /// capture that just ended, until the next start or reset.
    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            exported_at: Utc::now(),
            session_id: self.state.session_id,
            started_at: self.state.started_at,
            stats: self.context.stats(),
            recent_skips: self.context.recent_skips(),
            segments: self.segments(),
        }
    }

    fn begin_capture(&mut self) {
        let session_id = Uuid::new_v4();
        self.context.clear();
        self.state.begin_capture(session_id, Utc::now());
        tracing::info!("Capture started (session={})", session_id);
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self {
            context: SessionContext::new(SessionConfig::default()),
            config: SessionConfig::default(),
            state: SessionState::new(),
            last_report: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capturing_controller() -> SessionController {
        let config = SessionConfig {
            countdown_secs: 0,
            ..Default::default()
        };
        let mut controller = SessionController::new(config).unwrap();
        controller.start().unwrap();
        controller
    }

    /// 4 normal, spike, 3 normal, spike, 1 normal
    fn record_ten_segments_with_two_skips(controller: &mut SessionController) {
        let mut x = 0.0;
        let mut t = 0.0;
        controller.pointer_move(PointerSample::new(x, 0.0, t));
        for step in 0..10 {
            let (dx, dt) = if step == 4 || step == 8 {
                (500.0, 5.0)
            } else {
                (5.0, 10.0)
            };
            x += dx;
            t += dt;
            controller.pointer_move(PointerSample::new(x, 0.0, t));
        }
    }

    #[test]
    fn test_countdown_flow() {
        let mut controller = SessionController::default();
        assert_eq!(controller.start().unwrap(), SessionStatus::Countdown);
        assert_eq!(controller.tick().unwrap(), SessionStatus::Countdown);
        assert_eq!(controller.tick().unwrap(), SessionStatus::Countdown);
        assert_eq!(controller.tick().unwrap(), SessionStatus::Capturing);
        assert!(controller.state().session_id.is_some());
    }

    #[test]
    fn test_no_classification_outside_capturing() {
        let mut controller = SessionController::default();
        assert!(controller.pointer_move(PointerSample::new(0.0, 0.0, 0.0)).is_none());
        assert!(controller.pointer_move(PointerSample::new(5.0, 0.0, 10.0)).is_none());

        controller.start().unwrap();
        assert!(controller.pointer_move(PointerSample::new(10.0, 0.0, 20.0)).is_none());
        assert!(controller.segments().is_empty());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut controller = SessionController::default();
        controller.start().unwrap();
        controller.cancel().unwrap();
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(controller.last_report().is_none());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut controller = SessionController::default();
        assert!(matches!(
            controller.stop(),
            Err(SessionError::InvalidTransition { action: "stop", .. })
        ));
        assert!(controller.cancel().is_err());
        assert!(controller.tick().is_err());

        controller.start().unwrap();
        assert!(controller.start().is_err());
        assert!(controller.stop().is_err());
    }

    #[test]
    fn test_stop_without_segments_has_no_report() {
        let mut controller = capturing_controller();
        controller.pointer_move(PointerSample::new(0.0, 0.0, 0.0));
        assert!(controller.stop().unwrap().is_none());
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(controller.last_report().is_none());
    }

    #[test]
    fn test_stop_generates_report() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);

        let report = controller.stop().unwrap().unwrap();
        assert_eq!(report.stats.sample_count, 10);
        assert_eq!(report.stats.skip_count, 2);
        assert_eq!(report.recent_skips.len(), 2);
        assert!(report.recent_skips[0].at > report.recent_skips[1].at);
        assert_eq!(controller.last_report(), Some(&report));
        assert_eq!(controller.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_report_is_frozen() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);
        let report = controller.stop().unwrap().unwrap();
        let snapshot = report.clone();

        // A new session mutates the live data
        controller.start().unwrap();
        record_ten_segments_with_two_skips(&mut controller);
        controller.pointer_leave();
        record_ten_segments_with_two_skips(&mut controller);
        assert_eq!(controller.segments().len(), 20);
        assert_ne!(controller.stats(), snapshot.stats);

        assert_eq!(report, snapshot);
        assert_eq!(controller.last_report(), Some(&snapshot));

        controller.reset();
        assert_eq!(controller.last_report(), Some(&snapshot));
    }

    #[test]
    fn test_start_clears_previous_session() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);
        controller.stop().unwrap();

        controller.start().unwrap();
        assert!(controller.segments().is_empty());
        assert_eq!(controller.stats(), SessionStats::default());
    }

    #[test]
    fn test_pointer_leave_forces_new_reference() {
        let mut controller = capturing_controller();
        controller.pointer_move(PointerSample::new(0.0, 0.0, 0.0));
        controller.pointer_move(PointerSample::new(5.0, 0.0, 10.0));

        controller.pointer_leave();
        assert!(controller.pointer_move(PointerSample::new(800.0, 800.0, 20.0)).is_none());
        assert!(controller.pointer_move(PointerSample::new(805.0, 800.0, 30.0)).is_some());
        assert_eq!(controller.segments().len(), 2);
    }

    #[test]
    fn test_export_payload_contents() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);

        let payload = controller.export_payload();
        assert_eq!(payload.segments.len(), 10);
        assert_eq!(payload.recent_skips.len(), 2);
        assert_eq!(payload.stats.skip_count, 2);
        assert_eq!(payload.session_id, controller.state().session_id);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["segments"][4]["isSkip"], true);
        assert_eq!(value["segments"][4]["reason"], "distance spike");
        assert!(value["segments"][0].get("reason").is_none());
    }

    #[test]
    fn test_export_after_empty_capture_uses_its_own_id() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);
        let first = controller.stop().unwrap().unwrap();
        assert!(first.session_id.is_some());
        assert!(first.started_at.is_some());

        controller.start().unwrap();
        let second_id = controller.state().session_id;
        assert!(controller.stop().unwrap().is_none());

        let payload = controller.export_payload();
        assert_eq!(payload.session_id, second_id);
        assert_ne!(payload.session_id, first.session_id);
        assert_eq!(payload.started_at, controller.state().started_at);
        assert!(payload.segments.is_empty());
    }

    #[test]
    fn test_export_after_stop_describes_finished_capture() {
        let mut controller = capturing_controller();
        record_ten_segments_with_two_skips(&mut controller);
        let report = controller.stop().unwrap().unwrap();

        let payload = controller.export_payload();
        assert_eq!(payload.session_id, report.session_id);
        assert_eq!(payload.started_at, report.started_at);
        assert_eq!(payload.stats, report.stats);

        controller.reset();
        assert!(controller.export_payload().session_id.is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SessionConfig {
            skip_log_capacity: 0,
            ..Default::default()
        };
        assert!(SessionController::new(config).is_err());
    }
}
