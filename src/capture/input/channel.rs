use crate::capture::input::types::{MouseMove, PointerSample, RenderStroke};
use crate::session::error::SessionResult;
use crate::session::ticker::SharedSession;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Entry point for host pointer callbacks.
///
/// Stamps events with process time relative to the channel's start and
/// forwards them to the shared session. Cloning yields another handle to the
/// same session and counters.
#[derive(Clone)]
pub struct PointerChannel {
    session: SharedSession,
    start_time: Instant,
    moves_delivered: Arc<AtomicU64>,
    strokes_emitted: Arc<AtomicU64>,
}

impl PointerChannel {
    pub fn new(session: SharedSession) -> Self {
        Self {
            session,
            start_time: Instant::now(),
            moves_delivered: Arc::new(AtomicU64::new(0)),
            strokes_emitted: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    fn process_time_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }

    /// Pointer moved; timestamped now
    pub fn on_move(&self, x: f64, y: f64) -> Option<RenderStroke> {
        self.on_move_at(PointerSample::new(x, y, self.process_time_ms()))
    }

    /// Pointer moved with a host-provided timestamp (ms)
    pub fn on_move_at(&self, sample: PointerSample) -> Option<RenderStroke> {
        self.moves_delivered.fetch_add(1, Ordering::Relaxed);
        let stroke = self.session.lock().pointer_move(sample);
        if stroke.is_some() {
            self.strokes_emitted.fetch_add(1, Ordering::Relaxed);
        }
        stroke
    }

    /// Pointer left the capture surface
    pub fn on_leave(&self) {
        self.session.lock().pointer_leave();
    }

    /// Feed a recorded mouse-move sequence, returning the strokes produced
    pub fn replay(&self, moves: &[MouseMove]) -> Vec<RenderStroke> {
        let strokes: Vec<RenderStroke> = moves
            .iter()
            .filter_map(|m| self.on_move_at(PointerSample::from(m)))
            .collect();

        tracing::info!(
            "Replayed {} mouse moves ({} strokes)",
            moves.len(),
            strokes.len()
        );
        strokes
    }

    pub fn moves_delivered(&self) -> u64 {
        self.moves_delivered.load(Ordering::Relaxed)
    }

    pub fn strokes_emitted(&self) -> u64 {
        self.strokes_emitted.load(Ordering::Relaxed)
    }
}

/// Load a recorded `*-mouse-moves.json` file
pub fn load_mouse_moves(path: &Path) -> SessionResult<Vec<MouseMove>> {
    let content = std::fs::read_to_string(path)?;
    let moves: Vec<MouseMove> = serde_json::from_str(&content)?;
    tracing::debug!("Loaded {} mouse moves from {}", moves.len(), path.display());
    Ok(moves)
}
