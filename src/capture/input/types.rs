use serde::{Deserialize, Serialize};

/// A single pointer position in the capture surface's local coordinates.
///
/// `t` is a monotonic timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Euclidean distance to another sample, ignoring time
    pub fn distance_to(&self, other: &PointerSample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

/// Recorded mouse move as written by the input tracking channel of a
/// screen recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseMove {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub cursor_id: String,
    #[serde(default)]
    pub active_modifiers: Vec<String>,
    pub process_time_ms: f64,
    #[serde(default)]
    pub unix_time_ms: u64,
}

impl From<&MouseMove> for PointerSample {
    fn from(m: &MouseMove) -> Self {
        PointerSample::new(m.x, m.y, m.process_time_ms)
    }
}

/// Endpoints of an accepted segment plus the flag the renderer uses to
/// pick a stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStroke {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub is_skip: bool,
}
