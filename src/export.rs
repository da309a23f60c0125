//! Structured session payloads for export
//!
//! Both payloads are plain owned data. A `SessionReport` is built once at
//! stop time and never touched again, so later activity in the live session
//! cannot alter it.

use crate::processing::{Segment, SessionStats, SkipEvent};
use crate::session::error::SessionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Frozen summary issued when a capture session stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub generated_at: DateTime<Utc>,
    pub stats: SessionStats,
    /// Newest first
    pub recent_skips: Vec<SkipEvent>,
}

/// Full dump of the live session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub exported_at: DateTime<Utc>,
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub stats: SessionStats,
    /// Newest first
    pub recent_skips: Vec<SkipEvent>,
    /// Oldest first
    pub segments: Vec<Segment>,
}

/// Write any payload as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> SessionResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, data)?;
    tracing::info!("Wrote session payload to {}", path.display());
    Ok(())
}

/// Read a payload previously written with `write_json`
pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> SessionResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
