//! Tunable detector thresholds and session limits

use crate::session::error::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds used by the segment classifier.
///
/// The defaults are empirical and should be kept for comparable scores
/// across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Number of trailing segments used for the adaptive baseline
    pub window_size: usize,
    /// Percentile (0..=1) taken over the trailing window
    pub percentile: f64,
    /// Distance must exceed p95 distance times this to count as a spike
    pub spike_distance_multiplier: f64,
    /// Spikes only count when the elapsed time is below this (ms)
    pub spike_max_dt_ms: f64,
    /// Gap must exceed p95 dt times this
    pub gap_dt_multiplier: f64,
    /// Fixed floor for the jump following a gap (px)
    pub gap_min_distance_px: f64,
    /// Jump following a gap must exceed p95 distance times this
    pub gap_distance_multiplier: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 250,
            percentile: 0.95,
            spike_distance_multiplier: 2.2,
            spike_max_dt_ms: 25.0,
            gap_dt_multiplier: 1.8,
            gap_min_distance_px: 12.0,
            gap_distance_multiplier: 1.1,
        }
    }
}

/// Limits and timings for a capture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Maximum number of segments retained; oldest are evicted first
    pub segment_capacity: usize,
    /// Maximum number of recent skip events retained
    pub skip_log_capacity: usize,
    /// Countdown length before capturing starts (seconds)
    pub countdown_secs: u32,
    pub detector: DetectorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            segment_capacity: 12_000,
            skip_log_capacity: 8,
            countdown_secs: 3,
            detector: DetectorConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SessionResult<()> {
        if self.segment_capacity == 0 {
            return Err(SessionError::ConfigurationError(
                "segmentCapacity must be greater than zero".to_string(),
            ));
        }
        if self.skip_log_capacity == 0 {
            return Err(SessionError::ConfigurationError(
                "skipLogCapacity must be greater than zero".to_string(),
            ));
        }

        let d = &self.detector;
        if d.window_size == 0 {
            return Err(SessionError::ConfigurationError(
                "detector.windowSize must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&d.percentile) {
            return Err(SessionError::ConfigurationError(format!(
                "detector.percentile must be within 0..=1, got {}",
                d.percentile
            )));
        }

        let positive = [
            ("spikeDistanceMultiplier", d.spike_distance_multiplier),
            ("spikeMaxDtMs", d.spike_max_dt_ms),
            ("gapDtMultiplier", d.gap_dt_multiplier),
            ("gapDistanceMultiplier", d.gap_distance_multiplier),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SessionError::ConfigurationError(format!(
                    "detector.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if d.gap_min_distance_px < 0.0 {
            return Err(SessionError::ConfigurationError(format!(
                "detector.gapMinDistancePx must not be negative, got {}",
                d.gap_min_distance_px
            )));
        }

        Ok(())
    }
}
