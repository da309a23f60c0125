//! Live data of one capture session
//!
//! Owns the reference point and both bounded logs. The classifier and the
//! aggregator stay pure; this is the only place that mutates.

use crate::capture::input::types::{PointerSample, RenderStroke};
use crate::config::SessionConfig;
use crate::processing::{classify, compute_stats, BoundedLog, Segment, SessionStats, SkipEvent};

#[derive(Debug, Clone)]
pub struct SessionContext {
    config: SessionConfig,
    last_point: Option<PointerSample>,
    segments: BoundedLog<Segment>,
    skips: BoundedLog<SkipEvent>,
    dropped_samples: u64,
}

impl SessionContext {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            last_point: None,
            segments: BoundedLog::new(config.segment_capacity),
            skips: BoundedLog::new(config.skip_log_capacity),
            dropped_samples: 0,
            config,
        }
    }

    /// Feed one pointer sample.
    ///
    /// Returns the stroke to draw when a segment was recorded. The first
    /// sample after creation or a pointer leave only sets the reference point.
    /// Samples with a non-finite coordinate or timestamp are dropped and never
    /// become the reference.
    pub fn ingest(&mut self, point: PointerSample) -> Option<RenderStroke> {
        if !point.is_finite() {
            self.dropped_samples += 1;
            tracing::trace!(
                "Dropped non-finite sample (x={}, y={}, t={})",
                point.x,
                point.y,
                point.t
            );
            return None;
        }

        let Some(last) = self.last_point else {
            self.last_point = Some(point);
            return None;
        };

        let Some(segment) = classify(&last, &point, self.segments.iter(), &self.config.detector)
        else {
            self.dropped_samples += 1;
            tracing::trace!(
                "Dropped sample with non-increasing timestamp (t={}, last t={})",
                point.t,
                last.t
            );
            return None;
        };

        self.last_point = Some(point);

        if let Some(event) = SkipEvent::from_segment(&segment) {
            tracing::debug!(
                "Skip detected: {} (distance={:.1}px, dt={:.1}ms, at={:.1}ms)",
                event.reason,
                event.distance,
                event.dt,
                event.at
            );
            self.skips.push(event);
        }

        let stroke = RenderStroke {
            from: (last.x, last.y),
            to: (point.x, point.y),
            is_skip: segment.is_skip,
        };
        self.segments.push(segment);

        Some(stroke)
    }

    /// Forget the reference point; recorded segments are kept
    pub fn pointer_leave(&mut self) {
        self.last_point = None;
    }

    pub fn clear(&mut self) {
        self.last_point = None;
        self.segments.clear();
        self.skips.clear();
        self.dropped_samples = 0;
    }

    pub fn stats(&self) -> SessionStats {
        compute_stats(self.segments.iter())
    }

    /// Segments, oldest first
    pub fn segments(&self) -> &BoundedLog<Segment> {
        &self.segments
    }

    /// Recent skips, newest first
    pub fn recent_skips(&self) -> Vec<SkipEvent> {
        self.skips.newest_first().cloned().collect()
    }

    pub fn last_point(&self) -> Option<PointerSample> {
        self.last_point
    }

    /// Samples discarded for non-finite values or non-increasing timestamps
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }
}
