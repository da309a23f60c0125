//! Segment classification for live pointer streams
//!
//! Every accepted pair of consecutive samples becomes a `Segment`. Whether
//! a segment is a skip (a coordinate jump that the pointer did not actually
//! travel) is decided against adaptive baselines taken from the trailing
//! window of earlier segments, so a jittery mouse and a slow trackpad are
//! each judged against their own cadence.

use crate::capture::input::types::PointerSample;
use crate::config::DetectorConfig;
use serde::{Deserialize, Serialize};

/// Why a segment was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Large jump within a very small elapsed time
    #[serde(rename = "distance spike")]
    DistanceSpike,
    /// Stall followed by a jump larger than the baseline
    #[serde(rename = "time gap + jump")]
    TimeGapJump,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DistanceSpike => write!(f, "distance spike"),
            SkipReason::TimeGapJump => write!(f, "time gap + jump"),
        }
    }
}

/// Movement between two consecutive accepted samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// End position X
    pub x: f64,
    /// End position Y
    pub y: f64,
    /// End timestamp in milliseconds
    pub t: f64,
    /// Pixels travelled since the previous sample
    pub distance: f64,
    /// Milliseconds since the previous sample, always > 0
    pub dt: f64,
    /// Pixels per millisecond
    pub speed: f64,
    pub is_skip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

/// Entry of the recent skip log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipEvent {
    pub at: f64,
    pub distance: f64,
    pub dt: f64,
    pub speed: f64,
    pub reason: SkipReason,
}

impl SkipEvent {
    /// Build the log entry for a flagged segment
    pub fn from_segment(segment: &Segment) -> Option<Self> {
        let reason = segment.reason?;
        Some(Self {
            at: segment.t,
            distance: segment.distance,
            dt: segment.dt,
            speed: segment.speed,
            reason,
        })
    }
}

/// Percentile by nearest-lower rank over a copy of `values`.
///
/// Index is `floor(p * (n - 1))` clamped into range; empty input yields 0.
pub fn percentile(mut values: Vec<f64>, p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let last = values.len() - 1;
    let idx = (p * last as f64).floor();
    let idx = if idx.is_nan() || idx < 0.0 {
        0
    } else {
        (idx as usize).min(last)
    };
    values[idx]
}

/// Adaptive reference values computed from the trailing window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Baseline {
    /// p95 of positive distances, 0 when none
    pub distance: f64,
    /// p95 of positive dt values, 0 when none
    pub dt: f64,
}

impl Baseline {
    /// Compute the baseline over the most recent `config.window_size`
    /// segments of `prior` (ordered oldest first).
    pub fn from_window<'a, I>(prior: I, config: &DetectorConfig) -> Self
    where
        I: IntoIterator<Item = &'a Segment>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut distances = Vec::with_capacity(config.window_size);
        let mut dts = Vec::with_capacity(config.window_size);

        for segment in prior.into_iter().rev().take(config.window_size) {
            if segment.distance > 0.0 {
                distances.push(segment.distance);
            }
            if segment.dt > 0.0 {
                dts.push(segment.dt);
            }
        }

        Self {
            distance: percentile(distances, config.percentile),
            dt: percentile(dts, config.percentile),
        }
    }
}

/// Large jump within a very small elapsed time
pub fn is_distance_spike(
    distance: f64,
    dt: f64,
    baseline: &Baseline,
    config: &DetectorConfig,
) -> bool {
    baseline.distance > 0.0
        && distance > baseline.distance * config.spike_distance_multiplier
        && dt < config.spike_max_dt_ms
}

/// Long stall followed by a jump above both the fixed floor and the baseline
pub fn is_gap_jump(
    distance: f64,
    dt: f64,
    baseline: &Baseline,
    config: &DetectorConfig,
) -> bool {
    let min_jump = config
        .gap_min_distance_px
        .max(baseline.distance * config.gap_distance_multiplier);

    baseline.dt > 0.0 && dt > baseline.dt * config.gap_dt_multiplier && distance > min_jump
}

/// Classify the movement from `last` to `point`.
///
/// Returns `None` when `point` is not strictly later than `last`; such
/// samples carry no usable timing and must not advance the reference point.
pub fn classify<'a, I>(
    last: &PointerSample,
    point: &PointerSample,
    prior: I,
    config: &DetectorConfig,
) -> Option<Segment>
where
    I: IntoIterator<Item = &'a Segment>,
    I::IntoIter: DoubleEndedIterator,
{
    let dt = point.t - last.t;
    // Also rejects NaN timestamps
    if !(dt > 0.0) {
        return None;
    }

    let distance = last.distance_to(point);
    let speed = distance / dt;

    let baseline = Baseline::from_window(prior, config);
    let spike = is_distance_spike(distance, dt, &baseline, config);
    let gap = is_gap_jump(distance, dt, &baseline, config);

    let reason = if spike {
        Some(SkipReason::DistanceSpike)
    } else if gap {
        Some(SkipReason::TimeGapJump)
    } else {
        None
    };

    Some(Segment {
        x: point.x,
        y: point.y,
        t: point.t,
        distance,
        dt,
        speed,
        is_skip: reason.is_some(),
        reason,
    })
}
