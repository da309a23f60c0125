//! Session statistics and scoring
//!
//! Stats are a pure fold over the segment sequence and are recomputed on
//! demand; nothing here keeps state between calls.

use crate::processing::classifier::Segment;
use serde::{Deserialize, Serialize};

/// Score assigned to a session with no evidence of skipping
pub const PERFECT_SCORE: u32 = 100;

/// Penalty per flagged segment
const SKIP_PENALTY: f64 = 1.8;

/// Densities at or below this many skips per 1000px are treated as noise
const DENSITY_NOISE_FLOOR: f64 = 0.25;

/// Shortest duration reported, keeps rates finite for one-sample sessions
const MIN_SESSION_SECONDS: f64 = 0.001;

/// Point-in-time summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub sample_count: usize,
    pub skip_count: usize,
    /// Pixels
    pub total_distance: f64,
    pub skip_density_per_1000_px: f64,
    /// Pixels per millisecond
    pub avg_speed: f64,
    pub peak_speed: f64,
    /// Milliseconds, over positive-dt segments only
    pub avg_dt: f64,
    pub effective_hz: f64,
    pub session_seconds: f64,
    /// Integer in 0..=100
    pub score: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            sample_count: 0,
            skip_count: 0,
            total_distance: 0.0,
            skip_density_per_1000_px: 0.0,
            avg_speed: 0.0,
            peak_speed: 0.0,
            avg_dt: 0.0,
            effective_hz: 0.0,
            session_seconds: 0.0,
            score: PERFECT_SCORE,
        }
    }
}

/// Piecewise linear penalty on skip density.
///
/// Flat up to 0.25, slope 10 up to 1 (reaching 7.5), slope 16 beyond.
pub fn density_penalty(density: f64) -> f64 {
    if density <= DENSITY_NOISE_FLOOR {
        0.0
    } else if density <= 1.0 {
        (density - DENSITY_NOISE_FLOOR) * 10.0
    } else {
        7.5 + (density - 1.0) * 16.0
    }
}

/// Combine skip count and density into a 0..=100 integer score
pub fn score(skip_count: usize, density: f64) -> u32 {
    (100.0 - skip_count as f64 * SKIP_PENALTY - density_penalty(density))
        .clamp(0.0, 100.0)
        .round() as u32
}

/// Fold the full ordered segment sequence into stats
pub fn compute_stats<'a, I>(segments: I) -> SessionStats
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut sample_count = 0usize;
    let mut skip_count = 0usize;
    let mut total_distance = 0.0;
    let mut speed_sum = 0.0;
    let mut peak_speed = 0.0f64;
    let mut dt_sum = 0.0;
    let mut dt_count = 0usize;
    let mut first_t: Option<f64> = None;
    let mut last_t = 0.0;

    for segment in segments {
        sample_count += 1;
        if segment.is_skip {
            skip_count += 1;
        }
        total_distance += segment.distance;
        speed_sum += segment.speed;
        peak_speed = peak_speed.max(segment.speed);
        if segment.dt > 0.0 {
            dt_sum += segment.dt;
            dt_count += 1;
        }
        first_t.get_or_insert(segment.t);
        last_t = segment.t;
    }

    let Some(first_t) = first_t else {
        return SessionStats::default();
    };

    let skip_density_per_1000_px = if total_distance > 0.0 {
        skip_count as f64 / (total_distance / 1000.0)
    } else {
        0.0
    };

    let avg_dt = if dt_count > 0 {
        dt_sum / dt_count as f64
    } else {
        0.0
    };
    let effective_hz = if avg_dt > 0.0 { 1000.0 / avg_dt } else { 0.0 };

    SessionStats {
        sample_count,
        skip_count,
        total_distance,
        skip_density_per_1000_px,
        avg_speed: speed_sum / sample_count as f64,
        peak_speed,
        avg_dt,
        effective_hz,
        session_seconds: ((last_t - first_t) / 1000.0).max(MIN_SESSION_SECONDS),
        score: score(skip_count, skip_density_per_1000_px),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::classifier::SkipReason;

    fn make_segment(distance: f64, dt: f64, t: f64, is_skip: bool) -> Segment {
        Segment {
            x: 0.0,
            y: 0.0,
            t,
            distance,
            dt,
            speed: distance / dt,
            is_skip,
            reason: is_skip.then_some(SkipReason::DistanceSpike),
        }
    }

    #[test]
    fn test_empty_session_defaults() {
        let stats = compute_stats(&Vec::<Segment>::new());
        assert_eq!(stats.score, 100);
        assert_eq!(stats.sample_count, 0);
        assert_eq!(stats.skip_count, 0);
        assert_eq!(stats.total_distance, 0.0);
        assert_eq!(stats.skip_density_per_1000_px, 0.0);
        assert_eq!(stats.avg_speed, 0.0);
        assert_eq!(stats.peak_speed, 0.0);
        assert_eq!(stats.avg_dt, 0.0);
        assert_eq!(stats.effective_hz, 0.0);
        assert_eq!(stats.session_seconds, 0.0);
    }

    #[test]
    fn test_clean_motion_scores_perfect() {
        let segments: Vec<Segment> = (1..=100)
            .map(|i| make_segment(5.0, 10.0, i as f64 * 10.0, false))
            .collect();

        let stats = compute_stats(&segments);
        assert_eq!(stats.sample_count, 100);
        assert_eq!(stats.skip_count, 0);
        assert_eq!(stats.total_distance, 500.0);
        assert!((stats.avg_speed - 0.5).abs() < 1e-12);
        assert!((stats.peak_speed - 0.5).abs() < 1e-12);
        assert_eq!(stats.avg_dt, 10.0);
        assert_eq!(stats.effective_hz, 100.0);
        assert!((stats.session_seconds - 0.99).abs() < 1e-9);
        assert_eq!(stats.score, 100);
    }

    #[test]
    fn test_single_segment_duration_floor() {
        let stats = compute_stats(&[make_segment(5.0, 10.0, 10.0, false)]);
        assert_eq!(stats.session_seconds, 0.001);
    }

    #[test]
    fn test_zero_distance_segments_count_toward_speed() {
        let segments = vec![
            make_segment(0.0, 10.0, 10.0, false),
            make_segment(10.0, 10.0, 20.0, false),
        ];
        let stats = compute_stats(&segments);
        assert!((stats.avg_speed - 0.5).abs() < 1e-12);
        assert!((stats.peak_speed - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_and_score() {
        // 2 skips over 1000px -> density 2.0
        let mut segments: Vec<Segment> = (1..=8)
            .map(|i| make_segment(100.0, 10.0, i as f64 * 10.0, false))
            .collect();
        segments.push(make_segment(100.0, 10.0, 90.0, true));
        segments.push(make_segment(100.0, 10.0, 100.0, true));

        let stats = compute_stats(&segments);
        assert_eq!(stats.skip_count, 2);
        assert!((stats.skip_density_per_1000_px - 2.0).abs() < 1e-12);
        // 100 - 3.6 - (7.5 + 16) = 72.9 -> 73
        assert_eq!(stats.score, 73);
    }

    #[test]
    fn test_density_penalty_breakpoints() {
        assert_eq!(density_penalty(0.0), 0.0);
        assert_eq!(density_penalty(0.25), 0.0);
        assert!((density_penalty(1.0) - 7.5).abs() < 1e-12);

        let eps = 1e-9;
        assert!((density_penalty(0.25 + eps) - density_penalty(0.25)).abs() < 1e-6);
        assert!((density_penalty(1.0 + eps) - density_penalty(1.0)).abs() < 1e-6);
        assert!((density_penalty(2.0) - 23.5).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(score(0, 0.0), 100);
        assert_eq!(score(1000, 50.0), 0);

        for skips in 0..80 {
            for density in [0.0, 0.1, 0.5, 1.0, 3.0, 10.0] {
                let s = score(skips, density);
                assert!(s <= 100);
            }
        }
    }
}
