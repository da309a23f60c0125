//! Processing module for live pointer streams
//!
//! This module contains the skip classifier, the session statistics fold,
//! and the bounded logs that hold their results.

pub mod aggregator;
pub mod bounded_log;
pub mod classifier;

pub use aggregator::{compute_stats, density_penalty, score, SessionStats};
pub use bounded_log::BoundedLog;
pub use classifier::{classify, percentile, Baseline, Segment, SkipEvent, SkipReason};
