//! Skipscope - streaming pointer skip detection and session scoring.
//!
//! Pointer samples are classified one by one against an adaptive baseline
//! taken from the trailing window of earlier segments. A capture session
//! folds its segments into statistics and a 0-100 quality score, and
//! freezes a report when it stops.

pub mod capture;
pub mod config;
pub mod export;
pub mod processing;
pub mod session;

pub use capture::{PointerChannel, PointerSample, RenderStroke};
pub use config::{DetectorConfig, SessionConfig};
pub use export::{ExportPayload, SessionReport};
pub use processing::{Segment, SessionStats, SkipEvent, SkipReason};
pub use session::{SessionController, SessionError, SessionResult, SessionStatus};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skipscope=debug,skipscope_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
