//! Replay a recorded mouse-move file through a capture session.
//!
//! Usage: `skipscope <mouse-moves.json> [output.json] [config.json]`
//!
//! Prints the export payload to stdout, or writes it to `output.json`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use skipscope_lib::capture::{load_mouse_moves, PointerChannel};
use skipscope_lib::export::write_json;
use skipscope_lib::session::{shared, SessionController};
use skipscope_lib::SessionConfig;

fn main() -> Result<()> {
    skipscope_lib::init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: skipscope <mouse-moves.json> [output.json] [config.json]");
    };
    let output = args.next().map(PathBuf::from);

    let mut config = match args.next() {
        Some(path) => SessionConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => SessionConfig::default(),
    };
    // Replays have no countdown
    config.countdown_secs = 0;

    tracing::info!("Starting skipscope replay v{}", env!("CARGO_PKG_VERSION"));

    let moves = load_mouse_moves(&input)
        .with_context(|| format!("Failed to read mouse moves from {}", input.display()))?;

    let session = shared(SessionController::new(config)?);
    session.lock().start()?;

    let channel = PointerChannel::new(session.clone());
    channel.replay(&moves);

    let payload = session.lock().export_payload();
    let report = session.lock().stop()?;

    match report {
        Some(report) => tracing::info!(
            "Score {} ({} skips over {:.0}px, {:.1} Hz)",
            report.stats.score,
            report.stats.skip_count,
            report.stats.total_distance,
            report.stats.effective_hz
        ),
        None => tracing::warn!("No segments recorded from {}", input.display()),
    }

    match output {
        Some(path) => write_json(&path, &payload)
            .with_context(|| format!("Failed to write payload to {}", path.display()))?,
        None => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    Ok(())
}
