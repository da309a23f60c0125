//! One-second countdown driver
//!
//! The ticker runs on the tokio runtime and holds the shared controller
//! only for the duration of each tick, never across an await.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::{task::JoinHandle, time};

use super::controller::SessionController;
use super::state::SessionStatus;

/// Controller handle shared between the host's event callbacks and the ticker
pub type SharedSession = Arc<Mutex<SessionController>>;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub fn shared(controller: SessionController) -> SharedSession {
    Arc::new(Mutex::new(controller))
}

/// Spawn a task that ticks the countdown every second until the controller
/// leaves the countdown state (capture started, cancelled or reset).
///
/// The ticker is bound to the countdown running when it is spawned. Once that
/// countdown is cancelled or replaced by a restart, the ticker exits at its
/// next tick without touching the new countdown.
pub fn spawn_countdown(session: SharedSession) -> JoinHandle<SessionStatus> {
    let generation = session.lock().state().countdown_generation;

    tokio::spawn(async move {
        let mut interval = time::interval(TICK_INTERVAL);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let finished = {
                let mut controller = session.lock();
                if !controller.state().is_counting_down(generation) {
                    tracing::debug!(
                        "Countdown ticker {} exiting ({})",
                        generation,
                        controller.status()
                    );
                    Some(controller.status())
                } else {
                    match controller.tick() {
                        Ok(SessionStatus::Countdown) => None,
                        Ok(status) => Some(status),
                        Err(e) => {
                            tracing::warn!("Countdown tick failed: {}", e);
                            Some(controller.status())
                        }
                    }
                }
            };

            if let Some(status) = finished {
                return status;
            }
        }
    })
}
