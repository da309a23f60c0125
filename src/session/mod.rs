//! Capture session lifecycle and live state
//!
//! `SessionController` drives the idle/countdown/capturing state machine and
//! owns the `SessionContext` holding the recorded segments.

pub mod context;
pub mod controller;
pub mod error;
pub mod state;
pub mod ticker;

pub use context::SessionContext;
pub use controller::SessionController;
pub use error::{SessionError, SessionResult};
pub use state::{SessionState, SessionStatus};
pub use ticker::{shared, spawn_countdown, SharedSession};
