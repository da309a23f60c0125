//! Errors raised by the session surface
//!
//! Classification and aggregation never fail; only lifecycle misuse, config
//! loading and export writing produce errors.

use crate::session::state::SessionStatus;
use thiserror::Error;

/// Errors that can occur while driving a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: SessionStatus,
        action: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
