//! # Dispatch Errors
//!
//! Errors raised by observers and commands during a notification pass.
//!
//! Lookups that miss (no observers for a name, no command for a name, removing
//! something that was never registered) are no-ops and never produce an error.
//! The only failures that surface are the ones a handler returns itself, and
//! they propagate out of the pass unchanged.

use thiserror::Error;

/// Errors surfaced while dispatching a notification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A command's execute returned a failure
    #[error("Command for notification '{notification}' failed: {reason}")]
    CommandFailed {
        notification: String,
        reason: String,
    },

    /// An observer's notify method returned a failure
    #[error("Observer for notification '{notification}' failed: {reason}")]
    ObserverFailed {
        notification: String,
        reason: String,
    },

    /// Generic handler failure
    #[error("Handler error: {0}")]
    Handler(String),
}

impl DispatchError {
    pub fn command_failed(notification: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            notification: notification.into(),
            reason: reason.into(),
        }
    }

    pub fn observer_failed(notification: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ObserverFailed {
            notification: notification.into(),
            reason: reason.into(),
        }
    }
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
