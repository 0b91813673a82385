//! Common error types used across the workspace.
//!
//! The taxonomy follows the three failure classes every user action can hit:
//! local validation (rejected before any network call), transport failure,
//! and an application-level `success: false` reply from the backend.

/// Top-level error for any dashboard operation.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A local precondition failed; no request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never completed (connection refused, DNS, decode, ...).
    #[error("cannot reach the monitor backend: {message}")]
    Transport { message: String },

    /// The backend answered `success: false`; the message is surfaced verbatim.
    #[error("{message}")]
    Backend { message: String },
}

impl MonitorError {
    /// Build a transport error from any displayable source.
    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: source.to_string(),
        }
    }

    /// Build a backend error, substituting a generic message when the
    /// reply carried no error string.
    #[must_use]
    pub fn backend(message: Option<String>) -> Self {
        Self::Backend {
            message: message.unwrap_or_else(|| "unspecified backend error".to_string()),
        }
    }
}

/// Local validation failures, checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Relay editing is blocked while the system is running.
    #[error("cannot modify relays while the system is running")]
    SystemRunning,

    /// Start requires at least one selected relay.
    #[error("select at least one relay before starting the system")]
    EmptySelection,

    /// Per-relay cycle must be at least one second.
    #[error("relay cycle (\u{394}t) must be at least 1 second")]
    CycleTooShort,

    /// System-wide cycle must be at least one second.
    #[error("total cycle (T) must be at least 1 second")]
    TotalCycleTooShort,

    /// Relay deletion must be explicitly confirmed first.
    #[error("relay deletion requires confirmation")]
    ConfirmationRequired,
}
