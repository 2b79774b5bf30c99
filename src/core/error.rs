//! # Core Errors
//!
//! Collaborator failures are converted into one of these kinds where the
//! core calls out. None of them is fatal: each one leaves the last good state
//! in place and turns into an advisory message for the user.
//!
//! "No station offers this fuel" is deliberately absent. It is an ordinary
//! selector outcome (`cheapest` returns `None`) and only unfocuses the map.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Station data could not be fetched or parsed. The previous snapshot stays.
    FetchFailure { cause: String },
    /// No device position. The configured default position was used instead.
    PermissionDenied { cause: String },
}

impl CoreError {
    pub fn fetch_failure(cause: impl Into<String>) -> Self {
        CoreError::FetchFailure {
            cause: cause.into(),
        }
    }

    pub fn permission_denied(cause: impl Into<String>) -> Self {
        CoreError::PermissionDenied {
            cause: cause.into(),
        }
    }

    /// User-facing advisory text.
    pub fn advisory(&self) -> String {
        match self {
            CoreError::FetchFailure { cause } => {
                format!("Couldn't refresh stations ({cause}). Showing previous results.")
            }
            CoreError::PermissionDenied { cause } => {
                format!("Location unavailable ({cause}). Using default position.")
            }
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::FetchFailure { cause } => write!(f, "fetch failure: {cause}"),
            CoreError::PermissionDenied { cause } => write!(f, "permission denied: {cause}"),
        }
    }
}

impl std::error::Error for CoreError {}
