//! Permission error type.
//!
//! ```text
//! PermissionError
//!   ├── InvalidMode              mode or umask outside 0..=0o777
//!   ├── AuthenticationRequired   auth enabled, no identity in the context
//!   └── GroupResolution          resolver missing or lookup failed
//! ```
//!
//! All variants are terminal for the operation in progress.

use crate::group::GroupResolutionError;
use std::fmt;
use strata_types::{ErrorCode, InvalidMode};
use thiserror::Error;

/// Which identity source was consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// The authenticated caller of the current request.
    Request,
    /// The process-wide login identity of the service.
    Login,
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Login => f.write_str("login"),
        }
    }
}

/// Failure computing permission state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Mode or umask value rejected.
    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),

    /// Authentication is enabled but the context carries no user.
    #[error("authentication required: no {origin} identity is available")]
    AuthenticationRequired {
        /// The identity source that was empty.
        origin: IdentitySource,
    },

    /// Group resolver could not be created or failed during lookup.
    #[error(transparent)]
    GroupResolution(#[from] GroupResolutionError),
}

impl PermissionError {
    /// Creates an authentication-required error for `origin`.
    #[must_use]
    pub fn authentication_required(origin: IdentitySource) -> Self {
        Self::AuthenticationRequired { origin }
    }
}

impl ErrorCode for PermissionError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidMode(_) => "PERM_INVALID_MODE",
            Self::AuthenticationRequired { .. } => "PERM_AUTHENTICATION_REQUIRED",
            Self::GroupResolution(_) => "PERM_GROUP_RESOLUTION_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
