//! Group resolution boundary.
//!
//! [`GroupResolver`] maps a user name to its ordered groups. The first
//! group is the user's primary group and becomes the owning group of
//! newly created entries.
//!
//! Implementations live in `strata-runtime` (identity mapping, static
//! tables, caching) and are selected at startup by identifier.

use strata_types::ErrorCode;
use thiserror::Error;

/// Maps a user to its groups.
///
/// Lookups may be slow or networked; callers treat them as blocking.
/// Retry policy, if any, belongs to the implementation.
///
/// # Example
///
/// ```
/// use strata_auth::{GroupResolutionError, GroupResolver};
///
/// struct Wheel;
///
/// impl GroupResolver for Wheel {
///     fn groups(&self, _user: &str) -> Result<Vec<String>, GroupResolutionError> {
///         Ok(vec!["wheel".to_string(), "staff".to_string()])
///     }
/// }
///
/// assert_eq!(Wheel.primary_group("root").unwrap(), Some("wheel".to_string()));
/// ```
pub trait GroupResolver: Send + Sync {
    /// Returns the groups of `user`, primary group first.
    ///
    /// An empty list is valid and means "no known group".
    ///
    /// # Errors
    ///
    /// Returns [`GroupResolutionError`] if the lookup fails.
    fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError>;

    /// Returns the primary group of `user`, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`groups`](Self::groups) failures.
    fn primary_group(&self, user: &str) -> Result<Option<String>, GroupResolutionError> {
        Ok(self.groups(user)?.into_iter().next())
    }
}

/// Group resolver creation or lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupResolutionError {
    /// No factory registered under the configured identifier.
    #[error("unknown group mapping provider '{provider}'")]
    UnknownProvider {
        /// The configured identifier.
        provider: String,
    },

    /// Provider exists but its configuration is unusable.
    #[error("group mapping provider '{provider}' is misconfigured: {reason}")]
    Misconfigured {
        /// The provider identifier.
        provider: String,
        /// What is wrong.
        reason: String,
    },

    /// Lookup for a user failed.
    #[error("failed to resolve groups for user '{user}': {reason}")]
    Lookup {
        /// The user being resolved.
        user: String,
        /// Backend-specific failure description.
        reason: String,
    },
}

impl GroupResolutionError {
    /// Creates a lookup error.
    pub fn lookup(user: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            user: user.into(),
            reason: reason.into(),
        }
    }

    /// Creates a misconfiguration error.
    pub fn misconfigured(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Misconfigured {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorCode for GroupResolutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownProvider { .. } => "GROUP_UNKNOWN_PROVIDER",
            Self::Misconfigured { .. } => "GROUP_MISCONFIGURED",
            Self::Lookup { .. } => "GROUP_LOOKUP_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_types::assert_error_codes;

    struct Fixed(Vec<&'static str>);

    impl GroupResolver for Fixed {
        fn groups(&self, _user: &str) -> Result<Vec<String>, GroupResolutionError> {
            Ok(self.0.iter().map(|g| (*g).to_string()).collect())
        }
    }

    #[test]
    fn primary_group_is_first() {
        let resolver = Fixed(vec!["eng", "staff"]);
        assert_eq!(
            resolver.primary_group("alice").expect("lookup"),
            Some("eng".to_string())
        );
    }

    #[test]
    fn primary_group_of_empty_list_is_none() {
        let resolver = Fixed(vec![]);
        assert_eq!(resolver.primary_group("alice").expect("lookup"), None);
    }

    #[test]
    fn lookup_error_display() {
        let err = GroupResolutionError::lookup("bob", "directory unreachable");
        let msg = err.to_string();
        assert!(msg.contains("bob"), "got: {msg}");
        assert!(msg.contains("directory unreachable"), "got: {msg}");
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                GroupResolutionError::UnknownProvider {
                    provider: "ldap".into(),
                },
                GroupResolutionError::misconfigured("static", "empty table"),
                GroupResolutionError::lookup("bob", "timeout"),
            ],
            "GROUP_",
        );
    }
}
