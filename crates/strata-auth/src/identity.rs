//! Identity sources consulted during owner resolution.
//!
//! Two sources exist, with different sharing rules:
//!
//! | Source | Trait | Scope |
//! |--------|-------|-------|
//! | Authenticated caller | [`AuthContext`] | One request; passed explicitly |
//! | Service login | [`LoginIdentity`] | Whole process; computed once |
//!
//! There is no ambient "current user". The request identity travels
//! with the request as a value, so concurrent requests cannot observe
//! each other's callers.

use crate::{IdentitySource, PermissionError};
use serde::{Deserialize, Serialize};

/// Supplies the authenticated user of the request in flight.
pub trait AuthContext {
    /// Returns the authenticated user name.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::AuthenticationRequired`] if the request
    /// carries no authenticated user.
    fn current_user(&self) -> Result<&str, PermissionError>;
}

/// Supplies the principal the service process itself acts as.
///
/// Used when the server, not a client, creates metadata (e.g. the root
/// directory or internal bookkeeping entries).
pub trait LoginIdentity: Send + Sync {
    /// Returns the login principal.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::AuthenticationRequired`] if no principal
    /// can be determined.
    fn current_principal(&self) -> Result<&str, PermissionError>;
}

/// Identity attached to a single request by the transport layer.
///
/// # Why No Default?
///
/// An anonymous identity must be asked for explicitly with
/// [`anonymous`](Self::anonymous), so a forgotten handshake shows up as
/// an authentication error rather than a silently unowned entry.
///
/// # Example
///
/// ```
/// use strata_auth::{AuthContext, RequestIdentity};
///
/// let identity = RequestIdentity::authenticated("alice");
/// assert_eq!(identity.current_user().unwrap(), "alice");
///
/// let anonymous = RequestIdentity::anonymous();
/// assert!(anonymous.current_user().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    user: Option<String>,
}

impl RequestIdentity {
    /// Identity of an authenticated caller.
    #[must_use]
    pub fn authenticated(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            user: (!user.is_empty()).then_some(user),
        }
    }

    /// Identity of a request that completed no authentication.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Returns the user name, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns `true` if a user is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl AuthContext for RequestIdentity {
    fn current_user(&self) -> Result<&str, PermissionError> {
        self.user()
            .ok_or(PermissionError::authentication_required(IdentitySource::Request))
    }
}

impl<T: AuthContext + ?Sized> AuthContext for &T {
    fn current_user(&self) -> Result<&str, PermissionError> {
        (**self).current_user()
    }
}

impl<T: LoginIdentity + ?Sized> LoginIdentity for std::sync::Arc<T> {
    fn current_principal(&self) -> Result<&str, PermissionError> {
        (**self).current_principal()
    }
}
