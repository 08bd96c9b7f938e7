//! Ownership and mode of a metadata entry.
//!
//! # Lifecycle
//!
//! ```text
//! Permission::defaults()          ("", "", 0777)
//!        │
//!        ├── apply_umask(u)       mode only, any time
//!        │
//!        ▼
//! resolve_from_request_identity   owner = authenticated caller
//!   or
//! resolve_from_login_identity     owner = service login principal
//!        │
//!        ▼
//! ("alice", "staff", 0755)        attached to the metadata entry
//! ```
//!
//! With [`AuthType::Disabled`] both resolution operations are no-ops and
//! the owner stays unset.
//!
//! # Atomicity
//!
//! A resolution call either writes both the user and the group or
//! writes nothing. The group lookup runs before any field is touched,
//! so a failing resolver leaves the previous state intact.

use crate::{
    AuthContext, AuthType, GroupResolver, IdentitySource, LoginIdentity, PermissionError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use strata_types::Mode;

/// Owning user, owning group and mode of a file or directory.
///
/// Built per operation and handed to the metadata entry it describes;
/// never shared between concurrent operations.
///
/// # Example
///
/// ```
/// use strata_auth::{AuthType, GroupResolutionError, GroupResolver, Permission, RequestIdentity};
/// use strata_types::Mode;
///
/// struct SameAsUser;
///
/// impl GroupResolver for SameAsUser {
///     fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError> {
///         Ok(vec![user.to_string()])
///     }
/// }
///
/// let mut perm = Permission::defaults();
/// perm.apply_umask(Mode::DEFAULT_UMASK);
/// perm.resolve_from_request_identity(
///     AuthType::Simple,
///     &SameAsUser,
///     &RequestIdentity::authenticated("alice"),
/// )
/// .expect("alice is authenticated");
///
/// assert_eq!(perm.user_name(), "alice");
/// assert_eq!(perm.group_name(), "alice");
/// assert_eq!(perm.mode().to_string(), "0755");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    user_name: String,
    group_name: String,
    mode: Mode,
}

impl Permission {
    /// Creates a permission for an already known owner.
    #[must_use]
    pub fn new(user_name: impl Into<String>, group_name: impl Into<String>, mode: Mode) -> Self {
        Self {
            user_name: user_name.into(),
            group_name: group_name.into(),
            mode,
        }
    }

    /// Unowned permission with the full `0777` mode.
    ///
    /// Every call returns a fresh, independent value.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(String::new(), String::new(), Mode::default())
    }

    /// Owning user; empty when unset.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Owning group; empty when unset or when the user has no group.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` once an owner has been assigned.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.user_name.is_empty()
    }

    /// Replaces the mode with `mode & !umask`. Owner fields are untouched.
    pub fn apply_umask(&mut self, umask: Mode) -> &mut Self {
        self.mode = self.mode.apply_umask(umask);
        self
    }

    /// Assigns the owner from the authenticated caller of the request.
    ///
    /// No-op when `auth_type` is [`AuthType::Disabled`]. Otherwise the
    /// user comes from `context` and the group is the user's primary
    /// group (empty if the resolver returns none).
    ///
    /// # Errors
    ///
    /// - [`PermissionError::AuthenticationRequired`] if `context` carries
    ///   no user or an empty one.
    /// - [`PermissionError::GroupResolution`] if the lookup fails.
    ///
    /// On error the permission is unchanged.
    pub fn resolve_from_request_identity<C>(
        &mut self,
        auth_type: AuthType,
        resolver: &dyn GroupResolver,
        context: &C,
    ) -> Result<(), PermissionError>
    where
        C: AuthContext + ?Sized,
    {
        if !auth_type.is_enabled() {
            tracing::trace!("authentication disabled, leaving owner unset");
            return Ok(());
        }

        let user = context.current_user()?;
        self.assign_owner(user, IdentitySource::Request, resolver)?;
        tracing::debug!(
            auth = %auth_type,
            user = %self.user_name,
            group = %self.group_name,
            "resolved owner from request identity"
        );
        Ok(())
    }

    /// Assigns the owner from the service's login principal.
    ///
    /// Same branching and atomicity as
    /// [`resolve_from_request_identity`](Self::resolve_from_request_identity),
    /// but the user is the process-wide login identity, independent of any
    /// request in flight.
    ///
    /// # Errors
    ///
    /// - [`PermissionError::AuthenticationRequired`] if no login principal
    ///   can be determined or it is empty.
    /// - [`PermissionError::GroupResolution`] if the lookup fails.
    pub fn resolve_from_login_identity<L>(
        &mut self,
        auth_type: AuthType,
        resolver: &dyn GroupResolver,
        login: &L,
    ) -> Result<(), PermissionError>
    where
        L: LoginIdentity + ?Sized,
    {
        if !auth_type.is_enabled() {
            tracing::trace!("authentication disabled, leaving owner unset");
            return Ok(());
        }

        let user = login.current_principal()?;
        self.assign_owner(user, IdentitySource::Login, resolver)?;
        tracing::debug!(
            auth = %auth_type,
            user = %self.user_name,
            group = %self.group_name,
            "resolved owner from login identity"
        );
        Ok(())
    }

    fn assign_owner(
        &mut self,
        user: &str,
        origin: IdentitySource,
        resolver: &dyn GroupResolver,
    ) -> Result<(), PermissionError> {
        // An empty principal is no principal.
        if user.is_empty() {
            return Err(PermissionError::authentication_required(origin));
        }

        let group = match resolver.primary_group(user) {
            Ok(group) => group.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "group resolution failed");
                return Err(e.into());
            }
        };

        self.user_name = user.to_string();
        self.group_name = group;
        Ok(())
    }
}

impl Default for Permission {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.user_name, self.group_name, self.mode)
    }
}
