//! Permission construction for new metadata entries.
//!
//! [`PermissionService`] is built once at startup from [`SecurityConfig`].
//! It owns the collaborators every create operation needs and runs the
//! full flow:
//!
//! ```text
//! Permission::defaults() → apply_umask(configured) → resolve owner
//!                                                    ├─ for_request(): caller identity
//!                                                    └─ for_server():  login identity
//! ```

use crate::config::SecurityConfig;
use crate::group::GroupMappingRegistry;
use crate::LoginUser;
use std::sync::Arc;
use strata_auth::{AuthContext, AuthType, GroupResolver, Permission, PermissionError};
use strata_types::Mode;
use tracing::info;

/// Startup-resolved permission settings and collaborators.
///
/// Cheap to share: clone it or wrap it in `Arc`; clones share the same
/// resolver and login identity.
///
/// # Example
///
/// ```
/// use strata_auth::RequestIdentity;
/// use strata_runtime::config::SecurityConfig;
/// use strata_runtime::group::GroupMappingRegistry;
/// use strata_runtime::PermissionService;
///
/// let service = PermissionService::from_config(
///     &SecurityConfig::default(),
///     &GroupMappingRegistry::with_builtins(),
/// )
/// .expect("default config is valid");
///
/// let perm = service
///     .for_request(&RequestIdentity::authenticated("alice"))
///     .expect("alice is authenticated");
/// assert_eq!(perm.to_string(), "alice:alice 0755");
/// ```
#[derive(Clone)]
pub struct PermissionService {
    auth_type: AuthType,
    umask: Mode,
    resolver: Arc<dyn GroupResolver>,
    login: Arc<LoginUser>,
}

impl PermissionService {
    /// Assembles a service from already-built collaborators.
    #[must_use]
    pub fn new(
        auth_type: AuthType,
        umask: Mode,
        resolver: Arc<dyn GroupResolver>,
        login: Arc<LoginUser>,
    ) -> Self {
        Self {
            auth_type,
            umask,
            resolver,
            login,
        }
    }

    /// Builds the service from configuration, resolving the group
    /// mapping provider through `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::GroupResolution`] if the configured
    /// provider is unknown or cannot be created.
    pub fn from_config(
        config: &SecurityConfig,
        registry: &GroupMappingRegistry,
    ) -> Result<Self, PermissionError> {
        let resolver = registry.create(&config.group_mapping)?;
        info!(
            auth = %config.authentication_type,
            umask = %config.umask,
            provider = %config.group_mapping.provider,
            "permission service ready"
        );
        Ok(Self::new(
            config.authentication_type,
            config.umask,
            resolver,
            Arc::new(LoginUser::from_config(config)),
        ))
    }

    /// Configured authentication mode.
    #[must_use]
    pub fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    /// Umask applied to every new permission.
    #[must_use]
    pub fn umask(&self) -> Mode {
        self.umask
    }

    /// Group resolver shared by all operations.
    #[must_use]
    pub fn group_resolver(&self) -> &Arc<dyn GroupResolver> {
        &self.resolver
    }

    /// Process-wide login identity.
    #[must_use]
    pub fn login_identity(&self) -> &Arc<LoginUser> {
        &self.login
    }

    /// Permission for an entry created on behalf of a client.
    ///
    /// # Errors
    ///
    /// See [`Permission::resolve_from_request_identity`].
    pub fn for_request<C>(&self, context: &C) -> Result<Permission, PermissionError>
    where
        C: AuthContext + ?Sized,
    {
        let mut perm = self.masked_defaults();
        perm.resolve_from_request_identity(self.auth_type, self.resolver.as_ref(), context)?;
        Ok(perm)
    }

    /// Permission for an entry the service creates on its own behalf.
    ///
    /// # Errors
    ///
    /// See [`Permission::resolve_from_login_identity`].
    pub fn for_server(&self) -> Result<Permission, PermissionError> {
        let mut perm = self.masked_defaults();
        perm.resolve_from_login_identity(self.auth_type, self.resolver.as_ref(), &self.login)?;
        Ok(perm)
    }

    fn masked_defaults(&self) -> Permission {
        let mut perm = Permission::defaults();
        perm.apply_umask(self.umask);
        perm
    }
}

impl std::fmt::Debug for PermissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionService")
            .field("auth_type", &self.auth_type)
            .field("umask", &self.umask)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
