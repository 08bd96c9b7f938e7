//! Runtime layer for Strata permissions.
//!
//! `strata-auth` defines the permission model and its collaborator
//! traits; this crate provides the implementations a metadata server
//! wires up at startup:
//!
//! - [`LoginUser`]: init-once process login identity
//! - [`group`]: identity and static group mapping, TTL cache, provider registry
//! - [`config`]: layered TOML + environment configuration
//! - [`PermissionService`]: builds owned, masked permissions for new entries
//!
//! # Startup
//!
//! ```
//! use strata_runtime::config::ConfigLoader;
//! use strata_runtime::group::GroupMappingRegistry;
//! use strata_runtime::PermissionService;
//!
//! let config = ConfigLoader::new().skip_env_vars().load().expect("config");
//! let service = PermissionService::from_config(
//!     &config.security,
//!     &GroupMappingRegistry::with_builtins(),
//! )
//! .expect("permission service");
//! assert_eq!(service.umask().to_string(), "0022");
//! ```

pub mod config;
pub mod group;
mod login;
mod service;

pub use login::{LoginUser, OsPrincipalLookup, OS_USER_VARS};
pub use service::PermissionService;

// Re-export the model for convenience
pub use strata_auth::{
    AuthContext, AuthType, GroupResolutionError, GroupResolver, LoginIdentity, Permission,
    PermissionError, RequestIdentity,
};
pub use strata_types::{Mode, ModeBits};
