//! Ownership and permission model for Strata metadata entries.
//!
//! A [`Permission`] is the owner, group and [`Mode`] stored with every
//! file and directory. This crate computes that state; it does not make
//! access decisions against it.
//!
//! # Crate Architecture
//!
//! ```text
//! strata-types   (Mode, ModeBits, ErrorCode)
//!     ↑
//! strata-auth    (Permission, AuthType, AuthContext, LoginIdentity, GroupResolver)  ◄── THIS CRATE
//!     ↑
//! strata-runtime (LoginUser, GroupMappingRegistry, config, PermissionService)
//! ```
//!
//! # Design Principles
//!
//! - **Traits here, implementations in the runtime**: `strata-runtime`
//!   provides the login identity, group mapping providers and caching.
//! - **Explicit identity**: the request identity is a value passed in,
//!   never ambient state.
//! - **All or nothing**: a resolution either sets both owner fields or
//!   leaves the permission untouched.

pub mod auth_type;
pub mod error;
pub mod group;
pub mod identity;
pub mod permission;

pub use auth_type::{AuthType, UnknownAuthType};
pub use error::{IdentitySource, PermissionError};
pub use group::{GroupResolutionError, GroupResolver};
pub use identity::{AuthContext, LoginIdentity, RequestIdentity};
pub use permission::Permission;

// Re-export mode types for convenience
pub use strata_types::{Mode, ModeBits};
