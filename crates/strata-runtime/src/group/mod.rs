//! Group mapping providers.
//!
//! | Provider | Type | Behavior |
//! |----------|------|----------|
//! | `identity` | [`IdentityGroupResolver`] | `user` → `[user]` |
//! | `static` | [`StaticGroupResolver`] | Table from `security.group_mapping.static_groups` |
//!
//! Any provider can be wrapped by [`CachedGroupResolver`]; the
//! [`GroupMappingRegistry`] does so when a cache TTL is configured.

mod cached;
mod identity;
mod registry;
mod static_map;

pub use cached::CachedGroupResolver;
pub use identity::IdentityGroupResolver;
pub use registry::{GroupMappingRegistry, GroupResolverFactory};
pub use static_map::StaticGroupResolver;

/// Identifier of the identity provider.
pub const IDENTITY_PROVIDER: &str = "identity";

/// Identifier of the static table provider.
pub const STATIC_PROVIDER: &str = "static";
