//! Provider registry for group mapping.
//!
//! Maps a configured provider identifier to a factory. The registry is
//! consulted once at startup; the resulting resolver is then passed
//! explicitly to every permission operation.
//!
//! ```text
//! GroupMappingConfig { provider: "static", cache_ttl_ms: 60000, .. }
//!          │
//!          ▼
//! GroupMappingRegistry::create()
//!          │  factory("static")
//!          ▼
//! CachedGroupResolver(StaticGroupResolver)   ← when cache_ttl_ms > 0
//! ```

use super::{
    CachedGroupResolver, IdentityGroupResolver, StaticGroupResolver, IDENTITY_PROVIDER,
    STATIC_PROVIDER,
};
use crate::config::GroupMappingConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use strata_auth::{GroupResolutionError, GroupResolver};
use tracing::debug;

/// Builds a resolver from its configuration section.
pub type GroupResolverFactory = Box<
    dyn Fn(&GroupMappingConfig) -> Result<Arc<dyn GroupResolver>, GroupResolutionError>
        + Send
        + Sync,
>;

/// Identifier → factory table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata_auth::GroupResolver;
/// use strata_runtime::config::GroupMappingConfig;
/// use strata_runtime::group::{GroupMappingRegistry, IdentityGroupResolver};
///
/// let mut registry = GroupMappingRegistry::with_builtins();
/// registry.register("same-as-user", |_config: &GroupMappingConfig| {
///     Ok(Arc::new(IdentityGroupResolver) as Arc<dyn GroupResolver>)
/// });
///
/// let config = GroupMappingConfig {
///     provider: "same-as-user".to_string(),
///     ..GroupMappingConfig::default()
/// };
/// let resolver = registry.create(&config).expect("registered provider");
/// assert_eq!(resolver.groups("alice").unwrap(), vec!["alice".to_string()]);
/// ```
pub struct GroupMappingRegistry {
    factories: HashMap<String, GroupResolverFactory>,
}

impl GroupMappingRegistry {
    /// Creates a registry with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in `identity` and `static`
    /// providers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(IDENTITY_PROVIDER, |_config: &GroupMappingConfig| {
            Ok(Arc::new(IdentityGroupResolver) as Arc<dyn GroupResolver>)
        });
        registry.register(STATIC_PROVIDER, |config: &GroupMappingConfig| {
            let resolver = StaticGroupResolver::new(config.static_groups.clone())?;
            Ok(Arc::new(resolver) as Arc<dyn GroupResolver>)
        });
        registry
    }

    /// Registers `factory` under `provider`.
    ///
    /// Returns `true` if an earlier factory was replaced.
    pub fn register<F>(&mut self, provider: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&GroupMappingConfig) -> Result<Arc<dyn GroupResolver>, GroupResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.factories
            .insert(provider.into(), Box::new(factory))
            .is_some()
    }

    /// Returns `true` if `provider` is registered.
    #[must_use]
    pub fn contains(&self, provider: &str) -> bool {
        self.factories.contains_key(provider)
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiates the configured provider.
    ///
    /// Wraps the result in [`CachedGroupResolver`] when
    /// `config.cache_ttl_ms` is non-zero.
    ///
    /// # Errors
    ///
    /// - [`GroupResolutionError::UnknownProvider`] if nothing is
    ///   registered under `config.provider`.
    /// - Any error the factory returns.
    pub fn create(
        &self,
        config: &GroupMappingConfig,
    ) -> Result<Arc<dyn GroupResolver>, GroupResolutionError> {
        let factory = self.factories.get(&config.provider).ok_or_else(|| {
            GroupResolutionError::UnknownProvider {
                provider: config.provider.clone(),
            }
        })?;

        let resolver = factory(config)?;
        if config.cache_ttl_ms == 0 {
            debug!(provider = %config.provider, "created group resolver");
            return Ok(resolver);
        }

        debug!(
            provider = %config.provider,
            ttl_ms = config.cache_ttl_ms,
            "created cached group resolver"
        );
        Ok(Arc::new(CachedGroupResolver::new(
            resolver,
            Duration::from_millis(config.cache_ttl_ms),
        )))
    }
}

impl Default for GroupMappingRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for GroupMappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupMappingRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config(provider: &str) -> GroupMappingConfig {
        GroupMappingConfig {
            provider: provider.to_string(),
            ..GroupMappingConfig::default()
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = GroupMappingRegistry::with_builtins();
        assert_eq!(registry.providers(), vec!["identity", "static"]);
        assert!(registry.contains("identity"));
        assert!(!GroupMappingRegistry::new().contains("identity"));
    }

    #[test]
    fn default_config_creates_identity_resolver() {
        let registry = GroupMappingRegistry::default();
        let resolver = registry
            .create(&GroupMappingConfig::default())
            .expect("identity provider");
        assert_eq!(
            resolver.groups("test_client_user").expect("lookup"),
            vec!["test_client_user".to_string()]
        );
    }

    #[test]
    fn static_provider_reads_table() {
        let mut cfg = config("static");
        cfg.static_groups = BTreeMap::from([(
            "alice".to_string(),
            vec!["eng".to_string(), "staff".to_string()],
        )]);

        let resolver = GroupMappingRegistry::with_builtins()
            .create(&cfg)
            .expect("static provider");
        assert_eq!(
            resolver.primary_group("alice").expect("lookup"),
            Some("eng".to_string())
        );
    }

    #[test]
    fn static_provider_without_table_fails() {
        let err = GroupMappingRegistry::with_builtins()
            .create(&config("static"))
            .err()
            .expect("static provider without a table should fail");
        assert!(matches!(err, GroupResolutionError::Misconfigured { .. }));
    }

    #[test]
    fn unknown_provider_fails() {
        let err = GroupMappingRegistry::with_builtins()
            .create(&config("ldap"))
            .err()
            .expect("unknown provider should fail");
        assert_eq!(
            err,
            GroupResolutionError::UnknownProvider {
                provider: "ldap".to_string()
            }
        );
    }

    #[test]
    fn register_replaces_existing() {
        struct Nobody;
        impl GroupResolver for Nobody {
            fn groups(&self, _user: &str) -> Result<Vec<String>, GroupResolutionError> {
                Ok(Vec::new())
            }
        }

        let mut registry = GroupMappingRegistry::with_builtins();
        let replaced = registry.register("identity", |_config: &GroupMappingConfig| {
            Ok(Arc::new(Nobody) as Arc<dyn GroupResolver>)
        });
        assert!(replaced);

        let resolver = registry.create(&config("identity")).expect("replaced");
        assert!(resolver.groups("alice").expect("lookup").is_empty());
    }

    #[test]
    fn nonzero_ttl_still_resolves() {
        let mut cfg = config("identity");
        cfg.cache_ttl_ms = 60_000;
        let resolver = GroupMappingRegistry::with_builtins()
            .create(&cfg)
            .expect("cached identity");
        assert_eq!(
            resolver.groups("bob").expect("lookup"),
            vec!["bob".to_string()]
        );
        assert_eq!(
            resolver.groups("bob").expect("cached lookup"),
            vec!["bob".to_string()]
        );
    }
}
