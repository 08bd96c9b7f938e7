//! Time-bounded caching decorator for group resolvers.
//!
//! Directory-backed lookups can be slow, and the same few users create
//! most entries. [`CachedGroupResolver`] keeps successful lookups for a
//! fixed TTL. Failures are never cached.
//!
//! Expired entries are pruned whenever a fresh result is stored, so the
//! map holds at most the users looked up within the last TTL window.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata_auth::{GroupResolutionError, GroupResolver};

#[derive(Debug, Clone)]
struct CacheEntry {
    groups: Vec<String>,
    fetched_at: Instant,
}

/// Caches another resolver's results for `ttl`.
///
/// Concurrent misses for the same user may each reach the inner
/// resolver; the last result wins. Lookups never hold the lock while
/// calling the inner resolver.
pub struct CachedGroupResolver {
    inner: Arc<dyn GroupResolver>,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CachedGroupResolver {
    /// Wraps `inner` with a cache of lifetime `ttl`.
    #[must_use]
    pub fn new(inner: Arc<dyn GroupResolver>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cache lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops the cached entry for `user`.
    pub fn invalidate(&self, user: &str) {
        self.entries.write().remove(user);
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached users, including entries that expired since the
    /// last insert.
    #[must_use]
    pub fn cached_users(&self) -> usize {
        self.entries.read().len()
    }

    fn fresh(&self, user: &str) -> Option<Vec<String>> {
        let entries = self.entries.read();
        entries
            .get(user)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.groups.clone())
    }
}

impl GroupResolver for CachedGroupResolver {
    fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError> {
        if let Some(groups) = self.fresh(user) {
            return Ok(groups);
        }

        let groups = self.inner.groups(user)?;
        tracing::trace!(user = %user, count = groups.len(), "cached group lookup");
        let mut entries = self.entries.write();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        entries.insert(
            user.to_string(),
            CacheEntry {
                groups: groups.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(groups)
    }
}

impl std::fmt::Debug for CachedGroupResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedGroupResolver")
            .field("ttl", &self.ttl)
            .field("cached_users", &self.cached_users())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl GroupResolver for Counting {
        fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GroupResolutionError::lookup(user, "backend down"));
            }
            Ok(vec![format!("{user}-group")])
        }
    }

    fn cached(inner: &Arc<Counting>, ttl: Duration) -> CachedGroupResolver {
        CachedGroupResolver::new(Arc::clone(inner) as Arc<dyn GroupResolver>, ttl)
    }

    #[test]
    fn hit_skips_inner_resolver() {
        let inner = Arc::new(Counting::default());
        let resolver = cached(&inner, Duration::from_secs(60));

        assert_eq!(
            resolver.groups("alice").expect("first"),
            vec!["alice-group".to_string()]
        );
        assert_eq!(
            resolver.groups("alice").expect("second"),
            vec!["alice-group".to_string()]
        );
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.cached_users(), 1);
    }

    #[test]
    fn users_are_cached_separately() {
        let inner = Arc::new(Counting::default());
        let resolver = cached(&inner, Duration::from_secs(60));

        resolver.groups("alice").expect("alice");
        resolver.groups("bob").expect("bob");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            resolver.primary_group("bob").expect("cached bob"),
            Some("bob-group".to_string())
        );
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn expired_entry_is_refetched() {
        let inner = Arc::new(Counting::default());
        let resolver = cached(&inner, Duration::from_millis(1));

        resolver.groups("alice").expect("first");
        std::thread::sleep(Duration::from_millis(10));
        resolver.groups("alice").expect("second");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn insert_prunes_expired_entries() {
        let inner = Arc::new(Counting::default());
        let resolver = cached(&inner, Duration::from_millis(1));
        assert_eq!(resolver.ttl(), Duration::from_millis(1));

        resolver.groups("alice").expect("alice");
        resolver.groups("bob").expect("bob");
        std::thread::sleep(Duration::from_millis(10));

        resolver.groups("carol").expect("carol");
        assert_eq!(resolver.cached_users(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let inner = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let resolver = cached(&inner, Duration::from_secs(60));

        assert!(resolver.groups("alice").is_err());
        assert!(resolver.groups("alice").is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_users(), 0);
    }

    #[test]
    fn invalidate_and_clear() {
        let inner = Arc::new(Counting::default());
        let resolver = cached(&inner, Duration::from_secs(60));

        resolver.groups("alice").expect("alice");
        resolver.groups("bob").expect("bob");
        resolver.invalidate("alice");
        assert_eq!(resolver.cached_users(), 1);

        resolver.groups("alice").expect("refetch");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);

        resolver.clear();
        assert_eq!(resolver.cached_users(), 0);
    }
}
