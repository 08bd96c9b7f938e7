//! Process-wide login identity.
//!
//! The service acts as a single principal for metadata it creates on its
//! own behalf. [`LoginUser`] computes that principal lazily, exactly once,
//! and hands out the same answer for the rest of the process.
//!
//! # Lifecycle
//!
//! ```text
//! LoginUser::from_config()        nothing computed yet
//!        │
//!        ▼ first current_principal()  (concurrent callers wait, one computes)
//! configured login_username
//!   └─ else OS principal ($USER, $LOGNAME, $USERNAME)
//!        │
//!        ▼
//! cached for the lifetime of the value
//! ```
//!
//! Share one instance through `Arc`. Tests can clear the cached value with
//! `reset()`, which exists only under `cfg(test)` or the `test-utils`
//! feature and needs exclusive access.

use crate::config::SecurityConfig;
use std::sync::OnceLock;
use strata_auth::{IdentitySource, LoginIdentity, PermissionError};
use tracing::{debug, info};

/// Environment variables consulted for the OS principal, in order.
pub const OS_USER_VARS: [&str; 3] = ["USER", "LOGNAME", "USERNAME"];

/// Looks up the OS-level principal.
pub type OsPrincipalLookup = fn() -> Option<String>;

fn os_principal_from_env() -> Option<String> {
    OS_USER_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
}

/// Init-once login principal of the service process.
///
/// # Example
///
/// ```
/// use strata_auth::LoginIdentity;
/// use strata_runtime::LoginUser;
///
/// let login = LoginUser::new(Some("strata".to_string()));
/// assert_eq!(login.current_principal().unwrap(), "strata");
/// ```
#[derive(Debug)]
pub struct LoginUser {
    configured: Option<String>,
    os_lookup: OsPrincipalLookup,
    principal: OnceLock<Option<String>>,
}

impl LoginUser {
    /// Creates a login identity preferring `configured` over the OS user.
    #[must_use]
    pub fn new(configured: Option<String>) -> Self {
        Self::with_os_lookup(configured, os_principal_from_env)
    }

    /// Creates a login identity from the security configuration.
    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.login_username.clone())
    }

    /// Creates a login identity with a custom OS principal lookup.
    #[must_use]
    pub fn with_os_lookup(configured: Option<String>, os_lookup: OsPrincipalLookup) -> Self {
        Self {
            configured: configured.filter(|name| !name.is_empty()),
            os_lookup,
            principal: OnceLock::new(),
        }
    }

    /// Returns `true` once the principal has been computed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.principal.get().is_some()
    }

    /// Forgets the computed principal so the next access recomputes it.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn reset(&mut self) {
        self.principal = OnceLock::new();
    }

    fn compute(&self) -> Option<String> {
        if let Some(ref name) = self.configured {
            info!(principal = %name, "login principal from configuration");
            return Some(name.clone());
        }

        match (self.os_lookup)() {
            Some(name) => {
                info!(principal = %name, "login principal from OS user");
                Some(name)
            }
            None => {
                debug!("no login principal configured or available from the OS");
                None
            }
        }
    }
}

impl LoginIdentity for LoginUser {
    fn current_principal(&self) -> Result<&str, PermissionError> {
        self.principal
            .get_or_init(|| self.compute())
            .as_deref()
            .ok_or(PermissionError::authentication_required(
                IdentitySource::Login,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn os_user() -> Option<String> {
        Some("os_user".to_string())
    }

    fn no_os_user() -> Option<String> {
        None
    }

    #[test]
    fn configured_name_wins() {
        let login = LoginUser::with_os_lookup(Some("test_login_user".to_string()), os_user);
        assert_eq!(login.current_principal(), Ok("test_login_user"));
    }

    #[test]
    fn falls_back_to_os_user() {
        let login = LoginUser::with_os_lookup(None, os_user);
        assert_eq!(login.current_principal(), Ok("os_user"));
    }

    #[test]
    fn empty_configured_name_is_ignored() {
        let login = LoginUser::with_os_lookup(Some(String::new()), os_user);
        assert_eq!(login.current_principal(), Ok("os_user"));
    }

    #[test]
    fn no_principal_requires_authentication() {
        let login = LoginUser::with_os_lookup(None, no_os_user);
        assert_eq!(
            login.current_principal(),
            Err(PermissionError::authentication_required(
                IdentitySource::Login
            ))
        );
    }

    #[test]
    fn lazy_until_first_access() {
        let login = LoginUser::with_os_lookup(None, os_user);
        assert!(!login.is_initialized());
        login.current_principal().expect("principal");
        assert!(login.is_initialized());
    }

    static COUNTED_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counted_os_user() -> Option<String> {
        COUNTED_CALLS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        Some("counted".to_string())
    }

    #[test]
    fn concurrent_first_access_computes_once() {
        let login = Arc::new(LoginUser::with_os_lookup(None, counted_os_user));

        std::thread::scope(|scope| {
            for _ in 0..16 {
                let login = Arc::clone(&login);
                scope.spawn(move || {
                    assert_eq!(login.current_principal(), Ok("counted"));
                });
            }
        });

        assert_eq!(COUNTED_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reset_recomputes() {
        let mut login = LoginUser::with_os_lookup(Some("first".to_string()), no_os_user);
        assert_eq!(login.current_principal(), Ok("first"));

        login.reset();
        assert!(!login.is_initialized());

        login.configured = Some("second".to_string());
        assert_eq!(login.current_principal(), Ok("second"));
    }

    #[test]
    fn from_config_uses_login_username() {
        let config = SecurityConfig {
            login_username: Some("svc".to_string()),
            ..SecurityConfig::default()
        };
        let login = LoginUser::from_config(&config);
        assert_eq!(login.current_principal(), Ok("svc"));
    }
}
