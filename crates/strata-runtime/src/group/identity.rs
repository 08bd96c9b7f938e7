//! Identity group mapping: every user is its own group.

use strata_auth::{GroupResolutionError, GroupResolver};

/// Resolves each user to a single group with the same name.
///
/// Useful for tests and single-tenant deployments without a directory
/// service.
///
/// # Example
///
/// ```
/// use strata_auth::GroupResolver;
/// use strata_runtime::group::IdentityGroupResolver;
///
/// let groups = IdentityGroupResolver.groups("alice").unwrap();
/// assert_eq!(groups, vec!["alice".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGroupResolver;

impl GroupResolver for IdentityGroupResolver {
    fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError> {
        Ok(vec![user.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_user_to_itself() {
        let resolver = IdentityGroupResolver;
        assert_eq!(
            resolver.groups("test_client_user").expect("lookup"),
            vec!["test_client_user".to_string()]
        );
        assert_eq!(
            resolver.primary_group("bob").expect("lookup"),
            Some("bob".to_string())
        );
    }
}
