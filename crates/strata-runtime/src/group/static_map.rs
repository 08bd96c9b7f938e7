//! Table-driven group mapping from configuration.

use std::collections::BTreeMap;
use strata_auth::{GroupResolutionError, GroupResolver};

/// Resolves groups from a fixed user → groups table.
///
/// Users missing from the table have no groups. Group order in the table
/// is kept, so the first entry is the primary group.
#[derive(Debug, Clone)]
pub struct StaticGroupResolver {
    table: BTreeMap<String, Vec<String>>,
}

impl StaticGroupResolver {
    /// Builds a resolver from `table`.
    ///
    /// # Errors
    ///
    /// Returns [`GroupResolutionError::Misconfigured`] if the table is
    /// empty or lists an empty group name.
    pub fn new(table: BTreeMap<String, Vec<String>>) -> Result<Self, GroupResolutionError> {
        if table.is_empty() {
            return Err(GroupResolutionError::misconfigured(
                super::STATIC_PROVIDER,
                "static_groups table is empty",
            ));
        }

        if let Some((user, _)) = table
            .iter()
            .find(|(_, groups)| groups.iter().any(String::is_empty))
        {
            return Err(GroupResolutionError::misconfigured(
                super::STATIC_PROVIDER,
                format!("user '{user}' lists an empty group name"),
            ));
        }

        Ok(Self { table })
    }

    /// Number of users in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl GroupResolver for StaticGroupResolver {
    fn groups(&self, user: &str) -> Result<Vec<String>, GroupResolutionError> {
        Ok(self.table.get(user).cloned().unwrap_or_default())
    }
}
