//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_auth::AuthType;
use strata_types::Mode;

/// Top-level configuration of a Strata process.
///
/// # Example
///
/// ```
/// use strata_runtime::config::StrataConfig;
///
/// let config = StrataConfig::from_toml(r#"
/// [security]
/// authentication_type = "NOSASL"
/// umask = "027"
/// "#).expect("valid toml");
///
/// assert!(!config.security.authentication_type.is_enabled());
/// assert_eq!(config.security.umask.to_numeric(), 0o027);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrataConfig {
    /// Authentication and permission settings.
    pub security: SecurityConfig,
}

impl StrataConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails, including invalid modes
    /// and unknown authentication types.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Authentication and permission settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Authentication mode. `NOSASL` leaves owners unset.
    pub authentication_type: AuthType,

    /// Principal the service acts as. Falls back to the OS user when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_username: Option<String>,

    /// Umask applied to newly created entries.
    pub umask: Mode,

    /// Group mapping settings.
    pub group_mapping: GroupMappingConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            authentication_type: AuthType::Simple,
            login_username: None,
            umask: Mode::DEFAULT_UMASK,
            group_mapping: GroupMappingConfig::default(),
        }
    }
}

/// Group mapping provider selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupMappingConfig {
    /// Registered provider identifier (`identity`, `static`, ...).
    pub provider: String,

    /// Lookup cache lifetime in milliseconds; `0` disables caching.
    pub cache_ttl_ms: u64,

    /// User → groups table for the `static` provider.
    pub static_groups: BTreeMap<String, Vec<String>>,
}

impl Default for GroupMappingConfig {
    fn default() -> Self {
        Self {
            provider: crate::group::IDENTITY_PROVIDER.to_string(),
            cache_ttl_ms: 0,
            static_groups: BTreeMap::new(),
        }
    }
}
