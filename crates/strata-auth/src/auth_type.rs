//! Authentication mode signal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How clients and the server authenticate.
///
/// Only [`AuthType::Disabled`] turns identity resolution off; every other
/// mode resolves owners from an authenticated identity.
///
/// | Variant | Config name | Identity resolved |
/// |---------|-------------|-------------------|
/// | `Disabled` | `NOSASL` (alias `DISABLED`) | no |
/// | `Simple` | `SIMPLE` | yes |
/// | `Custom` | `CUSTOM` | yes |
///
/// # Example
///
/// ```
/// use strata_auth::AuthType;
///
/// let auth: AuthType = "nosasl".parse().expect("known auth type");
/// assert!(!auth.is_enabled());
/// assert_eq!(AuthType::Simple.to_string(), "SIMPLE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthType {
    /// No authentication; owners are left unset.
    #[serde(rename = "NOSASL", alias = "DISABLED")]
    Disabled,
    /// Username-only authentication.
    #[default]
    #[serde(rename = "SIMPLE")]
    Simple,
    /// Pluggable authentication provider.
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl AuthType {
    /// Returns `true` unless authentication is disabled.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Returns the configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "NOSASL",
            Self::Simple => "SIMPLE",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized authentication type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown authentication type '{0}' (expected NOSASL, SIMPLE or CUSTOM)")]
pub struct UnknownAuthType(pub String);

impl FromStr for AuthType {
    type Err = UnknownAuthType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NOSASL" | "DISABLED" => Ok(Self::Disabled),
            "SIMPLE" => Ok(Self::Simple),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(UnknownAuthType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_disabled_is_off() {
        assert!(!AuthType::Disabled.is_enabled());
        assert!(AuthType::Simple.is_enabled());
        assert!(AuthType::Custom.is_enabled());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("SIMPLE".parse(), Ok(AuthType::Simple));
        assert_eq!("custom".parse(), Ok(AuthType::Custom));
        assert_eq!("NoSasl".parse(), Ok(AuthType::Disabled));
        assert_eq!("disabled".parse(), Ok(AuthType::Disabled));
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "KERBEROS".parse::<AuthType>().unwrap_err();
        assert!(err.to_string().contains("KERBEROS"), "got: {err}");
    }

    #[test]
    fn serde_uses_config_names() {
        let json = serde_json::to_string(&AuthType::Disabled).expect("serialize");
        assert_eq!(json, "\"NOSASL\"");

        let parsed: AuthType = serde_json::from_str("\"DISABLED\"").expect("deserialize alias");
        assert_eq!(parsed, AuthType::Disabled);
    }

    #[test]
    fn default_is_simple() {
        assert_eq!(AuthType::default(), AuthType::Simple);
    }
}
