//! Configuration loader with layered overrides.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Config file (explicit path, or `STRATA_CONFIG_FILE`)
//! 3. Environment variables (`STRATA_SECURITY_*`)
//!
//! Each layer overrides the previous.

use super::{ConfigError, StrataConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the config file.
pub const CONFIG_FILE_ENV: &str = "STRATA_CONFIG_FILE";

/// Parses an environment variable with [`FromStr`](std::str::FromStr)
/// into a config field.
macro_rules! parse_env {
    ($loader:expr, $field:expr, $var:literal) => {
        if let Some(val) = $loader.env_var($var) {
            $field = val
                .parse()
                .map_err(|e| ConfigError::invalid_env_var($var, format!("{e}")))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use strata_runtime::config::ConfigLoader;
///
/// let env = HashMap::from([
///     ("STRATA_SECURITY_UMASK".to_string(), "077".to_string()),
/// ]);
///
/// let config = ConfigLoader::new()
///     .with_env_overrides(env)
///     .load()
///     .expect("valid config");
///
/// assert_eq!(config.security.umask.to_numeric(), 0o077);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Config file path; `None` falls back to `STRATA_CONFIG_FILE`.
    config_file: Option<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,

    /// Replacement for the process environment.
    env_overrides: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the config file path.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Reads environment values from `env` instead of the process
    /// environment.
    #[must_use]
    pub fn with_env_overrides(mut self, env: HashMap<String, String>) -> Self {
        self.env_overrides = Some(env);
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file exists but cannot be read
    /// or parsed, or an environment variable holds an invalid value.
    /// A missing config file is ignored.
    pub fn load(&self) -> Result<StrataConfig, ConfigError> {
        let file = self
            .config_file
            .clone()
            .or_else(|| self.env_var(CONFIG_FILE_ENV).map(PathBuf::from));

        let mut config = match file {
            Some(ref path) => match Self::load_file(path)? {
                Some(config) => {
                    debug!(path = %path.display(), "Loaded config file");
                    config
                }
                None => {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    StrataConfig::default()
                }
            },
            None => StrataConfig::default(),
        };

        if !self.skip_env {
            self.apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(path: &Path) -> Result<Option<StrataConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            StrataConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    fn env_var(&self, name: &str) -> Option<String> {
        if self.skip_env {
            return None;
        }
        match self.env_overrides {
            Some(ref env) => env.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(&self, config: &mut StrataConfig) -> Result<(), ConfigError> {
        let security = &mut config.security;

        parse_env!(
            self,
            security.authentication_type,
            "STRATA_SECURITY_AUTHENTICATION_TYPE"
        );
        parse_env!(self, security.umask, "STRATA_SECURITY_UMASK");
        parse_env!(
            self,
            security.group_mapping.cache_ttl_ms,
            "STRATA_SECURITY_GROUP_CACHE_TTL_MS"
        );

        if let Some(val) = self.env_var("STRATA_SECURITY_LOGIN_USERNAME") {
            security.login_username = (!val.is_empty()).then_some(val);
        }
        if let Some(val) = self.env_var("STRATA_SECURITY_GROUP_MAPPING") {
            security.group_mapping.provider = val;
        }

        Ok(())
    }
}
