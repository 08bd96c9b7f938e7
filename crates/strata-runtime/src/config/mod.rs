//! Configuration management with layered overrides.
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────┐
//! │  1. Environment Variables (STRATA_*)     │  Runtime override
//! ├──────────────────────────────────────────┤
//! │  2. Config file (TOML)                   │  Deployment settings
//! ├──────────────────────────────────────────┤
//! │  3. Default Values (compile-time)        │  Fallback
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `STRATA_CONFIG_FILE` | (config file path) | PathBuf |
//! | `STRATA_SECURITY_AUTHENTICATION_TYPE` | `security.authentication_type` | `NOSASL` / `SIMPLE` / `CUSTOM` |
//! | `STRATA_SECURITY_LOGIN_USERNAME` | `security.login_username` | String (empty clears) |
//! | `STRATA_SECURITY_UMASK` | `security.umask` | octal |
//! | `STRATA_SECURITY_GROUP_MAPPING` | `security.group_mapping.provider` | String |
//! | `STRATA_SECURITY_GROUP_CACHE_TTL_MS` | `security.group_mapping.cache_ttl_ms` | u64 |
//!
//! # Example Configuration
//!
//! ```toml
//! [security]
//! authentication_type = "SIMPLE"
//! login_username = "strata"
//! umask = "022"
//!
//! [security.group_mapping]
//! provider = "static"
//! cache_ttl_ms = 60000
//!
//! [security.group_mapping.static_groups]
//! alice = ["eng", "staff"]
//! bob = ["ops"]
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{ConfigLoader, CONFIG_FILE_ENV};
pub use types::{GroupMappingConfig, SecurityConfig, StrataConfig};
