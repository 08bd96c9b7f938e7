//! Error code conventions shared by all Strata crates.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so that
//! callers (RPC layers, audit logs) can report a stable, machine-readable
//! code alongside the human-readable message.
//!
//! # Code Format
//!
//! - **UPPER_SNAKE_CASE**
//! - **Prefixed by domain**: `MODE_`, `PERM_`, `GROUP_`, `CONFIG_`
//! - **Stable**: codes are part of the API contract
//!
//! # Example
//!
//! ```
//! use strata_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LeaseError {
//!     Expired,
//!     Conflict,
//! }
//!
//! impl ErrorCode for LeaseError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Expired => "LEASE_EXPIRED",
//!             Self::Conflict => "LEASE_CONFLICT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Expired)
//!     }
//! }
//!
//! assert_eq!(LeaseError::Expired.code(), "LEASE_EXPIRED");
//! assert!(!LeaseError::Conflict.is_recoverable());
//! ```

/// Machine-readable error classification.
pub trait ErrorCode {
    /// Returns the stable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (or a corrective user action) may succeed.
    ///
    /// Invalid input, missing credentials and misconfiguration are not
    /// recoverable: the same call will fail the same way.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is non-empty, prefixed and UPPER_SNAKE_CASE.
///
/// # Panics
///
/// Panics with a descriptive message if any check fails.
///
/// # Example
///
/// ```
/// use strata_types::{assert_error_code, ErrorCode, InvalidMode};
///
/// let err = InvalidMode::OutOfRange { value: 0o1000 };
/// assert_error_code(&err, "MODE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Runs [`assert_error_code`] over every given error.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
