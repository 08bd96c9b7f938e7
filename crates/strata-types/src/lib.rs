//! Core value types for Strata.
//!
//! Strata is a distributed storage metadata service. This crate holds the
//! dependency-free building blocks shared by the rest of the workspace.
//!
//! # Crate Architecture
//!
//! ```text
//! strata-types    : Mode, ModeBits, ErrorCode, TryNew   ◄── HERE
//!     ↑
//! strata-auth     : Permission, AuthType, identity and group-resolution traits
//!     ↑
//! strata-runtime  : LoginUser, group mapping registry, config, PermissionService
//! ```
//!
//! # Example
//!
//! ```
//! use strata_types::{Mode, ModeBits, TryNew};
//!
//! let mode = Mode::try_new(0o640).expect("in range");
//! assert_eq!(mode.owner_bits(), ModeBits::READ_WRITE);
//! assert_eq!(mode.symbolic(), "rw-r-----");
//! ```

mod construct;
mod error;
mod mode;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use mode::{InvalidMode, Mode, ModeBits};
