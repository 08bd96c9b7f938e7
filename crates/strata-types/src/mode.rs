//! POSIX-style permission modes.
//!
//! A [`Mode`] packs three permission triads into nine bits:
//!
//! ```text
//!   8 7 6   5 4 3   2 1 0
//!  ┌─────┐ ┌─────┐ ┌─────┐
//!  │r w x│ │r w x│ │r w x│
//!  └─────┘ └─────┘ └─────┘
//!   owner   group   other
//! ```
//!
//! Each triad is a [`ModeBits`] value whose numeric form is the usual
//! octal digit (`0` = none ... `7` = all).
//!
//! # Umask
//!
//! A umask removes bits from a mode, independently for each triad:
//!
//! ```text
//! effective = mode & !umask
//! ```
//!
//! # Example
//!
//! ```
//! use strata_types::{Mode, ModeBits};
//!
//! let umask: Mode = "022".parse().expect("valid umask");
//! let mode = Mode::default().apply_umask(umask);
//!
//! assert_eq!(mode.to_numeric(), 0o755);
//! assert_eq!(mode.owner_bits(), ModeBits::ALL);
//! assert_eq!(mode.group_bits(), ModeBits::READ_EXECUTE);
//! assert_eq!(mode.to_string(), "0755");
//! ```

use crate::{ErrorCode, TryNew};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

bitflags! {
    /// Permission bits of a single triad (owner, group or other).
    ///
    /// | Value | Constant | Symbol |
    /// |-------|----------|--------|
    /// | 0 | [`NONE`](Self::NONE) | `---` |
    /// | 1 | [`EXECUTE`](Self::EXECUTE) | `--x` |
    /// | 2 | [`WRITE`](Self::WRITE) | `-w-` |
    /// | 3 | [`WRITE_EXECUTE`](Self::WRITE_EXECUTE) | `-wx` |
    /// | 4 | [`READ`](Self::READ) | `r--` |
    /// | 5 | [`READ_EXECUTE`](Self::READ_EXECUTE) | `r-x` |
    /// | 6 | [`READ_WRITE`](Self::READ_WRITE) | `rw-` |
    /// | 7 | [`ALL`](Self::ALL) | `rwx` |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ModeBits: u8 {
        /// Execute (or traverse, for directories).
        const EXECUTE = 0b001;
        /// Write.
        const WRITE   = 0b010;
        /// Read.
        const READ    = 0b100;
    }
}

impl ModeBits {
    /// No permission.
    pub const NONE: Self = Self::empty();
    /// Write and execute.
    pub const WRITE_EXECUTE: Self = Self::WRITE.union(Self::EXECUTE);
    /// Read and execute.
    pub const READ_EXECUTE: Self = Self::READ.union(Self::EXECUTE);
    /// Read and write.
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
    /// Read, write and execute.
    pub const ALL: Self = Self::READ.union(Self::WRITE).union(Self::EXECUTE);

    /// Builds a triad from its octal digit.
    ///
    /// Returns `None` for values above 7.
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::from_bits(digit)
    }

    /// Returns `true` if every bit in `other` is also set here.
    ///
    /// `ALL` implies everything; `NONE` is implied by everything.
    #[must_use]
    pub fn implies(self, other: Self) -> bool {
        self.contains(other)
    }

    /// Returns the `rwx`-style symbol for this triad.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self.bits() {
            0 => "---",
            1 => "--x",
            2 => "-w-",
            3 => "-wx",
            4 => "r--",
            5 => "r-x",
            6 => "rw-",
            _ => "rwx",
        }
    }
}

impl fmt::Display for ModeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rejected mode or umask value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMode {
    /// Numeric value does not fit in nine permission bits.
    #[error("mode {value:#o} is outside the valid range 0..=0o777")]
    OutOfRange {
        /// The rejected value.
        value: u32,
    },

    /// Text is not an octal mode.
    #[error("'{input}' is not an octal mode")]
    Unparseable {
        /// The rejected text.
        input: String,
    },
}

impl ErrorCode for InvalidMode {
    fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "MODE_OUT_OF_RANGE",
            Self::Unparseable { .. } => "MODE_UNPARSEABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Nine-bit permission mode (owner, group, other).
///
/// Values are immutable: [`apply_umask`](Self::apply_umask) returns a new
/// mode. Construction from raw numbers is fallible and never truncates.
///
/// # Serialization
///
/// Serializes as zero-prefixed octal text (`"0755"`) and accepts any text
/// that [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mode(u16);

impl Mode {
    /// Mask of all meaningful bits.
    pub const MASK: u16 = 0o777;

    /// `rwxrwxrwx`, the ceiling every concrete mode is derived from.
    pub const ALL: Self = Self(0o777);

    /// `---------`.
    pub const NONE: Self = Self(0o000);

    /// The conventional umask (`022`).
    pub const DEFAULT_UMASK: Self = Self(0o022);

    /// Builds a mode from its three triads.
    #[must_use]
    pub fn from_triads(owner: ModeBits, group: ModeBits, other: ModeBits) -> Self {
        Self(
            u16::from(owner.bits()) << 6
                | u16::from(group.bits()) << 3
                | u16::from(other.bits()),
        )
    }

    /// Owner triad.
    #[must_use]
    pub fn owner_bits(self) -> ModeBits {
        self.triad(6)
    }

    /// Group triad.
    #[must_use]
    pub fn group_bits(self) -> ModeBits {
        self.triad(3)
    }

    /// Other triad.
    #[must_use]
    pub fn other_bits(self) -> ModeBits {
        self.triad(0)
    }

    fn triad(self, shift: u16) -> ModeBits {
        // Masked to three bits, so truncation never drops anything.
        ModeBits::from_bits_truncate(((self.0 >> shift) & 0o7) as u8)
    }

    /// Applies `umask`, returning the effective mode.
    ///
    /// For each triad, a bit survives only if it is set here and clear in
    /// the umask.
    ///
    /// # Example
    ///
    /// ```
    /// use strata_types::Mode;
    ///
    /// let umask = Mode::DEFAULT_UMASK;
    /// assert_eq!(Mode::ALL.apply_umask(umask).to_numeric(), 0o755);
    /// ```
    #[must_use]
    pub fn apply_umask(self, umask: Self) -> Self {
        Self::from_triads(
            self.owner_bits() & umask.owner_bits().complement(),
            self.group_bits() & umask.group_bits().complement(),
            self.other_bits() & umask.other_bits().complement(),
        )
    }

    /// Returns the packed nine-bit value.
    #[must_use]
    pub fn to_numeric(self) -> u16 {
        self.0
    }

    /// Returns the `ls -l` style rendering, e.g. `rwxr-xr-x`.
    #[must_use]
    pub fn symbolic(self) -> String {
        format!(
            "{}{}{}",
            self.owner_bits(),
            self.group_bits(),
            self.other_bits()
        )
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::ALL
    }
}

impl TryNew for Mode {
    type Error = InvalidMode;
    type Args = u16;

    /// Validates that `value` fits in nine bits.
    fn try_new(value: u16) -> Result<Self, Self::Error> {
        if value > Self::MASK {
            return Err(InvalidMode::OutOfRange {
                value: u32::from(value),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<u16> for Mode {
    type Error = InvalidMode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<u32> for Mode {
    type Error = InvalidMode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| InvalidMode::OutOfRange { value })
            .and_then(Self::try_new)
    }
}

impl FromStr for Mode {
    type Err = InvalidMode;

    /// Parses octal text: `755`, `0755`, `022` or `0o755`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(InvalidMode::Unparseable {
                input: s.to_string(),
            });
        }

        let value = u32::from_str_radix(digits, 8).map_err(|_| InvalidMode::Unparseable {
            input: s.to_string(),
        })?;
        Self::try_from(value)
    }
}

impl TryFrom<String> for Mode {
    type Error = InvalidMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}
