//! Fallible construction.
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds |
//! | [`TryNew`] | Construction validates its input |
//! | `TryFrom<T>` | Converting from another type |
//! | `Default` | A sensible default value exists |
//!
//! Types that implement [`TryNew`] do not also offer a plain `new()`
//! doing the same validation; the `try_` prefix keeps fallibility visible
//! at the call site.
//!
//! # Example
//!
//! ```
//! use strata_types::{Mode, TryNew};
//!
//! assert!(Mode::try_new(0o644).is_ok());
//! assert!(Mode::try_new(0o1644).is_err());
//! ```

/// Validating constructor.
pub trait TryNew {
    /// Why validation failed.
    type Error;

    /// Construction input; use a tuple for several arguments.
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when `args` violates the type's invariants.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct BlockSize(u32);

    #[derive(Debug, PartialEq)]
    struct NotPowerOfTwo(u32);

    impl TryNew for BlockSize {
        type Error = NotPowerOfTwo;
        type Args = u32;

        fn try_new(value: u32) -> Result<Self, Self::Error> {
            if !value.is_power_of_two() {
                return Err(NotPowerOfTwo(value));
            }
            Ok(BlockSize(value))
        }
    }

    #[test]
    fn valid_input_constructs() {
        assert_eq!(BlockSize::try_new(4096), Ok(BlockSize(4096)));
    }

    #[test]
    fn invalid_input_reports_value() {
        assert_eq!(BlockSize::try_new(1000), Err(NotPowerOfTwo(1000)));
        assert_eq!(BlockSize::try_new(0), Err(NotPowerOfTwo(0)));
    }
}
