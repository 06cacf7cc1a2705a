//! Extension traits for lifting plain values and errors into outcomes.
//!
//! - [`IntoSucceeded::into_succeeded`] wraps any value as a success.
//! - [`IntoFailed::into_failed`] turns an error value into a failure.
//! - [`ResultOutcomeExt::into_outcome`] converts a standard `Result`.
//!
//! # Examples
//!
//! ```
//! use presence::{IntoFailed, IntoSucceeded, Outcome, ResultOutcomeExt};
//!
//! let ok = 5.into_succeeded();
//! assert!(ok.is_success());
//!
//! let parse = "x".parse::<u8>();
//! let outcome: Outcome<u8> = parse.into_outcome();
//! assert_eq!(outcome.error().map(|e| e.code()), Some("ParseIntError"));
//!
//! let failed: Outcome<String> = std::fmt::Error.into_failed();
//! assert!(failed.is_failed());
//! ```

use std::error::Error as StdError;

use crate::Outcome;

/// Wrap a value as a successful [`Outcome`].
pub trait IntoSucceeded: Sized {
    /// Wrap `self` as [`Outcome::Succeeded`].
    fn into_succeeded(self) -> Outcome<Self>;
}

impl<T> IntoSucceeded for T {
    fn into_succeeded(self) -> Outcome<Self> {
        Outcome::Succeeded(self)
    }
}

/// Describe an error value as a failed [`Outcome`].
pub trait IntoFailed {
    /// Build a failure whose single error is derived from `self`.
    fn into_failed<T>(self) -> Outcome<T>;
}

impl<E> IntoFailed for E
where
    E: StdError + Send + Sync + 'static,
{
    fn into_failed<T>(self) -> Outcome<T> {
        Outcome::from_error(self)
    }
}

/// Convert a standard `Result` into an [`Outcome`].
pub trait ResultOutcomeExt<T> {
    /// `Ok` becomes a success, `Err` a failure described by the error.
    fn into_outcome(self) -> Outcome<T>;
}

impl<T, E> ResultOutcomeExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn into_outcome(self) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::Succeeded(value),
            Err(error) => Outcome::from_error(error),
        }
    }
}
