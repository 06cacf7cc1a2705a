//! Programming-contract violations reported at the call site.

use thiserror::Error;

/// Misuse of a value type, raised immediately where it happens.
///
/// None of these are coerced into defaults: callers either check first
/// (`has_value`, `is_success`) or handle the error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContractError {
    /// The payload of an absent [`crate::Optional`] was requested.
    #[error("Optional value is missing. Check has_value before attempting to get value.")]
    ValueMissing,

    /// An erased object handed to the introspection helpers is not an
    /// `Optional` of any registered payload type.
    #[error("Object is not an Optional.")]
    NotAnOptional,

    /// A non-success mapping was applied to a successful outcome.
    #[error("Can't map success result")]
    InvalidOperation,

    /// A failed outcome was requested with an empty error sequence.
    #[error("a failed outcome requires at least one error")]
    NoErrors,

    /// An erased payload does not have the payload type of the optional
    /// shape it was handed to.
    #[error("payload type mismatch: expected `{expected}`")]
    PayloadMismatch {
        /// Name of the payload type the shape was registered for.
        expected: &'static str,
    },
}
