//! Erased inspection of optionals and outcomes.
//!
//! Generic code that only holds a `&dyn Any` can ask whether it is looking at
//! an [`Optional`], whether that optional carries a payload, and borrow the
//! payload. Recognition goes through the [`registry`]: an instantiation is
//! known once it has been registered, which happens automatically when the
//! codec or binding layers first touch it, when it is viewed through
//! [`Optional::as_any`], or explicitly through [`register`].
//!
//! # Examples
//!
//! ```
//! use presence::{ContractError, Optional, introspect};
//!
//! let present = Optional::present(42_u32);
//! let erased = present.as_any();
//! assert!(introspect::is_optional(erased));
//! assert_eq!(introspect::has_value(erased), Ok(true));
//! let payload = introspect::get_value(erased)?;
//! assert_eq!(payload.downcast_ref::<u32>(), Some(&42));
//!
//! assert_eq!(introspect::has_value(&7_u32), Err(ContractError::NotAnOptional));
//! # Ok::<_, ContractError>(())
//! ```

pub mod registry;

use std::any::{self, Any};

pub use registry::{OptionalShape, OutcomeShape};

use crate::{ContractError, ErrorInfo, Optional, Outcome};

/// Presence test shared by every optional instantiation.
pub trait Presence {
    /// Whether a payload is present.
    fn is_present(&self) -> bool;
}

impl<T> Presence for Optional<T> {
    fn is_present(&self) -> bool {
        self.has_value()
    }
}

/// Object-safe view of an `Optional<T>` with an erased payload.
pub trait AnyOptional: Presence + Any {
    /// Borrow the payload, if present.
    fn value_any(&self) -> Option<&dyn Any>;

    /// Name of the payload type.
    fn payload_type_name(&self) -> &'static str;
}

impl<T: Any> AnyOptional for Optional<T> {
    fn value_any(&self) -> Option<&dyn Any> {
        self.as_option().map(|value| value as &dyn Any)
    }

    fn payload_type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// Object-safe view of an `Outcome<T>` with an erased payload.
pub trait AnyOutcome: Any {
    /// Whether the outcome succeeded.
    fn is_success(&self) -> bool;

    /// Whether the outcome was cancelled.
    fn is_cancelled(&self) -> bool;

    /// Errors carried by the outcome.
    fn errors(&self) -> &[ErrorInfo];

    /// Name of the payload type.
    fn payload_type_name(&self) -> &'static str;

    /// Whether the payload type is anything other than `()`.
    fn carries_payload(&self) -> bool;
}

impl<T: Any> AnyOutcome for Outcome<T> {
    fn is_success(&self) -> bool {
        Self::is_success(self)
    }

    fn is_cancelled(&self) -> bool {
        Self::is_cancelled(self)
    }

    fn errors(&self) -> &[ErrorInfo] {
        Self::errors(self)
    }

    fn payload_type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn carries_payload(&self) -> bool {
        registry::outcome::<T>().carries_payload()
    }
}

/// Register `Optional<T>` and `Outcome<T>` so erased helpers recognise them.
pub fn register<T: Any + Send>() {
    let _optional = registry::optional::<T>();
    let _outcome = registry::outcome::<T>();
}

/// Whether `value` is a registered `Optional` instantiation.
///
/// Only instantiations that have been registered are recognised. A closed
/// `Optional<T>` is registered the first time a codec, the binding adapter,
/// [`Optional::as_any`](crate::Optional::as_any) or [`register`] touches it;
/// before that this returns `false` even for a genuine `Optional<T>`.
///
/// # Examples
///
/// ```
/// use presence::{Optional, introspect};
///
/// let value = Optional::present(3_u64);
/// assert!(!introspect::is_optional(&value));
/// introspect::register::<u64>();
/// assert!(introspect::is_optional(&value));
/// ```
#[must_use]
pub fn is_optional(value: &dyn Any) -> bool {
    view_optional(value).is_some()
}

/// Whether the optional behind `value` carries a payload.
///
/// # Errors
///
/// Returns [`ContractError::NotAnOptional`] when `value` is not a registered
/// `Optional`, including a genuine `Optional<T>` whose instantiation has not
/// been registered yet (see [`is_optional`]).
pub fn has_value(value: &dyn Any) -> Result<bool, ContractError> {
    view_optional(value)
        .map(|optional| optional.is_present())
        .ok_or(ContractError::NotAnOptional)
}

/// Borrow the payload of the optional behind `value`.
///
/// # Errors
///
/// Returns [`ContractError::NotAnOptional`] when `value` is not a registered
/// `Optional` (see [`is_optional`] for when registration happens), then
/// [`ContractError::ValueMissing`] when it is absent.
pub fn get_value(value: &dyn Any) -> Result<&dyn Any, ContractError> {
    view_optional(value)
        .ok_or(ContractError::NotAnOptional)?
        .value_any()
        .ok_or(ContractError::ValueMissing)
}

/// Whether `value` is a registered `Outcome` instantiation.
#[must_use]
pub fn is_outcome(value: &dyn Any) -> bool {
    view_outcome(value).is_some()
}

/// Erased outcome view of `value`, if it is a registered `Outcome`.
#[must_use]
pub fn as_outcome(value: &dyn Any) -> Option<&dyn AnyOutcome> {
    view_outcome(value)
}

/// Skip predicate for absent fields, used by `#[optional_fields]`.
#[must_use]
pub fn is_absent_field<P: Presence + ?Sized>(field: &P) -> bool {
    !field.is_present()
}

fn view_optional(value: &dyn Any) -> Option<&dyn AnyOptional> {
    registry::optional_shape(value.type_id()).and_then(|shape| shape.view(value))
}

fn view_outcome(value: &dyn Any) -> Option<&dyn AnyOutcome> {
    registry::outcome_shape(value.type_id()).and_then(|shape| shape.view(value))
}

impl<T: Any + Send> Optional<T> {
    /// Erased view of this optional, registering its instantiation.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        let _shape = registry::optional::<T>();
        self
    }

    /// Erased box holding this optional, registering its instantiation.
    #[must_use]
    pub fn into_any(self) -> Box<dyn Any + Send> {
        let _shape = registry::optional::<T>();
        Box::new(self)
    }
}

impl<T: Any> Outcome<T> {
    /// Erased view of this outcome, registering its instantiation.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        let _shape = registry::outcome::<T>();
        self
    }
}

#[cfg(test)]
mod tests;
