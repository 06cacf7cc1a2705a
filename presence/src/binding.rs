//! Construction entry points for request-binding adapters.
//!
//! A web framework's model binder knows only the declared target type of a
//! parameter. It looks the shape up by payload type and builds optionals
//! through [`construct_absent`] and [`construct_present`]. Scalar binders can
//! use [`bind_scalar`], which treats missing or blank input as absence.

use std::{any::Any, str::FromStr};

use thiserror::Error;

use crate::{ContractError, Optional, introspect::OptionalShape};

/// Failure to bind a raw request value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    /// The nested parse of a non-blank input failed.
    #[error("cannot bind `{input}`: {message}")]
    Parse {
        /// Raw input that failed to parse.
        input: String,
        /// Message reported by the nested parser.
        message: String,
    },

    /// The parsed payload did not fit the target shape.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Absent optional of the shape's instantiation.
#[must_use]
pub fn construct_absent(shape: &OptionalShape) -> Box<dyn Any + Send> {
    shape.make_absent()
}

/// Present optional of the shape's instantiation wrapping `payload`.
///
/// # Errors
///
/// Returns [`ContractError::PayloadMismatch`] when `payload` is not the
/// shape's payload type.
///
/// # Examples
///
/// ```
/// use std::any::TypeId;
/// use presence::{Optional, binding, introspect::registry};
///
/// let _ = registry::optional::<u32>();
/// let shape = registry::shape_for_payload(TypeId::of::<u32>()).ok_or("unregistered")?;
/// let built = binding::construct_present(shape, Box::new(5_u32))?;
/// assert_eq!(built.downcast_ref::<Optional<u32>>(), Some(&Optional::present(5)));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn construct_present(
    shape: &OptionalShape,
    payload: Box<dyn Any + Send>,
) -> Result<Box<dyn Any + Send>, ContractError> {
    shape.make_present(payload)
}

/// Bind raw input through an erased shape.
///
/// Missing or blank input yields the absent optional without calling
/// `nested`. Otherwise `nested` parses the text into an erased payload.
///
/// # Errors
///
/// Propagates the nested parser's error, or a contract error when its
/// payload does not fit the shape.
pub fn bind<F>(
    shape: &OptionalShape,
    raw: Option<&str>,
    nested: F,
) -> Result<Box<dyn Any + Send>, BindError>
where
    F: FnOnce(&str) -> Result<Box<dyn Any + Send>, BindError>,
{
    match raw.filter(|text| !text.trim().is_empty()) {
        None => Ok(construct_absent(shape)),
        Some(text) => Ok(construct_present(shape, nested(text)?)?),
    }
}

/// Bind a scalar through [`FromStr`].
///
/// # Errors
///
/// Returns [`BindError::Parse`] when non-blank input fails to parse.
///
/// # Examples
///
/// ```
/// use presence::{Optional, binding::bind_scalar};
///
/// assert_eq!(bind_scalar::<u8>(Some("  ")), Ok(Optional::absent()));
/// assert_eq!(bind_scalar::<u8>(Some("7")), Ok(Optional::present(7)));
/// assert!(bind_scalar::<u8>(Some("seven")).is_err());
/// ```
pub fn bind_scalar<T>(raw: Option<&str>) -> Result<Optional<T>, BindError>
where
    T: FromStr + Any + Send,
    T::Err: ToString,
{
    let shape = crate::introspect::registry::optional::<T>();
    let bound = bind(shape, raw, |text| {
        text.parse::<T>()
            .map(|value| Box::new(value) as Box<dyn Any + Send>)
            .map_err(|err| BindError::Parse {
                input: text.to_owned(),
                message: err.to_string(),
            })
    })?;
    bound
        .downcast::<Optional<T>>()
        .map(|optional| *optional)
        .map_err(|_| {
            BindError::Contract(ContractError::PayloadMismatch {
                expected: shape.type_name(),
            })
        })
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::{BindError, bind_scalar, construct_absent, construct_present};
    use crate::{ContractError, Optional, introspect::registry};

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_input_is_absent(#[case] raw: Option<&str>) {
        assert_eq!(bind_scalar::<i32>(raw), Ok(Optional::absent()));
    }

    #[rstest]
    fn parse_failures_are_reported() {
        let err = bind_scalar::<i32>(Some("abc")).expect_err("not a number");
        assert!(matches!(err, BindError::Parse { ref input, .. } if input == "abc"));
    }

    #[rstest]
    fn shapes_build_both_states() -> Result<()> {
        let _shape = registry::optional::<String>();
        let shape = registry::shape_for_payload(TypeId::of::<String>())
            .ok_or_else(|| anyhow::anyhow!("String shape missing"))?;
        let absent = construct_absent(shape);
        ensure!(absent.downcast_ref::<Optional<String>>() == Some(&Optional::absent()));
        let present = construct_present(shape, Box::new(String::from("v")))?;
        ensure!(
            present.downcast_ref::<Optional<String>>() == Some(&Optional::present("v".into()))
        );
        Ok(())
    }

    #[rstest]
    fn mismatched_payloads_are_rejected() {
        let shape = registry::optional::<String>();
        let err = construct_present(shape, Box::new(1_u8)).err();
        assert!(matches!(err, Some(ContractError::PayloadMismatch { .. })));
    }
}
