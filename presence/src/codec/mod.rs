//! Codec bridge between outcomes and serializer trees.
//!
//! One algorithm decides which fields an [`Outcome`] writes and how a tree is
//! turned back into an outcome. Backends only supply a narrow
//! [`TreeWriter`] or [`TreeReader`]:
//!
//! - the `serde` impls on [`Outcome`] and [`Optional`](crate::Optional),
//!   usable with every serde data format and the canonical field names;
//! - [`json::JsonCodec`] over `serde_json::Value` trees with a naming policy;
//! - [`dict::DictCodec`] over `figment::value::Value` trees with a naming
//!   hook.
//!
//! Writing resolves every field name through the active [`WritePolicy`] on
//! each call. Reading ignores the policy: field names are matched without
//! regard to case or `_`/`-` separators, so trees produced under any policy
//! decode. Keep the two paths asymmetric.

pub mod dict;
pub mod json;
mod naming;
mod serde_impl;

use std::{any::Any, borrow::Cow};

use serde::{
    Serialize,
    de::{self, DeserializeOwned, IntoDeserializer, value::UnitDeserializer},
};

pub use naming::NamingPolicy;

use crate::{ErrorInfo, Errors, Outcome, introspect::registry};

/// Fixed fields of an encoded outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Success flag, always written first.
    IsSuccess,
    /// Cancellation flag.
    IsCancelled,
    /// Error sequence.
    Errors,
    /// Payload of a success.
    Value,
}

impl Field {
    /// Canonical field name before any naming policy applies.
    #[must_use]
    pub const fn canonical(self) -> &'static str {
        match self {
            Self::IsSuccess => "IsSuccess",
            Self::IsCancelled => "IsCancelled",
            Self::Errors => "Errors",
            Self::Value => "Value",
        }
    }

    /// Match an encoded field name, ignoring case and `_`/`-` separators.
    ///
    /// ```
    /// use presence::codec::Field;
    /// assert_eq!(Field::recognise("is_success"), Some(Field::IsSuccess));
    /// assert_eq!(Field::recognise("IS-CANCELLED"), Some(Field::IsCancelled));
    /// assert_eq!(Field::recognise("payload"), None);
    /// ```
    #[must_use]
    pub fn recognise(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "issuccess" | "success" => Some(Self::IsSuccess),
            "iscancelled" | "cancelled" => Some(Self::IsCancelled),
            "errors" => Some(Self::Errors),
            "value" => Some(Self::Value),
            _ => None,
        }
    }
}

/// Write-side options a backend exposes to the shared algorithm.
pub trait WritePolicy {
    /// Encoded name for a canonical field name.
    fn field_name<'a>(&self, canonical: &'a str) -> Cow<'a, str>;

    /// Whether default-valued fields are written for successes.
    fn include_defaults(&self) -> bool;
}

/// Canonical names, defaults omitted. Used by the `serde` impls.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalPolicy;

impl WritePolicy for CanonicalPolicy {
    fn field_name<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(canonical)
    }

    fn include_defaults(&self) -> bool {
        false
    }
}

/// Sink for the fields of one encoded outcome.
pub trait TreeWriter {
    /// Value produced once the object is complete.
    type Ok;
    /// Backend error.
    type Error;

    /// Write a boolean flag.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn write_flag(&mut self, name: &str, value: bool) -> Result<(), Self::Error>;

    /// Write the error sequence.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn write_errors(&mut self, name: &str, errors: &[ErrorInfo]) -> Result<(), Self::Error>;

    /// Write the payload.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn write_payload<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), Self::Error>;

    /// Close the object.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn finish(self) -> Result<Self::Ok, Self::Error>;
}

/// Source of the fields of one encoded outcome.
///
/// Every `next_key` that returns a name must be followed by exactly one
/// value read or skip.
pub trait TreeReader {
    /// Backend error.
    type Error: de::Error;

    /// Next field name, or `None` once the object is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn next_key(&mut self) -> Result<Option<String>, Self::Error>;

    /// Read a flag; `null` reads as `false`.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn read_flag(&mut self) -> Result<bool, Self::Error>;

    /// Read the error sequence; `null` reads as `None`.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn read_errors(&mut self) -> Result<Option<Vec<ErrorInfo>>, Self::Error>;

    /// Read the payload.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn read_payload<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error>;

    /// Parse and discard the current value.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    fn skip_value(&mut self) -> Result<(), Self::Error>;
}

/// Number of fields [`write_outcome`] emits for `outcome` under `policy`.
#[must_use]
pub fn field_count<T, P>(outcome: &Outcome<T>, policy: &P) -> usize
where
    T: Any,
    P: WritePolicy + ?Sized,
{
    let flags = if !outcome.is_success() || policy.include_defaults() {
        3
    } else {
        1
    };
    let payload = usize::from(outcome.is_success() && registry::outcome::<T>().carries_payload());
    flags + payload
}

/// Encode `outcome` through `writer`.
///
/// The success flag comes first. The cancellation flag and the errors follow
/// for non-successes, or always when the policy includes defaults. The
/// payload comes last, only for a success whose payload type is not `()`.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn write_outcome<T, W, P>(outcome: &Outcome<T>, mut writer: W, policy: &P) -> Result<W::Ok, W::Error>
where
    T: Serialize + Any,
    W: TreeWriter,
    P: WritePolicy + ?Sized,
{
    let name = |field: Field| policy.field_name(field.canonical());
    writer.write_flag(&name(Field::IsSuccess), outcome.is_success())?;
    if !outcome.is_success() || policy.include_defaults() {
        writer.write_flag(&name(Field::IsCancelled), outcome.is_cancelled())?;
        writer.write_errors(&name(Field::Errors), outcome.errors())?;
    }
    if let Outcome::Succeeded(value) = outcome
        && registry::outcome::<T>().carries_payload()
    {
        writer.write_payload(&name(Field::Value), value)?;
    }
    writer.finish()
}

/// Decode an outcome from `reader`.
///
/// Unknown fields are skipped. A true success flag wins; otherwise a true
/// cancellation flag wins; otherwise the outcome failed. A failure without
/// errors, or with an empty sequence, carries one [`ErrorInfo::unknown`]. A
/// success without a payload field decodes the payload from a unit value, so
/// nullable payloads and `()` accept it; other payloads report the missing
/// field.
///
/// # Errors
///
/// Propagates the reader's error. No outcome is built unless the whole
/// object was read.
pub fn read_outcome<T, R>(mut reader: R) -> Result<Outcome<T>, R::Error>
where
    T: DeserializeOwned + Any,
    R: TreeReader,
{
    let shape = registry::outcome::<T>();
    let mut success = false;
    let mut cancelled = false;
    let mut errors = None;
    let mut value = None;
    while let Some(key) = reader.next_key()? {
        match Field::recognise(&key) {
            Some(Field::IsSuccess) => success = reader.read_flag()?,
            Some(Field::IsCancelled) => cancelled = reader.read_flag()?,
            Some(Field::Errors) => errors = reader.read_errors()?,
            Some(Field::Value) if shape.carries_payload() => {
                value = Some(reader.read_payload::<T>()?);
            }
            Some(Field::Value) | None => reader.skip_value()?,
        }
    }

    let outcome = if success {
        let value = match value {
            Some(value) => value,
            None => missing_payload::<T, R::Error>()?,
        };
        Outcome::Succeeded(value)
    } else if cancelled {
        Outcome::Cancelled
    } else {
        let errors = match errors.map(Errors::try_from) {
            Some(Ok(errors)) => errors,
            _ => {
                tracing::warn!(
                    outcome = shape.type_name(),
                    "failed outcome carried no errors; substituting an unknown error"
                );
                Errors::from(ErrorInfo::unknown())
            }
        };
        Outcome::Failed(errors)
    };
    tracing::trace!(
        outcome = shape.type_name(),
        success = outcome.is_success(),
        cancelled = outcome.is_cancelled(),
        "decoded outcome"
    );
    Ok(outcome)
}

fn missing_payload<T, E>() -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    let unit: UnitDeserializer<E> = ().into_deserializer();
    T::deserialize(unit).map_err(|_| E::missing_field(Field::Value.canonical()))
}
