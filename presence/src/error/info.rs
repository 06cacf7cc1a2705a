//! Business-level error records carried by failed outcomes.

use std::{any, collections::BTreeMap, error::Error as StdError, sync::Arc};

use serde_json::Value;

use super::{AggregatedFaults, Fault, fault::Cause};

pub(crate) const CANCELLED_CODE: &str = "OperationCancelled";
pub(crate) const CANCELLED_DESCRIPTION: &str = "Operation was cancelled";
pub(crate) const UNKNOWN_CODE: &str = "Unknown";
pub(crate) const UNKNOWN_DESCRIPTION: &str = "Unknown error";
const MISSING_CODE: &str = "OptionHasNoValue";
const MISSING_DESCRIPTION: &str = "Option value is missing";

/// Immutable error record: a code, a description, and optional side data.
///
/// Records built with [`ErrorInfo::from_error`] keep the original error so
/// that [`ErrorInfo::to_fault`] can chain it as the fault's source. The
/// retained error is not part of equality and is never serialized.
#[derive(Clone, Debug)]
pub struct ErrorInfo {
    code: String,
    description: String,
    data: Option<BTreeMap<String, Value>>,
    cause: Option<Cause>,
}

impl ErrorInfo {
    /// Construct a record from a code and a description.
    ///
    /// # Examples
    ///
    /// ```
    /// use presence::ErrorInfo;
    /// let err = ErrorInfo::new("NotFound", "user 7 does not exist");
    /// assert_eq!(err.code(), "NotFound");
    /// assert!(err.data().is_none());
    /// ```
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            data: None,
            cause: None,
        }
    }

    /// The record substituted when a failure arrives without any errors.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_CODE, UNKNOWN_DESCRIPTION)
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(CANCELLED_CODE, CANCELLED_DESCRIPTION)
    }

    pub(crate) fn optional_missing() -> Self {
        Self::new(MISSING_CODE, MISSING_DESCRIPTION)
    }

    /// Build a record from an error value, retaining it as the cause.
    ///
    /// The code is the short type name of `E`. The description is the
    /// error's message, except that an aggregate [`Fault`] is summarised as
    /// `Aggregate exception '<message>': ['<inner>','<inner>']`. Use
    /// [`ErrorInfo::with_code`] and [`ErrorInfo::with_description`] to
    /// override either.
    ///
    /// # Examples
    ///
    /// ```
    /// use presence::ErrorInfo;
    /// let parse = "x".parse::<u8>().unwrap_err();
    /// let err = ErrorInfo::from_error(parse);
    /// assert_eq!(err.code(), "ParseIntError");
    /// assert_eq!(err.description(), "invalid digit found in string");
    /// ```
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let description = describe(&error);
        Self {
            code: short_type_name(any::type_name::<E>()).to_owned(),
            description,
            data: None,
            cause: Some(Arc::new(error)),
        }
    }

    /// Replace the code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Replace the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the side data.
    #[must_use]
    pub fn with_data(mut self, data: BTreeMap<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a single side-data entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Free-form side data, if any was attached.
    #[must_use]
    pub const fn data(&self) -> Option<&BTreeMap<String, Value>> {
        self.data.as_ref()
    }

    /// Error the record was built from, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Convert the record into a fresh [`Fault`].
    ///
    /// Each call builds a new fault; the retained cause, when present,
    /// becomes the fault's source.
    #[must_use]
    pub fn to_fault(&self) -> Fault {
        Fault::Failed {
            code: self.code.clone(),
            description: self.description.clone(),
            source: self.cause.clone(),
        }
    }

    pub(crate) const fn from_parts(
        code: String,
        description: String,
        data: Option<BTreeMap<String, Value>>,
    ) -> Self {
        Self {
            code,
            description,
            data,
            cause: None,
        }
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.description == other.description && self.data == other.data
    }
}

impl Eq for ErrorInfo {}

fn describe(error: &(dyn StdError + 'static)) -> String {
    let faults = match error.downcast_ref::<Fault>() {
        Some(Fault::Aggregate(faults)) => Some(&**faults),
        _ => error.downcast_ref::<AggregatedFaults>(),
    };
    faults.map_or_else(|| error.to_string(), |faults| summarise(error, faults))
}

fn summarise(outer: &dyn StdError, faults: &AggregatedFaults) -> String {
    let inner = faults
        .iter()
        .map(|fault| format!("'{fault}'"))
        .collect::<Vec<_>>()
        .join(",");
    format!("Aggregate exception '{outer}': [{inner}]")
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod name_tests {
    use rstest::rstest;

    use super::short_type_name;

    #[rstest]
    #[case("core::num::error::ParseIntError", "ParseIntError")]
    #[case("alloc::vec::Vec<core::num::error::ParseIntError>", "Vec")]
    #[case("Plain", "Plain")]
    fn strips_module_path_and_generics(#[case] full: &'static str, #[case] expected: &str) {
        assert_eq!(short_type_name(full), expected);
    }
}
