//! Non-empty error sequence carried by failed outcomes.

use std::sync::LazyLock;

use crate::{ContractError, ErrorInfo, Fault};

static UNKNOWN: LazyLock<ErrorInfo> = LazyLock::new(ErrorInfo::unknown);

/// Ordered, non-empty sequence of [`ErrorInfo`] records.
///
/// The empty sequence cannot be built, so every failed outcome can name at
/// least one error.
///
/// ```
/// use presence::{ContractError, ErrorInfo, Errors};
///
/// assert_eq!(Errors::try_from(Vec::new()), Err(ContractError::NoErrors));
/// let errors = Errors::from(ErrorInfo::new("X", "bad"));
/// assert_eq!(errors.first().code(), "X");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Errors(Vec<ErrorInfo>);

impl Errors {
    /// First recorded error.
    #[must_use]
    pub fn first(&self) -> &ErrorInfo {
        self.0.first().unwrap_or(&UNKNOWN)
    }

    /// Borrow the records in order.
    #[must_use]
    pub fn as_slice(&self) -> &[ErrorInfo] {
        &self.0
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorInfo> {
        self.0.iter()
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence is empty; never true for a constructed value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the records.
    #[must_use]
    pub fn into_vec(self) -> Vec<ErrorInfo> {
        self.0
    }

    /// Raise the records as a fault.
    ///
    /// A single record becomes its own fault; several become
    /// [`Fault::Aggregate`].
    #[must_use]
    pub fn to_fault(&self) -> Fault {
        match self.0.as_slice() {
            [single] => single.to_fault(),
            many => Fault::aggregate(many.iter().map(ErrorInfo::to_fault).collect()),
        }
    }
}

impl TryFrom<Vec<ErrorInfo>> for Errors {
    type Error = ContractError;

    fn try_from(errors: Vec<ErrorInfo>) -> Result<Self, Self::Error> {
        if errors.is_empty() {
            return Err(ContractError::NoErrors);
        }
        Ok(Self(errors))
    }
}

impl From<ErrorInfo> for Errors {
    fn from(error: ErrorInfo) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ErrorInfo;
    type IntoIter = std::slice::Iter<'a, ErrorInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = ErrorInfo;
    type IntoIter = std::vec::IntoIter<ErrorInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
