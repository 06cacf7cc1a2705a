//! Faults raised when a failed or cancelled outcome is asked for its value.

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

use super::{AggregatedFaults, CANCELLED_CODE, CANCELLED_DESCRIPTION, UNKNOWN_CODE};

/// Shared handle to the error an [`super::ErrorInfo`] was built from.
pub(crate) type Cause = Arc<dyn StdError + Send + Sync>;

/// Throwable form of the errors carried by a non-successful outcome.
///
/// Every call that raises a fault builds a fresh instance, so two reads of
/// the same failed outcome never share a fault.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum Fault {
    /// A business failure converted from an [`super::ErrorInfo`].
    #[error("{description}")]
    Failed {
        /// Error code copied from the originating record.
        code: String,
        /// Human-readable description copied from the originating record.
        description: String,
        /// Error the record was built from, when there was one.
        #[source]
        source: Option<Cause>,
    },

    /// The operation was cancelled.
    #[error("{description}")]
    Cancelled {
        /// Description of the cancellation sentinel.
        description: String,
    },

    /// Several errors were captured by the same failure.
    #[error("One or more errors occurred.")]
    Aggregate(Box<AggregatedFaults>),
}

impl Fault {
    /// Construct a failure fault without an underlying cause.
    ///
    /// # Examples
    ///
    /// ```
    /// use presence::Fault;
    /// let fault = Fault::failed("X", "bad");
    /// assert_eq!(fault.code(), "X");
    /// assert_eq!(fault.to_string(), "bad");
    /// ```
    #[must_use]
    pub fn failed(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Failed {
            code: code.into(),
            description: description.into(),
            source: None,
        }
    }

    /// Construct the cancellation fault.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            description: CANCELLED_DESCRIPTION.to_owned(),
        }
    }

    /// Combine several faults into one aggregate.
    #[must_use]
    pub fn aggregate(faults: Vec<Self>) -> Self {
        Self::Aggregate(Box::new(AggregatedFaults::new(faults)))
    }

    /// Error code carried by the fault.
    ///
    /// Aggregates report the code of their first member.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Failed { code, .. } => code,
            Self::Cancelled { .. } => CANCELLED_CODE,
            Self::Aggregate(faults) => faults.iter().next().map_or(UNKNOWN_CODE, Self::code),
        }
    }

    /// Whether this fault signals cancellation rather than failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
