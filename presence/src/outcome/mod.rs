//! Success, failure, and cancellation outcomes.
//!
//! An [`Outcome`] keeps business failures as data. Nothing is raised until a
//! caller asks a non-successful outcome for its value, at which point the
//! carried errors become a [`Fault`].

mod errors;

use std::{error::Error as StdError, slice, sync::LazyLock};

pub use errors::Errors;

use crate::{
    ContractError, ErrorInfo, Fault,
    error::{UNKNOWN_CODE, UNKNOWN_DESCRIPTION},
};

static CANCELLED: LazyLock<ErrorInfo> = LazyLock::new(ErrorInfo::cancelled);

/// Result of an operation that may succeed, fail, or be cancelled.
///
/// `Outcome<()>` is the payload-less form.
///
/// # Examples
///
/// ```
/// use presence::{ErrorInfo, Outcome};
///
/// let ok = Outcome::succeeded(3);
/// assert_eq!(ok.map(|n| n * 2).into_value()?, 6);
///
/// let failed: Outcome<u8> = Outcome::failed(ErrorInfo::new("X", "bad"));
/// assert!(failed.is_failed());
/// assert_eq!(failed.into_value().map_err(|fault| fault.code().to_owned()), Err("X".into()));
/// # Ok::<_, presence::Fault>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The operation completed and produced its payload.
    Succeeded(T),
    /// The operation failed with at least one error.
    Failed(Errors),
    /// The operation was cancelled.
    Cancelled,
}

impl Outcome {
    /// The payload-less success.
    #[must_use]
    pub const fn success() -> Self {
        Self::Succeeded(())
    }
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `value`.
    #[must_use]
    pub const fn succeeded(value: T) -> Self {
        Self::Succeeded(value)
    }

    /// Failed outcome carrying a single error.
    #[must_use]
    pub fn failed(error: ErrorInfo) -> Self {
        Self::Failed(Errors::from(error))
    }

    /// Failed outcome carrying every error in `errors`.
    #[must_use]
    pub const fn failed_with(errors: Errors) -> Self {
        Self::Failed(errors)
    }

    /// Cancelled outcome.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::Cancelled
    }

    /// Failed outcome describing `error`; see [`ErrorInfo::from_error`].
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::failed(ErrorInfo::from_error(error))
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Whether the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the operation failed; cancellation is not a failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Errors carried by the outcome.
    ///
    /// Successes carry none. Cancellation reports the single
    /// `OperationCancelled` sentinel.
    #[must_use]
    pub fn errors(&self) -> &[ErrorInfo] {
        match self {
            Self::Succeeded(_) => &[],
            Self::Failed(errors) => errors.as_slice(),
            Self::Cancelled => slice::from_ref(&*CANCELLED),
        }
    }

    /// First carried error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.errors().first()
    }

    /// Payload of a success, without raising anything otherwise.
    #[must_use]
    pub const fn succeeded_value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the payload.
    ///
    /// # Errors
    ///
    /// A failure yields its error's fault, or [`Fault::Aggregate`] when it
    /// carries several. Cancellation yields [`Fault::Cancelled`].
    pub fn value(&self) -> Result<&T, Fault> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(errors) => Err(errors.to_fault()),
            Self::Cancelled => Err(Fault::cancelled()),
        }
    }

    /// Take the payload.
    ///
    /// # Errors
    ///
    /// As [`Outcome::value`].
    pub fn into_value(self) -> Result<T, Fault> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(errors) => Err(errors.to_fault()),
            Self::Cancelled => Err(Fault::cancelled()),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// Unlike [`Outcome::into_value`], every non-success becomes a plain
    /// [`Fault::Failed`] built from the first error's code and description.
    ///
    /// # Errors
    ///
    /// Returns the fault described above for failed and cancelled outcomes.
    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Self::Succeeded(value) => Ok(value),
            other => {
                let (code, description) = other
                    .error()
                    .map_or((UNKNOWN_CODE, UNKNOWN_DESCRIPTION), |first| {
                        (first.code(), first.description())
                    });
                Err(Fault::failed(code, description))
            }
        }
    }

    /// Transform the payload of a success; other states pass through.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Succeeded(value) => Outcome::Succeeded(f(value)),
            Self::Failed(errors) => Outcome::Failed(errors),
            Self::Cancelled => Outcome::Cancelled,
        }
    }

    /// Re-type a non-successful outcome, keeping its state and errors.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidOperation`] for a success, whose
    /// payload cannot be carried across.
    pub fn map_non_success<U>(&self) -> Result<Outcome<U>, ContractError> {
        match self {
            Self::Succeeded(_) => Err(ContractError::InvalidOperation),
            Self::Failed(errors) => Ok(Outcome::Failed(errors.clone())),
            Self::Cancelled => Ok(Outcome::Cancelled),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Fault> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
