//! Conversions between [`Optional`] and [`Outcome`].

use crate::{ErrorInfo, Optional, Outcome};

impl<T> Optional<T> {
    /// Treat absence as a failure.
    ///
    /// `Absent` becomes a failure carrying the `OptionHasNoValue` error.
    ///
    /// ```
    /// use presence::Optional;
    /// let outcome = Optional::<u8>::absent().into_outcome();
    /// assert_eq!(outcome.error().map(|e| e.code()), Some("OptionHasNoValue"));
    /// ```
    #[must_use]
    pub fn into_outcome(self) -> Outcome<T> {
        match self {
            Self::Present(value) => Outcome::Succeeded(value),
            Self::Absent => Outcome::failed(ErrorInfo::optional_missing()),
        }
    }
}

impl<T> Outcome<T> {
    /// Keep the payload of a success; every other state becomes `Absent`.
    #[must_use]
    pub fn into_optional(self) -> Optional<T> {
        match self {
            Self::Succeeded(value) => Optional::Present(value),
            Self::Failed(_) | Self::Cancelled => Optional::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{ErrorInfo, Optional, Outcome};

    #[rstest]
    fn present_becomes_success() {
        assert_eq!(Optional::present(2).into_outcome(), Outcome::succeeded(2));
    }

    #[rstest]
    fn absent_becomes_failure() {
        let outcome = Optional::<u8>::absent().into_outcome();
        assert_eq!(
            outcome,
            Outcome::failed(ErrorInfo::new("OptionHasNoValue", "Option value is missing"))
        );
    }

    #[rstest]
    #[case(Outcome::succeeded(1), Optional::present(1))]
    #[case(Outcome::failed(ErrorInfo::new("X", "bad")), Optional::absent())]
    #[case(Outcome::cancelled(), Optional::absent())]
    fn outcome_to_optional(#[case] outcome: Outcome<u8>, #[case] expected: Optional<u8>) {
        assert_eq!(outcome.into_optional(), expected);
    }
}
