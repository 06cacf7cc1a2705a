//! Aggregation container for faults raised from multi-error failures.

use std::{error::Error, fmt};

use super::Fault;

/// Collection of [`Fault`]s raised together from a single failed outcome.
///
/// # Examples
///
/// ```
/// use presence::{ErrorInfo, Errors, Fault, Outcome};
///
/// let errors = Errors::try_from(vec![
///     ErrorInfo::new("A", "first"),
///     ErrorInfo::new("B", "second"),
/// ])?;
/// let outcome: Outcome<u8> = Outcome::failed_with(errors);
/// if let Err(Fault::Aggregate(faults)) = outcome.into_value() {
///     assert_eq!(faults.len(), 2);
/// }
/// # Ok::<_, presence::ContractError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct AggregatedFaults(Vec<Fault>);

impl AggregatedFaults {
    /// Create a new aggregation from a vector of faults.
    #[must_use]
    pub const fn new(faults: Vec<Fault>) -> Self {
        Self(faults)
    }

    /// Iterate over the contained faults.
    #[must_use = "iterators should be consumed to inspect faults"]
    pub fn iter(&self) -> std::slice::Iter<'_, Fault> {
        self.0.iter()
    }

    /// Number of faults in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no faults.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedFaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fault) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {fault}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedFaults {}

impl<'a> IntoIterator for &'a AggregatedFaults {
    type Item = &'a Fault;
    type IntoIter = std::slice::Iter<'a, Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedFaults {
    type Item = Fault;
    type IntoIter = std::vec::IntoIter<Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
