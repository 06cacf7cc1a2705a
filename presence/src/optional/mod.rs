//! The present/absent value wrapper and its combinators.
//!
//! [`Optional`] distinguishes "no value was supplied" from any payload value,
//! including payloads that are themselves nullable. Reading the payload of an
//! absent optional is a contract violation rather than a silent default.

use crate::ContractError;

/// A value that is either present with a payload or absent.
///
/// `Absent` orders before every `Present`, and two present values compare by
/// their payloads.
///
/// # Examples
///
/// ```
/// use presence::Optional;
///
/// let name = Optional::present("Ada");
/// assert!(name.has_value());
/// assert_eq!(name.map(str::len).value_or(0), 3);
///
/// let missing: Optional<&str> = Optional::absent();
/// assert!(missing.value().is_err());
/// assert!(missing < name);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    /// No value was supplied.
    Absent,
    /// A value was supplied.
    Present(T),
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Optional<T> {
    /// Wrap a payload.
    #[must_use]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// The absent optional.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// Lift a standard `Option`, mapping `None` to `Absent`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }

    /// Whether a payload is present.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Whether no payload is present.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ValueMissing`] when the optional is absent.
    pub const fn value(&self) -> Result<&T, ContractError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(ContractError::ValueMissing),
        }
    }

    /// Take the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ValueMissing`] when the optional is absent.
    pub fn into_value(self) -> Result<T, ContractError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(ContractError::ValueMissing),
        }
    }

    /// Payload, or `fallback` when absent.
    #[must_use]
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => fallback,
        }
    }

    /// Payload, or the result of `fallback` when absent.
    ///
    /// The fallback is only evaluated for absent optionals.
    pub fn value_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Present(value) => value,
            Self::Absent => fallback(),
        }
    }

    /// Payload, or `T::default()` when absent.
    #[must_use]
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(T::default)
    }

    /// This optional if present, otherwise `Present(fallback)`.
    #[must_use]
    pub fn or(self, fallback: T) -> Self {
        match self {
            Self::Absent => Self::Present(fallback),
            present @ Self::Present(_) => present,
        }
    }

    /// This optional if present, otherwise `Present(fallback())`.
    pub fn or_else<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Absent => Self::Present(fallback()),
            present @ Self::Present(_) => present,
        }
    }

    /// This optional if present, otherwise `other`.
    #[must_use]
    pub fn otherwise(self, other: Self) -> Self {
        match self {
            Self::Absent => other,
            present @ Self::Present(_) => present,
        }
    }

    /// This optional if present, otherwise the optional built by `other`.
    pub fn otherwise_with<F>(self, other: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Absent => other(),
            present @ Self::Present(_) => present,
        }
    }

    /// Transform the payload, propagating `Absent`.
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Present(value) => Optional::Present(f(value)),
            Self::Absent => Optional::Absent,
        }
    }

    /// Chain a computation that may itself produce an absent optional.
    pub fn flat_map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Self::Present(value) => f(value),
            Self::Absent => Optional::Absent,
        }
    }

    /// Keep the payload only when `predicate` accepts it.
    ///
    /// The predicate is never invoked for an absent optional.
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Present(value) => {
                if predicate(&value) {
                    Self::Present(value)
                } else {
                    Self::Absent
                }
            }
            Self::Absent => Self::Absent,
        }
    }

    /// Keep the payload only when `condition` holds.
    #[must_use]
    pub fn filter_if(self, condition: bool) -> Self {
        if condition { self } else { Self::Absent }
    }

    /// Fold both cases into a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use presence::Optional;
    /// let label = Optional::present(3).match_with(|n| format!("{n} items"), || "none".into());
    /// assert_eq!(label, "3 items");
    /// ```
    pub fn match_with<R, P, A>(self, on_present: P, on_absent: A) -> R
    where
        P: FnOnce(T) -> R,
        A: FnOnce() -> R,
    {
        match self {
            Self::Present(value) => on_present(value),
            Self::Absent => on_absent(),
        }
    }

    /// Run `action` with the payload when present.
    pub fn if_present<F>(&self, action: F)
    where
        F: FnOnce(&T),
    {
        if let Self::Present(value) = self {
            action(value);
        }
    }

    /// Run `action` when absent.
    pub fn if_absent<F>(&self, action: F)
    where
        F: FnOnce(),
    {
        if self.is_absent() {
            action();
        }
    }

    /// Borrow the payload in place.
    #[must_use]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Present(value) => Optional::Present(value),
            Self::Absent => Optional::Absent,
        }
    }

    /// Borrowed view as a standard `Option`.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Convert into a standard `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Iterate over the payload, yielding nothing when absent.
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_option().into_iter()
    }
}

impl<T> Optional<Option<T>> {
    /// Collapse a present-but-null payload into `Absent`.
    ///
    /// ```
    /// use presence::Optional;
    /// assert!(Optional::<Option<u8>>::present(None).not_null().is_absent());
    /// assert_eq!(Optional::present(Some(1)).not_null(), Optional::present(1));
    /// ```
    #[must_use]
    pub fn not_null(self) -> Optional<T> {
        self.flat_map(Optional::from_option)
    }
}

impl<I> Optional<I>
where
    I: IntoIterator,
{
    /// Map every element of a present collection payload.
    pub fn map_each<U, F>(self, f: F) -> Optional<Vec<U>>
    where
        F: FnMut(I::Item) -> U,
    {
        self.map(|items| items.into_iter().map(f).collect())
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
