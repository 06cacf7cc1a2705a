//! Shared helpers for working with `figment::Jail` in tests.
//!
//! The jail isolates the working directory and environment for the duration
//! of a closure, and serialises jailed tests against one another, so settings
//! tests can write `presence.toml` files and `PRESENCE_*` variables freely.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// Failures are converted into `anyhow::Error` values so callers can use the
/// `?` operator without extra boilerplate.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can be
/// returned from inside a jail closure.
#[expect(
    clippy::needless_pass_by_value,
    reason = "jail closures hand over owned errors from `map_err`"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
