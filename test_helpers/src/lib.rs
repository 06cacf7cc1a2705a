//! Test helpers shared across crates in the workspace.
//!
//! - [`figment`] wraps `figment::Jail` for settings tests.
//! - [`concurrent`] races closures across threads released together.
//! - [`json`] inspects encoded JSON trees.

pub mod concurrent;
pub mod figment;
pub mod json;
