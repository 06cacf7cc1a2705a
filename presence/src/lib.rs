//! Present/absent and success/failure value types with a serde codec bridge.
//!
//! [`Optional`] tells "no value supplied" apart from every payload value,
//! including `null`-like payloads. [`Outcome`] carries a success payload, a
//! non-empty list of [`ErrorInfo`] records, or cancellation, and only raises a
//! [`Fault`] when a caller insists on the value.
//!
//! Both types serialize through [`codec`]: absent optional fields vanish from
//! the output and reappear as absent when missing on input, and outcomes use
//! a tagged object whose default-valued fields are left out. The
//! [`optional_fields`] attribute wires the absent-field elision into a
//! struct's `serde` derives.
//!
//! ```
//! use presence::{Optional, optional_fields};
//! use serde::{Deserialize, Serialize};
//!
//! #[optional_fields]
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Patch {
//!     id: u32,
//!     name: Optional<String>,
//! }
//!
//! let patch = Patch { id: 1, name: Optional::absent() };
//! assert_eq!(serde_json::to_string(&patch)?, r#"{"id":1}"#);
//! let back: Patch = serde_json::from_str(r#"{"id":1}"#)?;
//! assert_eq!(back, patch);
//! # Ok::<_, serde_json::Error>(())
//! ```

pub use presence_macros::optional_fields;

pub mod binding;
mod bridge;
pub mod codec;
mod error;
pub mod introspect;
mod optional;
mod outcome;
mod outcome_ext;
pub mod settings;

pub use error::{AggregatedFaults, ContractError, ErrorInfo, Fault};
pub use optional::Optional;
pub use outcome::{Errors, Outcome};
pub use outcome_ext::{IntoFailed, IntoSucceeded, ResultOutcomeExt};
