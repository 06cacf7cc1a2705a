//! Contract violations, error records, and the faults they raise.
//!
//! Two families live here. [`ContractError`] reports misuse of the value
//! types at the call site. [`ErrorInfo`] is business data carried inside a
//! failed [`crate::Outcome`]; it only becomes a [`Fault`] once somebody asks
//! the outcome for its value.

mod aggregate;
mod contract;
mod fault;
mod info;

pub use aggregate::AggregatedFaults;
pub use contract::ContractError;
pub use fault::Fault;
pub use info::ErrorInfo;

pub(crate) use info::{
    CANCELLED_CODE, CANCELLED_DESCRIPTION, UNKNOWN_CODE, UNKNOWN_DESCRIPTION,
};

#[cfg(test)]
mod tests;
