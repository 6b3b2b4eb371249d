//! Submission of contact requests
//!
//! The form engine only sees the [`SubmitOperation`] trait. The shipped
//! implementation simulates a network call.

mod simulated;
mod traits;

pub use simulated::SimulatedSubmitter;
pub use traits::{submit_with_timeout, SubmitOperation};

#[cfg(test)]
pub use traits::MockSubmitOperation;
