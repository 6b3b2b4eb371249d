//! Form domain layer
//!
//! Field validation, inline error tracking and the submission state
//! machine. Nothing here draws to the terminal; the engine returns
//! presentation commands that [`FormView`] applies.

mod controller;
mod error;
mod field;
mod form_state;
mod presenter;
pub mod validator;
mod view;

pub use controller::{FieldEdit, FormEngine, PresentationCommand, SubmitControl, SubmitStep};
pub use error::{NotificationError, SubmissionError};
pub use field::{FieldKind, FormField};
pub use form_state::{ContactForm, FormSubmissionState, SubmissionPayload};
pub use presenter::FieldError;
pub use view::FormView;

#[cfg(test)]
pub use controller::SUCCESS_MESSAGE;
