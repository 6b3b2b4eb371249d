//! Form rendering module
//!
//! - `field_renderer`: one bordered field with its inline error
//! - `contact_form`: the contact form layout and submit button

mod contact_form;
mod field_renderer;

pub use contact_form::{contact_form_rows, draw_contact_form};
