//! Application state module

mod app_state;
mod capabilities;
pub mod forms;
mod notifications;
mod splash_state;

pub use app_state::*;
pub use capabilities::*;
pub use notifications::*;
pub use splash_state::*;
