//! Request handlers for board operations.

mod calendar;
mod events;
mod templates;

pub use calendar::*;
pub use events::*;
pub use templates::*;
