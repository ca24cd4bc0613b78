//! Shared terminal utilities.
//!
//! Box drawing, entropy estimates and hidden key entry.

mod input;
mod output;

pub use input::*;
pub use output::*;
