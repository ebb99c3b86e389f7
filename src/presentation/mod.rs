//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the portal and wizard screens with ratatui and
//! maps keyboard input onto application-state transitions.

pub mod input;
pub mod ui;

pub use input::*;
pub use ui::*;
