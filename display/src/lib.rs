//! An SDL2 window that acts as the Chip-8 display.
pub use display::{Display, DisplayError};

mod display;
