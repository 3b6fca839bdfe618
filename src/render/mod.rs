//! Terminal rendering: escape emission and the diff display.

pub mod ansi;
pub mod display;

pub use display::{Cell, Display, Style, MAX_HEIGHT, MAX_WIDTH};
