//! Utility modules

pub mod text;

pub use text::{char_display_width, display_width, pad_right, TABULATOR_WIDTH};
