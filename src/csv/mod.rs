//! Delimited text core
//!
//! Everything here is a pure function of line text and configuration:
//!
//! ```text
//! lines ──► parser ──► detect (separator choice)
//!              │
//!              ├──► widths ──► pad ──► clean view text
//!              │
//!              └──► render ──► color ranges
//! ```
//!
//! `viewport` holds window geometry and horizontal slicing shared by the
//! overlay synchronizer.

pub mod detect;
mod pad;
mod parser;
pub mod render;
mod viewport;
mod widths;

pub use detect::{
    default_separator, detect_separator, extension_hint, looks_delimited, parse_separator,
    AutoDetectThresholds, DetectLimits, Delimiter,
};
pub use pad::{pad_lines, PaddedLines, CELL_MARGIN, COLUMN_GAP};
pub use parser::{
    field_index_at, normalize_cell, parse_fields, split_cells, FieldRange, EOL_SENTINEL, QUOTE,
};
pub use render::{render_padded, render_visible, ColorRange};
pub use viewport::{slice_display, CursorPos, Slice, WindowView};
pub use widths::{compute_widths, ColumnWidths, SamplingMode, WidthCache};
