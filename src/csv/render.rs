//! Column coloring
//!
//! Assigns a palette class to every field of the visible lines. Classes
//! cycle through the palette by column index, so rendering is a pure
//! function of the line text and can be repeated on every event.

use serde::Serialize;

use super::pad::PaddedLines;
use super::parser::{parse_fields, FieldRange, EOL_SENTINEL};
use super::viewport::Slice;

/// Highlight group prefix; class `n` maps to `CsvColumn{n + 1}`
pub const GROUP_PREFIX: &str = "CsvColumn";

/// One highlight instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorRange {
    /// Line (0-indexed) in the target surface or buffer
    pub line: usize,
    /// Start byte offset
    pub start: usize,
    /// End byte offset, or [`EOL_SENTINEL`] for "to end of line"
    pub end: usize,
    /// Palette index
    pub class: usize,
}

impl ColorRange {
    /// Concrete end offset for a line of `line_len` bytes
    pub fn resolve_end(&self, line_len: usize) -> usize {
        self.end.min(line_len)
    }
}

/// Palette class for a 1-based column
pub fn color_class(column: usize, palette_size: usize) -> usize {
    column.saturating_sub(1) % palette_size.max(1)
}

/// Highlight group name for a palette class
pub fn group_name(class: usize) -> String {
    format!("{}{}", GROUP_PREFIX, class + 1)
}

/// Fields of one line paired with their palette class
pub fn classify_line(
    line: &str,
    separator: char,
    max_columns: usize,
    palette_size: usize,
) -> Vec<(FieldRange, usize)> {
    parse_fields(line, separator, max_columns)
        .into_iter()
        .enumerate()
        .map(|(idx, field)| (field, color_class(idx + 1, palette_size)))
        .collect()
}

/// Color ranges for the visible lines starting at buffer line `first_line`
pub fn render_visible<'a, I>(
    lines: I,
    first_line: usize,
    separator: char,
    max_columns: usize,
    palette_size: usize,
) -> Vec<ColorRange>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranges = Vec::new();
    for (row, line) in lines.into_iter().enumerate() {
        for (field, class) in classify_line(line, separator, max_columns, palette_size) {
            ranges.push(ColorRange {
                line: first_line + row,
                start: field.start,
                end: field.end,
                class,
            });
        }
    }
    ranges
}

/// Color ranges covering each cell's text in padded coordinates
pub fn render_padded(padded: &PaddedLines, palette_size: usize) -> Vec<ColorRange> {
    let mut ranges = Vec::new();
    for (row, (starts, ends)) in padded
        .column_starts
        .iter()
        .zip(padded.cell_ends.iter())
        .enumerate()
    {
        for (idx, (&start, &end)) in starts.iter().zip(ends.iter()).enumerate() {
            if start == end {
                continue;
            }
            ranges.push(ColorRange {
                line: row,
                start,
                end,
                class: color_class(idx + 1, palette_size),
            });
        }
    }
    ranges
}

/// Move ranges of one source line into a horizontal slice, dropping the
/// ones that end up empty
pub fn slice_ranges(ranges: &[ColorRange], line_len: usize, slice: &Slice, row: usize) -> Vec<ColorRange> {
    ranges
        .iter()
        .filter_map(|range| {
            let start = slice.map_offset(range.start);
            let end = if range.end == EOL_SENTINEL {
                slice.text.len()
            } else {
                slice.map_offset(range.resolve_end(line_len))
            };
            (end > start).then_some(ColorRange {
                line: row,
                start,
                end,
                class: range.class,
            })
        })
        .collect()
}
