//! Window geometry and horizontal slicing
//!
//! Tracks which portion of a buffer a window shows, and cuts rendered text
//! to a horizontal scroll offset measured in display columns.

use serde::Serialize;

use crate::util::{char_display_width, TABULATOR_WIDTH};

/// Cursor position as reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CursorPos {
    /// Line (0-indexed)
    pub line: usize,
    /// Byte offset within the line
    pub byte: usize,
}

impl CursorPos {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
}

/// What a window currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// One past the last visible line
    pub bottom_line: usize,
    /// Horizontal scroll offset in display columns
    pub left_column: usize,
    /// Window width in cells, including the gutter
    pub width: usize,
    /// Window height in rows
    pub height: usize,
    /// Width of the gutter (line numbers, signs) before the text area
    pub text_offset: usize,
    /// Tab stop width used by the window
    pub tab_width: usize,
    pub cursor: CursorPos,
}

impl Default for WindowView {
    fn default() -> Self {
        Self {
            top_line: 0,
            bottom_line: 0,
            left_column: 0,
            width: 80,
            height: 24,
            text_offset: 0,
            tab_width: TABULATOR_WIDTH,
            cursor: CursorPos::default(),
        }
    }
}

impl WindowView {
    /// Width available for text (excluding the gutter)
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(self.text_offset)
    }

    /// Number of visible lines
    pub fn visible_lines(&self) -> usize {
        self.bottom_line.saturating_sub(self.top_line)
    }

    /// Whether there is nothing to render this frame
    pub fn is_degenerate(&self) -> bool {
        self.visible_lines() == 0 || self.text_width() == 0 || self.height == 0
    }

    /// Check if a line is visible
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.bottom_line
    }
}

/// Text cut to a horizontal window, with a map back to source offsets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slice {
    pub text: String,
    /// (source byte, slice byte) at every emitted character boundary
    offsets: Vec<(usize, usize)>,
}

impl Slice {
    /// Map a byte offset of the source line into the slice
    ///
    /// Offsets left of the visible part clamp to 0, offsets right of it
    /// clamp to the slice length.
    pub fn map_offset(&self, source: usize) -> usize {
        match self.offsets.binary_search_by(|(src, _)| src.cmp(&source)) {
            Ok(idx) => self.offsets[idx].1,
            Err(0) => 0,
            Err(idx) if idx >= self.offsets.len() => self.text.len(),
            Err(idx) => self.offsets[idx].1,
        }
    }
}

/// Cut `line` to the display columns `[left, left + width)`
///
/// Tabs are expanded to spaces so the slice lines up regardless of where it
/// is drawn. A character straddling either edge is replaced by spaces for
/// its visible part. Zero-width characters follow their base character:
/// kept when it was drawn, dropped when it was cut.
pub fn slice_display(line: &str, left: usize, width: usize, tab_width: usize) -> Slice {
    let right = left.saturating_add(width);
    let mut slice = Slice::default();
    let mut col = 0;
    let mut base_visible = left == 0 && width > 0;

    for (offset, ch) in line.char_indices() {
        let w = char_display_width(ch, col, tab_width);
        if w == 0 {
            if base_visible {
                slice.offsets.push((offset, slice.text.len()));
                slice.text.push(ch);
            }
            continue;
        }
        if col >= right {
            break;
        }
        let end = col + w;

        if end <= left {
            col = end;
            continue;
        }

        slice.offsets.push((offset, slice.text.len()));
        let fully_visible = col >= left && end <= right;
        if ch == '\t' || !fully_visible {
            let visible = end.min(right) - col.max(left);
            slice.text.push_str(&" ".repeat(visible));
            base_visible = false;
        } else {
            slice.text.push(ch);
            base_visible = true;
        }
        col = end;
    }

    slice.offsets.push((line.len(), slice.text.len()));
    slice
}
