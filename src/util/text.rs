//! Display-width helpers for cell text

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 8;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display width of a single character at visual column `col`
///
/// Tabs advance to the next tab stop; control characters take no space.
pub fn char_display_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - (col % tab_width)
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Right-pad a string with spaces to `width` display columns
pub fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}
