//! ANSI drawing of composed frames
//!
//! Rows are printed top to bottom with each highlight range colored by its
//! palette entry. The clean view cursor is drawn in reverse video.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::config::{parse_hex_color, ColorMode, ColumnsConfig};
use crate::session::FrameRow;

/// Terminal size, or 80x24 when stdout is not a terminal
pub fn terminal_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

fn palette_colors(config: &ColumnsConfig) -> Vec<Color> {
    config
        .palette
        .iter()
        .filter_map(|hex| parse_hex_color(hex))
        .map(|(r, g, b)| Color::Rgb { r, g, b })
        .collect()
}

/// A run of text drawn with one style
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment<'a> {
    text: &'a str,
    class: Option<usize>,
    cursor: bool,
}

fn segments(row: &FrameRow) -> Vec<Segment<'_>> {
    let style_at = |byte: usize| {
        let class = row
            .highlights
            .iter()
            .find(|r| r.start <= byte && byte < r.end)
            .map(|r| r.class);
        (class, row.cursor == Some(byte))
    };

    let mut segments: Vec<Segment> = Vec::new();
    let mut run_start = 0;
    let mut run_style = style_at(0);
    for (idx, _) in row.text.char_indices().skip(1) {
        let style = style_at(idx);
        if style != run_style {
            segments.push(Segment {
                text: &row.text[run_start..idx],
                class: run_style.0,
                cursor: run_style.1,
            });
            run_start = idx;
            run_style = style;
        }
    }
    if run_start < row.text.len() {
        segments.push(Segment {
            text: &row.text[run_start..],
            class: run_style.0,
            cursor: run_style.1,
        });
    }
    segments
}

/// Draw rows to `out`
pub fn write_frame<W: Write>(out: &mut W, rows: &[FrameRow], config: &ColumnsConfig) -> io::Result<()> {
    let colors = palette_colors(config);

    for row in rows {
        for segment in segments(row) {
            if segment.cursor {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            if let Some(color) = segment.class.and_then(|class| colors.get(class)) {
                match config.color_mode {
                    ColorMode::Foreground => queue!(out, SetForegroundColor(*color))?,
                    ColorMode::Background => queue!(out, SetBackgroundColor(*color))?,
                }
            }
            queue!(out, Print(segment.text))?;
            if segment.class.is_some() || segment.cursor {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        // Cursor past the end of the row
        if row.cursor.is_some_and(|byte| byte >= row.text.len()) {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(" "),
                SetAttribute(Attribute::Reset)
            )?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
