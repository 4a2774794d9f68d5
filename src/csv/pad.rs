//! Fixed-width table rendering for the clean view
//!
//! Every line is rewritten as normalized cells laid out in slots. A column
//! known to the width table gets a slot one column wider than its table
//! width; a column beyond the table gets no slot padding. Each slot is
//! followed by [`COLUMN_GAP`] spaces.

use super::parser::split_cells;
use super::widths::ColumnWidths;
use crate::util::pad_right;

/// Spaces between columns
pub const COLUMN_GAP: usize = 2;

/// Extra display columns added to each known column's slot
pub const CELL_MARGIN: usize = 1;

/// Padded lines plus the byte layout of every cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddedLines {
    /// Rendered table lines
    pub lines: Vec<String>,
    /// Byte offset where each column starts, per line
    pub column_starts: Vec<Vec<usize>>,
    /// Byte offset where each cell's text ends (before padding), per line
    pub cell_ends: Vec<Vec<usize>>,
}

impl PaddedLines {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Start of a 1-based column on a line, clamped to the last column
    pub fn column_start(&self, row: usize, column: usize) -> Option<usize> {
        let starts = self.column_starts.get(row)?;
        let idx = column.saturating_sub(1).min(starts.len().checked_sub(1)?);
        starts.get(idx).copied()
    }
}

/// Slot width for a 1-based column
fn slot_width(widths: &ColumnWidths, column: usize) -> usize {
    widths
        .get(column)
        .map(|width| width + CELL_MARGIN)
        .unwrap_or(0)
}

/// Render one line into `out`, returning column starts and cell ends
fn pad_line(
    line: &str,
    separator: char,
    widths: &ColumnWidths,
    max_columns: usize,
    out: &mut String,
) -> (Vec<usize>, Vec<usize>) {
    let cells = split_cells(line, separator, max_columns);
    let mut starts = Vec::with_capacity(cells.len());
    let mut ends = Vec::with_capacity(cells.len());

    for (idx, cell) in cells.iter().enumerate() {
        starts.push(out.len());
        out.push_str(cell);
        ends.push(out.len());

        let slot = pad_right(cell, slot_width(widths, idx + 1));
        out.push_str(&slot[cell.len()..]);
        out.push_str(&" ".repeat(COLUMN_GAP));
    }

    (starts, ends)
}

/// Pad `lines` into a fixed-width table using `widths`
pub fn pad_lines<'a, I>(
    lines: I,
    separator: char,
    widths: &ColumnWidths,
    max_columns: usize,
) -> PaddedLines
where
    I: IntoIterator<Item = &'a str>,
{
    let mut padded = PaddedLines::default();
    for line in lines {
        let mut out = String::new();
        let (starts, ends) = pad_line(line, separator, widths, max_columns, &mut out);
        padded.lines.push(out);
        padded.column_starts.push(starts);
        padded.cell_ends.push(ends);
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::widths::compute_widths;

    #[test]
    fn test_pad_two_columns() {
        let widths = ColumnWidths::from_widths(vec![1, 1]);
        let padded = pad_lines(["x,yy"], ',', &widths, 100);
        assert_eq!(padded.lines, vec!["x   yy  "]);
        assert_eq!(padded.column_starts, vec![vec![0, 4]]);
        assert_eq!(padded.cell_ends, vec![vec![1, 6]]);
    }

    #[test]
    fn test_pad_column_beyond_table_only_gets_gap() {
        let widths = ColumnWidths::from_widths(vec![3]);
        let padded = pad_lines(["a,b,c"], ',', &widths, 100);
        assert_eq!(padded.lines[0], "a     b  c  ");
        assert_eq!(padded.column_starts[0], vec![0, 6, 9]);
    }

    #[test]
    fn test_pad_normalizes_cells() {
        let lines = ["name, \"q\"\"x\" ", "\"a,b\",c"];
        let widths = compute_widths(lines, ',', 100);
        let padded = pad_lines(lines, ',', &widths, 100);
        assert_eq!(padded.lines[0], "name   q\"x   ");
        assert_eq!(padded.lines[1], "a,b    c     ");
    }

    #[test]
    fn test_pad_aligns_columns_across_lines() {
        let lines = ["id,name,city", "1,alexandra,oslo", "22,bo,rome"];
        let widths = compute_widths(lines, ',', 100);
        let padded = pad_lines(lines, ',', &widths, 100);
        let second_col: Vec<usize> = padded.column_starts.iter().map(|s| s[1]).collect();
        assert!(second_col.iter().all(|&s| s == second_col[0]));
        let third_col: Vec<usize> = padded.column_starts.iter().map(|s| s[2]).collect();
        assert!(third_col.iter().all(|&s| s == third_col[0]));
    }

    #[test]
    fn test_pad_wide_chars_use_display_width() {
        let lines = ["日本,x", "ab,y"];
        let widths = compute_widths(lines, ',', 100);
        let padded = pad_lines(lines, ',', &widths, 100);
        // Both second columns start at display column 7
        assert_eq!(padded.lines[0], "日本   x   ");
        assert_eq!(padded.lines[1], "ab     y   ");
    }

    #[test]
    fn test_column_starts_strictly_increase() {
        let lines = [",,,", "a,,b,"];
        let widths = compute_widths(lines, ',', 100);
        let padded = pad_lines(lines, ',', &widths, 100);
        for starts in &padded.column_starts {
            assert!(starts.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_column_start_lookup_clamps() {
        let widths = ColumnWidths::from_widths(vec![1, 1]);
        let padded = pad_lines(["x,yy"], ',', &widths, 100);
        assert_eq!(padded.column_start(0, 1), Some(0));
        assert_eq!(padded.column_start(0, 2), Some(4));
        assert_eq!(padded.column_start(0, 9), Some(4));
        assert_eq!(padded.column_start(1, 1), None);
    }
}
