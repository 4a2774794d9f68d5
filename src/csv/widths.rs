//! Column width calculation and caching

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::parser::split_cells;
use crate::util::display_width;

/// Which lines feed the width table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Every line of the buffer: stable widths, slower on large files
    #[default]
    Full,
    /// Only the visible line range
    Windowed,
}

/// Maximum display width per column, indexed from 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnWidths {
    widths: Vec<usize>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from widths listed in column order
    pub fn from_widths(widths: Vec<usize>) -> Self {
        Self { widths }
    }

    /// Width of a 1-based column, or `None` beyond the table
    pub fn get(&self, column: usize) -> Option<usize> {
        column
            .checked_sub(1)
            .and_then(|idx| self.widths.get(idx))
            .copied()
    }

    /// Number of columns in the table
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Record a cell width, growing the table as needed
    pub fn observe(&mut self, column: usize, width: usize) {
        let Some(idx) = column.checked_sub(1) else {
            return;
        };
        if idx >= self.widths.len() {
            self.widths.resize(idx + 1, 0);
        }
        self.widths[idx] = self.widths[idx].max(width);
    }

    /// Widths in column order
    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }
}

/// Compute the width table for a set of lines
pub fn compute_widths<'a, I>(lines: I, separator: char, max_columns: usize) -> ColumnWidths
where
    I: IntoIterator<Item = &'a str>,
{
    let mut widths = ColumnWidths::new();
    for line in lines {
        for (idx, cell) in split_cells(line, separator, max_columns).iter().enumerate() {
            widths.observe(idx + 1, display_width(cell));
        }
    }
    widths
}

/// Width table tagged with what it was computed from
#[derive(Debug, Clone)]
pub struct WidthCache {
    /// Content version of the buffer at computation time
    pub version: u64,
    /// Separator used for parsing
    pub separator: char,
    /// Sampling mode used
    pub mode: SamplingMode,
    /// Sampled line range (the whole buffer in full mode)
    pub range: Range<usize>,
    pub widths: ColumnWidths,
}

impl WidthCache {
    /// Whether this table can be reused for a request
    ///
    /// Full-scan tables only depend on the content version; windowed tables
    /// also depend on the sampled range.
    pub fn is_valid_for(
        &self,
        version: u64,
        separator: char,
        mode: SamplingMode,
        range: &Range<usize>,
    ) -> bool {
        self.version == version
            && self.separator == separator
            && self.mode == mode
            && (mode == SamplingMode::Full || self.range == *range)
    }
}
