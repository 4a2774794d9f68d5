//! Delimited field scanning
//!
//! A lenient, single-pass scanner that splits one line into field byte
//! ranges. Quoted fields may contain the separator, and a doubled quote
//! inside quotes is a literal quote. Malformed quoting never fails: an
//! unterminated quote simply runs to the end of the line.

use std::borrow::Cow;

/// Quote character recognised by the scanner
pub const QUOTE: char = '"';

/// Field end marker meaning "to the end of the line"
pub const EOL_SENTINEL: usize = usize::MAX;

/// Byte range of one field within a line
///
/// `end` is the byte offset of the separator that terminated the field, or
/// [`EOL_SENTINEL`] for the last field. For hit-testing the range is
/// inclusive of `end`, so the separator belongs to the field before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the field runs to the end of the line
    pub fn is_open(&self) -> bool {
        self.end == EOL_SENTINEL
    }

    /// Concrete end offset for a line of `line_len` bytes
    pub fn resolve_end(&self, line_len: usize) -> usize {
        self.end.min(line_len)
    }

    /// Inclusive containment test used for cursor mapping
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Raw (un-normalized) field text
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let end = self.resolve_end(line.len());
        line.get(self.start.min(end)..end).unwrap_or("")
    }
}

/// Split a line into at most `max_columns` field ranges
///
/// Scanning stops as soon as `max_columns` fields have been closed by a
/// separator; the rest of the line is not examined. When fewer fields were
/// closed, the remainder becomes a final open-ended field.
pub fn parse_fields(line: &str, separator: char, max_columns: usize) -> Vec<FieldRange> {
    let mut fields = Vec::new();
    if max_columns == 0 {
        return fields;
    }

    let mut in_quotes = false;
    let mut field_start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch == QUOTE {
            if in_quotes && matches!(chars.peek(), Some((_, QUOTE))) {
                // Escaped quote: both characters are content
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == separator && !in_quotes {
            fields.push(FieldRange::new(field_start, offset));
            field_start = offset + ch.len_utf8();
            if fields.len() >= max_columns {
                return fields;
            }
        }
    }

    fields.push(FieldRange::new(field_start, EOL_SENTINEL));
    fields
}

/// 1-based index of the field containing `offset`
///
/// Uses the inclusive end of [`FieldRange::contains`], so an offset sitting
/// on a separator maps to the field the separator closes. Falls back to the
/// first column when nothing matches.
pub fn field_index_at(fields: &[FieldRange], offset: usize) -> usize {
    fields
        .iter()
        .position(|field| field.contains(offset))
        .map(|idx| idx + 1)
        .unwrap_or(1)
}

/// Trim a raw cell and strip one layer of quoting
///
/// `"a""b"` becomes `a"b`. Tabs left inside the cell become single spaces,
/// so a cell draws exactly as wide as it measures wherever its slot lands.
/// Cells needing neither change are borrowed as-is.
pub fn normalize_cell(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    let quote_len = QUOTE.len_utf8();

    let cell = if trimmed.len() >= 2 * quote_len
        && trimmed.starts_with(QUOTE)
        && trimmed.ends_with(QUOTE)
    {
        let inner = &trimmed[quote_len..trimmed.len() - quote_len];
        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(trimmed)
    };

    if cell.contains('\t') {
        Cow::Owned(cell.replace('\t', " "))
    } else {
        cell
    }
}

/// Parse a line and return its normalized cells
pub fn split_cells(line: &str, separator: char, max_columns: usize) -> Vec<Cow<'_, str>> {
    parse_fields(line, separator, max_columns)
        .iter()
        .map(|field| normalize_cell(field.slice(line)))
        .collect()
}
