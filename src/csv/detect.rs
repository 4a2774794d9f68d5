//! Separator detection and delimited-buffer classification

use std::collections::HashMap;

use super::parser::parse_fields;

/// Well-known delimiters with user-facing names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
    Space,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
            Delimiter::Space => ' ',
        }
    }

    /// Delimiter implied by a file extension or filetype, if any
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" | "tab" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            "ssv" => Some(Delimiter::Semicolon),
            _ => None,
        }
    }

    /// Look up a delimiter by name (`comma`, `tab`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "comma" => Some(Delimiter::Comma),
            "tab" => Some(Delimiter::Tab),
            "pipe" => Some(Delimiter::Pipe),
            "semicolon" => Some(Delimiter::Semicolon),
            "space" => Some(Delimiter::Space),
            _ => None,
        }
    }
}

/// Parse a separator argument: a delimiter name, `\t`, or a single character
pub fn parse_separator(value: &str) -> Option<char> {
    if let Some(delimiter) = Delimiter::from_name(value.trim()) {
        return Some(delimiter.char());
    }
    if value == "\\t" {
        return Some('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch != '"' && ch != '\n' && ch != '\r' => Some(ch),
        _ => None,
    }
}

/// Sampling bounds for separator detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectLimits {
    /// Stop after this many non-blank lines
    pub non_empty_lines: usize,
    /// Stop after scanning this many lines in total, blank or not
    pub scan_budget: usize,
}

impl Default for DetectLimits {
    fn default() -> Self {
        Self {
            non_empty_lines: 10,
            scan_budget: 100,
        }
    }
}

/// Pick the most frequent candidate separator in the sampled lines
///
/// Counts raw occurrences (quotes are not considered). Ties go to the
/// candidate listed first. Returns `None` when no candidate occurs at all.
pub fn detect_separator<'a, I>(lines: I, candidates: &[char], limits: DetectLimits) -> Option<char>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = vec![0usize; candidates.len()];
    let mut non_empty = 0;

    for line in lines.into_iter().take(limits.scan_budget) {
        if non_empty >= limits.non_empty_lines {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        non_empty += 1;

        for ch in line.chars() {
            if let Some(idx) = candidates.iter().position(|&c| c == ch) {
                counts[idx] += 1;
            }
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (idx, &count) in counts.iter().enumerate() {
        if count > best.map(|(_, c)| c).unwrap_or(0) {
            best = Some((idx, count));
        }
    }

    best.map(|(idx, _)| candidates[idx])
}

/// Fallback separator when detection finds nothing
pub fn default_separator(filetype: &str, file_name: &str) -> char {
    extension_hint(filetype, file_name)
        .unwrap_or_default()
        .char()
}

/// Delimiter implied by a filetype, falling back to the file extension
pub fn extension_hint(filetype: &str, file_name: &str) -> Option<Delimiter> {
    Delimiter::from_extension(filetype).or_else(|| {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Delimiter::from_extension)
    })
}

/// Thresholds for enabling column mode on buffers that are not named as
/// delimited files
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoDetectThresholds {
    /// Non-blank lines to sample
    pub sample_lines: usize,
    /// Minimum non-blank lines required before deciding
    pub min_lines: usize,
    /// Minimum field count of the dominant row shape
    pub min_columns: usize,
    /// Share of sampled lines that must have the dominant field count
    pub min_agreement: f32,
}

impl Default for AutoDetectThresholds {
    fn default() -> Self {
        Self {
            sample_lines: 20,
            min_lines: 2,
            min_columns: 2,
            min_agreement: 0.8,
        }
    }
}

/// Whether sampled lines look like a table split by `separator`
///
/// Prose and logs tend to have a few commas per line in varying numbers;
/// real tables agree on their field count.
pub fn looks_delimited<'a, I>(
    lines: I,
    separator: char,
    max_columns: usize,
    thresholds: &AutoDetectThresholds,
) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let counts: Vec<usize> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .take(thresholds.sample_lines)
        .map(|line| parse_fields(line, separator, max_columns).len())
        .collect();

    if counts.is_empty() || counts.len() < thresholds.min_lines {
        return false;
    }

    let mut histogram: HashMap<usize, usize> = HashMap::new();
    for &count in &counts {
        *histogram.entry(count).or_default() += 1;
    }

    // Prefer the wider shape when two shapes are equally common
    let Some((&columns, &rows)) = histogram
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))
    else {
        return false;
    };

    let agreement = rows as f32 / counts.len() as f32;
    columns >= thresholds.min_columns && agreement >= thresholds.min_agreement
}
