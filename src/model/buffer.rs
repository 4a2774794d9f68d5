//! Per-buffer view state

use crate::config::ColumnsConfig;
use crate::csv::WidthCache;

/// Column mode settings and caches for one buffer
#[derive(Debug, Clone)]
pub struct BufferState {
    /// Whether the buffer is treated as delimited text
    pub enabled: bool,
    /// User command forcing column mode on or off, over classification
    pub forced: Option<bool>,
    /// Separator in use
    pub separator: char,
    /// Separator set by the user, kept across re-detection
    pub separator_override: Option<char>,
    /// Sticky header line count
    pub header_lines: usize,
    /// Whether the sticky header is toggled on
    pub header_enabled: bool,
    /// Whether the clean view is toggled on
    pub clean_active: bool,
    /// Last computed width table
    pub width_cache: Option<WidthCache>,
}

impl BufferState {
    pub fn new(config: &ColumnsConfig) -> Self {
        Self {
            enabled: false,
            forced: None,
            separator: ',',
            separator_override: None,
            header_lines: config.header_lines,
            header_enabled: config.sticky_header,
            clean_active: false,
            width_cache: None,
        }
    }

    /// Whether a header surface is wanted at all
    pub fn wants_header(&self) -> bool {
        self.enabled && self.header_enabled && self.header_lines > 0
    }

    /// Whether a clean view surface is wanted
    pub fn wants_clean(&self) -> bool {
        self.enabled && self.clean_active
    }

    /// Drop the cached width table
    pub fn invalidate_widths(&mut self) {
        self.width_cache = None;
    }
}
