//! Boundary to the host editor
//!
//! The core never touches editor APIs directly. Everything it reads (lines,
//! geometry, cursor, content version) and everything it produces
//! (highlights, surfaces, warnings) goes through [`Host`].

mod memory;

use std::ops::Range;

use serde::Serialize;

use crate::csv::{ColorRange, WindowView};
use crate::model::{BufferId, SurfaceGeometry, SurfaceId, SurfaceKind, WindowId};

pub use memory::{MemoryHost, MemorySurface};

/// Descriptive metadata of a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferInfo {
    /// Declared content type (e.g. `csv`), empty if unknown
    pub filetype: String,
    /// File name or path, empty for scratch buffers
    pub name: String,
}

impl BufferInfo {
    pub fn new(filetype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            filetype: filetype.into(),
            name: name.into(),
        }
    }
}

/// Rendered content and placement of a secondary surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceContent {
    pub kind: SurfaceKind,
    pub lines: Vec<String>,
    /// Highlights in surface coordinates
    pub highlights: Vec<ColorRange>,
    pub geometry: SurfaceGeometry,
}

/// Failure reported by the host at the surface boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused the requested geometry
    InvalidGeometry(SurfaceGeometry),
    /// The window no longer exists
    UnknownWindow(WindowId),
    /// The surface no longer exists
    UnknownSurface(SurfaceId),
    /// Any other host-side refusal
    Rejected(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::InvalidGeometry(g) => write!(
                f,
                "invalid surface geometry {}x{} at ({}, {})",
                g.width, g.height, g.row, g.col
            ),
            HostError::UnknownWindow(id) => write!(f, "unknown window {}", id.0),
            HostError::UnknownSurface(id) => write!(f, "unknown surface {}", id.0),
            HostError::Rejected(msg) => write!(f, "host rejected request: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Editor services consumed by the column mode core
pub trait Host {
    /// Number of lines in a buffer
    fn line_count(&self, buffer: BufferId) -> usize;

    /// Text of lines in `range`, without line terminators
    fn lines(&self, buffer: BufferId, range: Range<usize>) -> Vec<String>;

    fn buffer_info(&self, buffer: BufferId) -> BufferInfo;

    /// Token that changes whenever the buffer text changes
    fn content_version(&self, buffer: BufferId) -> u64;

    /// Buffer currently displayed in a window
    fn window_buffer(&self, window: WindowId) -> Option<BufferId>;

    /// Geometry, scroll position and cursor of a window
    fn window_view(&self, window: WindowId) -> Option<WindowView>;

    /// Replace the column highlights of a buffer as shown in a window
    fn set_highlights(&mut self, buffer: BufferId, window: WindowId, ranges: &[ColorRange]);

    fn clear_highlights(&mut self, buffer: BufferId, window: WindowId);

    fn open_surface(
        &mut self,
        window: WindowId,
        content: &SurfaceContent,
    ) -> Result<SurfaceId, HostError>;

    fn update_surface(
        &mut self,
        surface: SurfaceId,
        content: &SurfaceContent,
    ) -> Result<(), HostError>;

    fn close_surface(&mut self, surface: SurfaceId);

    /// Place a surface's cursor at `(row, byte)` in surface coordinates
    fn set_surface_cursor(
        &mut self,
        surface: SurfaceId,
        row: usize,
        byte: usize,
    ) -> Result<(), HostError>;

    /// Show a warning to the user
    fn notify_warning(&mut self, message: &str);
}
