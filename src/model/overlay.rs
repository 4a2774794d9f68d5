//! Per-window overlay state
//!
//! A window shows at most one sticky header surface and one clean view
//! surface. The header always stacks above the clean view.

use serde::Serialize;

use super::registry::SurfaceId;

/// Stacking order of the clean view surface
pub const CLEAN_Z_INDEX: u32 = 50;
/// Stacking order of the header surface, above the clean view
pub const HEADER_Z_INDEX: u32 = 60;

/// Kind of secondary surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Header,
    Clean,
}

impl SurfaceKind {
    pub fn z_index(self) -> u32 {
        match self {
            SurfaceKind::Header => HEADER_Z_INDEX,
            SurfaceKind::Clean => CLEAN_Z_INDEX,
        }
    }
}

/// Placement of a surface relative to its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfaceGeometry {
    /// Row offset from the window's top
    pub row: usize,
    /// Column offset from the window's left edge
    pub col: usize,
    pub width: usize,
    pub height: usize,
    pub z_index: u32,
}

/// A live secondary surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub id: SurfaceId,
    pub geometry: SurfaceGeometry,
}

/// Which overlays a window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OverlayMode {
    #[default]
    Inactive,
    HeaderOnly,
    CleanOnly,
    HeaderAndClean,
}

impl OverlayMode {
    pub fn from_flags(header: bool, clean: bool) -> Self {
        match (header, clean) {
            (false, false) => OverlayMode::Inactive,
            (true, false) => OverlayMode::HeaderOnly,
            (false, true) => OverlayMode::CleanOnly,
            (true, true) => OverlayMode::HeaderAndClean,
        }
    }

    pub fn has_header(self) -> bool {
        matches!(self, OverlayMode::HeaderOnly | OverlayMode::HeaderAndClean)
    }

    pub fn has_clean(self) -> bool {
        matches!(self, OverlayMode::CleanOnly | OverlayMode::HeaderAndClean)
    }
}

/// Surfaces attached to one window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub header: Option<Surface>,
    pub clean: Option<Surface>,
    /// Mode requested at the last refresh
    pub mode: OverlayMode,
}

impl OverlayState {
    /// Remove and return every live surface
    pub fn take_all(&mut self) -> Vec<Surface> {
        self.header.take().into_iter().chain(self.clean.take()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.clean.is_none()
    }
}
