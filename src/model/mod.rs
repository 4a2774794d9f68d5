//! Plugin model - all state owned by the column mode core
//!
//! This module contains the state types following the Elm Architecture
//! pattern: the update functions in `crate::update` are the only writers.

pub mod buffer;
pub mod overlay;
pub mod registry;

pub use buffer::BufferState;
pub use overlay::{
    OverlayMode, OverlayState, Surface, SurfaceGeometry, SurfaceKind, CLEAN_Z_INDEX,
    HEADER_Z_INDEX,
};
pub use registry::{BufferId, Registry, SurfaceId, WindowId};

use crate::config::ColumnsConfig;

/// The complete plugin model
#[derive(Debug, Default)]
pub struct ColumnsModel {
    /// Effective configuration
    pub config: ColumnsConfig,
    /// Per-buffer and per-window state
    pub registry: Registry,
}

impl ColumnsModel {
    pub fn new(config: ColumnsConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
        }
    }
}
