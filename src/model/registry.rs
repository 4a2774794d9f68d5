//! Per-buffer and per-window state registry
//!
//! Records are keyed by the host's stable ids. Buffer records are created
//! lazily on first access; both kinds are removed explicitly when the host
//! reports the buffer or window closed.

use std::collections::HashMap;

use serde::Serialize;

use super::buffer::BufferState;
use super::overlay::OverlayState;
use crate::config::ColumnsConfig;

// ============================================================================
// Identifiers
// ============================================================================

/// Host identifier for a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BufferId(pub u64);

/// Host identifier for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WindowId(pub u64);

/// Host identifier for a secondary surface (floating window)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SurfaceId(pub u64);

// ============================================================================
// Registry
// ============================================================================

/// Owner of all view state records
#[derive(Debug, Default)]
pub struct Registry {
    buffers: HashMap<BufferId, BufferState>,
    windows: HashMap<WindowId, OverlayState>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, id: BufferId) -> Option<&BufferState> {
        self.buffers.get(&id)
    }

    pub fn buffer_mut(&mut self, id: BufferId) -> Option<&mut BufferState> {
        self.buffers.get_mut(&id)
    }

    /// Get a buffer record, creating it from config defaults if missing
    pub fn buffer_entry(&mut self, id: BufferId, config: &ColumnsConfig) -> &mut BufferState {
        self.buffers.entry(id).or_insert_with(|| {
            tracing::debug!("Creating view state for buffer {}", id.0);
            BufferState::new(config)
        })
    }

    pub fn remove_buffer(&mut self, id: BufferId) -> Option<BufferState> {
        self.buffers.remove(&id)
    }

    pub fn overlay(&self, id: WindowId) -> Option<&OverlayState> {
        self.windows.get(&id)
    }

    pub fn overlay_mut(&mut self, id: WindowId) -> Option<&mut OverlayState> {
        self.windows.get_mut(&id)
    }

    /// Get a window's overlay record, creating an empty one if missing
    pub fn overlay_entry(&mut self, id: WindowId) -> &mut OverlayState {
        self.windows.entry(id).or_default()
    }

    pub fn remove_window(&mut self, id: WindowId) -> Option<OverlayState> {
        self.windows.remove(&id)
    }

    /// Windows that currently hold overlay records
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.windows.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}
