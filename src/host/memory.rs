//! In-memory host
//!
//! Buffers are ropes, windows are plain geometry records and surfaces are
//! kept in a map. Every instruction from the core is recorded so callers can
//! inspect or draw the resulting frame.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use ropey::Rope;

use super::{BufferInfo, Host, HostError, SurfaceContent};
use crate::csv::{ColorRange, CursorPos, WindowView};
use crate::model::{BufferId, SurfaceId, SurfaceKind, WindowId};
use crate::util::TABULATOR_WIDTH;

#[derive(Debug, Clone)]
struct MemoryBuffer {
    rope: Rope,
    info: BufferInfo,
    version: u64,
}

impl MemoryBuffer {
    /// Line count the way editors report it: a trailing newline does not
    /// start an extra line
    fn line_count(&self) -> usize {
        let lines = self.rope.len_lines();
        let ends_with_newline =
            self.rope.len_chars() > 0 && self.rope.char(self.rope.len_chars() - 1) == '\n';
        if ends_with_newline {
            lines - 1
        } else {
            lines
        }
    }

    fn line(&self, idx: usize) -> String {
        let mut line = self.rope.line(idx).to_string();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }
}

#[derive(Debug, Clone)]
struct MemoryWindow {
    buffer: BufferId,
    top_line: usize,
    left_column: usize,
    width: usize,
    height: usize,
    text_offset: usize,
    cursor: CursorPos,
}

/// A surface as last rendered by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    pub window: WindowId,
    pub content: SurfaceContent,
    /// Cursor `(row, byte)` inside the surface
    pub cursor: Option<(usize, usize)>,
}

/// Host implementation backed by in-memory ropes
#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: HashMap<BufferId, MemoryBuffer>,
    windows: HashMap<WindowId, MemoryWindow>,
    surfaces: BTreeMap<SurfaceId, MemorySurface>,
    highlights: HashMap<(BufferId, WindowId), Vec<ColorRange>>,
    warnings: Vec<String>,
    next_surface_id: u64,
    reject_surfaces: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a buffer
    pub fn add_buffer(&mut self, id: BufferId, text: &str, info: BufferInfo) {
        self.buffers.insert(
            id,
            MemoryBuffer {
                rope: Rope::from_str(text),
                info,
                version: 1,
            },
        );
    }

    /// Replace a buffer's text, bumping its content version
    pub fn set_text(&mut self, id: BufferId, text: &str) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.rope = Rope::from_str(text);
            buffer.version += 1;
        }
    }

    /// Replace one line's text, bumping the content version
    pub fn replace_line(&mut self, id: BufferId, line: usize, text: &str) {
        let Some(buffer) = self.buffers.get_mut(&id) else {
            return;
        };
        if line >= buffer.line_count() {
            return;
        }
        let start = buffer.rope.line_to_char(line);
        let end = start + buffer.line(line).chars().count();
        buffer.rope.remove(start..end);
        buffer.rope.insert(start, text);
        buffer.version += 1;
    }

    /// Open a window showing `buffer`
    pub fn add_window(&mut self, id: WindowId, buffer: BufferId, width: usize, height: usize) {
        self.windows.insert(
            id,
            MemoryWindow {
                buffer,
                top_line: 0,
                left_column: 0,
                width,
                height,
                text_offset: 0,
                cursor: CursorPos::default(),
            },
        );
    }

    /// Close a window on the host side, along with its surfaces
    pub fn remove_window(&mut self, id: WindowId) {
        self.windows.remove(&id);
        self.surfaces.retain(|_, s| s.window != id);
        self.highlights.retain(|(_, w), _| *w != id);
    }

    pub fn scroll_to(&mut self, window: WindowId, top_line: usize) {
        if let Some(win) = self.windows.get_mut(&window) {
            win.top_line = top_line;
        }
    }

    pub fn set_left_column(&mut self, window: WindowId, left_column: usize) {
        if let Some(win) = self.windows.get_mut(&window) {
            win.left_column = left_column;
        }
    }

    pub fn set_cursor(&mut self, window: WindowId, line: usize, byte: usize) {
        if let Some(win) = self.windows.get_mut(&window) {
            win.cursor = CursorPos::new(line, byte);
        }
    }

    pub fn resize(&mut self, window: WindowId, width: usize, height: usize) {
        if let Some(win) = self.windows.get_mut(&window) {
            win.width = width;
            win.height = height;
        }
    }

    pub fn set_text_offset(&mut self, window: WindowId, text_offset: usize) {
        if let Some(win) = self.windows.get_mut(&window) {
            win.text_offset = text_offset;
        }
    }

    /// Make every surface open/update fail, as a host refusing geometry would
    pub fn set_reject_surfaces(&mut self, reject: bool) {
        self.reject_surfaces = reject;
    }

    pub fn highlights(&self, buffer: BufferId, window: WindowId) -> &[ColorRange] {
        self.highlights
            .get(&(buffer, window))
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    /// Live surfaces of a window, lowest stacking order first
    pub fn surfaces(&self, window: WindowId) -> Vec<&MemorySurface> {
        let mut surfaces: Vec<&MemorySurface> = self
            .surfaces
            .values()
            .filter(|s| s.window == window)
            .collect();
        surfaces.sort_by_key(|s| s.content.geometry.z_index);
        surfaces
    }

    /// The live surface of a given kind in a window
    pub fn surface(&self, window: WindowId, kind: SurfaceKind) -> Option<&MemorySurface> {
        self.surfaces
            .values()
            .find(|s| s.window == window && s.content.kind == kind)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn check_geometry(&self, window: WindowId, content: &SurfaceContent) -> Result<(), HostError> {
        if !self.windows.contains_key(&window) {
            return Err(HostError::UnknownWindow(window));
        }
        let geometry = content.geometry;
        if self.reject_surfaces || geometry.width == 0 || geometry.height == 0 {
            return Err(HostError::InvalidGeometry(geometry));
        }
        Ok(())
    }
}

impl Host for MemoryHost {
    fn line_count(&self, buffer: BufferId) -> usize {
        self.buffers.get(&buffer).map(|b| b.line_count()).unwrap_or(0)
    }

    fn lines(&self, buffer: BufferId, range: Range<usize>) -> Vec<String> {
        let Some(buf) = self.buffers.get(&buffer) else {
            return Vec::new();
        };
        let end = range.end.min(buf.line_count());
        (range.start.min(end)..end).map(|idx| buf.line(idx)).collect()
    }

    fn buffer_info(&self, buffer: BufferId) -> BufferInfo {
        self.buffers
            .get(&buffer)
            .map(|b| b.info.clone())
            .unwrap_or_default()
    }

    fn content_version(&self, buffer: BufferId) -> u64 {
        self.buffers.get(&buffer).map(|b| b.version).unwrap_or(0)
    }

    fn window_buffer(&self, window: WindowId) -> Option<BufferId> {
        self.windows.get(&window).map(|w| w.buffer)
    }

    fn window_view(&self, window: WindowId) -> Option<WindowView> {
        let win = self.windows.get(&window)?;
        let line_count = self.line_count(win.buffer);
        let top_line = win.top_line.min(line_count);
        Some(WindowView {
            top_line,
            bottom_line: (top_line + win.height).min(line_count),
            left_column: win.left_column,
            width: win.width,
            height: win.height,
            text_offset: win.text_offset,
            tab_width: TABULATOR_WIDTH,
            cursor: win.cursor,
        })
    }

    fn set_highlights(&mut self, buffer: BufferId, window: WindowId, ranges: &[ColorRange]) {
        self.highlights.insert((buffer, window), ranges.to_vec());
    }

    fn clear_highlights(&mut self, buffer: BufferId, window: WindowId) {
        self.highlights.remove(&(buffer, window));
    }

    fn open_surface(
        &mut self,
        window: WindowId,
        content: &SurfaceContent,
    ) -> Result<SurfaceId, HostError> {
        self.check_geometry(window, content)?;
        self.next_surface_id += 1;
        let id = SurfaceId(self.next_surface_id);
        self.surfaces.insert(
            id,
            MemorySurface {
                window,
                content: content.clone(),
                cursor: None,
            },
        );
        Ok(id)
    }

    fn update_surface(
        &mut self,
        surface: SurfaceId,
        content: &SurfaceContent,
    ) -> Result<(), HostError> {
        let window = self
            .surfaces
            .get(&surface)
            .map(|s| s.window)
            .ok_or(HostError::UnknownSurface(surface))?;
        self.check_geometry(window, content)?;
        if let Some(existing) = self.surfaces.get_mut(&surface) {
            existing.content = content.clone();
        }
        Ok(())
    }

    fn close_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    fn set_surface_cursor(
        &mut self,
        surface: SurfaceId,
        row: usize,
        byte: usize,
    ) -> Result<(), HostError> {
        let existing = self
            .surfaces
            .get_mut(&surface)
            .ok_or(HostError::UnknownSurface(surface))?;
        if row >= existing.content.lines.len() {
            return Err(HostError::Rejected(format!(
                "cursor row {} outside surface of {} lines",
                row,
                existing.content.lines.len()
            )));
        }
        existing.cursor = Some((row, byte));
        Ok(())
    }

    fn notify_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
