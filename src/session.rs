//! Single-window session over the in-memory host
//!
//! Bundles a model, a [`MemoryHost`] holding one buffer in one window, and
//! the frame composition used by the command-line front end.

use serde::Serialize;

use crate::config::ColumnsConfig;
use crate::csv::{render::group_name, render::slice_ranges, slice_display, ColorRange, CursorPos};
use crate::host::{BufferInfo, Host, MemoryHost, SurfaceContent};
use crate::messages::{CommandMsg, Msg};
use crate::model::{BufferId, ColumnsModel, WindowId};
use crate::update::update;

/// Buffer id used by sessions
pub const SESSION_BUFFER: BufferId = BufferId(1);
/// Window id used by sessions
pub const SESSION_WINDOW: WindowId = WindowId(1);

/// One composed screen row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameRow {
    pub text: String,
    /// Highlights with `line` set to this row
    pub highlights: Vec<ColorRange>,
    /// Byte offset of a cursor drawn on this row
    pub cursor: Option<usize>,
}

/// Everything the core told the host, for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct FrameDump<'a> {
    pub separator: Option<char>,
    pub enabled: bool,
    pub highlights: &'a [ColorRange],
    pub surfaces: Vec<SurfaceDump<'a>>,
    /// Highlight group and color for each palette class, in class order
    pub groups: Vec<PaletteGroup<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaletteGroup<'a> {
    pub name: String,
    pub color: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceDump<'a> {
    #[serde(flatten)]
    pub content: &'a SurfaceContent,
    pub cursor: Option<(usize, usize)>,
}

/// A model and host showing one buffer in one window
pub struct Session {
    pub model: ColumnsModel,
    pub host: MemoryHost,
}

impl Session {
    /// Load `text` into a window of `width` x `height` cells
    pub fn open(config: ColumnsConfig, text: &str, info: BufferInfo, width: usize, height: usize) -> Self {
        let mut host = MemoryHost::new();
        host.add_buffer(SESSION_BUFFER, text, info);
        host.add_window(SESSION_WINDOW, SESSION_BUFFER, width, height);

        let mut session = Self {
            model: ColumnsModel::new(config),
            host,
        };
        session.send(Msg::BufferEnter {
            buffer: SESSION_BUFFER,
            window: SESSION_WINDOW,
        });
        session
    }

    pub fn send(&mut self, msg: Msg) {
        update(&mut self.model, &mut self.host, msg);
    }

    pub fn command(&mut self, command: CommandMsg) {
        self.send(Msg::Command {
            window: SESSION_WINDOW,
            command,
        });
    }

    /// Scroll to a top line and horizontal offset
    pub fn scroll(&mut self, top_line: usize, left_column: usize) {
        self.host.scroll_to(SESSION_WINDOW, top_line);
        self.host.set_left_column(SESSION_WINDOW, left_column);
        self.send(Msg::Scrolled(SESSION_WINDOW));
    }

    pub fn move_cursor(&mut self, cursor: CursorPos) {
        self.host.set_cursor(SESSION_WINDOW, cursor.line, cursor.byte);
        self.send(Msg::CursorMoved(SESSION_WINDOW));
    }

    /// Separator in use, if the buffer has been classified
    pub fn separator(&self) -> Option<char> {
        self.model
            .registry
            .buffer(SESSION_BUFFER)
            .map(|state| state.separator)
    }

    pub fn is_enabled(&self) -> bool {
        self.model
            .registry
            .buffer(SESSION_BUFFER)
            .map(|state| state.enabled)
            .unwrap_or(false)
    }

    pub fn warnings(&self) -> &[String] {
        self.host.warnings()
    }

    /// Compose the visible frame: primary text first, then surfaces in
    /// stacking order, each replacing the rows it covers
    pub fn compose(&self) -> Vec<FrameRow> {
        let Some(view) = self.host.window_view(SESSION_WINDOW) else {
            return Vec::new();
        };

        let lines = self
            .host
            .lines(SESSION_BUFFER, view.top_line..view.bottom_line);
        let highlights = self.host.highlights(SESSION_BUFFER, SESSION_WINDOW);

        let mut rows: Vec<FrameRow> = lines
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let slice = slice_display(line, view.left_column, view.text_width(), view.tab_width);
                let line_ranges: Vec<ColorRange> = highlights
                    .iter()
                    .filter(|r| r.line == view.top_line + row)
                    .copied()
                    .collect();
                FrameRow {
                    highlights: slice_ranges(&line_ranges, line.len(), &slice, row),
                    text: slice.text,
                    cursor: None,
                }
            })
            .collect();

        for surface in self.host.surfaces(SESSION_WINDOW) {
            let content = &surface.content;
            for (idx, text) in content
                .lines
                .iter()
                .enumerate()
                .take(content.geometry.height)
            {
                let row = content.geometry.row + idx;
                if row >= rows.len() {
                    rows.resize(row + 1, FrameRow::default());
                }
                rows[row] = FrameRow {
                    text: text.clone(),
                    highlights: content
                        .highlights
                        .iter()
                        .filter(|r| r.line == idx)
                        .map(|r| ColorRange { line: row, ..*r })
                        .collect(),
                    cursor: surface
                        .cursor
                        .filter(|(cursor_row, _)| *cursor_row == idx)
                        .map(|(_, byte)| byte),
                };
            }
        }

        rows
    }

    /// Machine-readable record of the current display instructions
    pub fn dump(&self) -> FrameDump<'_> {
        FrameDump {
            separator: self.separator(),
            enabled: self.is_enabled(),
            highlights: self.host.highlights(SESSION_BUFFER, SESSION_WINDOW),
            surfaces: self
                .host
                .surfaces(SESSION_WINDOW)
                .into_iter()
                .map(|surface| SurfaceDump {
                    content: &surface.content,
                    cursor: surface.cursor,
                })
                .collect(),
            groups: self
                .model
                .config
                .palette
                .iter()
                .enumerate()
                .map(|(class, color)| PaletteGroup {
                    name: group_name(class),
                    color,
                })
                .collect(),
        }
    }
}
