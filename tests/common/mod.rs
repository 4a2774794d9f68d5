//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use csvcolumns::host::{BufferInfo, Host, MemorySurface};
use csvcolumns::model::{BufferId, SurfaceKind, WindowId};
use csvcolumns::{update, ColumnsConfig, ColumnsModel, CommandMsg, MemoryHost, Msg};

pub const BUF: BufferId = BufferId(1);
pub const WIN: WindowId = WindowId(1);

/// A model and host with one buffer shown in one window
pub struct Harness {
    pub model: ColumnsModel,
    pub host: MemoryHost,
}

impl Harness {
    /// Buffer `text` with the given filetype in an 80x`height` window,
    /// already entered
    pub fn new(text: &str, filetype: &str, height: usize) -> Self {
        Self::with_config(text, filetype, height, ColumnsConfig::default())
    }

    pub fn with_config(text: &str, filetype: &str, height: usize, config: ColumnsConfig) -> Self {
        let mut host = MemoryHost::new();
        let name = if filetype.is_empty() {
            "scratch".to_string()
        } else {
            format!("data.{}", filetype)
        };
        host.add_buffer(BUF, text, BufferInfo::new(filetype, name));
        host.add_window(WIN, BUF, 80, height);

        let mut harness = Self {
            model: ColumnsModel::new(config),
            host,
        };
        harness.send(Msg::BufferEnter {
            buffer: BUF,
            window: WIN,
        });
        harness
    }

    pub fn send(&mut self, msg: Msg) {
        update(&mut self.model, &mut self.host, msg);
    }

    pub fn command(&mut self, command: CommandMsg) {
        self.send(Msg::Command {
            window: WIN,
            command,
        });
    }

    pub fn scroll(&mut self, top_line: usize) {
        self.host.scroll_to(WIN, top_line);
        self.send(Msg::Scrolled(WIN));
    }

    pub fn cursor(&mut self, line: usize, byte: usize) {
        self.host.set_cursor(WIN, line, byte);
        self.send(Msg::CursorMoved(WIN));
    }

    pub fn header(&self) -> Option<&MemorySurface> {
        self.host.surface(WIN, SurfaceKind::Header)
    }

    pub fn clean(&self) -> Option<&MemorySurface> {
        self.host.surface(WIN, SurfaceKind::Clean)
    }

    pub fn enabled(&self) -> bool {
        self.model
            .registry
            .buffer(BUF)
            .map(|s| s.enabled)
            .unwrap_or(false)
    }

    pub fn separator(&self) -> char {
        self.model
            .registry
            .buffer(BUF)
            .map(|s| s.separator)
            .unwrap_or(',')
    }

    pub fn line_count(&self) -> usize {
        self.host.line_count(BUF)
    }
}

/// `rows` lines of `cols` comma-separated cells, with a header line
pub fn table(rows: usize, cols: usize) -> String {
    let mut text = String::new();
    let header: Vec<String> = (1..=cols).map(|c| format!("col{}", c)).collect();
    text.push_str(&header.join(","));
    text.push('\n');
    for r in 1..=rows {
        let cells: Vec<String> = (1..=cols).map(|c| format!("r{}c{}", r, c)).collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}
