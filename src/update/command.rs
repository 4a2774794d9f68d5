//! User commands
//!
//! Commands validate their input before touching any state, so a rejected
//! command leaves the buffer exactly as it was.

use super::{classify_buffer, refresh_window};
use crate::csv::parse_separator;
use crate::host::Host;
use crate::messages::CommandMsg;
use crate::model::{ColumnsModel, WindowId};

/// Reason a user command was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Header line count is not a non-negative integer
    InvalidHeaderLines(String),
    /// Separator is neither a single character nor a known name
    InvalidSeparator(String),
    /// The window shows no buffer
    NoBuffer(WindowId),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidHeaderLines(value) => write!(
                f,
                "Header lines must be a non-negative integer, got '{}'",
                value
            ),
            CommandError::InvalidSeparator(value) => write!(
                f,
                "Separator must be a single character or one of comma, tab, semicolon, pipe, space; got '{}'",
                value
            ),
            CommandError::NoBuffer(window) => write!(f, "Window {} shows no buffer", window.0),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse a header line count
pub fn parse_header_lines(value: &str) -> Result<usize, CommandError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidHeaderLines(value.to_string()))
}

/// Run a user command against the buffer shown in `window`
pub fn run_command<H: Host>(
    model: &mut ColumnsModel,
    host: &mut H,
    window: WindowId,
    command: CommandMsg,
) -> Result<(), CommandError> {
    let buffer = host
        .window_buffer(window)
        .ok_or(CommandError::NoBuffer(window))?;

    let config = &model.config;
    let state = model.registry.buffer_entry(buffer, config);
    let mut reclassify = false;

    match command {
        CommandMsg::Enable => {
            state.forced = Some(true);
            reclassify = true;
        }
        CommandMsg::Disable => {
            state.forced = Some(false);
            state.enabled = false;
        }
        CommandMsg::Toggle => {
            let enable = !state.enabled;
            state.forced = Some(enable);
            state.enabled = enable;
            reclassify = enable;
        }
        CommandMsg::ToggleHeader => state.header_enabled = !state.header_enabled,
        CommandMsg::ToggleClean => state.clean_active = !state.clean_active,
        CommandMsg::SetHeaderLines(value) => {
            let lines = parse_header_lines(&value)?;
            state.header_lines = lines;
            // Windowed width tables sample the header lines
            state.invalidate_widths();
        }
        CommandMsg::SetSeparator(value) => {
            let separator =
                parse_separator(&value).ok_or(CommandError::InvalidSeparator(value))?;
            state.separator_override = Some(separator);
            state.separator = separator;
            state.invalidate_widths();
        }
        CommandMsg::Redetect => {
            state.separator_override = None;
            reclassify = true;
        }
    }

    if reclassify {
        classify_buffer(model, host, buffer);
    }
    refresh_window(model, host, window);
    Ok(())
}
