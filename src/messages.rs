//! Message types for the Elm-style architecture
//!
//! Host events and user commands are both delivered as [`Msg`] values and
//! handled synchronously by `update::update`.

use crate::model::{BufferId, WindowId};

/// User commands acting on the buffer shown in a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandMsg {
    /// Force column mode on, regardless of classification
    Enable,
    /// Force column mode off
    Disable,
    /// Toggle column mode, starting from the current state
    Toggle,
    /// Toggle the sticky header
    ToggleHeader,
    /// Toggle the padded clean view
    ToggleClean,
    /// Set the sticky header line count from user input
    SetHeaderLines(String),
    /// Set the separator from user input (a character or a name)
    SetSeparator(String),
    /// Forget the user separator and detect again
    Redetect,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A buffer became current in a window (also sent on filetype change)
    BufferEnter { buffer: BufferId, window: WindowId },
    /// A buffer was deleted or wiped
    BufferClosed(BufferId),
    /// A window was closed
    WindowClosed(WindowId),
    /// The window scrolled vertically or horizontally
    Scrolled(WindowId),
    /// The text of the window's buffer changed
    TextChanged(WindowId),
    /// The window was resized
    Resized(WindowId),
    /// The cursor moved in the window
    CursorMoved(WindowId),
    /// A user command
    Command {
        window: WindowId,
        command: CommandMsg,
    },
}
