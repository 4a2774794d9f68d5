//! Update functions for the Elm-style architecture
//!
//! Every host event is handled synchronously and runs to completion before
//! the next one. A refresh always recomputes the window's highlights and
//! surfaces from scratch, so repeated or out-of-order triggers converge on
//! the state of the most recent one.

mod classify;
mod command;
mod highlight;
mod sync;

use crate::host::Host;
use crate::messages::Msg;
use crate::model::{BufferId, ColumnsModel, WindowId};

pub use classify::classify_buffer;
pub use command::{run_command, CommandError};
pub use highlight::refresh_highlights;
pub use sync::{map_cursor_to_padded, sync_overlays, teardown_window};

/// Main update function - dispatches to sub-handlers
pub fn update<H: Host>(model: &mut ColumnsModel, host: &mut H, msg: Msg) {
    tracing::trace!(?msg, "update");
    match msg {
        Msg::BufferEnter { buffer, window } => {
            classify_buffer(model, host, buffer);
            refresh_window(model, host, window);
        }
        Msg::BufferClosed(buffer) => close_buffer(model, host, buffer),
        Msg::WindowClosed(window) => {
            teardown_window(&mut model.registry, host, window);
            model.registry.remove_window(window);
        }
        Msg::Scrolled(window)
        | Msg::TextChanged(window)
        | Msg::Resized(window)
        | Msg::CursorMoved(window) => refresh_window(model, host, window),
        Msg::Command { window, command } => {
            if let Err(e) = run_command(model, host, window, command) {
                tracing::warn!("Command rejected: {}", e);
                host.notify_warning(&e.to_string());
            }
        }
    }
}

/// Recompute highlights and overlays for one window
pub fn refresh_window<H: Host>(model: &mut ColumnsModel, host: &mut H, window: WindowId) {
    let Some(buffer) = host.window_buffer(window) else {
        return;
    };
    let Some(view) = host.window_view(window) else {
        return;
    };

    let enabled = model
        .registry
        .buffer(buffer)
        .map(|state| state.enabled)
        .unwrap_or(false);

    if !enabled {
        host.clear_highlights(buffer, window);
        teardown_window(&mut model.registry, host, window);
        model.registry.remove_window(window);
        return;
    }

    if view.is_degenerate() {
        tracing::trace!("Window {} has nothing to render", window.0);
        host.clear_highlights(buffer, window);
        teardown_window(&mut model.registry, host, window);
        return;
    }

    refresh_highlights(model, host, buffer, window, &view);
    sync_overlays(model, host, buffer, window, &view);
}

/// Drop a buffer's state and the overlays of windows still showing it
fn close_buffer<H: Host>(model: &mut ColumnsModel, host: &mut H, buffer: BufferId) {
    for window in model.registry.window_ids() {
        if host.window_buffer(window) == Some(buffer) {
            teardown_window(&mut model.registry, host, window);
            model.registry.remove_window(window);
        }
    }
    if model.registry.remove_buffer(buffer).is_some() {
        tracing::debug!("Dropped view state for buffer {}", buffer.0);
    }
}
