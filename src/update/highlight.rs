//! Column colors on the primary view

use crate::csv::{render_visible, WindowView};
use crate::host::Host;
use crate::model::{BufferId, ColumnsModel, WindowId};

/// Color every field of the window's visible lines
pub fn refresh_highlights<H: Host>(
    model: &ColumnsModel,
    host: &mut H,
    buffer: BufferId,
    window: WindowId,
    view: &WindowView,
) {
    let Some(state) = model.registry.buffer(buffer) else {
        return;
    };

    let lines = host.lines(buffer, view.top_line..view.bottom_line);
    let ranges = render_visible(
        lines.iter().map(String::as_str),
        view.top_line,
        state.separator,
        model.config.max_columns,
        model.config.palette_size(),
    );
    host.set_highlights(buffer, window, &ranges);
}
