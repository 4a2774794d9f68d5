//! Sticky header and clean view synchronization
//!
//! Both overlays are rebuilt from scratch on every refresh and pushed to the
//! host. The sticky header shows the buffer's first N lines once the view
//! has scrolled past them. The clean view shows the visible lines as a
//! padded table and mirrors the primary cursor's column.
//!
//! Host refusals at the surface boundary are logged and dropped: the
//! affected overlay is simply absent until the next refresh.

use crate::config::ColumnsConfig;
use crate::csv::{
    compute_widths, field_index_at, pad_lines, parse_fields, render::slice_ranges, render_padded,
    render_visible, slice_display, ColorRange, ColumnWidths, PaddedLines, SamplingMode, Slice,
    WidthCache, WindowView,
};
use crate::host::{Host, SurfaceContent};
use crate::model::{
    BufferId, BufferState, ColumnsModel, OverlayMode, Registry, Surface, SurfaceGeometry,
    SurfaceKind, WindowId,
};

/// Lines cut to the window's horizontal scroll, with their highlights
struct SlicedBlock {
    lines: Vec<String>,
    highlights: Vec<ColorRange>,
    slices: Vec<Slice>,
}

fn slice_block(lines: &[String], ranges: &[ColorRange], view: &WindowView) -> SlicedBlock {
    let mut block = SlicedBlock {
        lines: Vec::with_capacity(lines.len()),
        highlights: Vec::new(),
        slices: Vec::with_capacity(lines.len()),
    };

    for (row, line) in lines.iter().enumerate() {
        let slice = slice_display(line, view.left_column, view.text_width(), view.tab_width);
        let row_ranges: Vec<ColorRange> = ranges.iter().filter(|r| r.line == row).copied().collect();
        block
            .highlights
            .extend(slice_ranges(&row_ranges, line.len(), &slice, row));
        block.lines.push(slice.text.clone());
        block.slices.push(slice);
    }

    block
}

/// Width table for the clean view, reusing the cache when it is still valid
///
/// In windowed mode the header lines are sampled along with the visible
/// range so the sticky header lines up with the body.
fn column_widths<H: Host>(
    config: &ColumnsConfig,
    state: &mut BufferState,
    host: &H,
    buffer: BufferId,
    view: &WindowView,
) -> ColumnWidths {
    let version = host.content_version(buffer);
    let mode = config.width_sampling;
    let range = match mode {
        SamplingMode::Full => 0..host.line_count(buffer),
        SamplingMode::Windowed => view.top_line..view.bottom_line,
    };

    if let Some(cache) = &state.width_cache {
        if cache.is_valid_for(version, state.separator, mode, &range) {
            tracing::trace!("Width cache hit for buffer {}", buffer.0);
            return cache.widths.clone();
        }
    }

    let mut lines = Vec::new();
    if mode == SamplingMode::Windowed && state.header_lines > 0 {
        lines.extend(host.lines(buffer, 0..state.header_lines.min(range.start)));
    }
    lines.extend(host.lines(buffer, range.clone()));

    let widths = compute_widths(
        lines.iter().map(String::as_str),
        state.separator,
        config.max_columns,
    );
    tracing::debug!(
        buffer = buffer.0,
        version,
        columns = widths.len(),
        sampled = lines.len(),
        "Computed column widths"
    );

    state.width_cache = Some(WidthCache {
        version,
        separator: state.separator,
        mode,
        range,
        widths: widths.clone(),
    });
    widths
}

/// Clean view content for the visible lines
fn build_clean(
    config: &ColumnsConfig,
    raw: &[String],
    separator: char,
    widths: &ColumnWidths,
    view: &WindowView,
) -> (SurfaceContent, PaddedLines, Vec<Slice>) {
    let padded = pad_lines(
        raw.iter().map(String::as_str),
        separator,
        widths,
        config.max_columns,
    );
    let ranges = render_padded(&padded, config.palette_size());
    let block = slice_block(&padded.lines, &ranges, view);

    let content = SurfaceContent {
        kind: SurfaceKind::Clean,
        lines: block.lines,
        highlights: block.highlights,
        geometry: SurfaceGeometry {
            row: 0,
            col: view.text_offset,
            width: view.text_width(),
            height: view.height,
            z_index: SurfaceKind::Clean.z_index(),
        },
    };
    (content, padded, block.slices)
}

/// Sticky header content; padded to the clean view's widths when given
fn build_header(
    config: &ColumnsConfig,
    raw: &[String],
    separator: char,
    widths: Option<&ColumnWidths>,
    view: &WindowView,
) -> SurfaceContent {
    let block = match widths {
        Some(widths) => {
            let padded = pad_lines(
                raw.iter().map(String::as_str),
                separator,
                widths,
                config.max_columns,
            );
            let ranges = render_padded(&padded, config.palette_size());
            slice_block(&padded.lines, &ranges, view)
        }
        None => {
            let ranges = render_visible(
                raw.iter().map(String::as_str),
                0,
                separator,
                config.max_columns,
                config.palette_size(),
            );
            slice_block(raw, &ranges, view)
        }
    };

    SurfaceContent {
        kind: SurfaceKind::Header,
        geometry: SurfaceGeometry {
            row: 0,
            col: view.text_offset,
            width: view.text_width(),
            height: block.lines.len().min(view.height),
            z_index: SurfaceKind::Header.z_index(),
        },
        lines: block.lines,
        highlights: block.highlights,
    }
}

/// Push `content` into a surface slot: open, update or close as needed
///
/// Returns whether the surface is live afterwards.
fn apply_surface<H: Host>(
    host: &mut H,
    window: WindowId,
    slot: &mut Option<Surface>,
    content: Option<SurfaceContent>,
) -> bool {
    let Some(content) = content else {
        if let Some(surface) = slot.take() {
            host.close_surface(surface.id);
        }
        return false;
    };

    match slot {
        Some(surface) => match host.update_surface(surface.id, &content) {
            Ok(()) => {
                surface.geometry = content.geometry;
                true
            }
            Err(e) => {
                tracing::debug!(
                    "Skipping {:?} overlay for window {}: {}",
                    content.kind,
                    window.0,
                    e
                );
                host.close_surface(surface.id);
                *slot = None;
                false
            }
        },
        None => match host.open_surface(window, &content) {
            Ok(id) => {
                *slot = Some(Surface {
                    id,
                    geometry: content.geometry,
                });
                true
            }
            Err(e) => {
                tracing::debug!(
                    "Skipping {:?} overlay for window {}: {}",
                    content.kind,
                    window.0,
                    e
                );
                false
            }
        },
    }
}

/// Byte offset in a padded line where the cursor's column starts
///
/// The cursor's byte offset in the source line picks the field whose range
/// contains it (a separator belongs to the field it closes). The result is
/// that column's start in the padded line, moved into the horizontal slice.
pub fn map_cursor_to_padded(
    source_line: &str,
    cursor_byte: usize,
    separator: char,
    max_columns: usize,
    padded: &PaddedLines,
    row: usize,
    slice: &Slice,
) -> usize {
    let fields = parse_fields(source_line, separator, max_columns);
    let column = field_index_at(&fields, cursor_byte);
    let start = padded.column_start(row, column).unwrap_or(0);
    slice.map_offset(start)
}

/// Rebuild the header and clean view surfaces of a window
pub fn sync_overlays<H: Host>(
    model: &mut ColumnsModel,
    host: &mut H,
    buffer: BufferId,
    window: WindowId,
    view: &WindowView,
) -> OverlayMode {
    let ColumnsModel { config, registry } = model;

    let Some(state) = registry.buffer_mut(buffer) else {
        return OverlayMode::Inactive;
    };
    let mode = OverlayMode::from_flags(state.wants_header(), state.wants_clean());
    let separator = state.separator;
    let header_lines = state.header_lines;

    let widths = mode
        .has_clean()
        .then(|| column_widths(config, state, host, buffer, view));

    let visible = if mode.has_clean() {
        host.lines(buffer, view.top_line..view.bottom_line)
    } else {
        Vec::new()
    };
    let clean = widths
        .as_ref()
        .map(|widths| build_clean(config, &visible, separator, widths, view));

    let header = if mode.has_header() && view.top_line >= header_lines {
        let raw = host.lines(buffer, 0..header_lines);
        (!raw.is_empty()).then(|| build_header(config, &raw, separator, widths.as_ref(), view))
    } else {
        None
    };

    let overlay = registry.overlay_entry(window);
    if overlay.mode != mode {
        tracing::debug!(
            "Window {} overlay mode {:?} -> {:?}",
            window.0,
            overlay.mode,
            mode
        );
        overlay.mode = mode;
    }

    // Clean view first so the header is always (re)drawn above it
    let (clean_content, padded, slices) = match clean {
        Some((content, padded, slices)) => (Some(content), Some(padded), slices),
        None => (None, None, Vec::new()),
    };
    let clean_live = apply_surface(host, window, &mut overlay.clean, clean_content);
    apply_surface(host, window, &mut overlay.header, header);

    if clean_live {
        if let (Some(surface), Some(padded)) = (overlay.clean, padded) {
            sync_clean_cursor(
                host,
                surface,
                &visible,
                separator,
                config.max_columns,
                &padded,
                &slices,
                view,
            );
        }
    }

    mode
}

#[allow(clippy::too_many_arguments)]
fn sync_clean_cursor<H: Host>(
    host: &mut H,
    surface: Surface,
    visible: &[String],
    separator: char,
    max_columns: usize,
    padded: &PaddedLines,
    slices: &[Slice],
    view: &WindowView,
) {
    if !view.is_line_visible(view.cursor.line) {
        return;
    }
    let row = view.cursor.line - view.top_line;
    let (Some(line), Some(slice)) = (visible.get(row), slices.get(row)) else {
        return;
    };

    let byte = map_cursor_to_padded(
        line,
        view.cursor.byte,
        separator,
        max_columns,
        padded,
        row,
        slice,
    );
    if let Err(e) = host.set_surface_cursor(surface.id, row, byte) {
        tracing::debug!("Could not place clean view cursor: {}", e);
    }
}

/// Close every surface of a window
pub fn teardown_window<H: Host>(registry: &mut Registry, host: &mut H, window: WindowId) {
    let Some(overlay) = registry.overlay_mut(window) else {
        return;
    };
    for surface in overlay.take_all() {
        host.close_surface(surface.id);
    }
    overlay.mode = OverlayMode::Inactive;
}
