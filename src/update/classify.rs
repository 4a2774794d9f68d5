//! Delimited-buffer classification and separator choice

use crate::csv::{
    default_separator, detect_separator, extension_hint, looks_delimited, Delimiter,
};
use crate::host::Host;
use crate::model::{BufferId, ColumnsModel};

/// Decide whether a buffer is delimited text and which separator it uses
///
/// Separator priority: user override, an unambiguous filetype hint (tab,
/// pipe, semicolon), detection over the first lines, then the context
/// default. A buffer is delimited when a command forced it, when its
/// filetype or extension names a delimited format, or when auto-detection
/// is enabled and the sampled lines agree on a table shape.
pub fn classify_buffer<H: Host>(model: &mut ColumnsModel, host: &H, buffer: BufferId) {
    let config = &model.config;
    let info = host.buffer_info(buffer);
    let hint = extension_hint(&info.filetype, &info.name);
    let named = config.is_delimited_filetype(&info.filetype) || hint.is_some();

    let sample_len = config
        .detect_scan_limit
        .max(config.auto_detect.sample_lines);
    let sample = host.lines(buffer, 0..sample_len);
    let sample_refs = || sample.iter().map(String::as_str);

    let state = model.registry.buffer_entry(buffer, config);

    let separator = state
        .separator_override
        .or_else(|| {
            hint.filter(|d| *d != Delimiter::Comma)
                .map(Delimiter::char)
        })
        .or_else(|| {
            detect_separator(
                sample_refs(),
                &config.separator_chars(),
                config.detect_limits(),
            )
        })
        .unwrap_or_else(|| default_separator(&info.filetype, &info.name));

    let enabled = match state.forced {
        Some(forced) => forced,
        None => {
            named
                || (config.auto_detect.enabled
                    && looks_delimited(
                        sample_refs(),
                        separator,
                        config.max_columns,
                        &config.auto_detect.thresholds(),
                    ))
        }
    };

    if state.separator != separator {
        state.invalidate_widths();
    }
    state.separator = separator;
    state.enabled = enabled;

    tracing::debug!(
        buffer = buffer.0,
        filetype = %info.filetype,
        separator = ?separator,
        enabled,
        "Classified buffer"
    );
}
