//! Shared helpers for benchmarks

#![allow(dead_code)]

use csvcolumns::host::BufferInfo;
use csvcolumns::model::{BufferId, WindowId};
use csvcolumns::{update, ColumnsConfig, ColumnsModel, MemoryHost, Msg};

pub const BUF: BufferId = BufferId(1);
pub const WIN: WindowId = WindowId(1);

/// CSV text with a header and `rows` data lines of `cols` cells
///
/// Cells vary in width and every fifth row has a quoted cell containing
/// the separator.
pub fn make_csv(rows: usize, cols: usize) -> String {
    let mut text = String::new();
    let header: Vec<String> = (1..=cols).map(|c| format!("column_{}", c)).collect();
    text.push_str(&header.join(","));
    text.push('\n');
    for r in 0..rows {
        let cells: Vec<String> = (0..cols)
            .map(|c| {
                if r % 5 == 0 && c == 1 {
                    format!("\"{}, quoted\"", r)
                } else {
                    "v".repeat(1 + (r * 7 + c * 3) % 12)
                }
            })
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

/// Model and host with a CSV buffer entered in a 200x50 window
pub fn make_session(rows: usize, cols: usize, config: ColumnsConfig) -> (ColumnsModel, MemoryHost) {
    let mut host = MemoryHost::new();
    host.add_buffer(BUF, &make_csv(rows, cols), BufferInfo::new("csv", "bench.csv"));
    host.add_window(WIN, BUF, 200, 50);

    let mut model = ColumnsModel::new(config);
    update(
        &mut model,
        &mut host,
        Msg::BufferEnter {
            buffer: BUF,
            window: WIN,
        },
    );
    (model, host)
}
