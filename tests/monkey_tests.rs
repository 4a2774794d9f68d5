//! Monkey tests - edge cases, odd inputs, and long event sequences
//!
//! These tests push the core with weird buffers, extreme geometry and
//! unusual orderings of events. They mostly check that nothing panics and
//! that the surface bookkeeping stays consistent.

mod common;

use common::{table, Harness, BUF, WIN};
use csvcolumns::host::Host;
use csvcolumns::util::display_width;
use csvcolumns::{ColumnsConfig, CommandMsg, Msg};

fn assert_consistent(h: &Harness) {
    // Never more than one surface per kind, and none without a record
    let surfaces = h.host.surfaces(WIN);
    assert!(surfaces.len() <= 2);
    match h.model.registry.overlay(WIN) {
        Some(overlay) => {
            assert_eq!(overlay.header.is_some(), h.header().is_some());
            assert_eq!(overlay.clean.is_some(), h.clean().is_some());
        }
        None => assert!(surfaces.is_empty()),
    }
}

// ========================================================================
// Window Geometry Edge Cases
// ========================================================================

#[test]
fn test_resize_to_zero_does_not_crash() {
    let mut h = Harness::new(&table(5, 3), "csv", 5);
    h.command(CommandMsg::ToggleClean);
    for (w, ht) in [(0, 5), (80, 0), (0, 0), (1, 1), (2, 100)] {
        h.host.resize(WIN, w, ht);
        h.send(Msg::Resized(WIN));
        assert_consistent(&h);
    }
}

#[test]
fn test_scroll_far_past_end() {
    let mut h = Harness::new(&table(5, 3), "csv", 5);
    h.scroll(10_000);
    assert_consistent(&h);
    h.scroll(usize::MAX / 2);
    assert_consistent(&h);
}

#[test]
fn test_horizontal_scroll_past_every_column() {
    let mut h = Harness::new(&table(5, 3), "csv", 5);
    h.command(CommandMsg::ToggleClean);
    h.host.set_left_column(WIN, 500);
    h.scroll(3);
    let clean = h.clean().expect("clean surface");
    assert!(clean.content.lines.iter().all(|l| l.is_empty()));
    assert!(clean.content.highlights.is_empty());
}

#[test]
fn test_gutter_wider_than_window() {
    let mut h = Harness::new(&table(5, 3), "csv", 5);
    h.host.set_text_offset(WIN, 100);
    h.send(Msg::Resized(WIN));
    assert_consistent(&h);
}

// ========================================================================
// Odd Buffers
// ========================================================================

#[test]
fn test_unbalanced_quotes_everywhere() {
    let text = "\"a,b\n\"\"\"\nc\",\"d\n,,,\"\n";
    let mut h = Harness::new(text, "csv", 5);
    h.command(CommandMsg::ToggleClean);
    h.cursor(2, 3);
    assert_consistent(&h);
    assert!(h.clean().is_some());
}

#[test]
fn test_very_wide_line_is_capped() {
    let line = vec!["x"; 500].join(",");
    let config = ColumnsConfig {
        max_columns: 10,
        ..Default::default()
    };
    let h = Harness::with_config(&line, "csv", 5, config);
    assert_eq!(h.host.highlights(BUF, WIN).len(), 10);
}

#[test]
fn test_crlf_buffer() {
    let mut h = Harness::new("a,b\r\nc,d\r\n", "csv", 5);
    h.command(CommandMsg::ToggleClean);
    let clean = h.clean().expect("clean surface");
    assert_eq!(clean.content.lines, vec!["a   b   ", "c   d   "]);
}

#[test]
fn test_tabs_inside_comma_separated_cells() {
    let mut h = Harness::new("a\tb,c\nabcdefghij,e\n", "csv", 5);
    h.command(CommandMsg::ToggleClean);
    let clean = h.clean().expect("clean surface");
    assert_eq!(clean.content.lines, vec!["a b          c   ", "abcdefghij   e   "]);

    // Second column starts at the same display column on every row
    let starts: Vec<usize> = clean
        .content
        .lines
        .iter()
        .zip(["c", "e"])
        .map(|(line, cell)| display_width(&line[..line.find(cell).unwrap()]))
        .collect();
    assert_eq!(starts, vec![13, 13]);
}

#[test]
fn test_buffer_shrinks_under_scrolled_window() {
    let mut h = Harness::new(&table(30, 3), "csv", 5);
    h.command(CommandMsg::ToggleClean);
    h.scroll(20);
    h.cursor(22, 3);
    h.host.set_text(BUF, "a,b\n");
    h.send(Msg::TextChanged(WIN));
    assert_consistent(&h);
    assert_eq!(h.line_count(), 1);
    // Nothing is visible at the old scroll position
    assert_eq!(h.host.surface_count(), 0);
}

// ========================================================================
// Event Sequences
// ========================================================================

#[test]
fn test_long_mixed_event_sequence() {
    let mut h = Harness::new(&table(50, 4), "csv", 8);
    let commands = [
        CommandMsg::ToggleClean,
        CommandMsg::SetHeaderLines("2".into()),
        CommandMsg::ToggleHeader,
        CommandMsg::SetSeparator(";".into()),
        CommandMsg::Redetect,
        CommandMsg::ToggleHeader,
        CommandMsg::Disable,
        CommandMsg::Enable,
        CommandMsg::SetHeaderLines("0".into()),
        CommandMsg::Toggle,
        CommandMsg::Toggle,
    ];

    for step in 0..200usize {
        match step % 7 {
            0 => h.command(commands[(step / 7) % commands.len()].clone()),
            1 => h.scroll((step * 13) % 60),
            2 => h.cursor((step * 7) % 55, step % 20),
            3 => {
                h.host.set_left_column(WIN, step % 9);
                h.send(Msg::Scrolled(WIN));
            }
            4 => {
                h.host.replace_line(BUF, step % 50, &format!("e{},f,\"g,h\"", step));
                h.send(Msg::TextChanged(WIN));
            }
            5 => {
                h.host.resize(WIN, 20 + step % 60, 1 + step % 10);
                h.send(Msg::Resized(WIN));
            }
            _ => h.send(Msg::BufferEnter {
                buffer: BUF,
                window: WIN,
            }),
        }
        assert_consistent(&h);
    }
}

#[test]
fn test_repeated_refresh_is_stable() {
    let mut h = Harness::new(&table(20, 3), "csv", 6);
    h.command(CommandMsg::ToggleClean);
    h.scroll(5);
    h.cursor(7, 6);
    let first: Vec<_> = h.host.surfaces(WIN).into_iter().cloned().collect();
    let highlights = h.host.highlights(BUF, WIN).to_vec();

    for _ in 0..10 {
        h.send(Msg::Scrolled(WIN));
        h.send(Msg::CursorMoved(WIN));
    }

    let again: Vec<_> = h.host.surfaces(WIN).into_iter().cloned().collect();
    assert_eq!(first, again);
    assert_eq!(highlights, h.host.highlights(BUF, WIN));
}

#[test]
fn test_close_then_events_recreate_state() {
    let mut h = Harness::new(&table(10, 3), "csv", 5);
    h.send(Msg::BufferClosed(BUF));
    // A late scroll for the window finds no buffer state and draws nothing
    h.send(Msg::Scrolled(WIN));
    assert_eq!(h.host.surface_count(), 0);

    h.send(Msg::BufferEnter {
        buffer: BUF,
        window: WIN,
    });
    assert!(h.enabled());
    h.scroll(3);
    assert!(h.header().is_some());
}
