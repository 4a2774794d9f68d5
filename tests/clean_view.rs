//! Clean view cursor mirroring and column width tests

mod common;

use common::{table, Harness, BUF, WIN};
use csvcolumns::csv::SamplingMode;
use csvcolumns::host::Host;
use csvcolumns::{ColumnsConfig, CommandMsg, Msg};

const PEOPLE: &str = "id,name\n1,alexandra\n22,bo\n";

fn clean_cursor(h: &Harness) -> Option<(usize, usize)> {
    h.clean().and_then(|s| s.cursor)
}

fn cached_version(h: &Harness) -> Option<u64> {
    h.model
        .registry
        .buffer(BUF)
        .and_then(|s| s.width_cache.as_ref())
        .map(|c| c.version)
}

// ========================================================================
// Cursor Mirroring
// ========================================================================

#[test]
fn test_cursor_inside_field_maps_to_column_start() {
    let mut h = Harness::new(PEOPLE, "csv", 5);
    h.command(CommandMsg::ToggleClean);
    // Inside "alexandra"
    h.cursor(1, 4);
    assert_eq!(clean_cursor(&h), Some((1, 5)));
}

#[test]
fn test_cursor_on_separator_stays_in_closing_field() {
    let mut h = Harness::new(PEOPLE, "csv", 5);
    h.command(CommandMsg::ToggleClean);
    // "1,alexandra": byte 1 is the comma ending field 1
    h.cursor(1, 1);
    assert_eq!(clean_cursor(&h), Some((1, 0)));
    // One past the comma is field 2
    h.cursor(1, 2);
    assert_eq!(clean_cursor(&h), Some((1, 5)));
}

#[test]
fn test_cursor_past_line_end_maps_to_last_field() {
    let mut h = Harness::new(PEOPLE, "csv", 5);
    h.command(CommandMsg::ToggleClean);
    h.cursor(2, 40);
    assert_eq!(clean_cursor(&h), Some((2, 5)));
}

#[test]
fn test_cursor_after_tabbed_cell_lands_on_aligned_column() {
    let mut h = Harness::new("a\tb,c\nabcdefghij,e\n", "csv", 5);
    h.command(CommandMsg::ToggleClean);
    // On "c", after a cell holding a tab
    h.cursor(0, 4);
    assert_eq!(clean_cursor(&h), Some((0, 13)));
    h.cursor(1, 11);
    assert_eq!(clean_cursor(&h), Some((1, 13)));
}

#[test]
fn test_cursor_row_is_relative_to_top_line() {
    let mut h = Harness::new(&table(10, 3), "csv", 4);
    h.command(CommandMsg::ToggleClean);
    h.scroll(3);
    // Line 5 is "r5c1,r5c2,r5c3"; byte 10 is in the third field
    h.cursor(5, 10);
    // Every column is 5 wide: slot 6 plus gap 2
    assert_eq!(clean_cursor(&h), Some((2, 16)));
}

#[test]
fn test_cursor_follows_horizontal_scroll() {
    let mut h = Harness::new(&table(10, 3), "csv", 5);
    h.command(CommandMsg::ToggleClean);
    h.host.set_left_column(WIN, 4);
    h.cursor(1, 6);
    // Column 2 starts at 8 in the padded line, 4 after the scroll
    assert_eq!(clean_cursor(&h), Some((1, 4)));
}

#[test]
fn test_cursor_off_screen_leaves_surface_cursor() {
    let mut h = Harness::new(&table(10, 3), "csv", 3);
    h.command(CommandMsg::ToggleClean);
    h.cursor(1, 0);
    let placed = clean_cursor(&h);
    h.host.set_cursor(WIN, 9, 0);
    h.send(Msg::CursorMoved(WIN));
    assert_eq!(clean_cursor(&h), placed);
}

// ========================================================================
// Width Table
// ========================================================================

#[test]
fn test_full_sampling_uses_whole_buffer() {
    let text = "h1,h2\na,b\nc,d\nlonglonglong,e\n";
    let mut h = Harness::new(text, "csv", 2);
    h.command(CommandMsg::ToggleClean);
    let clean = h.clean().expect("clean surface");
    assert_eq!(clean.content.lines[0], "h1             h2   ");
}

#[test]
fn test_windowed_sampling_uses_visible_lines() {
    let text = "h1,h2\na,b\nc,d\nlonglonglong,e\n";
    let config = ColumnsConfig {
        width_sampling: SamplingMode::Windowed,
        ..Default::default()
    };
    let mut h = Harness::with_config(text, "csv", 2, config);
    h.command(CommandMsg::ToggleClean);
    assert_eq!(
        h.clean().expect("clean surface").content.lines,
        vec!["h1   h2   ", "a    b    "]
    );

    // Scrolled down, the header line still contributes
    h.scroll(2);
    let clean = h.clean().expect("clean surface");
    assert_eq!(clean.content.lines[0], "c              d    ");
    let header = h.header().expect("header surface");
    assert_eq!(header.content.lines, vec!["h1             h2   "]);
}

#[test]
fn test_width_cache_reused_until_edit() {
    let mut h = Harness::new(&table(10, 3), "csv", 5);
    h.command(CommandMsg::ToggleClean);
    let version = h.host.content_version(BUF);
    assert_eq!(cached_version(&h), Some(version));

    h.scroll(3);
    h.cursor(4, 0);
    assert_eq!(cached_version(&h), Some(version));

    h.host.replace_line(BUF, 2, "x,y,z");
    h.send(Msg::TextChanged(WIN));
    assert_eq!(cached_version(&h), Some(h.host.content_version(BUF)));
    assert_ne!(cached_version(&h), Some(version));
}

#[test]
fn test_wide_characters_align_by_display_width() {
    let mut h = Harness::new("名前,x\nab,y\n", "csv", 5);
    h.command(CommandMsg::ToggleClean);
    let clean = h.clean().expect("clean surface");
    assert_eq!(clean.content.lines, vec!["名前   x   ", "ab     y   "]);
}
