use core_render::{ScreenCompositor, banner_line};
use core_terminal::{CursorPosition, EditorViewport, ScriptedDriver};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const HIDE: &str = "\x1b[?25l";
const SHOW: &str = "\x1b[?25h";
const HOME: &str = "\x1b[H";
const ERASE_EOL: &str = "\x1b[K";

fn render(viewport: EditorViewport, cursor: CursorPosition) -> String {
    let mut driver = ScriptedDriver::new();
    ScreenCompositor::new()
        .render_frame(&mut driver, viewport, cursor)
        .unwrap();
    assert_eq!(driver.writes().len(), 1, "frame must be a single write");
    String::from_utf8(driver.output()).unwrap()
}

fn body(frame: &str) -> &str {
    let start = HIDE.len() + HOME.len();
    let end = frame.rfind("\x1b[").unwrap();
    let end = frame[..end].rfind("\x1b[").unwrap();
    &frame[start..end]
}

#[test]
fn standard_viewport_draws_all_but_last_row() {
    let frame = render(EditorViewport::new(24, 80), CursorPosition::new(0, 0));
    assert!(frame.starts_with(&format!("{HIDE}{HOME}")));
    assert!(frame.ends_with(&format!("\x1b[1;1H{SHOW}")));

    let rows: Vec<&str> = body(&frame).split("\r\n").collect();
    assert_eq!(rows.len(), 23);
    for row in &rows {
        assert!(row.starts_with('~'), "row without marker: {row:?}");
        assert!(row.ends_with(ERASE_EOL), "row without erase: {row:?}");
    }
    assert_eq!(frame.matches(ERASE_EOL).count(), 23);
}

#[test]
fn banner_sits_on_the_third_row() {
    let viewport = EditorViewport::new(24, 80);
    let frame = render(viewport, CursorPosition::new(0, 0));
    let rows: Vec<&str> = body(&frame).split("\r\n").collect();
    let compositor = ScreenCompositor::new();
    let expected = format!("{}{ERASE_EOL}", banner_line(compositor.banner(), 80));
    assert_eq!(rows[8], expected);
    assert_eq!(rows[7], format!("~{ERASE_EOL}"));
}

#[test]
fn cursor_is_placed_one_based() {
    let frame = render(EditorViewport::new(10, 40), CursorPosition::new(3, 7));
    assert!(frame.ends_with(&format!("\x1b[4;8H{SHOW}")));
}

#[test]
fn narrow_viewport_truncates_banner() {
    let frame = render(EditorViewport::new(6, 10), CursorPosition::new(0, 0));
    let rows: Vec<&str> = body(&frame).split("\r\n").collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[2], format!("Gim editor{ERASE_EOL}"));
}

#[test]
fn clear_screen_sequence() {
    let mut driver = ScriptedDriver::new();
    ScreenCompositor::clear_screen(&mut driver).unwrap();
    assert_eq!(driver.output(), b"\x1b[2J\x1b[H");
}

proptest! {
    #[test]
    fn row_separators_never_trail(rows in 2u16..120, cols in 1u16..300) {
        let frame = render(EditorViewport::new(rows, cols), CursorPosition::default());
        prop_assert_eq!(frame.matches("\r\n").count(), usize::from(rows) - 2);
        prop_assert_eq!(frame.matches(ERASE_EOL).count(), usize::from(rows) - 1);
        prop_assert!(!frame.contains("\r\n\x1b[1;1H"));
    }
}
