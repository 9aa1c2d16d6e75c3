//! ANSI commands crossterm does not ship, expressed as `crossterm::Command`s so they
//! queue alongside the stock ones.

use crossterm::Command;
use std::fmt;

/// `ESC[H`: move the cursor to row 1, column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHome;

impl Command for CursorHome {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[H")
    }
}

/// `ESC[6n`: ask the terminal to report the cursor position as `ESC[<row>;<col>R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCursorPosition;

impl Command for RequestCursorPosition {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[6n")
    }
}

/// `ESC[<row+1>;<col+1>H` for a zero-based logical position.
///
/// Coordinates are signed and emitted as-is; an unclamped cursor may sit outside the
/// viewport and the terminal decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCursorTo {
    pub row: i32,
    pub col: i32,
}

impl Command for MoveCursorTo {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "\x1b[{};{}H",
            i64::from(self.row) + 1,
            i64::from(self.col) + 1
        )
    }
}
