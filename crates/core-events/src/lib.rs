//! Semantic key events produced by the input decoder and consumed by the session.
//!
//! A `KeyEvent` is created fresh for every decoded key and never persisted. Only
//! `ControlQuit` and the four arrow variants currently carry behavior; the rest are
//! delivered so later collaborators (a text buffer, a command line) can act on them.

use std::fmt;

/// Escape byte that opens every CSI sequence.
pub const ESC: u8 = 0x1b;

/// Byte produced by pressing `key` together with Ctrl (clears the upper three bits).
#[inline]
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1f
}

/// Byte that terminates the session (Ctrl-Q).
pub const QUIT_BYTE: u8 = ctrl_key(b'q');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A printable byte typed by the user.
    Printable(u8),
    ControlQuit,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A lone ESC, or an escape sequence that was incomplete or unrecognized.
    RawEscape,
    /// Any other control byte.
    Other(u8),
}

impl KeyEvent {
    /// Classify a single byte read outside of an escape sequence.
    ///
    /// ESC is never passed here; the decoder routes it through sequence detection.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            QUIT_BYTE => KeyEvent::ControlQuit,
            b if b.is_ascii_control() => KeyEvent::Other(b),
            b => KeyEvent::Printable(b),
        }
    }

    /// Map the final byte of a `ESC [ <final>` sequence.
    pub fn from_csi_final(byte: u8) -> Self {
        match byte {
            b'A' => KeyEvent::ArrowUp,
            b'B' => KeyEvent::ArrowDown,
            b'C' => KeyEvent::ArrowRight,
            b'D' => KeyEvent::ArrowLeft,
            _ => KeyEvent::RawEscape,
        }
    }

    /// Short stable label used in log fields (never includes the raw byte of printables).
    pub fn kind(&self) -> &'static str {
        match self {
            KeyEvent::Printable(_) => "printable",
            KeyEvent::ControlQuit => "control_quit",
            KeyEvent::ArrowUp => "arrow_up",
            KeyEvent::ArrowDown => "arrow_down",
            KeyEvent::ArrowLeft => "arrow_left",
            KeyEvent::ArrowRight => "arrow_right",
            KeyEvent::RawEscape => "raw_escape",
            KeyEvent::Other(_) => "other",
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Printable(b) => write!(f, "'{}'", *b as char),
            KeyEvent::Other(b) => write!(f, "0x{b:02x}"),
            other => f.write_str(other.kind()),
        }
    }
}
