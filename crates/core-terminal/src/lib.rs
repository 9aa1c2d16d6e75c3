//! Terminal device control: attribute snapshots, raw mode, window size discovery.
//!
//! Everything that touches the device goes through [`TerminalDriver`]. The POSIX
//! implementation talks to stdin/stdout with libc; [`ScriptedDriver`] replays canned
//! input and records output so decoding, probing and rendering are testable without
//! a terminal.

use std::io;
use std::time::Duration;

pub mod attributes;
pub mod commands;
mod error;
mod geometry;
pub mod mode;
pub mod posix;
pub mod scripted;
pub mod window_size;

pub use attributes::TerminalAttributes;
pub use error::{Result, TerminalError};
pub use geometry::{CursorPosition, EditorViewport};
pub use mode::{RawModeGuard, TerminalModeController};
pub use posix::PosixDriver;
pub use scripted::ScriptedDriver;
pub use window_size::WindowSizeProbe;

/// Capability surface over the controlling terminal.
pub trait TerminalDriver {
    fn get_attributes(&mut self) -> io::Result<TerminalAttributes>;
    /// Apply `attrs`, discarding input that has not been read yet.
    fn set_attributes(&mut self, attrs: &TerminalAttributes) -> io::Result<()>;
    /// Direct size query as `(rows, cols)`.
    fn window_size(&mut self) -> io::Result<(u16, u16)>;
    /// Wait up to `timeout` for one input byte; `None` when nothing arrived.
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
    /// Write all of `bytes` to the output device in one call.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<D: TerminalDriver + ?Sized> TerminalDriver for &mut D {
    fn get_attributes(&mut self) -> io::Result<TerminalAttributes> {
        (**self).get_attributes()
    }
    fn set_attributes(&mut self, attrs: &TerminalAttributes) -> io::Result<()> {
        (**self).set_attributes(attrs)
    }
    fn window_size(&mut self) -> io::Result<(u16, u16)> {
        (**self).window_size()
    }
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte_with_timeout(timeout)
    }
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }
}
