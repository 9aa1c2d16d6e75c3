//! Frame buffer: one composed terminal frame, flushed in a single write.
//!
//! Invariants:
//! * Append-only; commands keep their queue order.
//! * Nothing reaches the device until [`FrameBuffer::flush_to`], which consumes the
//!   buffer and issues exactly one `write_bytes` call.
//! * Short-lived: built and discarded every refresh cycle.

use core_terminal::{Result, TerminalDriver};
use crossterm::{Command, QueueableCommand};
use std::io;

#[derive(Debug, Default)]
pub struct FrameBuffer {
    bytes: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Append the ANSI form of `command`.
    pub fn queue(&mut self, command: impl Command) -> io::Result<&mut Self> {
        self.bytes.queue(command)?;
        Ok(self)
    }

    pub fn print(&mut self, text: &str) -> &mut Self {
        self.bytes.extend_from_slice(text.as_bytes());
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the whole frame to `driver` in one call.
    ///
    /// # Errors
    ///
    /// `TerminalError::Io` when the device write fails.
    pub fn flush_to<D: TerminalDriver + ?Sized>(self, driver: &mut D) -> Result<()> {
        tracing::trace!(target: "render", bytes = self.bytes.len(), "frame_flush");
        driver.write_bytes(&self.bytes)?;
        Ok(())
    }
}
