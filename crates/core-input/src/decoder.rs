//! Byte-to-key decoding.
//!
//! One key per call. A lone byte maps straight to a [`KeyEvent`]; ESC starts a
//! two-byte follow-up read where every read is bounded by the same timeout, so a
//! user pressing Escape on its own still gets a key back promptly.
//!
//! States:
//! * Normal: wait (retrying on timeout) for one byte. ESC moves to escape detection.
//! * Escape detection: read two more bytes. Any timeout, a first byte other than
//!   `[`, or an unknown final byte yields `RawEscape`.

use core_events::{ESC, KeyEvent};
use core_terminal::{Result, TerminalDriver};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct InputDecoder {
    read_timeout: Duration,
}

impl InputDecoder {
    pub fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }

    /// Block until a byte arrives, then decode one key.
    ///
    /// # Errors
    ///
    /// Only device I/O failures; malformed sequences decode to `RawEscape`.
    pub fn read_key<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<KeyEvent> {
        let byte = loop {
            if let Some(b) = driver.read_byte_with_timeout(self.read_timeout)? {
                break b;
            }
        };
        let key = if byte == ESC {
            self.read_escape(driver)?
        } else {
            KeyEvent::from_byte(byte)
        };
        crate::log_key(&key);
        Ok(key)
    }

    fn read_escape<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<KeyEvent> {
        let Some(first) = driver.read_byte_with_timeout(self.read_timeout)? else {
            return Ok(KeyEvent::RawEscape);
        };
        let Some(second) = driver.read_byte_with_timeout(self.read_timeout)? else {
            return Ok(KeyEvent::RawEscape);
        };
        if first != b'[' {
            return Ok(KeyEvent::RawEscape);
        }
        Ok(KeyEvent::from_csi_final(second))
    }
}
