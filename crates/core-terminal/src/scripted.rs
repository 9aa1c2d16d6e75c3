//! In-memory driver replaying scripted input and recording output.
//!
//! Input is a queue of steps: a byte, or a timeout (the read returns `None`). Once the
//! script is exhausted reads fail with `UnexpectedEof`, so a decoder loop under test
//! stops instead of spinning.

use crate::{TerminalAttributes, TerminalDriver};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Byte(u8),
    Timeout,
}

#[derive(Debug)]
pub struct ScriptedDriver {
    attributes: TerminalAttributes,
    applied: Vec<TerminalAttributes>,
    window_size: Option<(u16, u16)>,
    input: VecDeque<Step>,
    writes: Vec<Vec<u8>>,
    fail_get_attributes: bool,
    fail_set_attributes: bool,
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDriver {
    /// Cooked attributes, no direct window size, empty input.
    pub fn new() -> Self {
        Self {
            attributes: TerminalAttributes::cooked(),
            applied: Vec::new(),
            window_size: None,
            input: VecDeque::new(),
            writes: Vec::new(),
            fail_get_attributes: false,
            fail_set_attributes: false,
        }
    }

    pub fn with_attributes(mut self, attrs: TerminalAttributes) -> Self {
        self.attributes = attrs;
        self
    }

    pub fn with_window_size(mut self, rows: u16, cols: u16) -> Self {
        self.window_size = Some((rows, cols));
        self
    }

    pub fn with_input(mut self, bytes: &[u8]) -> Self {
        self.push_input(bytes);
        self
    }

    pub fn with_timeout(mut self) -> Self {
        self.push_timeout();
        self
    }

    /// Make `get_attributes` fail as it would on a non-tty.
    pub fn with_failing_attributes(mut self) -> Self {
        self.fail_get_attributes = true;
        self
    }

    /// Make `set_attributes` reject every attribute set.
    pub fn with_failing_set_attributes(mut self) -> Self {
        self.fail_set_attributes = true;
        self
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied().map(Step::Byte));
    }

    pub fn push_timeout(&mut self) {
        self.input.push_back(Step::Timeout);
    }

    /// Attributes currently in effect on the fake device.
    pub fn attributes(&self) -> &TerminalAttributes {
        &self.attributes
    }

    /// Every attribute set applied, in order.
    pub fn applied(&self) -> &[TerminalAttributes] {
        &self.applied
    }

    /// Each `write_bytes` call, kept separate.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// All output concatenated.
    pub fn output(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl TerminalDriver for ScriptedDriver {
    fn get_attributes(&mut self) -> io::Result<TerminalAttributes> {
        if self.fail_get_attributes {
            return Err(io::Error::from_raw_os_error(libc::ENOTTY));
        }
        Ok(self.attributes.clone())
    }

    fn set_attributes(&mut self, attrs: &TerminalAttributes) -> io::Result<()> {
        if self.fail_set_attributes {
            return Err(io::Error::from_raw_os_error(libc::EINVAL));
        }
        self.attributes = attrs.clone();
        self.applied.push(attrs.clone());
        Ok(())
    }

    fn window_size(&mut self) -> io::Result<(u16, u16)> {
        self.window_size
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOTTY))
    }

    fn read_byte_with_timeout(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        match self.input.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Timeout) => Ok(None),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}
