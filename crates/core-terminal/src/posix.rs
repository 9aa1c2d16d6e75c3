//! POSIX driver over stdin/stdout.
//!
//! Attributes are read and applied on stdin, the direct size query runs on stdout,
//! input waits with `poll(2)` and output goes straight to the descriptor so a frame
//! is never split by stdio line buffering.

use crate::{TerminalAttributes, TerminalDriver};
use std::io;
use std::mem::MaybeUninit;
use std::os::fd::RawFd;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Original attributes kept for paths that cannot reach the raw-mode guard:
/// fatal signals and the panic hook.
static EMERGENCY_ORIGINAL: OnceLock<(RawFd, libc::termios)> = OnceLock::new();

const RESTORE_SIGNALS: [libc::c_int; 3] = [libc::SIGTERM, libc::SIGHUP, libc::SIGQUIT];

#[derive(Debug)]
pub struct PosixDriver {
    input: RawFd,
    output: RawFd,
}

impl Default for PosixDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PosixDriver {
    pub fn new() -> Self {
        Self {
            input: libc::STDIN_FILENO,
            output: libc::STDOUT_FILENO,
        }
    }

    /// Driver over arbitrary descriptors (e.g. a pty). The caller keeps ownership
    /// and must keep both open for the driver's lifetime.
    pub fn with_fds(input: RawFd, output: RawFd) -> Self {
        Self { input, output }
    }

    fn termios(&self) -> io::Result<libc::termios> {
        let mut termios = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr fully initializes the struct when it returns 0.
        if unsafe { libc::tcgetattr(self.input, termios.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: checked the return code above.
        Ok(unsafe { termios.assume_init() })
    }

    /// Register `original` for restoration from fatal signal handlers and
    /// [`emergency_restore`], then install the handlers.
    ///
    /// Only the first registration in a process takes effect.
    ///
    /// # Errors
    ///
    /// The device cannot be queried or a handler cannot be installed.
    pub fn install_emergency_restore(&self, original: &TerminalAttributes) -> io::Result<()> {
        let mut termios = self.termios()?;
        original.apply_to_termios(&mut termios);
        if EMERGENCY_ORIGINAL.set((self.input, termios)).is_err() {
            debug!(target: "terminal", "emergency_restore_already_installed");
            return Ok(());
        }
        let handler = restore_and_reraise as extern "C" fn(libc::c_int) as libc::sighandler_t;
        for signal in RESTORE_SIGNALS {
            // SAFETY: the handler only calls async-signal-safe functions.
            if unsafe { libc::signal(signal, handler) } == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
        }
        debug!(target: "terminal", "emergency_restore_installed");
        Ok(())
    }
}

/// Reapply the registered original attributes, if any. Safe to call from a signal
/// handler or a panic hook.
pub fn emergency_restore() {
    if let Some((fd, termios)) = EMERGENCY_ORIGINAL.get() {
        // SAFETY: tcsetattr is async-signal-safe and reads a fully initialized struct.
        unsafe {
            libc::tcsetattr(*fd, libc::TCSAFLUSH, termios);
        }
    }
}

extern "C" fn restore_and_reraise(signal: libc::c_int) {
    emergency_restore();
    // SAFETY: resetting to the default disposition and re-raising terminates the
    // process with the status the signal would have produced.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
}

fn transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}

impl TerminalDriver for PosixDriver {
    fn get_attributes(&mut self) -> io::Result<TerminalAttributes> {
        Ok(TerminalAttributes::from_termios(&self.termios()?))
    }

    fn set_attributes(&mut self, attrs: &TerminalAttributes) -> io::Result<()> {
        let mut termios = self.termios()?;
        attrs.apply_to_termios(&mut termios);
        // SAFETY: termios is initialized and outlives the call.
        if unsafe { libc::tcsetattr(self.input, libc::TCSAFLUSH, &termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn window_size(&mut self) -> io::Result<(u16, u16)> {
        // SAFETY: winsize is plain integers; all-zero is a valid value.
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        // SAFETY: TIOCGWINSZ writes a winsize into the pointer we pass.
        if unsafe { libc::ioctl(self.output, libc::TIOCGWINSZ, &mut ws as *mut libc::winsize) }
            == -1
        {
            return Err(io::Error::last_os_error());
        }
        Ok((ws.ws_row, ws.ws_col))
    }

    fn read_byte_with_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let mut pfd = libc::pollfd {
            fd: self.input,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        // SAFETY: one valid pollfd.
        let ready = unsafe { libc::poll(&mut pfd, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            return if transient(&err) { Ok(None) } else { Err(err) };
        }
        if ready == 0 {
            return Ok(None);
        }
        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a live u8.
        let n = unsafe { libc::read(self.input, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            // Readable but empty: the device hung up.
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
            _ => {
                let err = io::Error::last_os_error();
                if transient(&err) { Ok(None) } else { Err(err) }
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            // SAFETY: pointer and length come from a live slice.
            let n = unsafe { libc::write(self.output, rest.as_ptr().cast(), rest.len()) };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if n == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
            rest = &rest[n as usize..];
        }
        Ok(())
    }
}
