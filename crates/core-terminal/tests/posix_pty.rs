//! `PosixDriver` against a real pseudo-terminal pair.

use core_terminal::posix::emergency_restore;
use core_terminal::{PosixDriver, TerminalDriver, TerminalModeController};
use pretty_assertions::assert_eq;
use std::io;
use std::os::fd::RawFd;
use std::ptr;
use std::time::Duration;

struct Pty {
    master: RawFd,
    slave: RawFd,
}

impl Pty {
    fn open() -> Self {
        let (mut master, mut slave) = (-1, -1);
        // SAFETY: out-pointers are live locals; name/termios/winsize are optional.
        let rc = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        assert_eq!(rc, 0, "openpty failed: {}", io::Error::last_os_error());
        Self { master, slave }
    }

    fn driver(&self) -> PosixDriver {
        PosixDriver::with_fds(self.slave, self.slave)
    }

    fn type_bytes(&self, bytes: &[u8]) {
        // SAFETY: pointer and length come from a live slice.
        let n = unsafe { libc::write(self.master, bytes.as_ptr().cast(), bytes.len()) };
        assert_eq!(n, bytes.len() as isize);
    }

    fn hang_up(&mut self) {
        // SAFETY: closing a descriptor this struct owns, exactly once.
        unsafe { libc::close(self.master) };
        self.master = -1;
    }
}

impl Drop for Pty {
    fn drop(&mut self) {
        for fd in [self.master, self.slave] {
            if fd >= 0 {
                // SAFETY: descriptors opened by openpty and not closed yet.
                unsafe { libc::close(fd) };
            }
        }
    }
}

#[test]
fn raw_mode_round_trips_through_termios() {
    let pty = Pty::open();
    let mut driver = pty.driver();

    let controller = TerminalModeController::capture(&mut driver).unwrap();
    controller.enter_raw_mode(&mut driver).unwrap();
    let raw = driver.get_attributes().unwrap();
    assert!(raw.is_raw());
    assert_eq!(raw.control_chars[libc::VTIME], 1);
    assert_eq!(raw.control_chars[libc::VMIN], 0);
    controller.exit_raw_mode(&mut driver).unwrap();

    assert_eq!(&driver.get_attributes().unwrap(), controller.original());
}

#[test]
fn timed_read_sees_idle_then_typed_byte() {
    let pty = Pty::open();
    let mut driver = pty.driver();
    let controller = TerminalModeController::capture(&mut driver).unwrap();
    controller.enter_raw_mode(&mut driver).unwrap();

    assert_eq!(
        driver.read_byte_with_timeout(Duration::from_millis(20)).unwrap(),
        None
    );
    pty.type_bytes(b"q");
    assert_eq!(
        driver.read_byte_with_timeout(Duration::from_millis(500)).unwrap(),
        Some(b'q')
    );
}

#[test]
fn hung_up_terminal_is_an_error_not_a_timeout() {
    let mut pty = Pty::open();
    let mut driver = pty.driver();
    let controller = TerminalModeController::capture(&mut driver).unwrap();
    controller.enter_raw_mode(&mut driver).unwrap();

    pty.hang_up();

    assert!(driver.read_byte_with_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn window_size_reads_pty_geometry() {
    let pty = Pty::open();
    let ws = libc::winsize {
        ws_row: 33,
        ws_col: 101,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCSWINSZ reads the winsize we pass.
    let rc = unsafe { libc::ioctl(pty.master, libc::TIOCSWINSZ, &ws as *const libc::winsize) };
    assert_eq!(rc, 0);

    assert_eq!(pty.driver().window_size().unwrap(), (33, 101));
}

// The only test in this binary that registers the process-wide original.
#[test]
fn emergency_restore_reapplies_registered_original() {
    let pty = Pty::open();
    let mut driver = pty.driver();
    let controller = TerminalModeController::capture(&mut driver).unwrap();
    driver
        .install_emergency_restore(controller.original())
        .unwrap();
    controller.enter_raw_mode(&mut driver).unwrap();
    assert!(driver.get_attributes().unwrap().is_raw());

    emergency_restore();

    assert_eq!(&driver.get_attributes().unwrap(), controller.original());
}
