//! Terminal attribute snapshots and raw-mode derivation.
//!
//! `TerminalAttributes` mirrors the portable part of a POSIX `termios`: the four flag
//! words, the control-character array and both line speeds. The snapshot taken before
//! any mutation is the only source of truth for restoration, so the type is a plain
//! value (`Clone + PartialEq`) that can be compared bit-for-bit after a round trip.

pub type Flags = libc::tcflag_t;
pub type Speed = libc::speed_t;
pub type ControlChars = [libc::cc_t; libc::NCCS];

/// Read timeout applied in raw mode, in deciseconds (`VTIME`).
pub const RAW_READ_TIMEOUT_DECISECONDS: libc::cc_t = 1;
/// Minimum bytes a raw-mode read waits for (`VMIN`).
pub const RAW_READ_MIN_BYTES: libc::cc_t = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalAttributes {
    pub input_flags: Flags,
    pub output_flags: Flags,
    pub control_flags: Flags,
    pub local_flags: Flags,
    pub control_chars: ControlChars,
    pub input_speed: Speed,
    pub output_speed: Speed,
}

impl TerminalAttributes {
    /// Attribute set as a freshly opened, line-buffered terminal would report it.
    ///
    /// Only used to seed fake drivers; the real original always comes from the device.
    pub fn cooked() -> Self {
        let mut control_chars = [0; libc::NCCS];
        control_chars[libc::VMIN] = 1;
        control_chars[libc::VTIME] = 0;
        Self {
            input_flags: libc::ICRNL | libc::IXON | libc::BRKINT | libc::INPCK | libc::ISTRIP,
            output_flags: libc::OPOST,
            control_flags: libc::CS7 | libc::CREAD,
            local_flags: libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG,
            control_chars,
            input_speed: libc::B38400,
            output_speed: libc::B38400,
        }
    }

    /// Derive the raw-mode attribute set from `self` without touching `self`.
    ///
    /// Input: no software flow control, no CR->NL, no parity check, no 8th-bit strip,
    /// no SIGINT on break. Output: no post-processing. Control: 8-bit characters.
    /// Local: no echo, no canonical mode, no extended input, no signal characters.
    /// Reads return after at most one decisecond even when no byte is available.
    pub fn raw(&self) -> Self {
        let mut raw = self.clone();
        raw.input_flags &= !(libc::IXON | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::BRKINT);
        raw.output_flags &= !libc::OPOST;
        raw.control_flags |= libc::CS8;
        raw.local_flags &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.control_chars[libc::VMIN] = RAW_READ_MIN_BYTES;
        raw.control_chars[libc::VTIME] = RAW_READ_TIMEOUT_DECISECONDS;
        raw
    }

    pub fn is_raw(&self) -> bool {
        self.local_flags & (libc::ECHO | libc::ICANON | libc::ISIG) == 0
            && self.output_flags & libc::OPOST == 0
    }

    pub fn from_termios(termios: &libc::termios) -> Self {
        // SAFETY: cfget*speed only read from the referenced, fully initialized struct.
        let (input_speed, output_speed) =
            unsafe { (libc::cfgetispeed(termios), libc::cfgetospeed(termios)) };
        Self {
            input_flags: termios.c_iflag,
            output_flags: termios.c_oflag,
            control_flags: termios.c_cflag,
            local_flags: termios.c_lflag,
            control_chars: termios.c_cc,
            input_speed,
            output_speed,
        }
    }

    /// Write this snapshot into `termios`, leaving fields it does not model untouched.
    pub fn apply_to_termios(&self, termios: &mut libc::termios) {
        termios.c_iflag = self.input_flags;
        termios.c_oflag = self.output_flags;
        termios.c_cflag = self.control_flags;
        termios.c_lflag = self.local_flags;
        termios.c_cc = self.control_chars;
        // SAFETY: termios is a valid exclusive reference; the speeds came from cfget*speed.
        unsafe {
            libc::cfsetispeed(termios, self.input_speed);
            libc::cfsetospeed(termios, self.output_speed);
        }
    }
}
