use std::io;
use thiserror::Error;

/// Failures surfaced by terminal setup and I/O.
///
/// Decode ambiguity is deliberately absent: incomplete escape sequences resolve to
/// a key event instead of an error.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Capturing or applying device attributes failed.
    #[error("terminal configuration failed: {context}")]
    Config {
        context: &'static str,
        #[source]
        source: io::Error,
    },
    /// Neither the direct query nor the cursor-report probe produced usable dimensions.
    #[error("could not determine window size: {0}")]
    WindowSize(String),
    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
}

impl TerminalError {
    pub fn config(context: &'static str, source: io::Error) -> Self {
        TerminalError::Config { context, source }
    }

    pub fn window_size(reason: impl Into<String>) -> Self {
        TerminalError::WindowSize(reason.into())
    }
}

pub type Result<T, E = TerminalError> = std::result::Result<T, E>;
