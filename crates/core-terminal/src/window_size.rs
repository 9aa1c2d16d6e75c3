//! Viewport discovery.
//!
//! The direct query (`TIOCGWINSZ`) wins when it reports a non-zero size. Otherwise the
//! cursor is pushed to the bottom-right corner (terminals clamp the movement at their
//! edges) and its reported position is the viewport size.

use crate::commands::RequestCursorPosition;
use crate::{EditorViewport, Result, TerminalDriver, TerminalError};
use crossterm::cursor::{MoveDown, MoveRight};
use crossterm::queue;
use std::time::Duration;
use tracing::debug;

/// Longest cursor position report accepted before giving up.
const MAX_REPORT_LEN: usize = 32;
/// Cursor movement large enough to reach the corner of any real terminal.
const FAR_CORNER: u16 = 999;

#[derive(Debug, Clone, Copy)]
pub struct WindowSizeProbe {
    read_timeout: Duration,
}

impl WindowSizeProbe {
    pub fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }

    /// Discover the viewport, falling back to the cursor-report protocol.
    ///
    /// # Errors
    ///
    /// `TerminalError::WindowSize` when neither path yields both dimensions > 0.
    pub fn probe<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<EditorViewport> {
        match driver.window_size() {
            Ok((rows, cols)) if rows > 0 && cols > 0 => {
                debug!(target: "terminal.size", rows, cols, "direct_query");
                return Ok(EditorViewport::new(rows, cols));
            }
            Ok((rows, cols)) => {
                debug!(target: "terminal.size", rows, cols, "direct_query_empty");
            }
            Err(e) => {
                debug!(target: "terminal.size", ?e, "direct_query_unavailable");
            }
        }
        self.probe_cursor_report(driver)
    }

    /// Fallback: move to the far corner, request a position report, parse the reply.
    pub fn probe_cursor_report<D: TerminalDriver + ?Sized>(
        &self,
        driver: &mut D,
    ) -> Result<EditorViewport> {
        let mut seq = Vec::with_capacity(16);
        queue!(seq, MoveRight(FAR_CORNER), MoveDown(FAR_CORNER))?;
        driver.write_bytes(&seq)?;
        seq.clear();
        queue!(seq, RequestCursorPosition)?;
        driver.write_bytes(&seq)?;

        let report = self.read_report(driver)?;
        let viewport = parse_cursor_report(&report)?;
        debug!(
            target: "terminal.size",
            rows = viewport.rows,
            cols = viewport.cols,
            "cursor_report"
        );
        Ok(viewport)
    }

    /// Collect bytes up to (not including) the terminating `R`.
    fn read_report<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<Vec<u8>> {
        let mut report = Vec::with_capacity(MAX_REPORT_LEN);
        while report.len() < MAX_REPORT_LEN {
            match driver.read_byte_with_timeout(self.read_timeout) {
                Ok(Some(b'R')) => return Ok(report),
                Ok(Some(b)) => report.push(b),
                Ok(None) => {
                    return Err(TerminalError::window_size(
                        "no cursor position report before timeout",
                    ));
                }
                Err(e) => {
                    return Err(TerminalError::window_size(format!(
                        "reading cursor position report: {e}"
                    )));
                }
            }
        }
        Err(TerminalError::window_size("cursor position report too long"))
    }
}

/// Parse `ESC [ <rows> ; <cols>` (the trailing `R` already stripped).
///
/// # Errors
///
/// Wrong prefix, field count other than two, non-numeric or zero fields.
pub fn parse_cursor_report(report: &[u8]) -> Result<EditorViewport> {
    let body = report
        .strip_prefix(b"\x1b[")
        .ok_or_else(|| TerminalError::window_size("cursor report missing ESC [ prefix"))?;
    let body = std::str::from_utf8(body)
        .map_err(|_| TerminalError::window_size("cursor report is not ASCII"))?;
    let fields: Vec<&str> = body.split(';').collect();
    let [rows, cols] = fields.as_slice() else {
        return Err(TerminalError::window_size(format!(
            "cursor report has {} fields, expected 2",
            fields.len()
        )));
    };
    let parse = |field: &str| {
        field
            .parse::<u16>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| TerminalError::window_size(format!("bad cursor report field {field:?}")))
    };
    Ok(EditorViewport::new(parse(*rows)?, parse(*cols)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedDriver;
    use pretty_assertions::assert_eq;

    fn probe() -> WindowSizeProbe {
        WindowSizeProbe::new(Duration::from_millis(100))
    }

    #[test]
    fn direct_query_wins() {
        let mut driver = ScriptedDriver::new().with_window_size(40, 120);
        assert_eq!(probe().probe(&mut driver).unwrap(), EditorViewport::new(40, 120));
        assert!(driver.output().is_empty(), "no probe sequences expected");
    }

    #[test]
    fn fallback_parses_report() {
        let mut driver = ScriptedDriver::new().with_input(b"\x1b[24;80R");
        assert_eq!(probe().probe(&mut driver).unwrap(), EditorViewport::new(24, 80));
        assert_eq!(
            driver.writes().to_vec(),
            vec![b"\x1b[999C\x1b[999B".to_vec(), b"\x1b[6n".to_vec()]
        );
    }

    #[test]
    fn zero_columns_fall_back() {
        let mut driver = ScriptedDriver::new()
            .with_window_size(24, 0)
            .with_input(b"\x1b[30;100R");
        assert_eq!(probe().probe(&mut driver).unwrap(), EditorViewport::new(30, 100));
    }

    #[test]
    fn truncated_report_is_window_size_error() {
        let mut driver = ScriptedDriver::new().with_input(b"\x1b[bad").with_timeout();
        let err = probe().probe(&mut driver).unwrap_err();
        assert!(matches!(err, TerminalError::WindowSize(_)), "{err:?}");
    }

    #[test]
    fn parse_rejects_malformed_reports() {
        for bad in [
            &b"[24;80"[..],
            b"\x1b[24",
            b"\x1b[24;80;1",
            b"\x1b[x;80",
            b"\x1b[0;80",
            b"\x1b[24;",
        ] {
            assert!(
                matches!(parse_cursor_report(bad), Err(TerminalError::WindowSize(_))),
                "accepted {bad:?}"
            );
        }
    }
}
