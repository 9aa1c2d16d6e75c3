//! Full-frame composition.
//!
//! Frame layout, in order: hide cursor, home, one line per drawn row (placeholder
//! `~` or the banner, then erase-to-end-of-line), cursor placement, show cursor.
//! The last viewport row is never written so the terminal does not scroll, and the
//! last drawn row gets no trailing CRLF for the same reason.

use crate::frame::FrameBuffer;
use core_terminal::commands::{CursorHome, MoveCursorTo};
use core_terminal::{CursorPosition, EditorViewport, Result, TerminalDriver};
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{Clear, ClearType};
use std::io;

pub const PRODUCT_NAME: &str = "Gim editor";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder drawn at the start of rows with no content.
const EMPTY_ROW_MARKER: &str = "~";

#[derive(Debug, Clone)]
pub struct ScreenCompositor {
    banner: String,
}

impl Default for ScreenCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenCompositor {
    pub fn new() -> Self {
        Self::with_banner(format!("{PRODUCT_NAME} -- version {VERSION}"))
    }

    pub fn with_banner(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Build the frame for `viewport` with the cursor at `cursor`.
    pub fn compose(
        &self,
        viewport: EditorViewport,
        cursor: CursorPosition,
    ) -> io::Result<FrameBuffer> {
        let estimate = usize::from(viewport.rows) * 8 + self.banner.len() + 32;
        let mut frame = FrameBuffer::with_capacity(estimate);
        frame.queue(Hide)?.queue(CursorHome)?;
        self.draw_rows(&mut frame, viewport)?;
        frame
            .queue(MoveCursorTo {
                row: cursor.row,
                col: cursor.col,
            })?
            .queue(Show)?;
        Ok(frame)
    }

    /// Compose and flush one frame.
    ///
    /// # Errors
    ///
    /// `TerminalError::Io` when the frame cannot be written.
    pub fn render_frame<D: TerminalDriver + ?Sized>(
        &self,
        driver: &mut D,
        viewport: EditorViewport,
        cursor: CursorPosition,
    ) -> Result<()> {
        let frame = self.compose(viewport, cursor)?;
        frame.flush_to(driver)
    }

    /// Erase the whole screen and home the cursor (used on quit and fatal exit).
    ///
    /// # Errors
    ///
    /// `TerminalError::Io` when the sequence cannot be written.
    pub fn clear_screen<D: TerminalDriver + ?Sized>(driver: &mut D) -> Result<()> {
        let mut frame = FrameBuffer::with_capacity(8);
        frame.queue(Clear(ClearType::All))?.queue(CursorHome)?;
        frame.flush_to(driver)
    }

    fn draw_rows(&self, frame: &mut FrameBuffer, viewport: EditorViewport) -> io::Result<()> {
        let drawn = viewport.rows.saturating_sub(1);
        let banner_row = viewport.rows / 3;
        for y in 0..drawn {
            if y == banner_row {
                frame.print(&banner_line(&self.banner, viewport.cols));
            } else {
                frame.print(EMPTY_ROW_MARKER);
            }
            frame.queue(Clear(ClearType::UntilNewLine))?;
            if y + 1 < drawn {
                frame.print("\r\n");
            }
        }
        Ok(())
    }
}

/// Center `banner` in `cols` columns: truncate to fit, then pad on the left with
/// the `~` marker followed by spaces.
pub fn banner_line(banner: &str, cols: u16) -> String {
    let cols = usize::from(cols);
    let text = truncate_to(banner, cols);
    let mut padding = (cols - text.len()) / 2;
    let mut line = String::with_capacity(cols);
    if padding > 0 {
        line.push_str(EMPTY_ROW_MARKER);
        padding -= 1;
    }
    line.extend(std::iter::repeat_n(' ', padding));
    line.push_str(text);
    line
}

fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
