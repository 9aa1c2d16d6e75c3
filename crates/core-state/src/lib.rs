//! Editor state: viewport, cursor and session lifecycle.
//!
//! The session owns exactly two pieces of state for its whole lifetime: the viewport
//! discovered at startup and the logical cursor. Both are mutated only through
//! [`EditorState::apply`], which is also where the Running -> Terminated transition
//! happens.
//!
//! Cursor Policy:
//! - `Unbounded` (default) moves the cursor by one cell per arrow key with no bounds
//!   check; coordinates may go negative or past the viewport.
//! - `Clamped` keeps `0 <= row < rows` and `0 <= col < cols`. It is an explicit opt-in,
//!   not a correction of the default.

use core_events::KeyEvent;
use core_terminal::{CursorPosition, EditorViewport};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    #[default]
    Unbounded,
    Clamped,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    viewport: EditorViewport,
    cursor: CursorPosition,
    status: SessionStatus,
    policy: CursorPolicy,
}

impl EditorState {
    pub fn new(viewport: EditorViewport, policy: CursorPolicy) -> Self {
        Self {
            viewport,
            cursor: CursorPosition::default(),
            status: SessionStatus::Running,
            policy,
        }
    }

    pub fn viewport(&self) -> EditorViewport {
        self.viewport
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Apply one key. Keys received after termination are ignored.
    pub fn apply(&mut self, key: KeyEvent) -> SessionStatus {
        if self.status == SessionStatus::Terminated {
            return self.status;
        }
        let (d_row, d_col) = match key {
            KeyEvent::ControlQuit => {
                self.status = SessionStatus::Terminated;
                trace!(target: "state", "terminated");
                return self.status;
            }
            KeyEvent::ArrowUp => (-1, 0),
            KeyEvent::ArrowDown => (1, 0),
            KeyEvent::ArrowLeft => (0, -1),
            KeyEvent::ArrowRight => (0, 1),
            KeyEvent::Printable(_) | KeyEvent::RawEscape | KeyEvent::Other(_) => {
                return self.status;
            }
        };
        self.move_cursor(d_row, d_col);
        trace!(
            target: "state",
            row = self.cursor.row,
            col = self.cursor.col,
            "cursor_moved"
        );
        self.status
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = self.cursor.row.saturating_add(d_row);
        let col = self.cursor.col.saturating_add(d_col);
        self.cursor = match self.policy {
            CursorPolicy::Unbounded => CursorPosition::new(row, col),
            CursorPolicy::Clamped => CursorPosition::new(
                row.clamp(0, i32::from(self.viewport.rows.saturating_sub(1))),
                col.clamp(0, i32::from(self.viewport.cols.saturating_sub(1))),
            ),
        };
    }
}
