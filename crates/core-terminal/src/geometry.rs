/// Usable terminal area, discovered once at startup. Both fields are > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorViewport {
    pub rows: u16,
    pub cols: u16,
}

impl EditorViewport {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// Zero-based logical cursor position. Signed: unclamped movement may leave the
/// viewport in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub row: i32,
    pub col: i32,
}

impl CursorPosition {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_within(&self, viewport: EditorViewport) -> bool {
        (0..i32::from(viewport.rows)).contains(&self.row)
            && (0..i32::from(viewport.cols)).contains(&self.col)
    }
}
