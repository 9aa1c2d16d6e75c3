//! Screen rendering: frame composition and atomic flushing.
//!
//! Every refresh builds one complete [`FrameBuffer`] (hide cursor, redraw every
//! row, reposition and show the cursor) and hands it to the driver in a single
//! write, so the terminal never shows a half-drawn frame.
//!
//! Exposed Components:
//! - `frame`: append-only byte buffer fed with crossterm commands.
//! - `compositor`: row layout, welcome banner, cursor placement, screen clearing.

pub mod compositor;
pub mod frame;

pub use compositor::{PRODUCT_NAME, ScreenCompositor, VERSION, banner_line};
pub use frame::FrameBuffer;
