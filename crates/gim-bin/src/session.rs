//! Editor session: the render -> read key -> apply loop.
//!
//! The session owns the raw-mode guard (and through it the driver), the editor
//! state, and the stateless decoder/compositor. Every way out of [`EditorSession::run`]
//! clears the screen and restores the original terminal attributes before returning;
//! anything that escapes even that (a panic) is still covered by the guard's drop.

use core_config::Config;
use core_events::KeyEvent;
use core_input::InputDecoder;
use core_render::ScreenCompositor;
use core_state::{CursorPolicy, EditorState, SessionStatus};
use core_terminal::{RawModeGuard, Result, TerminalDriver, TerminalModeController, WindowSizeProbe};
use tracing::{debug, error, info, warn};

/// Best-effort cleanup for a failed startup: clear the screen, then reapply the
/// original attributes when they were captured. Failures are logged, not returned,
/// so the setup error stays the one reported.
pub fn abort_setup<D: TerminalDriver + ?Sized>(
    driver: &mut D,
    controller: Option<&TerminalModeController>,
) {
    if let Err(e) = ScreenCompositor::clear_screen(driver) {
        warn!(target: "runtime", error = %e, "setup_clear_failed");
    }
    if let Some(controller) = controller {
        if let Err(e) = controller.exit_raw_mode(driver) {
            warn!(target: "runtime", error = %e, "setup_restore_failed");
        }
    }
}

/// Snapshot the original attributes, clearing the screen if the device refuses.
///
/// # Errors
///
/// `TerminalError::Config` from [`TerminalModeController::capture`].
pub fn capture_terminal<D: TerminalDriver + ?Sized>(
    driver: &mut D,
) -> Result<TerminalModeController> {
    TerminalModeController::capture(&mut *driver).inspect_err(|_| abort_setup(driver, None))
}

pub struct EditorSession<D: TerminalDriver> {
    terminal: RawModeGuard<D>,
    state: EditorState,
    decoder: InputDecoder,
    compositor: ScreenCompositor,
}

impl<D: TerminalDriver> EditorSession<D> {
    /// Enter raw mode on `driver` and discover the viewport.
    ///
    /// # Errors
    ///
    /// `TerminalError::Config` if raw mode cannot be applied, `TerminalError::WindowSize`
    /// if the viewport cannot be determined. The screen is cleared and the terminal
    /// restored in both cases.
    pub fn start(
        controller: TerminalModeController,
        mut driver: D,
        config: &Config,
    ) -> Result<Self> {
        if let Err(e) = controller.enter_raw_mode(&mut driver) {
            abort_setup(&mut driver, Some(&controller));
            return Err(e);
        }
        let mut terminal = controller.guard_entered(driver);
        let viewport = match WindowSizeProbe::new(config.read_timeout()).probe(&mut *terminal) {
            Ok(viewport) => viewport,
            Err(e) => {
                // The guard restores on drop.
                abort_setup(&mut *terminal, None);
                return Err(e);
            }
        };
        let policy = if config.clamp_cursor() {
            CursorPolicy::Clamped
        } else {
            CursorPolicy::Unbounded
        };
        info!(
            target: "runtime.startup",
            rows = viewport.rows,
            cols = viewport.cols,
            ?policy,
            "session_started"
        );
        Ok(Self {
            terminal,
            state: EditorState::new(viewport, policy),
            decoder: InputDecoder::new(config.read_timeout()),
            compositor: ScreenCompositor::new(),
        })
    }

    /// Run until the quit key, then clear the screen and restore the terminal.
    ///
    /// # Errors
    ///
    /// Device I/O failures during the loop, or failure to restore. The screen clear
    /// and restore are attempted regardless.
    pub fn run(mut self) -> Result<EditorState> {
        let outcome = self.event_loop();
        if let Err(e) = &outcome {
            error!(target: "runtime", error = %e, "event_loop_failed");
        }
        let cleared = ScreenCompositor::clear_screen(&mut *self.terminal);
        let restored = self.terminal.restore();
        outcome?;
        cleared?;
        restored?;
        info!(target: "runtime", "session_terminated");
        Ok(self.state.clone())
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.refresh_screen()?;
            let key = self.decoder.read_key(&mut *self.terminal)?;
            if self.handle_key(key) == SessionStatus::Terminated {
                return Ok(());
            }
        }
    }

    fn refresh_screen(&mut self) -> Result<()> {
        self.compositor.render_frame(
            &mut *self.terminal,
            self.state.viewport(),
            self.state.cursor(),
        )
    }

    fn handle_key(&mut self, key: KeyEvent) -> SessionStatus {
        let status = self.state.apply(key);
        if key == KeyEvent::ControlQuit {
            debug!(target: "runtime", "quit_requested");
        }
        status
    }
}
