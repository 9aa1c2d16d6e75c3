//! Cooked/raw mode switching with guaranteed restoration.
//!
//! The original attributes are captured once by [`TerminalModeController::capture`]
//! and never mutated. [`RawModeGuard`] owns the driver while raw mode is active and
//! reapplies the original on drop, so normal returns, `?` propagation and unwinding
//! panics all leave the terminal as they found it.

use crate::{Result, TerminalAttributes, TerminalDriver, TerminalError};
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct TerminalModeController {
    original: TerminalAttributes,
}

impl TerminalModeController {
    /// Snapshot the device attributes before anything changes them.
    ///
    /// # Errors
    ///
    /// `TerminalError::Config` when the device cannot be queried (e.g. not a tty).
    pub fn capture<D: TerminalDriver + ?Sized>(driver: &mut D) -> Result<Self> {
        let original = driver
            .get_attributes()
            .map_err(|e| TerminalError::config("reading terminal attributes", e))?;
        debug!(target: "terminal", raw = original.is_raw(), "attributes_captured");
        Ok(Self { original })
    }

    pub fn original(&self) -> &TerminalAttributes {
        &self.original
    }

    /// Apply the raw attribute set derived from the original.
    ///
    /// # Errors
    ///
    /// `TerminalError::Config` when the device rejects the attributes.
    pub fn enter_raw_mode<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<()> {
        driver
            .set_attributes(&self.original.raw())
            .map_err(|e| TerminalError::config("entering raw mode", e))?;
        debug!(target: "terminal", "raw_mode_entered");
        Ok(())
    }

    /// Reapply the original attributes verbatim. Repeating this is harmless.
    ///
    /// # Errors
    ///
    /// `TerminalError::Config` when the device rejects the attributes.
    pub fn exit_raw_mode<D: TerminalDriver + ?Sized>(&self, driver: &mut D) -> Result<()> {
        driver
            .set_attributes(&self.original)
            .map_err(|e| TerminalError::config("restoring terminal attributes", e))?;
        debug!(target: "terminal", "raw_mode_exited");
        Ok(())
    }

    /// Enter raw mode and hand the driver to a guard that restores on drop.
    ///
    /// # Errors
    ///
    /// Same as [`Self::enter_raw_mode`]; the driver is dropped with the error.
    pub fn enter_guard<D: TerminalDriver>(self, mut driver: D) -> Result<RawModeGuard<D>> {
        self.enter_raw_mode(&mut driver)?;
        Ok(self.guard_entered(driver))
    }

    /// Guard a driver the caller already switched with [`Self::enter_raw_mode`].
    pub fn guard_entered<D: TerminalDriver>(self, driver: D) -> RawModeGuard<D> {
        RawModeGuard {
            driver,
            controller: self,
            active: true,
        }
    }
}

/// Raw-mode scope. Derefs to the driver it owns.
#[derive(Debug)]
pub struct RawModeGuard<D: TerminalDriver> {
    driver: D,
    controller: TerminalModeController,
    active: bool,
}

impl<D: TerminalDriver> RawModeGuard<D> {
    /// Restore the original attributes now; drop will not restore again.
    ///
    /// # Errors
    ///
    /// `TerminalError::Config` when the device rejects the attributes.
    pub fn restore(&mut self) -> Result<()> {
        self.active = false;
        self.controller.exit_raw_mode(&mut self.driver)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<D: TerminalDriver> Deref for RawModeGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.driver
    }
}

impl<D: TerminalDriver> DerefMut for RawModeGuard<D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: TerminalDriver> Drop for RawModeGuard<D> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.controller.exit_raw_mode(&mut self.driver) {
                warn!(target: "terminal", error = %e, "restore_on_drop_failed");
            }
        }
    }
}
