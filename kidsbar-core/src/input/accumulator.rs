//! Shared step accumulator
//!
//! The decoder adds resolved UI steps here and the input dispatcher drains
//! them. Both sides go through a critical-section mutex, so the value
//! always equals the net steps not yet consumed, whichever context drains
//! it.
//!
//! The critical section covers a single load/store pair. Keep it that way:
//! it must stay uncontended and sub-microsecond so the poll cadence is not
//! disturbed.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Net UI steps waiting to be dispatched
pub struct StepAccumulator {
    steps: Mutex<CriticalSectionRawMutex, Cell<i32>>,
}

impl Default for StepAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StepAccumulator {
    /// Create an empty accumulator (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            steps: Mutex::new(Cell::new(0)),
        }
    }

    /// Add signed steps
    pub fn add(&self, steps: i32) {
        if steps == 0 {
            return;
        }
        self.steps.lock(|cell| cell.set(cell.get().saturating_add(steps)));
    }

    /// Read the pending steps and reset to zero
    pub fn take(&self) -> i32 {
        self.steps.lock(|cell| cell.replace(0))
    }

    /// Read the pending steps without consuming them
    pub fn peek(&self) -> i32 {
        self.steps.lock(|cell| cell.get())
    }
}
