//! Time sources backed by embassy-time

use embassy_time::Instant;
use kidsbar_core::traits::MonotonicClock;

/// Milliseconds since boot from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the decoder expects
        Instant::now().as_millis() as u32
    }
}
