//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// One sample from the data feed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrendSample {
    /// Percentage change over the reporting window
    pub change_pct: f32,
    /// False while the feed is unavailable or stale
    pub valid: bool,
}

/// Latest data feed sample, consumed by the main loop
///
/// Signalled by the data feed component (network fetch), which lives outside
/// this firmware image. Until it reports, the status LED shows the warning
/// color. Only the newest value matters.
pub static TREND_FEED: Signal<CriticalSectionRawMutex, TrendSample> = Signal::new();
