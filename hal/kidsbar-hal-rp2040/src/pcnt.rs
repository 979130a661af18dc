//! Edge-driven quadrature pulse counter
//!
//! The RP2040 has no pulse-count peripheral, so an async task waits on
//! edges of channel A and updates a shared signed 16-bit register. The
//! register wraps like a hardware counter and is read, cleared, paused and
//! resumed through [`PulseCounter`] on `&PcntUnit`.
//!
//! Only x2 decoding is implemented. The glitch filter drops an A edge
//! that follows the previous accepted edge by less than `filter_ns`.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};
use kidsbar_hal::pcnt::{x2_edge_delta, PcntConfig, PulseCounter};
use portable_atomic::{AtomicBool, AtomicI16, AtomicU32, Ordering};

/// Shared pulse-count register
pub struct PcntUnit {
    count: AtomicI16,
    paused: AtomicBool,
    filter_ns: AtomicU32,
}

impl Default for PcntUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl PcntUnit {
    /// Create a paused, zeroed counter (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            count: AtomicI16::new(0),
            paused: AtomicBool::new(true),
            filter_ns: AtomicU32::new(0),
        }
    }

    /// Count edges on the A/B pair forever
    ///
    /// Both pins must already be configured as inputs.
    pub async fn run(&self, mut a: Input<'_>, b: Input<'_>) -> ! {
        let mut a_high = a.is_high();
        let mut last_edge = Instant::now();

        loop {
            a.wait_for_any_edge().await;

            let now = Instant::now();
            let level = a.is_high();
            if level == a_high {
                // Edge and its bounce both happened before we looked
                continue;
            }

            let filter = Duration::from_nanos(u64::from(self.filter_ns.load(Ordering::Relaxed)));
            if now.saturating_duration_since(last_edge) < filter {
                continue;
            }
            a_high = level;
            last_edge = now;

            if self.paused.load(Ordering::Relaxed) {
                continue;
            }
            self.count.fetch_add(x2_edge_delta(level, b.is_high()), Ordering::Relaxed);
        }
    }
}

impl PulseCounter for &PcntUnit {
    fn configure(&mut self, config: &PcntConfig) {
        self.filter_ns.store(config.filter_ns, Ordering::Relaxed);
    }

    fn read(&mut self) -> i16 {
        self.count.load(Ordering::Relaxed)
    }

    fn clear(&mut self) {
        self.count.store(0, Ordering::Relaxed);
    }

    fn pause(&mut self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    fn resume(&mut self) {
        self.paused.store(false, Ordering::Relaxed);
    }
}
