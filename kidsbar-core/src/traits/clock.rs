//! Clock traits

/// Earliest wall-clock time treated as synchronized (2020-09-13, epoch ms)
///
/// An RTC that has never been set reports times near 1970; those are not
/// usable for cross-device phase alignment.
pub const MIN_VALID_EPOCH_MS: u64 = 1_600_000_000_000;

/// Free-running millisecond counter
///
/// The value wraps at `u32::MAX`; compare timestamps with
/// [`crate::time::elapsed_ms`].
pub trait MonotonicClock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}

/// Optional wall-clock source
///
/// Acquisition and synchronization are handled elsewhere; the LED engine
/// only asks for the current time when one is available.
pub trait WallClock {
    /// Milliseconds since the Unix epoch, if the clock has been set
    fn epoch_ms(&self) -> Option<u64>;

    /// Epoch time, only if it looks synchronized
    fn synced_epoch_ms(&self) -> Option<u64> {
        self.epoch_ms().filter(|&ms| ms >= MIN_VALID_EPOCH_MS)
    }
}

/// Wall clock for boards without one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWallClock;

impl WallClock for NoWallClock {
    fn epoch_ms(&self) -> Option<u64> {
        None
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: WallClock + ?Sized> WallClock for &T {
    fn epoch_ms(&self) -> Option<u64> {
        (**self).epoch_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedWall(Option<u64>);

    impl WallClock for FixedWall {
        fn epoch_ms(&self) -> Option<u64> {
            self.0
        }
    }

    #[test]
    fn test_unsynced_clock_is_ignored() {
        // An RTC counting from zero after a cold boot
        assert_eq!(FixedWall(Some(12_345)).synced_epoch_ms(), None);
        assert_eq!(FixedWall(None).synced_epoch_ms(), None);
        assert_eq!(NoWallClock.synced_epoch_ms(), None);
    }

    #[test]
    fn test_synced_clock_passes_through() {
        let t = 1_700_000_000_123;
        assert_eq!(FixedWall(Some(t)).synced_epoch_ms(), Some(t));
    }
}
