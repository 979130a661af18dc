//! Millisecond timestamp arithmetic
//!
//! Timestamps come from a free-running `u32` millisecond counter that wraps
//! roughly every 49.7 days. All comparisons go through unsigned wrapping
//! subtraction so they stay correct across the wrap.

/// Milliseconds from `since` to `now`
#[inline]
pub fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// Check whether at least `window_ms` has passed since `since_ms`
#[inline]
pub fn has_elapsed(now_ms: u32, since_ms: u32, window_ms: u32) -> bool {
    elapsed_ms(now_ms, since_ms) >= window_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_plain() {
        assert_eq!(elapsed_ms(1500, 1000), 500);
        assert!(has_elapsed(1500, 1000, 500));
        assert!(!has_elapsed(1499, 1000, 500));
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let before = u32::MAX - 4;
        let after = 5;
        assert_eq!(elapsed_ms(after, before), 10);
        assert!(has_elapsed(after, before, 10));
        assert!(!has_elapsed(after, before, 11));
    }
}
