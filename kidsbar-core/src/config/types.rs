//! Configuration type definitions
//!
//! Every tuning constant of the peripheral layer lives here. The defaults
//! are the values tuned on the reference hardware (Bourns PEC11R-S0024
//! smooth encoder, single WS2812 status pixel). Firmware builds override
//! them from `device.toml` at compile time; with the `serde` feature every
//! struct deserializes from a partial table, missing keys keeping their
//! defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rotary encoder decoding configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    /// Raw counts per UI step (24 PPR × 2 edges ÷ 8 = 6, one step per 1/8 rev)
    pub counts_per_step: u16,
    /// Swap rotation direction
    pub invert_direction: bool,
    /// Largest plausible raw delta per poll; anything above is noise
    pub spike_threshold: u16,
    /// Maximum steps handed to the UI per poll
    pub max_emit_per_poll: u8,
    /// Window after an emission during which a single-step reversal is
    /// treated as bounce (0 disables the filter)
    pub direction_lock_ms: u32,
    /// Pulse counter glitch filter width
    pub filter_ns: u32,
    /// Poll cadence
    pub poll_interval_ms: u32,
}

impl EncoderConfig {
    /// Tuned defaults
    pub const DEFAULT: Self = Self {
        counts_per_step: 6,
        invert_direction: false,
        spike_threshold: 16,
        max_emit_per_poll: 3,
        direction_lock_ms: 10,
        filter_ns: 1_875,
        poll_interval_ms: 10,
    };

    /// Counts per step, never below 1
    pub fn counts_per_step(&self) -> i32 {
        i32::from(self.counts_per_step.max(1))
    }

    /// Emission cap, never below 1
    pub fn max_emit(&self) -> i32 {
        i32::from(self.max_emit_per_poll.max(1))
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// LED renderer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LedConfig {
    /// Master brightness applied at start-up (0.0 - 1.0)
    pub default_brightness: f32,
    /// Master brightness at or below this counts as "off"
    pub off_threshold: f32,
    /// Identical writes inside this window are skipped; after it the last
    /// color is re-sent
    pub reassert_ms: u32,
    /// Cadence for forcing the auxiliary strip dark
    pub aux_off_ms: u32,
}

impl LedConfig {
    /// Tuned defaults
    pub const DEFAULT: Self = Self {
        default_brightness: 0.5,
        off_threshold: 0.001,
        reassert_ms: 1_500,
        aux_off_ms: 2_000,
    };
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Trend hysteresis thresholds (percent change)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrendConfig {
    /// Magnitude needed to leave Neutral
    pub enter_pct: f32,
    /// Magnitude past zero needed to fall back to Neutral
    pub exit_pct: f32,
}

impl TrendConfig {
    /// Tuned defaults
    pub const DEFAULT: Self = Self {
        enter_pct: 0.02,
        exit_pct: 0.005,
    };
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Animation selection and timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// |change| for slow breathing (percent)
    pub slow_threshold_pct: f32,
    /// |change| for fast breathing (percent)
    pub fast_threshold_pct: f32,
    /// Change that starts party mode (percent)
    pub party_enter_pct: f32,
    /// Party mode ends below this change (percent)
    pub party_exit_pct: f32,
    /// Slow breathing period
    pub breathe_slow_period_ms: u32,
    /// Fast breathing period
    pub breathe_fast_period_ms: u32,
    /// One full hue rotation in party mode
    pub party_period_ms: u32,
    /// Lowest breathing level, as a fraction of master brightness
    pub breathe_min_fraction: f32,
    /// Main-loop animation rate limit
    pub min_update_ms: u32,
    /// Background animation task rate
    pub background_rate_hz: u16,
    /// Core for the background animation task
    pub background_core: u8,
}

impl AnimationConfig {
    /// Tuned defaults
    pub const DEFAULT: Self = Self {
        slow_threshold_pct: 5.0,
        fast_threshold_pct: 10.0,
        party_enter_pct: 20.0,
        party_exit_pct: 15.0,
        breathe_slow_period_ms: 2_400,
        breathe_fast_period_ms: 900,
        party_period_ms: 2_500,
        breathe_min_fraction: 0.15,
        min_update_ms: 33,
        background_rate_hz: 30,
        background_core: 1,
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Input dispatch timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Minimum spacing between accepted button presses
    pub debounce_ms: u32,
    /// Hold time for a long press
    pub long_press_ms: u32,
}

impl DispatchConfig {
    /// Tuned defaults
    pub const DEFAULT: Self = Self {
        debounce_ms: 50,
        long_press_ms: 5_000,
    };
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_guards() {
        let cfg = EncoderConfig {
            counts_per_step: 0,
            max_emit_per_poll: 0,
            ..EncoderConfig::DEFAULT
        };
        assert_eq!(cfg.counts_per_step(), 1);
        assert_eq!(cfg.max_emit(), 1);
    }

    #[test]
    fn test_party_exit_below_enter() {
        let cfg = AnimationConfig::default();
        assert!(cfg.party_exit_pct < cfg.party_enter_pct);
        assert!(cfg.slow_threshold_pct < cfg.fast_threshold_pct);
    }
}
