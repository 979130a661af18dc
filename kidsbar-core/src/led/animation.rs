//! LED animation scheduling
//!
//! Decides what the status LED should show for a given data sample and
//! computes the per-tick frame (logical color plus animation factor):
//!
//! - Invalid data: solid warning color, nothing else applies.
//! - Party: change at or above `party_enter_pct` starts a full hue rotation
//!   that lasts until the change drops below `party_exit_pct`.
//! - Otherwise the trend picks the base color and the magnitude of the
//!   change picks Solid / BreatheSlow / BreatheFast.
//!
//! Breathing phase follows the wall clock when it is synchronized, so
//! several devices on the same desk breathe together. Without a wall clock
//! the phase starts when the current mode was entered.

use core::f32::consts::PI;

use smart_leds::RGB8;

use super::color::{hsv_to_rgb, WARNING_COLOR};
use super::trend::{TrendClassifier, TrendState};
use crate::config::{AnimationConfig, TrendConfig};
use crate::time::elapsed_ms;

/// Animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationMode {
    #[default]
    Solid,
    BreatheSlow,
    BreatheFast,
    Party,
}

/// One rendered animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Logical (unscaled) color
    pub color: RGB8,
    /// Brightness factor within master brightness (0.0 - 1.0)
    pub factor: f32,
}

impl Frame {
    /// Full-intensity frame
    pub const fn solid(color: RGB8) -> Self {
        Self { color, factor: 1.0 }
    }
}

/// Pick the breathing mode from the magnitude of a change
pub fn select_mode(config: &AnimationConfig, change_pct: f32) -> AnimationMode {
    let mag = libm::fabsf(change_pct);
    if mag >= config.fast_threshold_pct {
        AnimationMode::BreatheFast
    } else if mag >= config.slow_threshold_pct {
        AnimationMode::BreatheSlow
    } else {
        AnimationMode::Solid
    }
}

/// Sinusoidal breathing level for a phase
///
/// Returns a value in `[min_fraction, 1.0]` that repeats every
/// `period_ms`. A zero period disables breathing (always 1.0). A NaN
/// `min_fraction` is treated as 0.
pub fn breathe_factor(phase_ms: u32, period_ms: u32, min_fraction: f32) -> f32 {
    if period_ms == 0 {
        return 1.0;
    }
    let min = if min_fraction.is_nan() {
        0.0
    } else {
        min_fraction.clamp(0.0, 1.0)
    };

    let t = (phase_ms % period_ms) as f32 / period_ms as f32;
    let wave = (libm::sinf(2.0 * PI * t) + 1.0) * 0.5;

    (min + (1.0 - min) * wave).clamp(min, 1.0)
}

/// Party-mode color for a timestamp: one full hue turn per `period_ms`
pub fn party_color(now_ms: u32, period_ms: u32) -> RGB8 {
    let period = period_ms.max(1);
    let hue = (now_ms % period) as f32 / period as f32 * 360.0;
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Animation state machine for the status LED
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    config: AnimationConfig,
    trend: TrendClassifier,
    mode: AnimationMode,
    base: RGB8,
    /// Phase origin when no wall clock is available
    anim_start_ms: u32,
}

impl AnimationScheduler {
    /// Create a scheduler showing solid neutral gray
    pub const fn new(config: AnimationConfig, trend: TrendConfig) -> Self {
        Self {
            config,
            trend: TrendClassifier::new(trend),
            mode: AnimationMode::Solid,
            base: TrendState::Neutral.color(),
            anim_start_ms: 0,
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Current animation mode
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Current base color (ignored in party mode)
    pub fn base_color(&self) -> RGB8 {
        self.base
    }

    /// Current trend
    pub fn trend(&self) -> TrendState {
        self.trend.state()
    }

    /// Restart the phase origin
    pub fn restart(&mut self, now_ms: u32) {
        self.anim_start_ms = now_ms;
    }

    /// Apply a new data sample
    ///
    /// Returns the new mode when the mode changed.
    pub fn update(&mut self, change_pct: f32, data_valid: bool, now_ms: u32) -> Option<AnimationMode> {
        if !data_valid {
            return self.apply(AnimationMode::Solid, WARNING_COLOR, now_ms);
        }

        self.trend.update(change_pct);

        let party = change_pct >= self.config.party_enter_pct
            || (self.mode == AnimationMode::Party && change_pct >= self.config.party_exit_pct);
        if party {
            let base = self.base;
            return self.apply(AnimationMode::Party, base, now_ms);
        }

        let mode = select_mode(&self.config, change_pct);
        let base = self.trend.state().color();
        self.apply(mode, base, now_ms)
    }

    fn apply(&mut self, mode: AnimationMode, base: RGB8, now_ms: u32) -> Option<AnimationMode> {
        let mode_changed = mode != self.mode;
        if mode_changed || base != self.base {
            self.anim_start_ms = now_ms;
        }
        self.mode = mode;
        self.base = base;
        mode_changed.then_some(mode)
    }

    /// Compute the frame to show at `now_ms`
    ///
    /// `epoch_ms` is the synchronized wall-clock time, if any.
    pub fn frame(&self, now_ms: u32, epoch_ms: Option<u64>, data_valid: bool) -> Frame {
        if !data_valid {
            return Frame::solid(WARNING_COLOR);
        }

        match self.mode {
            AnimationMode::Solid => Frame::solid(self.base),
            AnimationMode::Party => Frame::solid(party_color(now_ms, self.config.party_period_ms)),
            AnimationMode::BreatheSlow | AnimationMode::BreatheFast => {
                let period = self.breathe_period();
                let phase = match epoch_ms {
                    Some(epoch) if period > 0 => (epoch % u64::from(period)) as u32,
                    _ => elapsed_ms(now_ms, self.anim_start_ms),
                };
                Frame {
                    color: self.base,
                    factor: breathe_factor(phase, period, self.config.breathe_min_fraction),
                }
            }
        }
    }

    fn breathe_period(&self) -> u32 {
        match self.mode {
            AnimationMode::BreatheFast => self.config.breathe_fast_period_ms,
            _ => self.config.breathe_slow_period_ms,
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(AnimationConfig::DEFAULT, TrendConfig::DEFAULT)
    }
}
