//! Status LED renderer
//!
//! Turns a logical color plus an animation factor into pixels:
//!
//! - Master brightness is a ceiling; the animation factor only varies
//!   output within it.
//! - Identical physical colors are not rewritten, except that the last
//!   written color is re-sent every `reassert_ms` so a glitched pixel never
//!   stays dark.
//! - The auxiliary (on-board) strip is forced off periodically.

use kidsbar_core::config::LedConfig;
use kidsbar_core::led::scale;
use kidsbar_core::time::has_elapsed;
use kidsbar_hal::led::{pack, unpack, LedStrip, BLACK};
use smart_leds::RGB8;

/// Status LED renderer over a main and an auxiliary strip
pub struct LedRenderer<S, A> {
    strip: S,
    aux: A,
    config: LedConfig,
    master: f32,
    logical: RGB8,
    /// Last physically written color (`0x00RRGGBB`)
    cache: Option<u32>,
    last_write_ms: u32,
    last_aux_off_ms: u32,
}

/// Clamp a brightness level to [0, 1]; NaN counts as off
fn clamp_unit(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

impl<S: LedStrip, A: LedStrip> LedRenderer<S, A> {
    /// Create a renderer at the configured default brightness
    pub fn new(strip: S, aux: A, config: LedConfig) -> Self {
        Self {
            strip,
            aux,
            master: clamp_unit(config.default_brightness),
            config,
            logical: BLACK,
            cache: None,
            last_write_ms: 0,
            last_aux_off_ms: 0,
        }
    }

    /// Turn both strips off and forget the last written color
    pub fn init(&mut self, now_ms: u32) {
        self.strip.clear();
        self.aux.clear();
        self.cache = None;
        self.last_write_ms = now_ms;
        self.last_aux_off_ms = now_ms;
    }

    /// Set the brightness ceiling (clamped to [0, 1])
    pub fn set_master_brightness(&mut self, level: f32) {
        self.master = clamp_unit(level);
    }

    /// Current brightness ceiling
    pub fn master_brightness(&self) -> f32 {
        self.master
    }

    /// Color the firmware believes it is showing, before scaling
    pub fn logical_color(&self) -> RGB8 {
        self.logical
    }

    /// Last color physically written to the main strip
    pub fn last_written(&self) -> Option<RGB8> {
        self.cache.map(unpack)
    }

    /// Check if master brightness switches the LED off
    pub fn is_off(&self) -> bool {
        self.master <= self.config.off_threshold
    }

    /// Physical color for a logical color and animation factor
    pub fn physical(&self, color: RGB8, factor: f32) -> RGB8 {
        if self.is_off() {
            return BLACK;
        }
        let m = self.master * clamp_unit(factor);
        if m <= self.config.off_threshold {
            return BLACK;
        }
        scale(color, m)
    }

    /// Render a logical color
    ///
    /// Returns true if the strip was written.
    pub fn render(&mut self, color: RGB8, factor: f32, now_ms: u32) -> bool {
        self.logical = color;

        let physical = self.physical(color, factor);
        let packed = pack(physical);
        if self.cache == Some(packed)
            && !has_elapsed(now_ms, self.last_write_ms, self.config.reassert_ms)
        {
            return false;
        }

        self.write(physical, now_ms);
        true
    }

    /// Periodic maintenance: re-assert the main strip, force aux off
    pub fn service(&mut self, now_ms: u32) {
        if has_elapsed(now_ms, self.last_write_ms, self.config.reassert_ms) {
            let color = self.cache.map_or(BLACK, unpack);
            self.write(color, now_ms);
        }

        if has_elapsed(now_ms, self.last_aux_off_ms, self.config.aux_off_ms) {
            self.aux.clear();
            self.last_aux_off_ms = now_ms;
        }
    }

    /// Write one intermediate fade color at full animation factor
    ///
    /// The logical color is left alone until [`finish_fade`](Self::finish_fade).
    pub fn fade_step(&mut self, color: RGB8, now_ms: u32) {
        let physical = self.physical(color, 1.0);
        self.write(physical, now_ms);
    }

    /// Record the fade target as the logical color and sync the cache
    ///
    /// A following `render(target, 1.0)` is then de-duplicated.
    pub fn finish_fade(&mut self, target: RGB8, now_ms: u32) {
        self.logical = target;
        self.cache = Some(pack(self.physical(target, 1.0)));
        self.last_write_ms = now_ms;
    }

    fn write(&mut self, physical: RGB8, now_ms: u32) {
        self.strip.fill(physical);
        self.cache = Some(pack(physical));
        self.last_write_ms = now_ms;
    }

    /// Get access to the main strip
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Get access to the auxiliary strip
    pub fn aux(&self) -> &A {
        &self.aux
    }
}
