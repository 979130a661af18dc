//! Encoder detent decoder
//!
//! Turns raw pulse-counter deltas into UI steps:
//!
//! 1. Plausibility check: a delta larger than the fastest physical rotation
//!    can produce in one poll is noise (e-paper refreshes couple into the
//!    encoder lines) and is dropped whole.
//! 2. Detent accumulation: counts are collected until they add up to whole
//!    steps; the remainder carries over to the next poll.
//! 3. Rate limiting: resolved steps queue in a backlog and at most
//!    `max_emit` leave per poll, so the UI does not jump after a long
//!    blocking call.
//! 4. Bounce filter: a single-step reversal right after an emission is held
//!    back (not discarded) until the lock window has passed.
//!
//! The decoder never touches hardware. The caller reads and clears the
//! counter and forwards the emission to the step accumulator.

use crate::config::EncoderConfig;
use crate::time::elapsed_ms;

/// Result of feeding one raw reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Counter did not move
    Idle,
    /// Reading exceeded the plausibility threshold and was discarded
    SpikeRejected(i16),
    /// Steps to hand to the UI this poll (0 if counts are still pending)
    Steps(i32),
}

impl PollOutcome {
    /// Steps to emit, zero for idle or rejected polls
    pub fn steps(&self) -> i32 {
        match self {
            PollOutcome::Steps(n) => *n,
            _ => 0,
        }
    }
}

/// Detent decoder state
#[derive(Debug, Clone)]
pub struct DetentDecoder {
    config: EncoderConfig,
    /// Counts not yet resolved into a whole step
    detent_accum: i32,
    /// Resolved steps not yet emitted
    backlog: i32,
    /// Direction of the last emission (-1, 0, +1)
    last_dir: i8,
    /// Time of the last emission
    last_emit_ms: u32,
}

impl DetentDecoder {
    /// Create a decoder with empty accumulators
    pub const fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            detent_accum: 0,
            backlog: 0,
            last_dir: 0,
            last_emit_ms: 0,
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Discard pending motion (remainder and backlog)
    ///
    /// Called while the UI is not accepting input so rotation made during
    /// that time never reaches it later.
    pub fn discard_pending(&mut self) {
        self.detent_accum = 0;
        self.backlog = 0;
    }

    /// Reset everything, including bounce-filter history
    pub fn reset(&mut self) {
        self.discard_pending();
        self.last_dir = 0;
        self.last_emit_ms = 0;
    }

    /// Counts carried over to the next poll
    pub fn remainder(&self) -> i32 {
        self.detent_accum
    }

    /// Resolved steps still waiting to be emitted
    pub fn backlog(&self) -> i32 {
        self.backlog
    }

    /// Check a raw reading against the plausibility threshold
    pub fn is_plausible(&self, raw: i16) -> bool {
        i32::from(raw).abs() <= i32::from(self.config.spike_threshold)
    }

    /// Feed one raw counter reading taken at `now_ms`
    pub fn decode(&mut self, raw: i16, now_ms: u32) -> PollOutcome {
        if raw == 0 {
            return PollOutcome::Idle;
        }

        if !self.is_plausible(raw) {
            return PollOutcome::SpikeRejected(raw);
        }

        let mut delta = i32::from(raw);
        if self.config.invert_direction {
            delta = -delta;
        }

        self.detent_accum += delta;
        let steps = self.resolve_steps();
        self.backlog = self.backlog.saturating_add(steps);

        let max = self.config.max_emit();
        let mut emit = self.backlog.clamp(-max, max);

        if emit != 0 {
            let dir: i8 = if emit > 0 { 1 } else { -1 };
            if self.is_bounce(dir, emit, now_ms) {
                // Keep the backlog; the step goes out once the window passes
                emit = 0;
            } else {
                self.last_dir = dir;
                self.last_emit_ms = now_ms;
            }
        }

        self.backlog -= emit;
        PollOutcome::Steps(emit)
    }

    /// Pull whole steps out of the detent accumulator
    ///
    /// Leaves a remainder with magnitude below `counts_per_step`.
    fn resolve_steps(&mut self) -> i32 {
        let cps = self.config.counts_per_step();
        let mut steps = 0;

        while self.detent_accum >= cps {
            steps += 1;
            self.detent_accum -= cps;
        }
        while self.detent_accum <= -cps {
            steps -= 1;
            self.detent_accum += cps;
        }

        steps
    }

    fn is_bounce(&self, dir: i8, emit: i32, now_ms: u32) -> bool {
        self.config.direction_lock_ms > 0
            && self.last_dir != 0
            && dir != self.last_dir
            && elapsed_ms(now_ms, self.last_emit_ms) < self.config.direction_lock_ms
            && emit.abs() == 1
    }
}
