//! Pulse-counter backed rotary encoder
//!
//! Polls a [`PulseCounter`] on a fixed cadence, feeds the readings through
//! the [`DetentDecoder`] and hands resolved steps to the shared
//! [`StepAccumulator`].
//!
//! The counter register is cleared after every accepted or rejected read,
//! so each poll sees only the motion since the previous one.

use kidsbar_core::config::EncoderConfig;
use kidsbar_core::input::{DetentDecoder, PollOutcome, StepAccumulator};
use kidsbar_core::traits::MonotonicClock;
use kidsbar_hal::pcnt::{PcntConfig, PulseCounter, QuadratureMode};

/// Rotary encoder on a hardware pulse counter
pub struct PcntEncoder<'a, P, C> {
    counter: P,
    clock: C,
    decoder: DetentDecoder,
    steps: &'a StepAccumulator,
}

impl<'a, P: PulseCounter, C: MonotonicClock> PcntEncoder<'a, P, C> {
    /// Create a new encoder
    ///
    /// Nothing touches the counter until [`init`](Self::init).
    pub fn new(counter: P, clock: C, config: EncoderConfig, steps: &'a StepAccumulator) -> Self {
        Self {
            counter,
            clock,
            decoder: DetentDecoder::new(config),
            steps,
        }
    }

    /// Configure the counter and start counting from zero
    pub fn init(&mut self) {
        let pcnt = PcntConfig {
            mode: QuadratureMode::X2,
            filter_ns: self.decoder.config().filter_ns,
        };
        self.counter.configure(&pcnt);
        self.counter.pause();
        self.counter.clear();
        self.counter.resume();
        self.decoder.reset();

        info!(
            "encoder: x2 decoding, {} counts/step, filter {} ns",
            self.decoder.config().counts_per_step,
            pcnt.filter_ns
        );
    }

    /// Poll the counter once
    ///
    /// With `running == false` the motion is read and thrown away together
    /// with anything the decoder still holds.
    pub fn poll(&mut self, running: bool) -> PollOutcome {
        let raw = self.counter.read();

        if !running {
            if raw != 0 {
                self.counter.clear();
            }
            self.decoder.discard_pending();
            return PollOutcome::Idle;
        }

        if raw == 0 {
            return PollOutcome::Idle;
        }

        self.counter.clear();

        let outcome = self.decoder.decode(raw, self.clock.now_ms());
        match outcome {
            PollOutcome::SpikeRejected(raw) => {
                warn!("encoder: implausible delta {} dropped", raw);
            }
            PollOutcome::Steps(n) if n != 0 => {
                self.steps.add(n);
                debug!("encoder: {} step(s), backlog {}", n, self.decoder.backlog());
            }
            _ => {}
        }

        outcome
    }

    /// Get access to the decoder state
    pub fn decoder(&self) -> &DetentDecoder {
        &self.decoder
    }

    /// Get access to the underlying counter
    pub fn counter(&self) -> &P {
        &self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    #[derive(Default)]
    struct MockCounter {
        count: i16,
        paused: bool,
        clears: u32,
        filter_ns: Option<u32>,
    }

    impl PulseCounter for MockCounter {
        fn configure(&mut self, config: &PcntConfig) {
            self.filter_ns = Some(config.filter_ns);
        }

        fn read(&mut self) -> i16 {
            self.count
        }

        fn clear(&mut self) {
            self.count = 0;
            self.clears += 1;
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    }

    struct MockClock(Cell<u32>);

    impl MonotonicClock for MockClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    fn encoder<'a>(
        clock: &'a MockClock,
        steps: &'a StepAccumulator,
    ) -> PcntEncoder<'a, MockCounter, &'a MockClock> {
        let mut enc = PcntEncoder::new(MockCounter::default(), clock, EncoderConfig::DEFAULT, steps);
        enc.init();
        enc
    }

    #[test]
    fn test_init_configures_filter_and_clears() {
        let clock = MockClock(Cell::new(0));
        let steps = StepAccumulator::new();
        let enc = encoder(&clock, &steps);
        assert_eq!(enc.counter().filter_ns, Some(1_875));
        assert!(!enc.counter().paused);
        assert_eq!(enc.counter().clears, 1);
    }

    #[test]
    fn test_detents_reach_accumulator() {
        let clock = MockClock(Cell::new(0));
        let steps = StepAccumulator::new();
        let mut enc = encoder(&clock, &steps);

        for (i, raw) in [6i16, 3, 3].iter().enumerate() {
            clock.0.set(i as u32 * 100);
            enc.counter.count = *raw;
            enc.poll(true);
            assert_eq!(enc.counter().count, 0);
        }
        assert_eq!(steps.take(), 2);
    }

    #[test]
    fn test_spike_clears_counter_without_steps() {
        let clock = MockClock(Cell::new(0));
        let steps = StepAccumulator::new();
        let mut enc = encoder(&clock, &steps);

        enc.counter.count = 120;
        assert_eq!(enc.poll(true), PollOutcome::SpikeRejected(120));
        assert_eq!(enc.counter().count, 0);
        assert_eq!(steps.peek(), 0);
    }

    #[test]
    fn test_not_running_discards_motion() {
        let clock = MockClock(Cell::new(0));
        let steps = StepAccumulator::new();
        let mut enc = encoder(&clock, &steps);

        enc.counter.count = 4;
        enc.poll(true);
        assert_eq!(enc.decoder().remainder(), 4);

        enc.counter.count = 12;
        assert_eq!(enc.poll(false), PollOutcome::Idle);
        assert_eq!(enc.counter().count, 0);
        assert_eq!(enc.decoder().remainder(), 0);
        assert_eq!(steps.peek(), 0);
    }

    #[test]
    fn test_idle_poll_does_not_clear() {
        let clock = MockClock(Cell::new(0));
        let steps = StepAccumulator::new();
        let mut enc = encoder(&clock, &steps);
        let clears = enc.counter().clears;

        assert_eq!(enc.poll(true), PollOutcome::Idle);
        assert_eq!(enc.poll(false), PollOutcome::Idle);
        assert_eq!(enc.counter().clears, clears);
    }

    proptest! {
        #[test]
        fn prop_polls_conserve_counts_into_accumulator(
            polls in proptest::collection::vec((-40i16..=40, proptest::bool::weighted(0.9)), 1..200),
        ) {
            let clock = MockClock(Cell::new(0));
            let steps = StepAccumulator::new();
            let mut enc = encoder(&clock, &steps);
            let cps = enc.decoder().config().counts_per_step();
            let spike = i32::from(enc.decoder().config().spike_threshold);

            // Counts accepted since the decoder last dropped its pending motion
            let mut kept = 0i32;
            let mut base = 0i32;

            for (i, (raw, running)) in polls.iter().enumerate() {
                clock.0.set(i as u32 * 10);
                enc.counter.count = *raw;
                let before = steps.peek();
                enc.poll(*running);

                prop_assert_eq!(enc.counter().count, 0);
                if !*running {
                    prop_assert_eq!(steps.peek(), before);
                    kept = 0;
                    base = steps.peek();
                } else if i32::from(*raw).abs() > spike {
                    prop_assert_eq!(steps.peek(), before);
                } else {
                    kept += i32::from(*raw);
                }

                let dec = enc.decoder();
                prop_assert_eq!(kept, (steps.peek() - base + dec.backlog()) * cps + dec.remainder());
            }
        }
    }
}
