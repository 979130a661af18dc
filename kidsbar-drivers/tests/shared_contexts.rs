//! Main loop and background context sharing the same instances

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use kidsbar_core::config::{AnimationConfig, LedConfig, TrendConfig};
use kidsbar_core::input::StepAccumulator;
use kidsbar_core::traits::{MonotonicClock, NoWallClock};
use kidsbar_drivers::led::LedStatus;
use kidsbar_hal::led::{LedStrip, RGB8};

#[derive(Default)]
struct TestClock(AtomicU32);

impl MonotonicClock for TestClock {
    fn now_ms(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

struct CountingStrip {
    shows: Arc<AtomicU32>,
}

impl LedStrip for CountingStrip {
    fn len(&self) -> usize {
        1
    }

    fn set_pixel(&mut self, _index: usize, _color: RGB8) {}

    fn show(&mut self) {
        self.shows.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn accumulator_conserves_steps_across_threads() {
    let steps = StepAccumulator::new();
    let mut drained = 0i32;

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..10_000 {
                steps.add(if i % 3 == 0 { -1 } else { 1 });
            }
        });
        for _ in 0..1_000 {
            drained += steps.take();
        }
    });
    drained += steps.take();

    // 3334 decrements, 6666 increments
    assert_eq!(drained, 3_332);
}

#[test]
fn background_and_main_loop_share_led_state() {
    let shows = Arc::new(AtomicU32::new(0));
    let clock = TestClock::default();
    let led = LedStatus::new(
        CountingStrip { shows: shows.clone() },
        CountingStrip { shows: Arc::new(AtomicU32::new(0)) },
        &clock,
        NoWallClock,
        LedConfig::DEFAULT,
        AnimationConfig::DEFAULT,
        TrendConfig::DEFAULT,
    );
    led.init();
    led.set_master_brightness(1.0);
    let schedule = led.start_background_animation(60, 1);
    assert!(schedule.is_some());

    thread::scope(|s| {
        s.spawn(|| {
            for t in 0..500u32 {
                clock.0.store(t * 5, Ordering::Relaxed);
                led.background_tick();
            }
        });
        for _ in 0..500 {
            led.update_for_trend(25.0, true);
            led.animation_tick(true, true);
        }
    });

    assert!(led.is_background_active());
    assert!(shows.load(Ordering::Relaxed) > 0);
    // Party colors are fully saturated at master 1.0
    let last = led.last_written().unwrap_or_default();
    assert_eq!(last.r.max(last.g).max(last.b), 255);
}
