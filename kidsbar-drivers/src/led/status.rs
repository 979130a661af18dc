//! Shared status LED facade
//!
//! Combines the [`LedRenderer`] and the [`AnimationScheduler`] behind one
//! blocking mutex so the main loop and an optional background animation
//! task can both drive the LED. Every physical write happens while the lock
//! is held.
//!
//! Two execution strategies share the same frame function:
//!
//! - Main loop only: call [`LedStatus::animation_tick`] every iteration; it
//!   rate-limits itself to `min_update_ms`.
//! - Background: after [`LedStatus::start_background_animation`] the
//!   firmware runs [`LedStatus::background_tick`] periodically (on its own
//!   core if it wants) and `animation_tick` only services the strips. This
//!   keeps breathing smooth while the main loop blocks on a display
//!   refresh.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::delay::DelayNs;
use kidsbar_core::config::{AnimationConfig, LedConfig, TrendConfig};
use kidsbar_core::led::{lerp, AnimationMode, AnimationScheduler, NamedColor, TrendState};
use kidsbar_core::time::has_elapsed;
use kidsbar_core::traits::{MonotonicClock, WallClock};
use kidsbar_hal::led::LedStrip;
use portable_atomic::{AtomicBool, Ordering};
use smart_leds::RGB8;

use super::renderer::LedRenderer;

/// Slowest background animation rate
pub const MIN_BACKGROUND_HZ: u16 = 5;
/// Fastest background animation rate
pub const MAX_BACKGROUND_HZ: u16 = 60;

/// How the firmware should run the background animation task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BackgroundSchedule {
    /// Tick period in milliseconds
    pub period_ms: u32,
    /// Core to run on (0 or 1)
    pub core: u8,
}

impl BackgroundSchedule {
    /// Build a schedule from a requested rate and core
    ///
    /// The rate is clamped to [`MIN_BACKGROUND_HZ`]..=[`MAX_BACKGROUND_HZ`];
    /// an unknown core falls back to core 0.
    pub fn new(rate_hz: u16, core: u8) -> Self {
        let hz = rate_hz.clamp(MIN_BACKGROUND_HZ, MAX_BACKGROUND_HZ);
        Self {
            period_ms: (1_000 / u32::from(hz)).max(1),
            core: if core > 1 { 0 } else { core },
        }
    }
}

struct LedState<S, A> {
    renderer: LedRenderer<S, A>,
    scheduler: AnimationScheduler,
    /// Last rate-limited main loop animation step (None = due now)
    last_anim_ms: Option<u32>,
}

impl<S: LedStrip, A: LedStrip> LedState<S, A> {
    fn animate(&mut self, now_ms: u32, epoch_ms: Option<u64>, data_valid: bool) {
        let frame = self.scheduler.frame(now_ms, epoch_ms, data_valid);
        self.renderer.render(frame.color, frame.factor, now_ms);
    }
}

/// Status LED shared between the main loop and the animation task
///
/// The lock is a critical section: it masks interrupts and takes the
/// cross-core spinlock for its whole body. An animated tick holds it across
/// the soft-float frame math (`sinf`, HSV) and the strip write including its
/// latch gap, roughly 100 us on the RP2040 for one pixel. Keep strips short
/// and do not call into the facade from interrupt handlers with tight
/// deadlines.
pub struct LedStatus<S, A, C, W> {
    state: Mutex<CriticalSectionRawMutex, RefCell<LedState<S, A>>>,
    clock: C,
    wall: W,
    min_update_ms: u32,
    ctx_running: AtomicBool,
    ctx_data_valid: AtomicBool,
    background: AtomicBool,
}

impl<S, A, C, W> LedStatus<S, A, C, W>
where
    S: LedStrip,
    A: LedStrip,
    C: MonotonicClock,
    W: WallClock,
{
    /// Create the facade
    ///
    /// Call [`init`](Self::init) before the first frame.
    pub fn new(
        strip: S,
        aux: A,
        clock: C,
        wall: W,
        led: LedConfig,
        animation: AnimationConfig,
        trend: TrendConfig,
    ) -> Self {
        Self {
            min_update_ms: animation.min_update_ms,
            state: Mutex::new(RefCell::new(LedState {
                renderer: LedRenderer::new(strip, aux, led),
                scheduler: AnimationScheduler::new(animation, trend),
                last_anim_ms: None,
            })),
            clock,
            wall,
            ctx_running: AtomicBool::new(false),
            ctx_data_valid: AtomicBool::new(false),
            background: AtomicBool::new(false),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut LedState<S, A>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Clear both strips and restart the animation clock
    pub fn init(&self) {
        let now = self.clock.now_ms();
        self.with(|st| {
            st.renderer.init(now);
            st.scheduler.restart(now);
            st.last_anim_ms = None;
        });
        info!("led: status ready");
    }

    /// Set the brightness ceiling (0.0 - 1.0)
    pub fn set_master_brightness(&self, level: f32) {
        self.with(|st| st.renderer.set_master_brightness(level));
    }

    /// Current brightness ceiling
    pub fn master_brightness(&self) -> f32 {
        self.with(|st| st.renderer.master_brightness())
    }

    /// Logical (unscaled) color currently shown
    pub fn logical_color(&self) -> RGB8 {
        self.with(|st| st.renderer.logical_color())
    }

    /// Last color physically written to the main strip
    pub fn last_written(&self) -> Option<RGB8> {
        self.with(|st| st.renderer.last_written())
    }

    /// Current animation mode
    pub fn mode(&self) -> AnimationMode {
        self.with(|st| st.scheduler.mode())
    }

    /// Current trend
    pub fn trend(&self) -> TrendState {
        self.with(|st| st.scheduler.trend())
    }

    /// Show a color directly at full animation factor
    pub fn set_color(&self, color: RGB8) {
        let now = self.clock.now_ms();
        self.with(|st| st.renderer.render(color, 1.0, now));
    }

    /// Show one of the named status colors
    pub fn set_named(&self, color: NamedColor) {
        self.set_color(color.rgb());
    }

    /// Blend linearly from the current logical color to `target`
    ///
    /// Blocks for `steps * step_delay_ms`. The lock is released while
    /// sleeping so a background task can keep servicing the strips.
    pub fn fade_to<D: DelayNs>(&self, target: RGB8, steps: u32, step_delay_ms: u32, delay: &mut D) {
        if steps == 0 {
            self.set_color(target);
            return;
        }

        let start = self.logical_color();
        for i in 1..=steps {
            let now = self.clock.now_ms();
            self.with(|st| st.renderer.fade_step(lerp(start, target, i, steps), now));
            delay.delay_ms(step_delay_ms);
        }

        let now = self.clock.now_ms();
        self.with(|st| st.renderer.finish_fade(target, now));
    }

    /// Apply a new percentage change and render the result right away
    pub fn update_for_trend(&self, change_pct: f32, data_valid: bool) {
        let now = self.clock.now_ms();
        let epoch = self.wall.synced_epoch_ms();

        let changed = self.with(|st| {
            let changed = st.scheduler.update(change_pct, data_valid, now);
            if changed.is_some() {
                st.last_anim_ms = None;
            }
            st.animate(now, epoch, data_valid);
            changed
        });

        match changed {
            Some(AnimationMode::Party) => info!("led: party mode"),
            Some(mode) => debug!("led: mode {}", mode),
            None => {}
        }
    }

    /// Main loop animation step
    ///
    /// Stores the context flags for the background task. Once background
    /// animation runs this only services the strips.
    pub fn animation_tick(&self, running: bool, data_valid: bool) {
        self.ctx_running.store(running, Ordering::Relaxed);
        self.ctx_data_valid.store(data_valid, Ordering::Relaxed);

        if self.background.load(Ordering::Acquire) {
            self.service_tick();
            return;
        }

        let now = self.clock.now_ms();
        let epoch = self.wall.synced_epoch_ms();
        let min_update = self.min_update_ms;

        self.with(|st| {
            if let Some(last) = st.last_anim_ms {
                if !has_elapsed(now, last, min_update) {
                    return;
                }
            }
            st.last_anim_ms = Some(now);

            if running {
                st.animate(now, epoch, data_valid);
            }
        });
    }

    /// Re-assert the main strip and keep the aux strip off
    pub fn service_tick(&self) {
        let now = self.clock.now_ms();
        self.with(|st| st.renderer.service(now));
    }

    /// Switch to background animation
    ///
    /// The first call returns the schedule the firmware must run
    /// [`background_tick`](Self::background_tick) on; later calls return
    /// `None`.
    pub fn start_background_animation(&self, rate_hz: u16, core: u8) -> Option<BackgroundSchedule> {
        if self.background.swap(true, Ordering::AcqRel) {
            return None;
        }

        let schedule = BackgroundSchedule::new(rate_hz, core);
        info!(
            "led: background animation every {} ms on core {}",
            schedule.period_ms,
            schedule.core
        );
        Some(schedule)
    }

    /// Check if background animation has been started
    pub fn is_background_active(&self) -> bool {
        self.background.load(Ordering::Acquire)
    }

    /// One background animation step using the last stored context
    pub fn background_tick(&self) {
        let running = self.ctx_running.load(Ordering::Relaxed);
        let data_valid = self.ctx_data_valid.load(Ordering::Relaxed);
        let now = self.clock.now_ms();
        let epoch = self.wall.synced_epoch_ms();

        self.with(|st| {
            st.renderer.service(now);
            if running {
                st.animate(now, epoch, data_valid);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use kidsbar_core::led::party_color;
    use kidsbar_core::traits::NoWallClock;

    struct MockStrip<'a> {
        shows: &'a Cell<u32>,
    }

    impl LedStrip for MockStrip<'_> {
        fn len(&self) -> usize {
            1
        }

        fn set_pixel(&mut self, _index: usize, _color: RGB8) {}

        fn show(&mut self) {
            self.shows.set(self.shows.get() + 1);
        }
    }

    struct MockClock(Cell<u32>);

    impl MonotonicClock for MockClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    struct MockDelay {
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.calls += 1;
        }

        fn delay_ms(&mut self, _ms: u32) {
            self.calls += 1;
        }
    }

    type TestStatus<'a> = LedStatus<MockStrip<'a>, MockStrip<'a>, &'a MockClock, NoWallClock>;

    fn status<'a>(shows: &'a Cell<u32>, aux: &'a Cell<u32>, clock: &'a MockClock) -> TestStatus<'a> {
        let led = LedStatus::new(
            MockStrip { shows },
            MockStrip { shows: aux },
            clock,
            NoWallClock,
            LedConfig::DEFAULT,
            AnimationConfig::DEFAULT,
            TrendConfig::DEFAULT,
        );
        led.init();
        led
    }

    #[test]
    fn test_trend_update_renders_immediately() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(100));
        let led = status(&shows, &aux, &clock);

        led.update_for_trend(1.0, true);
        assert_eq!(led.trend(), TrendState::Up);
        assert_eq!(led.last_written(), Some(RGB8::new(0, 75, 0)));

        led.update_for_trend(1.0, false);
        assert_eq!(led.last_written(), Some(RGB8::new(75, 75, 0)));
        assert_eq!(led.logical_color(), NamedColor::Yellow.rgb());
    }

    #[test]
    fn test_master_zero_renders_black() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);

        led.set_master_brightness(0.0);
        led.set_named(NamedColor::Green);
        assert_eq!(led.last_written(), Some(RGB8::new(0, 0, 0)));
        assert_eq!(led.logical_color(), NamedColor::Green.rgb());
    }

    #[test]
    fn test_animation_tick_rate_limited() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.update_for_trend(25.0, true);
        assert_eq!(led.mode(), AnimationMode::Party);

        clock.0.set(500);
        led.animation_tick(true, true);
        let after_first = shows.get();

        clock.0.set(510);
        led.animation_tick(true, true);
        assert_eq!(shows.get(), after_first);

        clock.0.set(540);
        led.animation_tick(true, true);
        assert_eq!(shows.get(), after_first + 1);
    }

    #[test]
    fn test_animation_tick_idle_when_not_running() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.update_for_trend(25.0, true);
        let before = shows.get();

        clock.0.set(700);
        led.animation_tick(false, true);
        assert_eq!(shows.get(), before);
    }

    #[test]
    fn test_party_frame_through_facade() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.set_master_brightness(1.0);
        led.update_for_trend(30.0, true);

        clock.0.set(1_250);
        led.animation_tick(true, true);
        assert_eq!(led.last_written(), Some(party_color(1_250, 2_500)));
    }

    #[test]
    fn test_background_schedule_clamped_and_once() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);

        assert!(!led.is_background_active());
        assert_eq!(
            led.start_background_animation(100, 3),
            Some(BackgroundSchedule { period_ms: 16, core: 0 })
        );
        assert!(led.is_background_active());
        assert_eq!(led.start_background_animation(30, 1), None);

        assert_eq!(BackgroundSchedule::new(1, 1), BackgroundSchedule { period_ms: 200, core: 1 });
    }

    #[test]
    fn test_background_mode_main_loop_only_services() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.update_for_trend(25.0, true);
        led.start_background_animation(30, 1);
        let before = shows.get();

        clock.0.set(100);
        led.animation_tick(true, true);
        assert_eq!(shows.get(), before);

        // Context flags reach the background tick
        led.animation_tick(true, false);
        led.background_tick();
        assert_eq!(led.last_written(), Some(RGB8::new(75, 75, 0)));
    }

    #[test]
    fn test_background_tick_without_running_only_services() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.set_named(NamedColor::Blue);
        led.start_background_animation(30, 0);
        let before = shows.get();

        clock.0.set(1_000);
        led.background_tick();
        assert_eq!(shows.get(), before);

        clock.0.set(2_000);
        led.background_tick();
        assert_eq!(shows.get(), before + 1);
        assert_eq!(led.last_written(), Some(RGB8::new(0, 0, 75)));
    }

    #[test]
    fn test_fade_reaches_target() {
        let (shows, aux) = (Cell::new(0), Cell::new(0));
        let clock = MockClock(Cell::new(0));
        let led = status(&shows, &aux, &clock);
        led.set_master_brightness(1.0);
        let before = shows.get();

        let mut delay = MockDelay { calls: 0 };
        led.fade_to(RGB8::new(100, 0, 200), 4, 15, &mut delay);

        assert_eq!(delay.calls, 4);
        assert_eq!(shows.get(), before + 4);
        assert_eq!(led.logical_color(), RGB8::new(100, 0, 200));
        assert_eq!(led.last_written(), Some(RGB8::new(100, 0, 200)));

        // Cache already matches: no extra write
        led.set_color(RGB8::new(100, 0, 200));
        assert_eq!(shows.get(), before + 4);
    }
}
