//! KidsBar - desk companion firmware
//!
//! Main firmware binary for RP2040-based boards. Reads the rotary encoder
//! through an edge-driven pulse counter and shows data-feed status on a
//! WS2812 pixel, with breathing and party animations driven either from the
//! main loop or from a dedicated task on core 1.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_time::{Delay, Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kidsbar_core::input::{NavEvent, StepAccumulator};
use kidsbar_core::led::NamedColor;
use kidsbar_core::traits::{MonotonicClock, NoWallClock};
use kidsbar_drivers::encoder::PcntEncoder;
use kidsbar_drivers::input::InputDispatcher;
use kidsbar_drivers::led::{BackgroundSchedule, LedStatus};
use kidsbar_hal_rp2040::{ButtonPin, PcntUnit, Ws2812Strip};

use crate::channels::{TrendSample, TREND_FEED};
use crate::clock::EmbassyClock;

mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// External status strip (PIO0 SM0)
type StatusStrip = Ws2812Strip<'static, PIO0, 0, { config::STATUS_PIXELS }>;
/// On-board pixel, kept dark (PIO0 SM1)
type BoardStrip = Ws2812Strip<'static, PIO0, 1, 1>;

/// Shared status LED
pub type Led = LedStatus<StatusStrip, BoardStrip, EmbassyClock, NoWallClock>;

/// Boot fade length
const BOOT_FADE_STEPS: u32 = 20;
const BOOT_FADE_STEP_MS: u32 = 15;

static STEPS: StepAccumulator = StepAccumulator::new();
static PCNT: PcntUnit = PcntUnit::new();

// Static cells for shared state (must live forever for task references)
static LED: StaticCell<Led> = StaticCell::new();
static CORE1_STACK: StaticCell<Stack<4096>> = StaticCell::new();
static CORE1_EXECUTOR: StaticCell<Executor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("KidsBar firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Encoder: A/B on GPIO2/3, push button on GPIO4 (board-specific)
    let enc_a = Input::new(p.PIN_2, Pull::Up);
    let enc_b = Input::new(p.PIN_3, Pull::Up);
    unwrap!(spawner.spawn(tasks::pcnt_task(&PCNT, enc_a, enc_b)));

    let mut encoder = PcntEncoder::new(&PCNT, EmbassyClock, config::ENCODER, &STEPS);
    encoder.init();
    let mut input = InputDispatcher::new(&STEPS, ButtonPin::new(p.PIN_4), config::DISPATCH);

    info!("Encoder initialized");

    // Status LEDs: external strip on GPIO15, on-board pixel on GPIO16
    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let strip = Ws2812Strip::new(&mut common, sm0, p.DMA_CH0, p.PIN_15, &program);
    let board = Ws2812Strip::new(&mut common, sm1, p.DMA_CH1, p.PIN_16, &program);

    let led: &'static Led = LED.init(LedStatus::new(
        strip,
        board,
        EmbassyClock,
        NoWallClock,
        config::LED,
        config::ANIMATION,
        config::TREND,
    ));
    led.init();
    led.set_named(NamedColor::Green);

    info!("Status LED initialized");

    if config::BACKGROUND_ANIMATION {
        let anim = config::ANIMATION;
        if let Some(schedule) =
            led.start_background_animation(anim.background_rate_hz, anim.background_core)
        {
            spawn_led_animation(spawner, p.CORE1, led, schedule);
        }
    }

    led.fade_to(NamedColor::Off.rgb(), BOOT_FADE_STEPS, BOOT_FADE_STEP_MS, &mut Delay);

    info!("Firmware running");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(
        config::ENCODER.poll_interval_ms,
    )));
    let mut feed = TrendSample {
        change_pct: 0.0,
        valid: false,
    };
    // The UI state machine owns this flag (false during setup screens and
    // blocking refreshes); it is not part of this image, so input stays live
    let running = true;

    loop {
        ticker.next().await;

        encoder.poll(running);
        input.update(EmbassyClock.now_ms());
        while let Some(event) = input.next_event() {
            match event {
                NavEvent::LongPress => info!("Input: long press"),
                _ => debug!("Input: {}", event),
            }
        }

        if let Some(sample) = TREND_FEED.try_take() {
            feed = sample;
            led.update_for_trend(sample.change_pct, sample.valid);
        }

        led.animation_tick(running, feed.valid);
        led.service_tick();
    }
}

/// Start the background animation task on the requested core
fn spawn_led_animation(
    spawner: Spawner,
    core1: embassy_rp::Peri<'static, embassy_rp::peripherals::CORE1>,
    led: &'static Led,
    schedule: BackgroundSchedule,
) {
    if schedule.core == 0 {
        unwrap!(spawner.spawn(tasks::led_anim_task(led, schedule.period_ms)));
        return;
    }

    let stack = CORE1_STACK.init_with(Stack::new);
    spawn_core1(core1, stack, move || {
        let executor = CORE1_EXECUTOR.init(Executor::new());
        executor.run(|spawner| {
            unwrap!(spawner.spawn(tasks::led_anim_task(led, schedule.period_ms)));
        })
    });
}
