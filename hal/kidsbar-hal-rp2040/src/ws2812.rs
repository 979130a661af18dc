//! WS2812 strip output
//!
//! Wraps embassy-rp's PIO WS2812 driver behind the blocking [`LedStrip`]
//! trait. The frame goes out over DMA and the driver then holds the line
//! low for the latch time, so back-to-back [`LedStrip::show`] calls always
//! latch as separate frames.
//!
//! `show` blocks for about `30 us * N` plus the latch gap. It is called with
//! the status LED lock held, so keep strips short.

use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812, PioWs2812Program};
use embassy_rp::Peri;
use kidsbar_hal::led::{LedStrip, BLACK};
use smart_leds::RGB8;

/// WS2812 strip with `N` pixels on one PIO state machine
pub struct Ws2812Strip<'d, PIO: Instance, const SM: usize, const N: usize> {
    driver: PioWs2812<'d, PIO, SM, N, Grb>,
    pixels: [RGB8; N],
}

impl<'d, PIO: Instance, const SM: usize, const N: usize> Ws2812Strip<'d, PIO, SM, N> {
    /// Start the state machine with an already loaded WS2812 program
    ///
    /// One [`PioWs2812Program`] per PIO block serves every strip on it.
    pub fn new(
        common: &mut Common<'d, PIO>,
        sm: StateMachine<'d, PIO, SM>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
        program: &PioWs2812Program<'d, PIO>,
    ) -> Self {
        Self {
            driver: PioWs2812::new(common, sm, dma, pin, program),
            pixels: [BLACK; N],
        }
    }
}

impl<'d, PIO: Instance, const SM: usize, const N: usize> LedStrip for Ws2812Strip<'d, PIO, SM, N> {
    fn len(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    fn show(&mut self) {
        // The DMA and latch futures poll hardware state, so spinning on them
        // completes even with interrupts masked
        embassy_futures::block_on(self.driver.write(&self.pixels));
    }
}
