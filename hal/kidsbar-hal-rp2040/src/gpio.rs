//! Push button input

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use kidsbar_hal::gpio::InputPin;

/// Encoder push button with the internal pull-up enabled
pub struct ButtonPin<'d> {
    input: Input<'d>,
}

impl<'d> ButtonPin<'d> {
    /// Configure a pin as a pulled-up input
    pub fn new<P: Pin>(pin: Peri<'d, P>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for ButtonPin<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
