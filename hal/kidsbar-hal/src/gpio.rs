//! GPIO pin abstractions
//!
//! Only digital inputs are needed by the peripheral layer: the encoder push
//! button is read as a plain level and debounced by the consumer.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Push button wired between the pin and ground with a pull-up
///
/// Reports `pressed` when the pin reads low.
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    /// Wrap an input pin that idles high
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the button is currently held down
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}
