//! Hardware abstraction traits
//!
//! Time sources consumed by the decoder and the LED engine. Peripheral
//! traits (pulse counter, LED strip, input pin) live in `kidsbar-hal`.

pub mod clock;

pub use clock::{MonotonicClock, NoWallClock, WallClock, MIN_VALID_EPOCH_MS};
