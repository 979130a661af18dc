//! RP2040-specific HAL for KidsBar firmware
//!
//! Implements the `kidsbar-hal` traits on top of embassy-rp:
//!
//! - WS2812 strip output through the embassy-rp PIO program
//! - Edge-driven quadrature pulse counter (the RP2040 has no PCNT block)
//! - Push button input

#![no_std]

pub mod gpio;
pub mod pcnt;
pub mod ws2812;

pub use gpio::ButtonPin;
pub use pcnt::PcntUnit;
pub use ws2812::Ws2812Strip;
