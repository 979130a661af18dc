//! KidsBar Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the coordination layer is
//! written against. Chip-specific crates implement them so the decoder and
//! LED logic can run unchanged on hardware and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kidsbar-drivers / kidsbar-firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kidsbar-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ kidsbar-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (push button)
//! - [`pcnt::PulseCounter`] - Quadrature pulse counter
//! - [`led::LedStrip`] - Addressable LED strip

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod led;
pub mod pcnt;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLowButton, InputPin};
pub use led::{LedStrip, RGB8};
pub use pcnt::{PcntConfig, PulseCounter, QuadratureMode};
