//! Board-agnostic core logic for the KidsBar peripheral layer
//!
//! This crate contains the parts of the firmware that do not depend on
//! specific hardware implementations:
//!
//! - Encoder detent decoding, rate limiting and bounce filtering
//! - The shared step accumulator between decoder and input dispatch
//! - Trend classification with hysteresis
//! - LED animation scheduling (solid, breathing, party)
//! - Clock traits and wraparound-safe time arithmetic
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod led;
pub mod time;
pub mod traits;
