//! Peripheral drivers
//!
//! This crate wires the board-agnostic logic from `kidsbar-core` to the
//! peripheral traits from `kidsbar-hal`:
//!
//! - Encoder polling on top of a quadrature pulse counter
//! - Status LED rendering (brightness, re-assertion, aux strip forced off)
//! - The shared LED status facade used by the main loop and the optional
//!   background animation task
//! - Navigation event dispatch from encoder steps and the push button

#![no_std]
#![deny(unsafe_code)]

// Must come first so the macros are visible to the modules below
mod fmt;

pub mod encoder;
pub mod input;
pub mod led;
