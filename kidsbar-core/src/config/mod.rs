//! Configuration types
//!
//! Board-agnostic tuning for the encoder, LED renderer, animations and
//! input dispatch.

pub mod types;

pub use types::*;
