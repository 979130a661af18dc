//! Rotary input pipeline
//!
//! Raw pulse counts → [`DetentDecoder`] → [`StepAccumulator`] → navigation
//! events.

pub mod accumulator;
pub mod decoder;
pub mod events;

pub use accumulator::StepAccumulator;
pub use decoder::{DetentDecoder, PollOutcome};
pub use events::NavEvent;
